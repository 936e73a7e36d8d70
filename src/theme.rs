use crate::storage::Store;
use crate::types::ThemeMode;

pub const THEME_KEY: &str = "theme";

pub struct ThemeDefinition {
    pub css: &'static str,
    pub label: &'static str,
}

pub fn theme_definition(mode: ThemeMode) -> ThemeDefinition {
    match mode {
        ThemeMode::Dark => ThemeDefinition {
            css: DARK_THEME,
            label: "Dark",
        },
        ThemeMode::Light => ThemeDefinition {
            css: LIGHT_THEME,
            label: "Light",
        },
    }
}

pub fn load_theme(store: &Store) -> ThemeMode {
    store
        .get(THEME_KEY)
        .and_then(|raw| ThemeMode::parse(raw.trim()))
        .unwrap_or_default()
}

pub fn save_theme(store: &Store, mode: ThemeMode) {
    if let Err(err) = store.set(THEME_KEY, mode.as_str()) {
        tracing::warn!("failed to persist theme preference: {err}");
    }
}

const DARK_THEME: &str = r#"
:root {
    --color-bg-primary: #101014;
    --color-bg-secondary: #17171c;
    --color-text-primary: #e8e8e8;
    --color-text-muted: #9b9b9b;
    --color-border: #2e2e36;
    --color-input-bg: #101014;
    --color-input-border: #2e2e36;
    --color-chat-user-bg: #24324a;
    --color-chat-user-text: #dce8ff;
    --color-chat-bot-bg: #191f17;
    --color-chat-bot-text: #d8e6c8;
    --color-greentext: #789922;
    --color-code-bg: #0b0b0e;
    --color-timestamp: #6e6e78;
}
body { background: var(--color-bg-primary); color: var(--color-text-primary); }
.composer textarea { background: var(--color-input-bg); color: var(--color-text-primary); border-color: var(--color-input-border); }
.composer textarea:focus { border-color: var(--color-text-muted); }
"#;

const LIGHT_THEME: &str = r#"
:root {
    --color-bg-primary: #f7f7f5;
    --color-bg-secondary: #ededea;
    --color-text-primary: #1a1a1a;
    --color-text-muted: #5e5e5e;
    --color-border: #c9c9c2;
    --color-input-bg: #ffffff;
    --color-input-border: #c9c9c2;
    --color-chat-user-bg: #d7e4ff;
    --color-chat-user-text: #14233c;
    --color-chat-bot-bg: #e8f0dc;
    --color-chat-bot-text: #23321a;
    --color-greentext: #4e7a10;
    --color-code-bg: #ececec;
    --color-timestamp: #767670;
}
body { background: var(--color-bg-primary); color: var(--color-text-primary); }
.composer textarea { background: var(--color-input-bg); color: var(--color-text-primary); border-color: var(--color-input-border); }
.composer textarea:focus { border-color: var(--color-text-muted); }
"#;

/// Layout rules shared by both themes.
pub const BASE_CSS: &str = r#"
* { box-sizing: border-box; }
body { margin: 0; font-family: ui-monospace, SFMono-Regular, Menlo, monospace; }
.header { display: flex; align-items: center; justify-content: space-between; padding: 0.6rem 1rem; border-bottom: 1px solid var(--color-border); }
.header-title { font-weight: 700; letter-spacing: 0.06em; }
.header-controls { display: flex; gap: 0.5rem; }
.tabs { display: flex; gap: 0.75rem; }
.tab { font-size: 1rem; margin: 0; cursor: pointer; color: var(--color-text-muted); }
.tab.active { color: var(--color-text-primary); text-decoration: underline; }
.tab-panel { display: none; }
.tab-panel.active { display: block; }
.main-container { max-width: 52rem; margin: 0 auto; padding: 0 1rem; }
.chat-list { display: flex; flex-direction: column; gap: 0.6rem; padding: 1rem 0 7rem 0; overflow-y: auto; }
.message-row { display: flex; }
.message-row.user { justify-content: flex-end; }
.message-row.bot { justify-content: flex-start; }
.bubble { max-width: 85%; padding: 0.55rem 0.8rem; border-radius: 6px; white-space: pre-wrap; overflow-wrap: anywhere; }
.bubble.user { background: var(--color-chat-user-bg); color: var(--color-chat-user-text); }
.bubble.bot { background: var(--color-chat-bot-bg); color: var(--color-chat-bot-text); }
.bubble.greeting { opacity: 0.85; }
.bubble.code-block { font-family: inherit; background: var(--color-code-bg); border: 1px solid var(--color-border); }
.bubble.code-block pre { margin: 0; overflow-x: auto; }
.message-meta { font-size: 0.7rem; color: var(--color-timestamp); margin-top: 0.15rem; }
.message-meta.align-end { text-align: right; }
.bubble-controls { display: flex; justify-content: flex-end; }
.action-btn { font-size: 0.7rem; background: none; border: 1px solid var(--color-border); color: var(--color-text-muted); cursor: pointer; border-radius: 4px; }
.action-btn:hover { color: var(--color-text-primary); }
.shimmer-text { color: var(--color-text-muted); animation: pulse 1.2s ease-in-out infinite; }
@keyframes pulse { 0%, 100% { opacity: 0.45; } 50% { opacity: 1; } }
.composer { position: fixed; bottom: 0; left: 0; right: 0; padding: 0.75rem 1rem 1rem; background: var(--color-bg-secondary); border-top: 1px solid var(--color-border); }
.composer-inner { max-width: 52rem; margin: 0 auto; display: flex; gap: 0.5rem; align-items: flex-end; }
.composer textarea { flex: 1; resize: none; border: 1px solid; border-radius: 6px; padding: 0.5rem; font-family: inherit; font-size: 0.95rem; }
.btn { padding: 0.5rem 0.9rem; cursor: pointer; border: 1px solid var(--color-border); background: var(--color-bg-primary); color: var(--color-text-primary); border-radius: 6px; }
.btn:disabled { opacity: 0.5; cursor: default; }
.settings-list { display: flex; flex-direction: column; gap: 0.75rem; padding: 1.25rem 0; max-width: 24rem; }
.settings-row { display: flex; justify-content: space-between; align-items: center; gap: 1rem; }
.settings-note { font-size: 0.8rem; color: var(--color-text-muted); }
"#;
