use comrak::{ComrakOptions, markdown_to_html_with_plugins, ComrakPlugins};
use once_cell::sync::Lazy;

#[cfg(not(target_arch = "wasm32"))]
use std::{
    fs,
    path::PathBuf,
    time::{SystemTime, UNIX_EPOCH},
};

#[cfg(not(target_arch = "wasm32"))]
use crate::session::ChatSession;

pub const EXPORT_DIR: &str = "cache/exports";

static MARKDOWN_OPTIONS: Lazy<ComrakOptions> = Lazy::new(|| {
    let mut options = ComrakOptions::default();
    options.extension.table = true;
    options.extension.strikethrough = true;
    options
});

/// True when a reply should render in the monospace code container instead of
/// the animated bubble: fenced code blocks or box-drawing art.
pub fn looks_like_code(text: &str) -> bool {
    text.contains("```") || text.chars().any(is_box_drawing)
}

fn is_box_drawing(c: char) -> bool {
    ('\u{2500}'..='\u{257F}').contains(&c)
}

/// HTML for code-like replies. Fenced blocks go through the markdown
/// renderer; box-drawing art is kept verbatim inside a `pre`.
pub fn render_code_html(text: &str) -> String {
    if text.contains("```") {
        let plugins = ComrakPlugins::default();
        markdown_to_html_with_plugins(text, &MARKDOWN_OPTIONS, &plugins)
    } else {
        format!("<pre>{}</pre>", escape_html(text))
    }
}

fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Writes the transcript as a downloadable JSON file and returns its path.
#[cfg(not(target_arch = "wasm32"))]
pub fn export_transcript(session: &ChatSession) -> Option<PathBuf> {
    if session.is_empty() {
        return None;
    }

    if let Err(err) = fs::create_dir_all(EXPORT_DIR) {
        tracing::warn!("failed to create export directory: {err}");
        return None;
    }

    let timestamp = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs();
    let path = PathBuf::from(EXPORT_DIR).join(format!("transcript-{timestamp}.json"));
    if let Err(err) = fs::write(&path, session.export_json()) {
        tracing::warn!("failed to write transcript export: {err}");
        return None;
    }
    Some(path)
}
