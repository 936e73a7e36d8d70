use dioxus::prelude::*;

use crate::session::ChatSession;
use crate::storage::Store;
use crate::theme::save_theme;
use crate::types::ThemeMode;
#[cfg(not(target_arch = "wasm32"))]
use crate::views::shared::export_transcript;

#[component]
pub fn SettingsView(session: Signal<ChatSession>, theme: Signal<ThemeMode>) -> Element {
    let mut status = use_signal(String::new);

    let on_theme_toggle = {
        let mut theme = theme;
        move |_| {
            let next = theme().toggled();
            theme.set(next);
            save_theme(&Store::new("default"), next);
        }
    };

    let on_clear = {
        let mut session = session;
        let mut status = status;
        move |_| {
            session.with_mut(|s| s.clear());
            status.set("History cleared".to_string());
        }
    };

    let on_export = {
        let session = session;
        let mut status = status;
        move |_| {
            #[cfg(not(target_arch = "wasm32"))]
            {
                let exported = session.with(|s| export_transcript(s));
                match exported {
                    Some(path) => status.set(format!("Exported to {}", path.display())),
                    None => status.set("Nothing to export".to_string()),
                }
            }
            #[cfg(target_arch = "wasm32")]
            status.set("Export is not available on web".to_string());
        }
    };

    let on_share = {
        let session = session;
        let mut status = status;
        move |_| {
            let url = session.read().share_url();
            match url {
                Some(url) => {
                    #[cfg(any(feature = "desktop", feature = "mobile"))]
                    if let Ok(mut cb) = arboard::Clipboard::new() {
                        let _ = cb.set_text(url.clone());
                    }
                    status.set(format!("Share link ready: {url}"));
                }
                None => status.set("No bot reply to share yet".to_string()),
            }
        }
    };

    rsx! {
        div { class: "main-container",
            div { class: "settings-list",
                div { class: "settings-row",
                    span { "Theme" }
                    button { class: "btn", onclick: on_theme_toggle, "{theme().toggled().as_str()} mode" }
                }
                div { class: "settings-row",
                    span { "Export transcript" }
                    button { class: "btn", onclick: on_export, "Export JSON" }
                }
                div { class: "settings-row",
                    span { "Share latest reply" }
                    button { class: "btn", onclick: on_share, "Copy share link" }
                }
                div { class: "settings-row",
                    span { "Clear history" }
                    button { class: "btn", onclick: on_clear, "Clear" }
                }
                if !status().is_empty() {
                    div { class: "settings-note", "{status}" }
                }
            }
        }
    }
}
