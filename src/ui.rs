use dioxus::prelude::*;

use crate::session::ChatSession;
use crate::storage::Store;
use crate::theme::{BASE_CSS, load_theme, theme_definition};
use crate::types::ThemeMode;
use crate::views::{ChatView, SettingsView};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum AppTab {
    Chat,
    Settings,
}

#[component]
pub fn App() -> Element {
    let session = use_signal(|| ChatSession::new("default"));
    let theme = use_signal(|| load_theme(&Store::new("default")));
    let active_tab = use_signal(|| AppTab::Chat);

    rsx! {
        ThemeStyles { theme }
        AppHeader { active_tab, session }
        TabPanels { active_tab, session, theme }
    }
}

#[component]
fn ThemeStyles(theme: Signal<ThemeMode>) -> Element {
    let definition = theme_definition(theme());
    rsx! {
        style { dangerous_inner_html: "{definition.css}" }
        style { dangerous_inner_html: "{BASE_CSS}" }
    }
}

#[component]
fn AppHeader(active_tab: Signal<AppTab>, session: Signal<ChatSession>) -> Element {
    let mut session = session;
    let mode = session.read().mode;
    rsx! {
        div { class: "header",
            span { class: "header-title", "moodchat" }
            TabNavigation { active_tab }
            div { class: "header-controls",
                button {
                    class: "btn",
                    title: "Toggle personality",
                    onclick: move |_| session.with_mut(|s| s.mode = s.mode.toggled()),
                    "{mode.label()} mode"
                }
            }
        }
    }
}

#[component]
fn TabNavigation(active_tab: Signal<AppTab>) -> Element {
    rsx! {
        div { class: "tabs",
            TabButton { active_tab, tab: AppTab::Chat, label: "Chat" }
            TabButton { active_tab, tab: AppTab::Settings, label: "Settings" }
        }
    }
}

#[component]
fn TabButton(active_tab: Signal<AppTab>, tab: AppTab, label: &'static str) -> Element {
    let mut active_tab = active_tab;
    let class = if active_tab() == tab { "tab active" } else { "tab" };
    rsx! {
        h1 {
            class: class,
            onclick: move |_| active_tab.set(tab),
            "{label}"
        }
    }
}

#[component]
fn TabPanels(
    active_tab: Signal<AppTab>,
    session: Signal<ChatSession>,
    theme: Signal<ThemeMode>,
) -> Element {
    rsx! {
        div { class: "tab-panels",
            TabPanel {
                active_tab,
                tab: AppTab::Chat,
                children: rsx!( ChatView { session } ),
            }
            TabPanel {
                active_tab,
                tab: AppTab::Settings,
                children: rsx!( SettingsView { session, theme } ),
            }
        }
    }
}

#[component]
fn TabPanel(active_tab: Signal<AppTab>, tab: AppTab, children: Element) -> Element {
    let is_active = active_tab() == tab;
    let class_suffix = if is_active { "active" } else { "" };
    rsx! {
        div {
            class: format_args!("tab-panel {}", class_suffix),
            aria_hidden: (!is_active).to_string(),
            {children}
        }
    }
}
