use crate::api::ProxyClient;
use crate::session::ChatSession;
use crate::types::{ChatMessage, Sender};
use crate::views::shared::{looks_like_code, render_code_html};
use dioxus::events::Key;
use dioxus::prelude::*;
use once_cell::sync::Lazy;
use std::time::Duration;
use time::{
    OffsetDateTime, UtcOffset, format_description::FormatItem,
    format_description::well_known::Rfc3339, macros::format_description,
};

/// Fixed per-character reveal cadence for live bot replies.
const TYPEWRITER_INTERVAL: Duration = Duration::from_millis(20);

const GREETING: &str = "Hello! I'm your dual-personality chatbot. \
Toggle the switch to change between nice and angry mode!";

const MESSAGE_TIME_FORMAT: &[FormatItem<'static>] =
    format_description!("[hour repr:12 padding:zero]:[minute padding:zero] [period case:upper]");

static PROXY: Lazy<ProxyClient> = Lazy::new(ProxyClient::from_env);

/// Typewriter position: which message is animating and how many chars show.
#[derive(Clone, Copy, Debug, PartialEq)]
struct Reveal {
    index: usize,
    shown: usize,
}

fn displayed_text(msg: &ChatMessage, reveal: Option<Reveal>, index: usize) -> String {
    match reveal {
        Some(r) if r.index == index => msg.text.chars().take(r.shown).collect(),
        _ => msg.text.clone(),
    }
}

fn format_message_timestamp(raw: &str) -> Option<String> {
    let mut datetime = OffsetDateTime::parse(raw, &Rfc3339).ok()?;
    if let Ok(offset) = UtcOffset::current_local_offset() {
        datetime = datetime.to_offset(offset);
    }
    datetime.format(MESSAGE_TIME_FORMAT).ok()
}

fn sender_class(sender: Sender) -> &'static str {
    match sender {
        Sender::User => "user",
        Sender::Bot => "bot",
    }
}

#[component]
pub fn ChatView(session: Signal<ChatSession>) -> Element {
    let mut input = use_signal(String::new);
    let sending = use_signal(|| false);
    let reveal = use_signal(|| Option::<Reveal>::None);
    let animation_gen = use_signal(|| 0u64);

    let mut send_message = {
        let mut session = session;
        let mut sending_signal = sending;
        let mut input_signal = input;
        let mut reveal = reveal;
        let mut animation_gen = animation_gen;
        move |text: String| {
            let trimmed = text.trim().to_string();
            if trimmed.is_empty() || sending_signal() {
                return;
            }

            // A new send cancels any in-progress reveal; the cancelled
            // message snaps to its full text.
            animation_gen.set(animation_gen() + 1);
            reveal.set(None);

            let mode = session.read().mode;
            session.with_mut(|s| s.push_user(&trimmed));
            input_signal.set(String::new());
            sending_signal.set(true);

            spawn(async move {
                let reply_text = match PROXY.send(&trimmed, mode).await {
                    Ok(reply) => {
                        session.with_mut(|s| s.push_bot(&reply));
                        reply
                    }
                    Err(err) => {
                        let text = format!("Error processing your request: {err}");
                        session.with_mut(|s| s.push_error(&text));
                        text
                    }
                };
                let index = session.read().len() - 1;
                sending_signal.set(false);

                // Code-like replies render instantly; everything else types
                // out at the fixed cadence.
                if looks_like_code(&reply_text) {
                    return;
                }
                let my_gen = animation_gen() + 1;
                animation_gen.set(my_gen);
                let total = reply_text.chars().count();
                reveal.set(Some(Reveal { index, shown: 0 }));
                for shown in 1..=total {
                    tokio::time::sleep(TYPEWRITER_INTERVAL).await;
                    if animation_gen() != my_gen {
                        return;
                    }
                    reveal.set(Some(Reveal { index, shown }));
                }
                if animation_gen() == my_gen {
                    reveal.set(None);
                }
            });
        }
    };

    let messages_snapshot: Vec<ChatMessage> = session.read().messages().to_vec();
    let current_reveal = reveal();

    rsx! {
        div { class: "main-container",
            div { class: "chat-wrap",
                div { id: "chat-list", class: "chat-list",
                    div { class: "message-row bot",
                        div { class: "bubble bot greeting", "{GREETING}" }
                    }
                    for (i, msg) in messages_snapshot.iter().enumerate() {
                        div { class: format_args!("message-row {}", sender_class(msg.sender)),
                            div { class: "message-stack",
                                if msg.sender == Sender::Bot && looks_like_code(&msg.text) {
                                    div { class: "bubble bot code-block",
                                        dangerous_inner_html: render_code_html(&msg.text),
                                    }
                                } else if msg.sender == Sender::Bot {
                                    BotBubble {
                                        content: displayed_text(msg, current_reveal, i),
                                        full_content: msg.text.clone(),
                                        show_copy: match current_reveal { Some(r) => r.index != i, None => true },
                                    }
                                } else {
                                    div { class: "bubble user", "{msg.text}" }
                                }
                                if let Some(ts) = format_message_timestamp(&msg.timestamp) {
                                    div { class: format_args!(
                                            "message-meta {}",
                                            match msg.sender { Sender::User => "align-end", Sender::Bot => "align-start" }
                                        ),
                                        "{ts}"
                                    }
                                }
                            }
                        }
                    }
                    if sending() {
                        div { class: "message-row bot",
                            div { class: "bubble bot",
                                span { class: "shimmer-text", "Processing…" }
                            }
                        }
                    }
                }
            }

            form { class: "composer",
                div { class: "composer-inner",
                    textarea {
                        rows: "1",
                        placeholder: "Say something…",
                        value: "{input}",
                        oninput: move |ev| input.set(ev.value()),
                        onkeydown: move |ev| {
                            if ev.key() == Key::Enter && !ev.modifiers().shift() {
                                ev.prevent_default();
                                let text = input();
                                send_message(text);
                            }
                        },
                        disabled: sending(),
                        autofocus: true,
                    }
                    button {
                        class: "btn",
                        r#type: "button",
                        disabled: sending() || input().trim().is_empty(),
                        onclick: move |_| {
                            let text = input();
                            send_message(text);
                        },
                        "Send"
                    }
                }
            }
        }
    }
}

#[component]
fn BotBubble(content: String, full_content: String, show_copy: bool) -> Element {
    let copy_payload = full_content.clone();
    let on_copy = move |_| {
        let raw = copy_payload.clone();
        spawn(async move {
            #[cfg(any(feature = "desktop", feature = "mobile"))]
            {
                if let Ok(mut cb) = arboard::Clipboard::new() {
                    let _ = cb.set_text(raw);
                }
            }
            #[cfg(not(any(feature = "desktop", feature = "mobile")))]
            let _ = raw;
        });
    };

    rsx! {
        div { class: "bubble bot",
            if show_copy {
                div { class: "bubble-controls",
                    button { class: "action-btn", title: "Copy reply", onclick: on_copy, "Copy" }
                }
            }
            "{content}"
        }
    }
}
