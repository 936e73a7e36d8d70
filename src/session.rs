//! Explicit client session state: the transcript, the personality flag, and
//! the store they persist through. The UI owns one of these instead of
//! ambient module globals, so the send path is testable without a DOM.

use tracing::warn;

use crate::storage::Store;
use crate::types::{ChatMessage, PersonalityMode, Sender};

pub const HISTORY_KEY: &str = "history";

/// Cap for the social-post excerpt, in characters.
pub const SHARE_EXCERPT_MAX: usize = 180;

const SHARE_INTENT_URL: &str = "https://twitter.com/intent/tweet?text=";

pub struct ChatSession {
    store: Store,
    transcript: Vec<ChatMessage>,
    pub mode: PersonalityMode,
}

impl ChatSession {
    pub fn new(profile: &str) -> Self {
        Self::with_store(Store::new(profile))
    }

    /// Restores any persisted transcript. Restored messages are replayed by
    /// the view without animation; only live arrivals get the typewriter.
    pub fn with_store(store: Store) -> Self {
        let transcript = store
            .get(HISTORY_KEY)
            .and_then(|raw| serde_json::from_str(&raw).ok())
            .unwrap_or_default();
        Self {
            store,
            transcript,
            mode: PersonalityMode::default(),
        }
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.transcript
    }

    pub fn len(&self) -> usize {
        self.transcript.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transcript.is_empty()
    }

    pub fn push_user(&mut self, text: &str) {
        self.push(Sender::User, text);
    }

    pub fn push_bot(&mut self, text: &str) {
        self.push(Sender::Bot, text);
    }

    /// Failed sends still get a transcript entry; a send is never silently
    /// dropped.
    pub fn push_error(&mut self, text: &str) {
        self.push(Sender::Bot, text);
    }

    fn push(&mut self, sender: Sender, text: &str) {
        self.transcript.push(ChatMessage::now(sender, text));
        self.save();
    }

    fn save(&self) {
        match serde_json::to_string(&self.transcript) {
            Ok(raw) => {
                if let Err(err) = self.store.set(HISTORY_KEY, &raw) {
                    warn!("failed to persist transcript: {err}");
                }
            }
            Err(err) => warn!("failed to serialize transcript: {err}"),
        }
    }

    /// Empties the in-memory transcript and deletes the persisted copy.
    pub fn clear(&mut self) {
        self.transcript.clear();
        if let Err(err) = self.store.remove(HISTORY_KEY) {
            warn!("failed to delete persisted transcript: {err}");
        }
    }

    pub fn export_json(&self) -> String {
        serde_json::to_string_pretty(&self.transcript).unwrap_or_else(|_| "[]".to_string())
    }

    pub fn last_bot_text(&self) -> Option<&str> {
        self.transcript
            .iter()
            .rev()
            .find(|msg| msg.sender == Sender::Bot)
            .map(|msg| msg.text.as_str())
    }

    /// The most recent bot reply, truncated on a char boundary.
    pub fn share_excerpt(&self) -> Option<String> {
        self.last_bot_text()
            .map(|text| text.chars().take(SHARE_EXCERPT_MAX).collect())
    }

    /// Pre-filled post intent URL for the latest bot reply.
    pub fn share_url(&self) -> Option<String> {
        self.share_excerpt()
            .map(|excerpt| format!("{SHARE_INTENT_URL}{}", urlencoding::encode(&excerpt)))
    }
}
