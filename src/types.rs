use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    User,
    Bot,
}

/// One transcript entry. The timestamp is captured at append time as an
/// RFC 3339 string so the persisted form round-trips unchanged.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub sender: Sender,
    pub text: String,
    pub timestamp: String,
}

impl ChatMessage {
    pub fn now(sender: Sender, text: impl Into<String>) -> Self {
        let timestamp = OffsetDateTime::now_utc()
            .format(&Rfc3339)
            .unwrap_or_default();
        Self {
            sender,
            text: text.into(),
            timestamp,
        }
    }
}

/// Which persona the proxy applies. Held in client memory only; it is not
/// persisted across reloads.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PersonalityMode {
    #[default]
    Nice,
    Angry,
}

impl PersonalityMode {
    pub fn is_angry(self) -> bool {
        matches!(self, Self::Angry)
    }

    pub fn from_angry_flag(angry: bool) -> Self {
        if angry { Self::Angry } else { Self::Nice }
    }

    pub fn toggled(self) -> Self {
        match self {
            Self::Nice => Self::Angry,
            Self::Angry => Self::Nice,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Nice => "Nice",
            Self::Angry => "Angry",
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ThemeMode {
    #[default]
    Dark,
    Light,
}

impl ThemeMode {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Dark => "dark",
            Self::Light => "light",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "dark" => Some(Self::Dark),
            "light" => Some(Self::Light),
            _ => None,
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Self::Dark => Self::Light,
            Self::Light => Self::Dark,
        }
    }
}

// --- Wire types for POST /api/chat ---

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatRequest {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub is_angry_mode: bool,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ChatReply {
    pub response: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ErrorReply {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct HealthReply {
    pub status: String,
    pub timestamp: String,
    #[serde(rename = "apiKey")]
    pub api_key: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CheckReply {
    pub status: String,
}
