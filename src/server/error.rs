use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

use crate::types::ErrorReply;

/// Everything that can go wrong while handling a chat request. All variants
/// are converted to the `{error, details?}` JSON shape at the handler
/// boundary; nothing escapes as a panic.
#[derive(Debug, Error)]
pub enum ProxyError {
    #[error("Message is required")]
    MissingMessage,
    #[error("GEMINI_API_KEY is not configured")]
    MissingApiKey,
    #[error("upstream API error: {0}")]
    Upstream(String),
    #[error("upstream reply missing candidates[0].content.parts[0].text")]
    Format,
    #[error("failed to reach upstream: {0}")]
    Transport(#[from] reqwest::Error),
}

impl ProxyError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::MissingMessage => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// The `error` field shown to callers. Configuration and transport
    /// failures stay generic; internals go to the log instead.
    pub fn public_message(&self) -> &'static str {
        match self {
            Self::MissingMessage => "Message is required",
            Self::MissingApiKey => "Server configuration error",
            Self::Upstream(_) => "Upstream API error",
            Self::Format => "Unexpected response format from the language model",
            Self::Transport(_) => "Error processing your request",
        }
    }

    /// The `details` field. Upstream status/body text is not sensitive and is
    /// always passed through; transport internals are echoed only when the
    /// deployment allows it.
    pub fn details(&self, expose_internal: bool) -> Option<String> {
        match self {
            Self::Upstream(message) => Some(message.clone()),
            Self::Format => Some("missing candidates[0].content.parts[0].text".to_string()),
            Self::Transport(err) if expose_internal => Some(err.to_string()),
            _ => None,
        }
    }

    pub fn into_response(self, expose_internal: bool) -> Response {
        let body = ErrorReply {
            error: self.public_message().to_string(),
            details: self.details(expose_internal),
        };
        (self.status(), Json(body)).into_response()
    }
}
