//! Client side of the proxy endpoint.

use std::env;
use std::fmt;

use crate::types::{ChatReply, ChatRequest, ErrorReply, PersonalityMode};

const DEFAULT_SERVER: &str = "http://127.0.0.1:3000";

#[derive(Debug, Clone)]
pub struct ApiError(String);

impl ApiError {
    fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::error::Error for ApiError {}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        ApiError::new(err.to_string())
    }
}

pub struct ProxyClient {
    client: reqwest::Client,
    base_url: String,
}

impl ProxyClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into(),
        }
    }

    /// Proxy address from `MOODCHAT_SERVER`, defaulting to the local server.
    pub fn from_env() -> Self {
        let base_url = env::var("MOODCHAT_SERVER").unwrap_or_else(|_| DEFAULT_SERVER.to_string());
        Self::new(base_url)
    }

    /// One stateless request: the message and the personality flag go up,
    /// the post-processed reply comes back.
    pub async fn send(&self, message: &str, mode: PersonalityMode) -> Result<String, ApiError> {
        let request = ChatRequest {
            message: Some(message.to_string()),
            is_angry_mode: mode.is_angry(),
        };

        let response = self
            .client
            .post(format!("{}/api/chat", self.base_url))
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            if let Ok(reply) = serde_json::from_str::<ErrorReply>(&body) {
                return Err(ApiError::new(reply.error));
            }
            return Err(ApiError::new(format!("proxy error {status}: {body}")));
        }

        let reply: ChatReply = serde_json::from_str(&body)
            .map_err(|_| ApiError::new("malformed reply from proxy"))?;
        Ok(reply.response)
    }
}
