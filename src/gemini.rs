//! Typed client for the Gemini `generateContent` endpoint.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::env;
use std::time::Duration;

use crate::server::ProxyError;

const GEMINI_API_URL: &str =
    "https://generativelanguage.googleapis.com/v1beta/models/gemini-pro:generateContent";

/// The source had no timeout at all; a hung upstream call would wedge the
/// caller forever. Bounded here, still with no retry.
const UPSTREAM_TIMEOUT: Duration = Duration::from_secs(120);

/// The generative-text collaborator behind `/api/chat`. Tests swap in a stub
/// that records calls and returns canned replies.
#[async_trait]
pub trait Upstream: Send + Sync {
    async fn generate(&self, prompt: &str) -> Result<String, ProxyError>;
}

pub struct GeminiClient {
    client: reqwest::Client,
    api_key: String,
}

impl GeminiClient {
    pub fn new(api_key: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key,
        }
    }

    /// `None` when `GEMINI_API_KEY` is unset or empty.
    pub fn from_env() -> Option<Self> {
        env::var("GEMINI_API_KEY")
            .ok()
            .filter(|key| !key.is_empty())
            .map(Self::new)
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateRequest<'a> {
    contents: Vec<Content<'a>>,
    safety_settings: Vec<SafetySetting>,
    generation_config: GenerationConfig,
}

#[derive(Serialize)]
struct Content<'a> {
    parts: Vec<Part<'a>>,
}

#[derive(Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SafetySetting {
    category: &'static str,
    threshold: &'static str,
}

const HARM_CATEGORIES: [&str; 4] = [
    "HARM_CATEGORY_HARASSMENT",
    "HARM_CATEGORY_HATE_SPEECH",
    "HARM_CATEGORY_SEXUALLY_EXPLICIT",
    "HARM_CATEGORY_DANGEROUS_CONTENT",
];

fn permissive_safety() -> Vec<SafetySetting> {
    HARM_CATEGORIES
        .iter()
        .map(|category| SafetySetting {
            category,
            threshold: "BLOCK_NONE",
        })
        .collect()
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    temperature: f64,
    top_k: u32,
    top_p: f64,
    max_output_tokens: u32,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            temperature: 0.9,
            top_k: 40,
            top_p: 0.8,
            max_output_tokens: 1024,
        }
    }
}

// Every level of the reply shape is optional; absence anywhere is a format
// error, not a panic.
#[derive(Deserialize)]
struct GenerateResponse {
    candidates: Option<Vec<Candidate>>,
    error: Option<UpstreamErrorBody>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Deserialize)]
struct CandidateContent {
    parts: Option<Vec<CandidatePart>>,
}

#[derive(Deserialize)]
struct CandidatePart {
    text: Option<String>,
}

#[derive(Deserialize)]
struct UpstreamErrorBody {
    message: String,
}

fn extract_reply(response: GenerateResponse) -> Result<String, ProxyError> {
    if let Some(error) = response.error {
        return Err(ProxyError::Upstream(error.message));
    }

    response
        .candidates
        .and_then(|candidates| candidates.into_iter().next())
        .and_then(|candidate| candidate.content)
        .and_then(|content| content.parts)
        .and_then(|parts| parts.into_iter().next())
        .and_then(|part| part.text)
        .ok_or(ProxyError::Format)
}

#[async_trait]
impl Upstream for GeminiClient {
    async fn generate(&self, prompt: &str) -> Result<String, ProxyError> {
        let request = GenerateRequest {
            contents: vec![Content {
                parts: vec![Part { text: prompt }],
            }],
            safety_settings: permissive_safety(),
            generation_config: GenerationConfig::default(),
        };

        let url = format!("{}?key={}", GEMINI_API_URL, self.api_key);

        let response = self
            .client
            .post(&url)
            .json(&request)
            .timeout(UPSTREAM_TIMEOUT)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(ProxyError::Upstream(format!(
                "Gemini API error: {status} - {body}"
            )));
        }

        let body = response.text().await?;
        let parsed: GenerateResponse =
            serde_json::from_str(&body).map_err(|_| ProxyError::Format)?;
        extract_reply(parsed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn parse(value: serde_json::Value) -> GenerateResponse {
        serde_json::from_value(value).expect("response should deserialize")
    }

    #[test]
    fn extracts_nested_reply_text() {
        let response = parse(json!({
            "candidates": [{
                "content": { "parts": [{ "text": "hi there" }] }
            }]
        }));
        assert_eq!(extract_reply(response).unwrap(), "hi there");
    }

    #[test]
    fn missing_candidates_is_format_error() {
        let response = parse(json!({}));
        assert!(matches!(extract_reply(response), Err(ProxyError::Format)));
    }

    #[test]
    fn missing_parts_is_format_error() {
        let response = parse(json!({
            "candidates": [{ "content": {} }]
        }));
        assert!(matches!(extract_reply(response), Err(ProxyError::Format)));
    }

    #[test]
    fn empty_parts_is_format_error() {
        let response = parse(json!({
            "candidates": [{ "content": { "parts": [] } }]
        }));
        assert!(matches!(extract_reply(response), Err(ProxyError::Format)));
    }

    #[test]
    fn upstream_error_body_wins() {
        let response = parse(json!({
            "error": { "message": "quota exceeded" }
        }));
        match extract_reply(response) {
            Err(ProxyError::Upstream(message)) => assert_eq!(message, "quota exceeded"),
            other => panic!("expected upstream error, got {other:?}"),
        }
    }

    #[test]
    fn request_body_carries_safety_and_generation_config() {
        let request = GenerateRequest {
            contents: vec![Content {
                parts: vec![Part { text: "prompt" }],
            }],
            safety_settings: permissive_safety(),
            generation_config: GenerationConfig::default(),
        };
        let value = serde_json::to_value(&request).expect("serializes");
        assert_eq!(value["contents"][0]["parts"][0]["text"], "prompt");
        assert_eq!(value["safetySettings"].as_array().map(Vec::len), Some(4));
        assert_eq!(value["safetySettings"][0]["threshold"], "BLOCK_NONE");
        assert_eq!(value["generationConfig"]["topK"], 40);
        assert_eq!(value["generationConfig"]["maxOutputTokens"], 1024);
    }
}
