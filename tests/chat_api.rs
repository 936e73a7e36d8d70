//! End-to-end tests for the proxy routes, with the Gemini collaborator
//! replaced by a recording stub.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tower::ServiceExt;

use moodchat::gemini::Upstream;
use moodchat::server::{AppState, ProxyError, router};

enum StubBehavior {
    Reply(&'static str),
    UpstreamError(&'static str),
    MalformedReply,
}

struct StubUpstream {
    behavior: StubBehavior,
    calls: AtomicUsize,
    last_prompt: Mutex<Option<String>>,
}

impl StubUpstream {
    fn new(behavior: StubBehavior) -> Arc<Self> {
        Arc::new(Self {
            behavior,
            calls: AtomicUsize::new(0),
            last_prompt: Mutex::new(None),
        })
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn last_prompt(&self) -> Option<String> {
        self.last_prompt.lock().expect("prompt lock").clone()
    }
}

#[async_trait]
impl Upstream for StubUpstream {
    async fn generate(&self, prompt: &str) -> Result<String, ProxyError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_prompt.lock().expect("prompt lock") = Some(prompt.to_string());
        match &self.behavior {
            StubBehavior::Reply(text) => Ok((*text).to_string()),
            StubBehavior::UpstreamError(message) => {
                Err(ProxyError::Upstream((*message).to_string()))
            }
            StubBehavior::MalformedReply => Err(ProxyError::Format),
        }
    }
}

fn app_with(stub: Arc<StubUpstream>) -> Router {
    router(AppState::with_upstream(stub))
}

fn app_without_credential() -> Router {
    router(AppState {
        upstream: None,
        expose_details: true,
    })
}

async fn post_chat(app: Router, body: Value) -> (StatusCode, Value) {
    let request = Request::builder()
        .method("POST")
        .uri("/api/chat")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .expect("request builds");
    let response = app.oneshot(request).await.expect("handler runs");
    let status = response.status();
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("body collects")
        .to_bytes();
    let value = serde_json::from_slice(&bytes).expect("JSON body");
    (status, value)
}

async fn get(app: Router, uri: &str) -> (StatusCode, Vec<u8>) {
    let request = Request::builder()
        .uri(uri)
        .body(Body::empty())
        .expect("request builds");
    let response = app.oneshot(request).await.expect("handler runs");
    let status = response.status();
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("body collects")
        .to_bytes();
    (status, bytes.to_vec())
}

#[tokio::test]
async fn nice_mode_reply_is_greentexted() {
    let stub = StubUpstream::new(StubBehavior::Reply("hi there\nhow are you"));
    let (status, body) = post_chat(
        app_with(stub.clone()),
        json!({ "message": "hello", "isAngryMode": false }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["response"], ">hi there\n>how are you");
    assert_eq!(stub.calls(), 1);

    let prompt = stub.last_prompt().expect("prompt recorded");
    assert!(prompt.contains("\nUser: hello\n"));
    assert!(prompt.ends_with("Response:"));
    assert!(prompt.contains("friendly"));
}

#[tokio::test]
async fn angry_mode_passes_reply_through() {
    let stub = StubUpstream::new(StubBehavior::Reply("WHAT do you WANT\nseriously"));
    let (status, body) = post_chat(
        app_with(stub.clone()),
        json!({ "message": "hello", "isAngryMode": true }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["response"], "WHAT do you WANT\nseriously");

    let prompt = stub.last_prompt().expect("prompt recorded");
    assert!(prompt.contains("angry"));
}

#[tokio::test]
async fn already_quoted_lines_are_not_double_prefixed() {
    let stub = StubUpstream::new(StubBehavior::Reply(">be me\nreplying to you"));
    let (_, body) = post_chat(
        app_with(stub),
        json!({ "message": "greentext me", "isAngryMode": false }),
    )
    .await;

    assert_eq!(body["response"], ">be me\n>replying to you");
}

#[tokio::test]
async fn empty_message_is_rejected_without_upstream_call() {
    let stub = StubUpstream::new(StubBehavior::Reply("never sent"));
    let (status, body) = post_chat(
        app_with(stub.clone()),
        json!({ "message": "", "isAngryMode": false }),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Message is required");
    assert_eq!(body.get("details"), None);
    assert_eq!(stub.calls(), 0);
}

#[tokio::test]
async fn missing_message_field_is_rejected() {
    let stub = StubUpstream::new(StubBehavior::Reply("never sent"));
    let (status, body) = post_chat(app_with(stub.clone()), json!({})).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Message is required");
    assert_eq!(stub.calls(), 0);
}

#[tokio::test]
async fn missing_credential_is_a_generic_configuration_error() {
    let (status, body) = post_chat(
        app_without_credential(),
        json!({ "message": "hello", "isAngryMode": false }),
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "Server configuration error");
    assert_eq!(body.get("details"), None);
}

#[tokio::test]
async fn upstream_failure_surfaces_as_500_with_details() {
    let stub = StubUpstream::new(StubBehavior::UpstreamError(
        "Gemini API error: 503 Service Unavailable - overloaded",
    ));
    let (status, body) = post_chat(
        app_with(stub),
        json!({ "message": "hello", "isAngryMode": false }),
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "Upstream API error");
    assert!(
        body["details"]
            .as_str()
            .expect("details present")
            .contains("503")
    );
}

#[tokio::test]
async fn malformed_upstream_reply_is_a_format_error() {
    let stub = StubUpstream::new(StubBehavior::MalformedReply);
    let (status, body) = post_chat(
        app_with(stub),
        json!({ "message": "hello", "isAngryMode": false }),
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        body["error"],
        "Unexpected response format from the language model"
    );
}

#[tokio::test]
async fn health_reports_credential_presence_only() {
    let stub = StubUpstream::new(StubBehavior::Reply("unused"));
    let (status, bytes) = get(app_with(stub), "/health").await;
    assert_eq!(status, StatusCode::OK);
    let body: Value = serde_json::from_slice(&bytes).expect("JSON body");
    assert_eq!(body["status"], "ok");
    assert_eq!(body["apiKey"], "configured");
    assert!(!body["timestamp"].as_str().expect("timestamp").is_empty());

    let (status, bytes) = get(app_without_credential(), "/health").await;
    assert_eq!(status, StatusCode::OK);
    let body: Value = serde_json::from_slice(&bytes).expect("JSON body");
    assert_eq!(body["apiKey"], "missing");
}

#[tokio::test]
async fn check_route_reflects_credential_state() {
    let stub = StubUpstream::new(StubBehavior::Reply("unused"));
    let (status, bytes) = get(app_with(stub), "/api/check").await;
    assert_eq!(status, StatusCode::OK);
    let body: Value = serde_json::from_slice(&bytes).expect("JSON body");
    assert_eq!(body["status"], "API key is configured");

    let (status, bytes) = get(app_without_credential(), "/api/check").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    let body: Value = serde_json::from_slice(&bytes).expect("JSON body");
    assert_eq!(body["status"], "API key is missing");
}

#[tokio::test]
async fn unknown_routes_serve_the_chat_page() {
    let stub = StubUpstream::new(StubBehavior::Reply("unused"));
    let (status, bytes) = get(app_with(stub), "/some/where").await;
    assert_eq!(status, StatusCode::OK);
    let page = String::from_utf8(bytes).expect("utf-8 page");
    assert!(page.contains("<title>moodchat</title>"));
}
