//! The chat proxy: one POST route that translates `{message, isAngryMode}`
//! into a Gemini call, plus liveness/credential probes and a static fallback
//! page. Stateless across requests; the shared state is read-only.

mod error;
mod page;

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use axum::routing::{get, post};
use axum::Router;
use std::env;
use std::sync::Arc;
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;
use tower_http::trace::TraceLayer;
use tracing::{error, info};

use crate::gemini::{GeminiClient, Upstream};
use crate::greentext;
use crate::persona;
use crate::types::{ChatReply, ChatRequest, CheckReply, HealthReply, PersonalityMode};

pub use error::ProxyError;

#[derive(Clone)]
pub struct AppState {
    /// `None` when no credential is configured; `/api/chat` then fails with
    /// a generic configuration error.
    pub upstream: Option<Arc<dyn Upstream>>,
    /// Whether transport-level error detail is echoed to callers.
    pub expose_details: bool,
}

impl AppState {
    pub fn from_env() -> Self {
        let upstream = GeminiClient::from_env().map(|client| Arc::new(client) as Arc<dyn Upstream>);
        let expose_details = env::var("APP_ENV")
            .map(|value| value != "production")
            .unwrap_or(true);
        Self {
            upstream,
            expose_details,
        }
    }

    pub fn with_upstream(upstream: Arc<dyn Upstream>) -> Self {
        Self {
            upstream: Some(upstream),
            expose_details: true,
        }
    }

    fn api_key_state(&self) -> &'static str {
        if self.upstream.is_some() {
            "configured"
        } else {
            "missing"
        }
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/chat", post(chat))
        .route("/health", get(health))
        .route("/api/check", get(check))
        .fallback(index)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

pub async fn serve(state: AppState, port: u16) -> anyhow::Result<()> {
    let app = router(state);
    let addr = format!("0.0.0.0:{port}");
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("listening on http://{addr}");
    axum::serve(listener, app).await?;
    Ok(())
}

async fn chat(State(state): State<AppState>, Json(request): Json<ChatRequest>) -> Response {
    match handle_chat(&state, request).await {
        Ok(text) => Json(ChatReply { response: text }).into_response(),
        Err(err) => {
            error!("chat request failed: {err}");
            err.into_response(state.expose_details)
        }
    }
}

async fn handle_chat(state: &AppState, request: ChatRequest) -> Result<String, ProxyError> {
    let message = request.message.as_deref().unwrap_or("");
    if message.is_empty() {
        return Err(ProxyError::MissingMessage);
    }

    let mode = PersonalityMode::from_angry_flag(request.is_angry_mode);
    info!(mode = mode.label(), text = message, "chat request received");

    let upstream = state.upstream.as_ref().ok_or(ProxyError::MissingApiKey)?;
    let prompt = persona::build_prompt(mode, message);

    info!(chars = prompt.len(), "dispatching prompt upstream");
    let reply = upstream.generate(&prompt).await?;

    let reply = match mode {
        PersonalityMode::Nice => greentext::quote_lines(&reply),
        PersonalityMode::Angry => reply,
    };

    info!(mode = mode.label(), chars = reply.len(), "chat response ready");
    Ok(reply)
}

async fn health(State(state): State<AppState>) -> Json<HealthReply> {
    let timestamp = OffsetDateTime::now_utc()
        .format(&Rfc3339)
        .unwrap_or_default();
    Json(HealthReply {
        status: "ok".to_string(),
        timestamp,
        api_key: state.api_key_state().to_string(),
    })
}

async fn check(State(state): State<AppState>) -> Response {
    if state.upstream.is_some() {
        Json(CheckReply {
            status: "API key is configured".to_string(),
        })
        .into_response()
    } else {
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(CheckReply {
                status: "API key is missing".to_string(),
            }),
        )
            .into_response()
    }
}

async fn index() -> Html<&'static str> {
    Html(page::INDEX_HTML)
}
