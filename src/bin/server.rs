use std::env;

use tracing::{Level, warn};
use tracing_subscriber::FmtSubscriber;

use moodchat::server::{AppState, serve};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let state = AppState::from_env();
    if state.upstream.is_none() {
        warn!("GEMINI_API_KEY is not set; /api/chat will fail until it is configured");
    }

    let port = env::var("PORT")
        .ok()
        .and_then(|raw| raw.parse().ok())
        .unwrap_or(3000);

    serve(state, port).await
}
