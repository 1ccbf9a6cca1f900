use anyhow::Context;
use dotenvy::dotenv;
use tokio::net::TcpListener;
use tracing::{error, info, warn};

mod config;
mod handlers;
mod llm;
mod post;
mod state;
mod utils;

use config::CONFIG;
use llm::gemini::{GeminiClient, GeminiSettings};
use state::AppState;
use utils::logging::init_logging;

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        error!("Failed to listen for Ctrl-C: {err}");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();
    let _guards = init_logging();

    if !CONFIG.has_gemini_api_key() {
        warn!("GEMINI_API_KEY is not set; generation requests will fail until it is configured");
    }

    let client = GeminiClient::new(GeminiSettings::from_config(&CONFIG))?;
    info!(
        "Using Gemini model {} (safety={}, timeout={}s)",
        client.settings().model,
        client.settings().safety_profile,
        client.settings().timeout_seconds
    );

    let app = handlers::router(AppState::new(client), CONFIG.max_upload_bytes);
    let listener = TcpListener::bind(&CONFIG.bind_addr)
        .await
        .with_context(|| format!("Failed to bind {}", CONFIG.bind_addr))?;
    info!("X Post Generator listening on http://{}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server error")?;

    Ok(())
}
