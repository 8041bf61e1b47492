//! Inbound delivery - how updates reach the router

pub mod console;
pub mod polling;
pub mod webhook;

pub use console::ConsoleDelivery;
pub use polling::PollingDelivery;
pub use webhook::WebhookDelivery;

use axum::{routing::get, Json, Router};
use serde_json::{json, Value};

/// `GET /` health probe reporting the active delivery mode
pub fn health_router(mode: &'static str) -> Router {
    Router::new().route("/", get(move || health(mode)))
}

async fn health(mode: &'static str) -> Json<Value> {
    Json(json!({ "status": "ok", "mode": mode }))
}

/// Completes on Ctrl-C (or when the signal cannot be installed)
pub async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
