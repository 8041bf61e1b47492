//! Webhook delivery: Telegram POSTs updates to `/webhook/{token}`

use std::sync::Arc;

use async_trait::async_trait;
use axum::{
    body::Bytes,
    extract::{Path, State},
    http::StatusCode,
    routing::post,
    Router,
};

use crate::application::errors::BotError;
use crate::domain::traits::{Delivery, MessageHandler};
use crate::infrastructure::adapters::telegram::{TelegramAdapter, Update};
use super::{health_router, shutdown_signal};

/// Public URL Telegram should push updates to
pub fn webhook_url(public_url: &str, token: &str) -> String {
    format!("{}/webhook/{}", public_url.trim_end_matches('/'), token)
}

/// Shared state of the webhook route
#[derive(Clone)]
pub struct WebhookState {
    handler: Arc<dyn MessageHandler>,
    token: Arc<str>,
}

impl WebhookState {
    pub fn new(handler: Arc<dyn MessageHandler>, token: &str) -> Self {
        Self {
            handler,
            token: Arc::from(token),
        }
    }
}

/// Routes served by the webhook listener
pub fn router(state: WebhookState) -> Router {
    Router::new()
        .route("/webhook/:token", post(receive_update))
        .with_state(state)
        .merge(health_router("webhook"))
}

/// POST /webhook/{token} - decode the update and run it through the handler.
/// Always answers 200 once the token matches, so Telegram never redelivers.
pub async fn receive_update(
    State(state): State<WebhookState>,
    Path(token): Path<String>,
    body: Bytes,
) -> StatusCode {
    if token.as_str() != &*state.token {
        tracing::warn!("Webhook called with unknown token");
        return StatusCode::NOT_FOUND;
    }

    let update: Update = match serde_json::from_slice(&body) {
        Ok(update) => update,
        Err(e) => {
            tracing::warn!("Ignoring undecodable update: {}", e);
            return StatusCode::OK;
        }
    };

    tracing::debug!("Received update {}", update.update_id);

    if let Some(message) = update.into_inbound() {
        if let Err(e) = state.handler.handle(message).await {
            tracing::error!("Failed to handle message: {}", e);
        }
    }

    StatusCode::OK
}

/// HTTP listener that Telegram pushes updates to
pub struct WebhookDelivery {
    telegram: Arc<TelegramAdapter>,
    public_url: String,
    port: u16,
}

impl WebhookDelivery {
    pub fn new(telegram: Arc<TelegramAdapter>, public_url: impl Into<String>, port: u16) -> Self {
        Self {
            telegram,
            public_url: public_url.into(),
            port,
        }
    }

    /// Tell Telegram where to push updates; failure only gets logged
    async fn register(&self) {
        let url = webhook_url(&self.public_url, self.telegram.token());
        let shown = webhook_url(&self.public_url, "<token>");

        match self.telegram.set_webhook(&url).await {
            Ok(()) => tracing::info!("Webhook registered: {}", shown),
            Err(e) => tracing::error!("Failed to register webhook {}: {}", shown, e),
        }
    }
}

#[async_trait]
impl Delivery for WebhookDelivery {
    fn name(&self) -> &'static str {
        "webhook"
    }

    async fn run(&self, handler: Arc<dyn MessageHandler>) -> Result<(), BotError> {
        // Only point Telegram at us once the port is ours
        let bind_addr = format!("0.0.0.0:{}", self.port);
        let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
        tracing::info!("Webhook listener on {}", bind_addr);

        self.register().await;

        let app = router(WebhookState::new(handler, self.telegram.token()));

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("Webhook listener stopped");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use serde_json::json;

    use super::*;
    use crate::domain::entities::InboundMessage;
    use crate::infrastructure::stub::TelegramStub;

    struct IgnoreAll;

    #[async_trait]
    impl MessageHandler for IgnoreAll {
        async fn handle(&self, _message: InboundMessage) -> Result<(), BotError> {
            Ok(())
        }
    }

    async fn delivery_on(port: u16) -> (WebhookDelivery, TelegramStub) {
        let (stub, base) = TelegramStub::start(json!(true)).await;
        let telegram = Arc::new(TelegramAdapter::new("TESTTOKEN").with_api_base(base));
        (WebhookDelivery::new(telegram, "https://bot.example.com", port), stub)
    }

    #[test]
    fn test_webhook_url() {
        assert_eq!(
            webhook_url("https://bot.example.com/", "123:abc"),
            "https://bot.example.com/webhook/123:abc"
        );
        assert_eq!(
            webhook_url("https://bot.example.com/base", "t"),
            "https://bot.example.com/base/webhook/t"
        );
    }

    #[tokio::test]
    async fn test_busy_port_skips_registration() {
        let taken = tokio::net::TcpListener::bind("0.0.0.0:0").await.unwrap();
        let port = taken.local_addr().unwrap().port();
        let (delivery, stub) = delivery_on(port).await;

        let result = delivery.run(Arc::new(IgnoreAll)).await;

        assert!(matches!(result, Err(BotError::Io(_))));
        assert!(stub.calls().is_empty());
    }

    #[tokio::test]
    async fn test_registers_after_listening() {
        let port = {
            let free = tokio::net::TcpListener::bind("0.0.0.0:0").await.unwrap();
            free.local_addr().unwrap().port()
        };
        let (delivery, stub) = delivery_on(port).await;
        let running = tokio::spawn(async move { delivery.run(Arc::new(IgnoreAll)).await });

        let mut registered = false;
        for _ in 0..100 {
            if stub.calls().iter().any(|c| c == "/botTESTTOKEN/setWebhook") {
                registered = true;
                break;
            }
            tokio::time::sleep(Duration::from_millis(20)).await;
        }
        assert!(registered);

        // The listener was up before setWebhook went out
        let health = reqwest::get(format!("http://127.0.0.1:{}/", port)).await.unwrap();
        assert_eq!(health.status(), reqwest::StatusCode::OK);

        running.abort();
    }
}
