//! Polling delivery: long-poll getUpdates and hand each message to its own task

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;

use crate::application::errors::BotError;
use crate::domain::traits::{Delivery, MessageHandler};
use crate::infrastructure::adapters::telegram::TelegramAdapter;
use super::{health_router, shutdown_signal};

/// Seconds Telegram holds a getUpdates request open
pub const LONG_POLL_TIMEOUT: u64 = 30;

/// Pause after a failed getUpdates call
const ERROR_PAUSE: Duration = Duration::from_secs(5);

pub struct PollingDelivery {
    telegram: Arc<TelegramAdapter>,
    health_port: Option<u16>,
}

impl PollingDelivery {
    pub fn new(telegram: Arc<TelegramAdapter>) -> Self {
        Self {
            telegram,
            health_port: None,
        }
    }

    /// Also serve `GET /` on this port for platform health checks
    pub fn with_health_port(mut self, port: Option<u16>) -> Self {
        self.health_port = port;
        self
    }

    async fn serve_health(port: u16) {
        let bind_addr = format!("0.0.0.0:{}", port);
        let listener = match tokio::net::TcpListener::bind(&bind_addr).await {
            Ok(listener) => listener,
            Err(e) => {
                tracing::warn!("Health listener disabled, cannot bind {}: {}", bind_addr, e);
                return;
            }
        };

        tracing::info!("Health listener on {}", bind_addr);
        if let Err(e) = axum::serve(listener, health_router("polling")).await {
            tracing::warn!("Health listener stopped: {}", e);
        }
    }

    async fn poll(&self, handler: Arc<dyn MessageHandler>) {
        let mut offset: i64 = 0;

        tracing::info!("Starting message loop...");

        loop {
            match self.telegram.get_updates(offset, LONG_POLL_TIMEOUT).await {
                Ok(updates) => {
                    if !updates.is_empty() {
                        tracing::debug!("Received {} updates", updates.len());
                    }

                    offset = TelegramAdapter::get_next_offset(offset, &updates);

                    for update in updates {
                        let Some(message) = update.into_inbound() else {
                            continue;
                        };

                        let handler = handler.clone();
                        tokio::spawn(async move {
                            if let Err(e) = handler.handle(message).await {
                                tracing::error!("Failed to handle message: {}", e);
                            }
                        });
                    }
                }
                Err(e) => {
                    tracing::error!("Failed to get updates: {}", e);
                    tokio::time::sleep(ERROR_PAUSE).await;
                }
            }
        }
    }
}

#[async_trait]
impl Delivery for PollingDelivery {
    fn name(&self) -> &'static str {
        "polling"
    }

    async fn run(&self, handler: Arc<dyn MessageHandler>) -> Result<(), BotError> {
        // getUpdates is refused while a webhook is registered
        if let Err(e) = self.telegram.delete_webhook().await {
            tracing::warn!("Failed to remove webhook: {}", e);
        }

        if let Some(port) = self.health_port {
            tokio::spawn(Self::serve_health(port));
        }

        tokio::select! {
            _ = self.poll(handler) => {}
            _ = shutdown_signal() => {}
        }

        tracing::info!("Polling stopped");
        Ok(())
    }
}
