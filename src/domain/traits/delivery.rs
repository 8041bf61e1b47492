use std::sync::Arc;

use async_trait::async_trait;
use crate::domain::entities::InboundMessage;
use crate::application::errors::BotError;

/// Consumer of inbound messages
#[async_trait]
pub trait MessageHandler: Send + Sync {
    async fn handle(&self, message: InboundMessage) -> Result<(), BotError>;
}

/// Source of inbound messages (polling, webhook, console)
#[async_trait]
pub trait Delivery: Send + Sync {
    /// Short name used in logs and the health endpoint
    fn name(&self) -> &'static str;

    /// Receive messages and hand each one to `handler` until the source is exhausted
    async fn run(&self, handler: Arc<dyn MessageHandler>) -> Result<(), BotError>;
}
