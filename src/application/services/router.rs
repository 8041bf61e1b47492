use std::sync::Arc;

use async_trait::async_trait;
use tracing::Instrument;

use crate::application::errors::BotError;
use crate::application::messaging::{Classification, MessageParser};
use crate::domain::entities::{InboundMessage, OutboundReply, PhoneValidationResult};
use crate::domain::traits::{Bot, MessageHandler, PhoneValidator};
use super::formatter::{MessageFormatter, INVALID_FORMAT_TEXT, WELCOME_TEXT, WORKING_TEXT};

/// Routes each inbound message to the right reply
pub struct CommandRouter {
    bot: Arc<dyn Bot>,
    validator: Arc<dyn PhoneValidator>,
}

impl CommandRouter {
    pub fn new(bot: Arc<dyn Bot>, validator: Arc<dyn PhoneValidator>) -> Self {
        Self { bot, validator }
    }

    /// Process one message, sending zero or more replies
    pub async fn route(&self, message: &InboundMessage) -> Result<(), BotError> {
        let chat_id = message.chat_id.as_str();

        match MessageParser::classify(&message.text) {
            Classification::Empty => {
                tracing::debug!("Ignoring empty message");
                Ok(())
            }
            Classification::Greeting => {
                self.send(OutboundReply::markdown(chat_id, WELCOME_TEXT)).await
            }
            Classification::Malformed => {
                tracing::debug!("Rejecting malformed input");
                self.send(OutboundReply::plain(chat_id, INVALID_FORMAT_TEXT)).await
            }
            Classification::Phone(number) => self.lookup(chat_id, &number).await,
        }
    }

    async fn lookup(&self, chat_id: &str, number: &str) -> Result<(), BotError> {
        if let Err(e) = self.send(OutboundReply::plain(chat_id, WORKING_TEXT)).await {
            tracing::warn!("Failed to send acknowledgement: {}", e);
        }

        match self.validator.validate(number).await {
            PhoneValidationResult::Invalid(reason) => {
                tracing::info!("Lookup gave no details: {}", reason);
                self.send(OutboundReply::plain(chat_id, reason.user_message())).await
            }
            PhoneValidationResult::Valid(details) => {
                tracing::info!("Lookup succeeded: {}", details.country);
                self.send(MessageFormatter::format(chat_id, number, &details)).await
            }
        }
    }

    async fn send(&self, reply: OutboundReply) -> Result<(), BotError> {
        self.bot.send_reply(&reply).await.map(|_| ())
    }
}

#[async_trait]
impl MessageHandler for CommandRouter {
    async fn handle(&self, message: InboundMessage) -> Result<(), BotError> {
        let span = tracing::info_span!("message", id = %message.id, chat_id = %message.chat_id);

        async {
            let result = self.route(&message).await;
            let elapsed = chrono::Utc::now() - message.received_at;
            tracing::debug!("Handled in {}ms", elapsed.num_milliseconds());
            result
        }
        .instrument(span)
        .await
    }
}
