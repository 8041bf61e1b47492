use async_trait::async_trait;
use crate::domain::entities::OutboundReply;
use crate::application::errors::BotError;

/// Bot trait - abstraction for the messaging platform used to send replies
#[async_trait]
pub trait Bot: Send + Sync {
    /// Send a reply, returning the platform message id
    async fn send_reply(&self, reply: &OutboundReply) -> Result<String, BotError>;

    /// Get bot info
    fn bot_info(&self) -> BotInfo;
}

/// Inline keyboard button that opens a URL
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyboardButton {
    pub text: String,
    pub url: String,
}

impl KeyboardButton {
    pub fn link(text: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            url: url.into(),
        }
    }
}

/// Bot information
#[derive(Debug, Clone)]
pub struct BotInfo {
    pub id: String,
    pub name: String,
    pub username: String,
}
