//! Console adapter for development/testing

use async_trait::async_trait;
use std::sync::atomic::{AtomicU64, Ordering};
use crate::domain::entities::OutboundReply;
use crate::domain::traits::{Bot, BotInfo};
use crate::application::errors::BotError;

/// Console bot adapter for local development
pub struct ConsoleAdapter {
    info: BotInfo,
    sent: AtomicU64,
}

impl ConsoleAdapter {
    pub fn new() -> Self {
        Self {
            info: BotInfo {
                id: "console".to_string(),
                name: "phoneinfo-bot".to_string(),
                username: "console".to_string(),
            },
            sent: AtomicU64::new(0),
        }
    }

    /// Render a reply the way it is printed
    pub fn render(reply: &OutboundReply) -> String {
        let mut out = format!("[BOT] {}", reply.text);
        for row in &reply.buttons {
            let row_text: Vec<String> = row.iter().map(|b| format!("{} <{}>", b.text, b.url)).collect();
            out.push_str(&format!("\n  [Buttons] {}", row_text.join(" | ")));
        }
        out
    }
}

impl Default for ConsoleAdapter {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Bot for ConsoleAdapter {
    async fn send_reply(&self, reply: &OutboundReply) -> Result<String, BotError> {
        println!("{}", Self::render(reply));
        let id = self.sent.fetch_add(1, Ordering::Relaxed) + 1;
        Ok(format!("console_msg_{}", id))
    }

    fn bot_info(&self) -> BotInfo {
        self.info.clone()
    }
}
