//! Telegram adapter

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::sync::RwLock;

use crate::application::errors::BotError;
use crate::domain::entities::{InboundMessage, OutboundReply};
use crate::domain::traits::{Bot, BotInfo, KeyboardButton};
use crate::infrastructure::config::mask;

/// Telegram API base URL
pub const API_BASE: &str = "https://api.telegram.org";

/// Telegram update type (getUpdates result item or webhook POST body)
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Update {
    pub update_id: i64,
    #[serde(default)]
    pub message: Option<Message>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Message {
    pub message_id: i64,
    pub chat: Chat,
    #[serde(default)]
    pub text: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Chat {
    pub id: i64,
}

impl Update {
    /// Convert to an inbound message; updates without a message yield nothing
    pub fn into_inbound(self) -> Option<InboundMessage> {
        let message = self.message?;
        Some(InboundMessage::new(
            message.chat.id.to_string(),
            message.text.unwrap_or_default(),
        ))
    }
}

/// Envelope every Bot API method answers with
#[derive(Debug, Deserialize)]
struct ApiResponse<T> {
    ok: bool,
    result: Option<T>,
    description: Option<String>,
}

#[derive(Serialize)]
struct InlineKeyboardButton<'a> {
    text: &'a str,
    url: &'a str,
}

#[derive(Serialize)]
struct ReplyMarkup<'a> {
    inline_keyboard: Vec<Vec<InlineKeyboardButton<'a>>>,
}

#[derive(Serialize)]
struct SendMessageRequest<'a> {
    chat_id: &'a str,
    text: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    parse_mode: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    reply_markup: Option<ReplyMarkup<'a>>,
}

impl<'a> SendMessageRequest<'a> {
    fn from_reply(reply: &'a OutboundReply) -> Self {
        let reply_markup = reply.has_buttons().then(|| ReplyMarkup {
            inline_keyboard: reply
                .buttons
                .iter()
                .map(|row| row.iter().map(inline_button).collect())
                .collect(),
        });

        Self {
            chat_id: &reply.chat_id,
            text: &reply.text,
            parse_mode: reply.parse_mode.as_ref().map(|m| m.as_str()),
            reply_markup,
        }
    }
}

fn inline_button(button: &KeyboardButton) -> InlineKeyboardButton<'_> {
    InlineKeyboardButton {
        text: &button.text,
        url: &button.url,
    }
}

/// Telegram bot adapter
pub struct TelegramAdapter {
    token: String,
    api_base: String,
    client: Client,
    info: RwLock<BotInfo>,
}

impl TelegramAdapter {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            api_base: API_BASE.to_string(),
            client: Client::new(),
            info: RwLock::new(BotInfo {
                id: "unknown".to_string(),
                name: "phoneinfo-bot".to_string(),
                username: "phoneinfo_bot".to_string(),
            }),
        }
    }

    /// Point the adapter at a different Bot API server
    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into().trim_end_matches('/').to_string();
        self
    }

    pub fn token(&self) -> &str {
        &self.token
    }

    /// Get the API URL for a method
    fn api_url(&self, method: &str) -> String {
        format!("{}/bot{}/{}", self.api_base, self.token, method)
    }

    /// Call a Bot API method with a JSON body and unwrap the result envelope
    async fn call<B, T>(&self, method: &str, body: &B) -> Result<T, BotError>
    where
        B: Serialize + ?Sized,
        T: serde::de::DeserializeOwned,
    {
        let response = self.client
            .post(self.api_url(method))
            .json(body)
            .send()
            .await
            .map_err(|e| BotError::Network(e.without_url().to_string()))?;

        let status = response.status();
        let data: ApiResponse<T> = response
            .json()
            .await
            .map_err(|e| BotError::Parse(format!("{} ({}): {}", method, status, e.without_url())))?;

        if !data.ok {
            return Err(BotError::Telegram(format!(
                "{} failed ({}): {}",
                method,
                status,
                data.description.unwrap_or_default()
            )));
        }

        data.result
            .ok_or_else(|| BotError::Parse(format!("{}: missing result", method)))
    }

    /// Fetch bot info from Telegram API; `bot_info()` returns it afterwards
    pub async fn fetch_bot_info(&self) -> Result<(), BotError> {
        #[derive(Deserialize)]
        struct BotInfoResponse {
            id: i64,
            first_name: String,
            username: Option<String>,
        }

        let data: BotInfoResponse = self.call("getMe", &serde_json::json!({})).await?;
        let info = BotInfo {
            id: data.id.to_string(),
            name: data.first_name,
            username: data.username.unwrap_or_default(),
        };

        match self.info.write() {
            Ok(mut current) => *current = info,
            Err(poisoned) => *poisoned.into_inner() = info,
        }

        Ok(())
    }

    /// Get updates from Telegram using getUpdates API
    pub async fn get_updates(&self, offset: i64, timeout: u64) -> Result<Vec<Update>, BotError> {
        #[derive(Serialize)]
        struct GetUpdatesRequest {
            offset: i64,
            timeout: u64,
            allowed_updates: Vec<&'static str>,
        }

        let request = GetUpdatesRequest {
            offset,
            timeout,
            allowed_updates: vec!["message"],
        };

        self.call("getUpdates", &request).await
    }

    /// Get the next update offset, keeping `current` when nothing arrived
    pub fn get_next_offset(current: i64, updates: &[Update]) -> i64 {
        updates.iter()
            .map(|u| u.update_id + 1)
            .max()
            .unwrap_or(current)
            .max(current)
    }

    /// Register a webhook URL; Telegram then POSTs updates there
    pub async fn set_webhook(&self, url: &str) -> Result<(), BotError> {
        let _: bool = self.call("setWebhook", &serde_json::json!({ "url": url })).await?;
        Ok(())
    }

    /// Remove any webhook so getUpdates works
    pub async fn delete_webhook(&self) -> Result<(), BotError> {
        let _: bool = self.call("deleteWebhook", &serde_json::json!({})).await?;
        Ok(())
    }

    /// Register bot commands with Telegram
    pub async fn register_commands(&self) -> Result<(), BotError> {
        let commands = serde_json::json!({
            "commands": [
                { "command": "start", "description": "Show how to use the bot" },
            ]
        });

        let _: bool = self.call("setMyCommands", &commands).await?;
        tracing::info!("Registered bot commands with Telegram");
        Ok(())
    }

    /// Send a reply with its own parse mode
    pub async fn send_message_api(&self, reply: &OutboundReply) -> Result<String, BotError> {
        #[derive(Deserialize)]
        struct MessageResult {
            message_id: i64,
        }

        let request = SendMessageRequest::from_reply(reply);
        let result: MessageResult = self.call("sendMessage", &request).await?;
        Ok(result.message_id.to_string())
    }
}

#[async_trait]
impl Bot for TelegramAdapter {
    /// Send a reply - try with formatting, fallback to plain
    async fn send_reply(&self, reply: &OutboundReply) -> Result<String, BotError> {
        tracing::debug!("Sending to {}: {}", reply.chat_id, reply.text);

        match self.send_message_api(reply).await {
            Ok(message_id) => Ok(message_id),
            Err(BotError::Telegram(e)) if reply.parse_mode.is_some() => {
                tracing::warn!("Markdown failed, using plain text: {}", e);
                self.send_message_api(&reply.without_formatting()).await
            }
            Err(e) => {
                tracing::error!("Failed to send message (token: {}): {}", mask(&self.token), e);
                Err(e)
            }
        }
    }

    fn bot_info(&self) -> BotInfo {
        match self.info.read() {
            Ok(info) => info.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }
}
