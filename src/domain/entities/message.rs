use chrono::{DateTime, Utc};

use crate::domain::traits::KeyboardButton;

/// Text formatting mode understood by the chat platform
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseMode {
    Markdown,
}

impl ParseMode {
    pub fn as_str(&self) -> &str {
        match self {
            ParseMode::Markdown => "Markdown",
        }
    }
}

/// A text message received from a chat
#[derive(Debug, Clone)]
pub struct InboundMessage {
    pub id: String,
    pub chat_id: String,
    pub text: String,
    pub received_at: DateTime<Utc>,
}

impl InboundMessage {
    pub fn new(chat_id: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            chat_id: chat_id.into(),
            text: text.into(),
            received_at: Utc::now(),
        }
    }
}

/// A reply ready to be sent back to a chat
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutboundReply {
    pub chat_id: String,
    pub text: String,
    pub parse_mode: Option<ParseMode>,
    pub buttons: Vec<Vec<KeyboardButton>>,
}

impl OutboundReply {
    /// Plain text reply without formatting or buttons
    pub fn plain(chat_id: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            chat_id: chat_id.into(),
            text: text.into(),
            parse_mode: None,
            buttons: Vec::new(),
        }
    }

    /// Markdown reply without buttons
    pub fn markdown(chat_id: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            parse_mode: Some(ParseMode::Markdown),
            ..Self::plain(chat_id, text)
        }
    }

    pub fn with_button_row(mut self, row: Vec<KeyboardButton>) -> Self {
        self.buttons.push(row);
        self
    }

    pub fn has_buttons(&self) -> bool {
        self.buttons.iter().any(|row| !row.is_empty())
    }

    /// Same reply with formatting removed, keeping the buttons
    pub fn without_formatting(&self) -> Self {
        Self {
            parse_mode: None,
            ..self.clone()
        }
    }
}
