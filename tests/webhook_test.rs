//! Webhook handler integration tests
//! Run with: cargo test --test webhook_test

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::body::Bytes;
use axum::extract::{Path, State};
use axum::http::StatusCode;

use phoneinfo_bot::application::errors::BotError;
use phoneinfo_bot::domain::entities::InboundMessage;
use phoneinfo_bot::domain::traits::MessageHandler;
use phoneinfo_bot::infrastructure::delivery::webhook::{receive_update, WebhookState};

const TOKEN: &str = "123456:ABC-def";

/// Handler double that records messages and can be told to fail
struct RecordingHandler {
    received: Mutex<Vec<InboundMessage>>,
    fail: bool,
}

impl RecordingHandler {
    fn new(fail: bool) -> Arc<Self> {
        Arc::new(Self {
            received: Mutex::new(Vec::new()),
            fail,
        })
    }

    fn texts(&self) -> Vec<(String, String)> {
        self.received
            .lock()
            .unwrap()
            .iter()
            .map(|m| (m.chat_id.clone(), m.text.clone()))
            .collect()
    }
}

#[async_trait]
impl MessageHandler for RecordingHandler {
    async fn handle(&self, message: InboundMessage) -> Result<(), BotError> {
        self.received.lock().unwrap().push(message);
        if self.fail {
            return Err(BotError::Network("telegram unreachable".to_string()));
        }
        Ok(())
    }
}

async fn post(handler: Arc<RecordingHandler>, token: &str, body: &str) -> StatusCode {
    let state = WebhookState::new(handler, TOKEN);
    receive_update(State(state), Path(token.to_string()), Bytes::from(body.to_string())).await
}

const UPDATE: &str = r#"{
    "update_id": 900,
    "message": {
        "message_id": 3,
        "date": 1700000000,
        "chat": {"id": 5551234, "type": "private"},
        "from": {"id": 5551234, "is_bot": false, "first_name": "Sam"},
        "text": "+919876543210"
    }
}"#;

#[tokio::test]
async fn test_update_is_routed() {
    let handler = RecordingHandler::new(false);

    assert_eq!(post(handler.clone(), TOKEN, UPDATE).await, StatusCode::OK);
    assert_eq!(
        handler.texts(),
        vec![("5551234".to_string(), "+919876543210".to_string())]
    );
}

#[tokio::test]
async fn test_handler_failure_still_answers_ok() {
    let handler = RecordingHandler::new(true);

    assert_eq!(post(handler.clone(), TOKEN, UPDATE).await, StatusCode::OK);
    assert_eq!(handler.texts().len(), 1);
}

#[tokio::test]
async fn test_garbage_payload_answers_ok() {
    let handler = RecordingHandler::new(false);

    assert_eq!(post(handler.clone(), TOKEN, "not json").await, StatusCode::OK);
    assert_eq!(post(handler.clone(), TOKEN, r#"{"message": {}}"#).await, StatusCode::OK);
    assert!(handler.texts().is_empty());
}

#[tokio::test]
async fn test_update_without_message_answers_ok() {
    let handler = RecordingHandler::new(false);

    let body = r#"{"update_id": 901, "edited_message": {"message_id": 3}}"#;
    assert_eq!(post(handler.clone(), TOKEN, body).await, StatusCode::OK);
    assert!(handler.texts().is_empty());
}

#[tokio::test]
async fn test_wrong_token_is_rejected() {
    let handler = RecordingHandler::new(false);

    assert_eq!(post(handler.clone(), "999:nope", UPDATE).await, StatusCode::NOT_FOUND);
    assert!(handler.texts().is_empty());
}
