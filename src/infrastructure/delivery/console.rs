//! Console delivery: each stdin line is a message from chat `console`

use std::sync::Arc;

use async_trait::async_trait;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::sync::Mutex;

use crate::application::errors::BotError;
use crate::domain::entities::InboundMessage;
use crate::domain::traits::{Delivery, MessageHandler};

pub const CONSOLE_CHAT_ID: &str = "console";

pub struct ConsoleDelivery<R> {
    input: Mutex<R>,
}

impl ConsoleDelivery<BufReader<tokio::io::Stdin>> {
    pub fn stdin() -> Self {
        Self::new(BufReader::new(tokio::io::stdin()))
    }
}

impl<R> ConsoleDelivery<R>
where
    R: AsyncBufRead + Unpin + Send,
{
    pub fn new(input: R) -> Self {
        Self {
            input: Mutex::new(input),
        }
    }
}

async fn prompt() {
    let mut stdout = tokio::io::stdout();
    let _ = stdout.write_all(b"> ").await;
    let _ = stdout.flush().await;
}

#[async_trait]
impl<R> Delivery for ConsoleDelivery<R>
where
    R: AsyncBufRead + Unpin + Send,
{
    fn name(&self) -> &'static str {
        "console"
    }

    /// Messages are handled one at a time so replies print in order
    async fn run(&self, handler: Arc<dyn MessageHandler>) -> Result<(), BotError> {
        let mut input = self.input.lock().await;
        let mut lines = (&mut *input).lines();

        tracing::info!("Console mode, type a phone number or /start (Ctrl-D to quit)");

        prompt().await;
        while let Some(line) = lines.next_line().await? {
            if let Err(e) = handler.handle(InboundMessage::new(CONSOLE_CHAT_ID, line)).await {
                tracing::error!("Failed to handle message: {}", e);
            }
            prompt().await;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Collect(Mutex<Vec<String>>);

    #[async_trait]
    impl MessageHandler for Collect {
        async fn handle(&self, message: InboundMessage) -> Result<(), BotError> {
            assert_eq!(message.chat_id, CONSOLE_CHAT_ID);
            self.0.lock().await.push(message.text);
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_each_line_is_a_message() {
        let delivery = ConsoleDelivery::new(BufReader::new(&b"/start\n+919876543210\n\n"[..]));
        let collect = Arc::new(Collect(Mutex::new(Vec::new())));

        delivery.run(collect.clone()).await.unwrap();

        assert_eq!(*collect.0.lock().await, vec!["/start", "+919876543210", ""]);
    }
}
