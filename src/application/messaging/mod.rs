//! Message handling - Classification of inbound text

pub mod parser;

pub use parser::{Classification, MessageParser, GREETING_COMMAND};
