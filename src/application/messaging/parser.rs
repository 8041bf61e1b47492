//! Message parser - Classifies inbound text before any work is done

use once_cell::sync::Lazy;
use regex_lite::Regex;

/// Command that triggers the welcome message
pub const GREETING_COMMAND: &str = "/start";

/// Optional leading `+`, then 7 to 15 digits
static PHONE_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\+?\d{7,15}$").expect("phone pattern compiles"));

/// What the router should do with a message
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Classification {
    /// Nothing to answer
    Empty,
    /// The greeting command
    Greeting,
    /// Text that does not look like a phone number
    Malformed,
    /// A candidate phone number, trimmed
    Phone(String),
}

/// Classifies raw message text
pub struct MessageParser;

impl MessageParser {
    pub fn classify(text: &str) -> Classification {
        let text = text.trim();

        if text.is_empty() {
            return Classification::Empty;
        }

        if text == GREETING_COMMAND {
            return Classification::Greeting;
        }

        if !Self::looks_like_phone(text) {
            return Classification::Malformed;
        }

        Classification::Phone(text.to_string())
    }

    /// Check the phone number shape: optional `+`, 7-15 ASCII digits
    pub fn looks_like_phone(text: &str) -> bool {
        PHONE_PATTERN.is_match(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_and_whitespace() {
        assert_eq!(MessageParser::classify(""), Classification::Empty);
        assert_eq!(MessageParser::classify("   \n"), Classification::Empty);
    }

    #[test]
    fn test_greeting() {
        assert_eq!(MessageParser::classify("/start"), Classification::Greeting);
        assert_eq!(MessageParser::classify("  /start "), Classification::Greeting);
        // Only the exact token counts
        assert_eq!(MessageParser::classify("/start now"), Classification::Malformed);
        assert_eq!(MessageParser::classify("/START"), Classification::Malformed);
    }

    #[test]
    fn test_phone_shapes() {
        assert_eq!(
            MessageParser::classify("+919876543210"),
            Classification::Phone("+919876543210".to_string())
        );
        assert_eq!(
            MessageParser::classify(" 1234567 "),
            Classification::Phone("1234567".to_string())
        );
        assert!(MessageParser::looks_like_phone("123456789012345"));
    }

    #[test]
    fn test_malformed_shapes() {
        for text in [
            "123456",           // too short
            "1234567890123456", // too long
            "++1234567",
            "+1 234 567 890",
            "+1-234-567-890",
            "12345a7",
            "hello",
            "/help",
            "1234567+",
        ] {
            assert_eq!(MessageParser::classify(text), Classification::Malformed, "{}", text);
        }
    }
}
