//! Reply texts and formatting of lookup results

use crate::domain::entities::{OutboundReply, PhoneDetails};
use crate::domain::traits::KeyboardButton;

pub const WELCOME_TEXT: &str = "👋 *Welcome to PhoneInfo Bot!*\n\
Send me any phone number (with country code) to get details.\n\
\n\
Example: `+919876543210`";

pub const INVALID_FORMAT_TEXT: &str = "📱 Please send a valid phone number (with country code).";

pub const WORKING_TEXT: &str = "🔍 Fetching info... Please wait...";

/// Builds the reply for a successful lookup
pub struct MessageFormatter;

impl MessageFormatter {
    pub fn format(chat_id: &str, original: &str, details: &PhoneDetails) -> OutboundReply {
        let digits = Self::digits_only(original);
        let whatsapp = Self::whatsapp_link(&digits);
        let telegram = Self::telegram_link(&digits);

        let text = format!(
            "📞 *Number:* {}\n\
             🌍 *Country:* {}\n\
             🏙️ *Location:* {}\n\
             📡 *Carrier:* {}\n\
             \n\
             🔗 *Quick Links:*\n\
             - [💬 WhatsApp Chat]({})\n\
             - [🔎 Search on Telegram]({})",
            original, details.country, details.location, details.carrier, whatsapp, telegram
        );

        OutboundReply::markdown(chat_id, text).with_button_row(vec![
            KeyboardButton::link("💬 WhatsApp", whatsapp),
            KeyboardButton::link("🔎 Telegram", telegram),
        ])
    }

    /// Keep only ASCII digits
    pub fn digits_only(text: &str) -> String {
        text.chars().filter(|c| c.is_ascii_digit()).collect()
    }

    pub fn whatsapp_link(digits: &str) -> String {
        format!("https://wa.me/{}", digits)
    }

    pub fn telegram_link(digits: &str) -> String {
        format!("https://t.me/+{}", digits)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::ParseMode;

    fn details() -> PhoneDetails {
        PhoneDetails {
            country: "India".to_string(),
            location: "Delhi".to_string(),
            carrier: "Airtel".to_string(),
        }
    }

    #[test]
    fn test_digits_only() {
        assert_eq!(MessageFormatter::digits_only("+91 (987) 654-3210"), "919876543210");
        assert_eq!(MessageFormatter::digits_only("+"), "");
    }

    #[test]
    fn test_format_body() {
        let reply = MessageFormatter::format("42", "+919876543210", &details());

        assert_eq!(reply.chat_id, "42");
        assert_eq!(reply.parse_mode, Some(ParseMode::Markdown));
        assert!(reply.text.starts_with("📞 *Number:* +919876543210\n"));
        assert!(reply.text.contains("🌍 *Country:* India\n"));
        assert!(reply.text.contains("🏙️ *Location:* Delhi\n"));
        assert!(reply.text.contains("📡 *Carrier:* Airtel\n"));
        assert!(reply.text.contains("(https://wa.me/919876543210)"));
        assert!(reply.text.contains("(https://t.me/+919876543210)"));
    }

    #[test]
    fn test_format_buttons() {
        let reply = MessageFormatter::format("42", "+919876543210", &details());

        assert_eq!(reply.buttons.len(), 1);
        assert_eq!(
            reply.buttons[0],
            vec![
                KeyboardButton::link("💬 WhatsApp", "https://wa.me/919876543210"),
                KeyboardButton::link("🔎 Telegram", "https://t.me/+919876543210"),
            ]
        );
    }

    #[test]
    fn test_welcome_mentions_example() {
        assert!(WELCOME_TEXT.contains("`+919876543210`"));
        assert!(WELCOME_TEXT.starts_with("👋 *Welcome to PhoneInfo Bot!*\nSend me"));
    }
}
