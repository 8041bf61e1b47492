//! Telegram bot that looks up phone numbers with a validation API and
//! replies with the details plus WhatsApp/Telegram deep links.

pub mod domain;
pub mod application;
pub mod infrastructure;
