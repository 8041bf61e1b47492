//! Domain entities - Core business objects with no external dependencies

pub mod message;
pub mod phone;

pub use message::{InboundMessage, OutboundReply, ParseMode};
pub use phone::{InvalidReason, PhoneDetails, PhoneValidationResult, UNKNOWN};
