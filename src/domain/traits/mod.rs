//! Domain traits - Abstractions for infrastructure implementations

pub mod bot;
pub mod delivery;
pub mod validator;

pub use bot::{Bot, BotInfo, KeyboardButton};
pub use delivery::{Delivery, MessageHandler};
pub use validator::PhoneValidator;
