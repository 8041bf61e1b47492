//! Infrastructure layer - External concerns
//!
//! This layer contains:
//! - Config: Configuration loading
//! - Adapters: Platform integrations (Telegram, console)
//! - Validation: Phone validation API client
//! - Delivery: Polling, webhook and console message sources

pub mod config;
pub mod adapters;
pub mod validation;
pub mod delivery;

#[cfg(test)]
pub(crate) mod stub;
