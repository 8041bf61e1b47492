//! Application layer - Use cases and business logic
//!
//! This layer contains:
//! - Services: routing and reply formatting
//! - Errors: Domain-specific errors
//! - Messaging: Message classification

pub mod errors;
pub mod services;
pub mod messaging;
