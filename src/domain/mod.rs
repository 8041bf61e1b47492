//! Domain layer - Core business types with no external dependencies
//!
//! This layer contains:
//! - Entities: inbound messages, outbound replies, validation results
//! - Traits: Abstractions for infrastructure (Bot, PhoneValidator, Delivery)

pub mod entities;
pub mod traits;
