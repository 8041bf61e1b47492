use async_trait::async_trait;
use crate::domain::entities::PhoneValidationResult;

/// Looks up a phone number with an external validation service.
///
/// Implementations never fail: any upstream problem is reported as
/// `PhoneValidationResult::Invalid(InvalidReason::ServiceUnavailable)`.
#[async_trait]
pub trait PhoneValidator: Send + Sync {
    async fn validate(&self, phone: &str) -> PhoneValidationResult;
}
