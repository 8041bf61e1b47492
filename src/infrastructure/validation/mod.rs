//! Phone validation client (apilayer number_verification)

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::Value;

use crate::application::errors::ValidationError;
use crate::domain::entities::{InvalidReason, PhoneDetails, PhoneValidationResult};
use crate::domain::traits::PhoneValidator;

/// Response body of the validation endpoint.
///
/// Fields are kept as raw JSON: the service is not strict about types, and a
/// `null` or numeric value must not turn a lookup into an outage.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ValidationResponse {
    #[serde(default)]
    pub valid: Value,
    #[serde(default)]
    pub country_name: Value,
    #[serde(default)]
    pub location: Value,
    #[serde(default)]
    pub carrier: Value,
}

impl ValidationResponse {
    pub fn into_result(self) -> PhoneValidationResult {
        if !is_truthy(&self.valid) {
            return PhoneValidationResult::Invalid(InvalidReason::NotFound);
        }

        PhoneValidationResult::Valid(PhoneDetails::from_optional(
            as_text(self.country_name),
            as_text(self.location),
            as_text(self.carrier),
        ))
    }
}

/// `null`, `false`, `0` and `""` count as no
fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map_or(true, |f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

fn as_text(value: Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// HTTP client for the phone validation API
pub struct ValidationClient {
    client: Client,
    api_url: String,
    api_key: String,
}

impl ValidationClient {
    pub fn new(api_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            api_url: api_url.into(),
            api_key: api_key.into(),
        }
    }

    /// Single request to the validation endpoint
    pub async fn fetch(&self, phone: &str) -> Result<ValidationResponse, ValidationError> {
        let response = self.client
            .get(&self.api_url)
            .header("apikey", &self.api_key)
            .query(&[("number", phone)])
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(ValidationError::Status(response.status().as_u16()));
        }

        let body = response.bytes().await?;
        Self::parse_response(&body)
    }

    pub fn parse_response(body: &[u8]) -> Result<ValidationResponse, ValidationError> {
        Ok(serde_json::from_slice(body)?)
    }
}

#[async_trait]
impl PhoneValidator for ValidationClient {
    async fn validate(&self, phone: &str) -> PhoneValidationResult {
        match self.fetch(phone).await {
            Ok(response) => response.into_result(),
            Err(e) => {
                tracing::warn!("Validation API error: {}", e);
                PhoneValidationResult::Invalid(InvalidReason::ServiceUnavailable)
            }
        }
    }
}
