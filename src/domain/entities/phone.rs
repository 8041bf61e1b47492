use std::fmt;

/// Value used for any detail the validation service left out
pub const UNKNOWN: &str = "Unknown";

/// Details reported for a number the validation service recognised
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhoneDetails {
    pub country: String,
    pub location: String,
    pub carrier: String,
}

impl PhoneDetails {
    /// Build details, replacing missing or empty fields with `Unknown`
    pub fn from_optional(
        country: Option<String>,
        location: Option<String>,
        carrier: Option<String>,
    ) -> Self {
        Self {
            country: or_unknown(country),
            location: or_unknown(location),
            carrier: or_unknown(carrier),
        }
    }
}

fn or_unknown(value: Option<String>) -> String {
    value
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| UNKNOWN.to_string())
}

/// Why a lookup did not produce details
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvalidReason {
    /// The service answered but does not consider the number valid
    NotFound,
    /// The service could not be reached or answered garbage
    ServiceUnavailable,
}

impl InvalidReason {
    /// Fixed text shown to the user for this reason
    pub fn user_message(&self) -> &'static str {
        match self {
            InvalidReason::NotFound => "❌ Invalid phone number or not found.",
            InvalidReason::ServiceUnavailable => "⚠️ Unable to fetch info at the moment.",
        }
    }
}

impl fmt::Display for InvalidReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InvalidReason::NotFound => write!(f, "not found or invalid"),
            InvalidReason::ServiceUnavailable => write!(f, "service unavailable"),
        }
    }
}

/// Outcome of validating one phone number
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PhoneValidationResult {
    Valid(PhoneDetails),
    Invalid(InvalidReason),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_fields_default_to_unknown() {
        let details = PhoneDetails::from_optional(Some("India".to_string()), None, Some(String::new()));
        assert_eq!(details.country, "India");
        assert_eq!(details.location, UNKNOWN);
        assert_eq!(details.carrier, UNKNOWN);
    }

    #[test]
    fn test_present_fields_kept_verbatim() {
        let details = PhoneDetails::from_optional(
            Some(" India (Republic of) ".to_string()),
            Some("  ".to_string()),
            Some("Airtel\n".to_string()),
        );
        assert_eq!(details.country, " India (Republic of) ");
        assert_eq!(details.location, "  ");
        assert_eq!(details.carrier, "Airtel\n");
    }

    #[test]
    fn test_reason_display() {
        assert_eq!(InvalidReason::NotFound.to_string(), "not found or invalid");
        assert_eq!(InvalidReason::ServiceUnavailable.to_string(), "service unavailable");
    }
}
