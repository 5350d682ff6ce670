//! # Validation Module
//!
//! Input validation for the checkout forms and the search box.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Presentation (form `required` attributes)                    │
//! │  └── Immediate user feedback                                           │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: Checkout reducer                                             │
//! │  └── THIS MODULE: every required field is non-blank                    │
//! │                                                                         │
//! │  Nothing beyond "required" is checked: card numbers, expiry dates     │
//! │  and CVVs are never verified, because no payment is really taken.     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use crate::checkout::{PaymentInfo, ShippingInfo};
use crate::error::ValidationError;
use crate::MAX_SEARCH_QUERY_LEN;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Field Validators
// =============================================================================

/// Validates that a required form field is not blank.
///
/// ## Example
/// ```rust
/// use lumiere_core::validation::validate_required;
///
/// assert!(validate_required("city", "Lisbon").is_ok());
/// assert!(validate_required("city", "   ").is_err());
/// ```
pub fn validate_required(field: &str, value: &str) -> ValidationResult<()> {
    if value.trim().is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }

    Ok(())
}

/// Validates every field of the shipping form, in form order.
///
/// Reports the first blank field.
pub fn validate_shipping_info(info: &ShippingInfo) -> ValidationResult<()> {
    let fields = [
        ("first name", info.first_name.as_str()),
        ("last name", info.last_name.as_str()),
        ("email", info.email.as_str()),
        ("phone", info.phone.as_str()),
        ("address", info.address.as_str()),
        ("city", info.city.as_str()),
        ("country", info.country.as_str()),
        ("zip", info.zip.as_str()),
    ];

    fields
        .iter()
        .try_for_each(|(field, value)| validate_required(field, value))
}

/// Validates every field of the payment form, in form order.
pub fn validate_payment_info(info: &PaymentInfo) -> ValidationResult<()> {
    let fields = [
        ("card number", info.card_number.as_str()),
        ("name on card", info.card_name.as_str()),
        ("expiry", info.expiry.as_str()),
        ("cvv", info.cvv.as_str()),
    ];

    fields
        .iter()
        .try_for_each(|(field, value)| validate_required(field, value))
}

/// Validates a search query.
///
/// ## Rules
/// - Can be empty (search yields no results)
/// - Maximum 100 characters
///
/// ## Returns
/// The trimmed query string.
pub fn validate_search_query(query: &str) -> ValidationResult<String> {
    let query = query.trim();

    if query.chars().count() > MAX_SEARCH_QUERY_LEN {
        return Err(ValidationError::TooLong {
            field: "query".to_string(),
            max: MAX_SEARCH_QUERY_LEN,
        });
    }

    Ok(query.to_string())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn shipping() -> ShippingInfo {
        ShippingInfo {
            first_name: "Ada".into(),
            last_name: "Lovelace".into(),
            email: "ada@example.com".into(),
            phone: "+44 20 7946 0000".into(),
            address: "12 St James's Square".into(),
            city: "London".into(),
            country: "United Kingdom".into(),
            zip: "SW1Y 4JH".into(),
        }
    }

    #[test]
    fn test_validate_required() {
        assert!(validate_required("zip", "10001").is_ok());
        assert!(validate_required("zip", "").is_err());
        assert!(validate_required("zip", " \t ").is_err());
    }

    #[test]
    fn test_validate_shipping_info() {
        assert!(validate_shipping_info(&shipping()).is_ok());

        let mut missing_city = shipping();
        missing_city.city = String::new();
        assert_eq!(
            validate_shipping_info(&missing_city),
            Err(ValidationError::Required {
                field: "city".into()
            })
        );
    }

    #[test]
    fn test_validate_shipping_reports_first_blank_field() {
        let mut info = shipping();
        info.email = " ".into();
        info.zip = String::new();
        assert_eq!(
            validate_shipping_info(&info),
            Err(ValidationError::Required {
                field: "email".into()
            })
        );
    }

    #[test]
    fn test_validate_payment_info() {
        let info = PaymentInfo {
            card_number: "4242 4242 4242 4242".into(),
            card_name: "Ada Lovelace".into(),
            expiry: "12/29".into(),
            cvv: "123".into(),
        };
        assert!(validate_payment_info(&info).is_ok());

        // Content is never checked, only presence
        let nonsense = PaymentInfo {
            card_number: "not a card".into(),
            card_name: "x".into(),
            expiry: "whenever".into(),
            cvv: "?".into(),
        };
        assert!(validate_payment_info(&nonsense).is_ok());

        let no_cvv = PaymentInfo {
            cvv: String::new(),
            ..info
        };
        assert!(validate_payment_info(&no_cvv).is_err());
    }

    #[test]
    fn test_validate_search_query() {
        assert_eq!(validate_search_query("  ring ").unwrap(), "ring");
        assert_eq!(validate_search_query("").unwrap(), "");
        assert!(validate_search_query(&"a".repeat(101)).is_err());
    }
}
