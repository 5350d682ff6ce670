//! # Errors
//!
//! What the catalog and checkout rules can reject.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  lumiere-core errors (this file)                                       │
//! │  ├── CoreError        - Catalog and checkout rule violations           │
//! │  └── ValidationError  - Missing required fields, oversized input       │
//! │                                                                         │
//! │  lumiere-store errors (separate crate)                                 │
//! │  ├── PaymentError     - Declined / timed out / unavailable gateway     │
//! │  └── StoreError       - Everything a session operation can fail with   │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → StoreError → ApiError → UI        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Cart operations have no error variants: adding always succeeds, and
//! removing or updating a line that is not in the cart is a no-op.

use thiserror::Error;

use crate::checkout::CheckoutStep;

// =============================================================================
// Core Error
// =============================================================================

/// A catalog lookup or checkout step that the rules refuse.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    /// Product id is not part of the catalog.
    #[error("Product not found: {0}")]
    ProductNotFound(String),

    /// The checkout cannot take this action in its current step.
    ///
    /// ## When This Occurs
    /// - Submitting payment while still on the shipping form
    /// - Going back from the confirmation screen
    /// - Reporting a payment result when no payment was started
    #[error("Cannot {action} during the {step} step")]
    InvalidTransition {
        step: CheckoutStep,
        action: &'static str,
    },

    /// A payment is already in flight for this checkout session.
    ///
    /// ## User Workflow
    /// ```text
    /// Click "Pay $4999.00"
    ///      │
    ///      ▼
    /// is_processing = true ──► button disabled
    ///      │
    ///      ▼
    /// Second click (or double submit) ──► PaymentInProgress
    /// ```
    #[error("A payment is already being processed for this checkout")]
    PaymentInProgress,

    /// A form field or query failed validation.
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// A single bad field.
///
/// Recovered locally: the form is shown again with the offending field.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// Empty or whitespace only.
    #[error("{field} is required")]
    Required { field: String },

    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Not one of the accepted names (category, sort order).
    #[error("{field} must be one of: {allowed:?}")]
    NotAllowed { field: String, allowed: Vec<String> },
}

// =============================================================================
// Result Type Alias
// =============================================================================

pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_core_error_display() {
        let err = CoreError::InvalidTransition {
            step: CheckoutStep::Shipping,
            action: "submit payment",
        };
        assert_eq!(
            err.to_string(),
            "Cannot submit payment during the shipping step"
        );

        assert_eq!(
            CoreError::ProductNotFound("42".into()).to_string(),
            "Product not found: 42"
        );
    }

    #[test]
    fn test_field_messages_name_the_field() {
        let missing = ValidationError::Required { field: "city".into() };
        assert_eq!(missing.to_string(), "city is required");

        let err = ValidationError::TooLong { field: "query".into(), max: 100 };
        assert_eq!(err.to_string(), "query must be at most 100 characters");
    }

    #[test]
    fn test_field_error_lifts_with_question_mark() {
        fn check_cvv(cvv: &str) -> CoreResult<()> {
            if cvv.trim().is_empty() {
                Err(ValidationError::Required { field: "cvv".into() })?;
            }
            Ok(())
        }

        assert!(check_cvv("123").is_ok());
        assert_eq!(
            check_cvv(" "),
            Err(CoreError::Validation(ValidationError::Required { field: "cvv".into() }))
        );
    }
}
