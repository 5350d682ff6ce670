//! # Store Error Types
//!
//! Error types for session operations, plus the serializable shape the
//! presentation layer receives.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Store Error Categories                             │
//! │                                                                         │
//! │  ┌─────────────────┐  ┌─────────────────┐  ┌─────────────────────────┐ │
//! │  │  Configuration  │  │    Payment      │  │     Core                │ │
//! │  │                 │  │                 │  │                         │ │
//! │  │  InvalidConfig  │  │  Declined       │  │  ProductNotFound        │ │
//! │  │  ConfigLoad...  │  │  Timeout        │  │  InvalidTransition      │ │
//! │  │  ConfigSave...  │  │  Unavailable    │  │  PaymentInProgress      │ │
//! │  └─────────────────┘  └─────────────────┘  │  Validation             │ │
//! │                                             └─────────────────────────┘ │
//! │                                                                         │
//! │  StoreError ──► ApiError { code: "PAYMENT_ERROR", message } ──► UI    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use lumiere_core::CoreError;
use serde::Serialize;
use thiserror::Error;
use ts_rs::TS;

/// Result type alias for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

// =============================================================================
// Payment Error
// =============================================================================

/// Failure reported by a [`PaymentGateway`](crate::payment::PaymentGateway).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PaymentError {
    /// The card was refused. Retrying will not help.
    #[error("Payment declined: {0}")]
    Declined(String),

    /// The gateway did not answer in time.
    #[error("Payment timed out after {0} ms")]
    Timeout(u64),

    /// The gateway could not be reached.
    #[error("Payment gateway unavailable: {0}")]
    Unavailable(String),
}

impl PaymentError {
    /// Returns true if another attempt may succeed.
    ///
    /// ## Retryable Errors
    /// - Timeouts
    /// - Gateway unavailable
    ///
    /// ## Non-Retryable Errors
    /// - Declines
    pub fn is_retryable(&self) -> bool {
        matches!(self, PaymentError::Timeout(_) | PaymentError::Unavailable(_))
    }
}

// =============================================================================
// Store Error
// =============================================================================

/// Everything a session operation can fail with.
#[derive(Debug, Error)]
pub enum StoreError {
    // =========================================================================
    // Domain Errors
    // =========================================================================
    /// A cart or checkout rule was violated.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// The payment did not go through.
    #[error(transparent)]
    Payment(#[from] PaymentError),

    // =========================================================================
    // Configuration Errors
    // =========================================================================
    /// Invalid storefront configuration.
    #[error("Invalid storefront configuration: {0}")]
    InvalidConfig(String),

    /// storefront.toml could not be read or parsed.
    #[error("Failed to load config: {0}")]
    ConfigLoadFailed(String),

    /// storefront.toml could not be written.
    #[error("Failed to save config: {0}")]
    ConfigSaveFailed(String),
}

// =============================================================================
// Error Conversions
// =============================================================================

impl From<lumiere_core::ValidationError> for StoreError {
    fn from(err: lumiere_core::ValidationError) -> Self {
        StoreError::Core(CoreError::Validation(err))
    }
}

impl From<std::io::Error> for StoreError {
    fn from(err: std::io::Error) -> Self {
        StoreError::ConfigLoadFailed(err.to_string())
    }
}

impl From<toml::de::Error> for StoreError {
    fn from(err: toml::de::Error) -> Self {
        StoreError::ConfigLoadFailed(err.to_string())
    }
}

impl From<toml::ser::Error> for StoreError {
    fn from(err: toml::ser::Error) -> Self {
        StoreError::ConfigSaveFailed(err.to_string())
    }
}

// =============================================================================
// API Error
// =============================================================================

/// Error shape handed to the presentation layer.
///
/// ## Serialization
/// ```json
/// {
///   "code": "PAYMENT_ERROR",
///   "message": "Payment declined: insufficient funds"
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct ApiError {
    /// What kind of failure this is
    pub code: ErrorCode,

    /// Shown to the shopper as is
    pub message: String,
}

/// Stable codes the storefront UI switches on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, TS)]
#[ts(export)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Unknown product id
    NotFound,

    /// A required field is blank or input is malformed
    ValidationError,

    /// The checkout is not in a step that accepts the action
    InvalidState,

    /// A payment is already in flight
    PaymentInProgress,

    /// The payment failed
    PaymentError,

    /// Configuration could not be loaded, saved or validated
    ConfigError,
}

impl ApiError {
    /// Builds an error with an explicit code.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        ApiError {
            code,
            message: message.into(),
        }
    }

    /// `"{resource} not found: {id}"` with [`ErrorCode::NotFound`].
    pub fn not_found(resource: &str, id: &str) -> Self {
        ApiError::new(ErrorCode::NotFound, format!("{} not found: {}", resource, id))
    }

    /// A form or query problem the shopper can fix.
    pub fn validation(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::ValidationError, message)
    }
}

impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::ProductNotFound(id) => ApiError::not_found("Product", &id),
            CoreError::InvalidTransition { .. } => {
                ApiError::new(ErrorCode::InvalidState, err.to_string())
            }
            CoreError::PaymentInProgress => {
                ApiError::new(ErrorCode::PaymentInProgress, err.to_string())
            }
            CoreError::Validation(e) => ApiError::validation(e.to_string()),
        }
    }
}

/// Converts store errors to API errors.
impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Core(e) => e.into(),
            StoreError::Payment(e) => ApiError::new(ErrorCode::PaymentError, e.to_string()),
            StoreError::InvalidConfig(_)
            | StoreError::ConfigLoadFailed(_)
            | StoreError::ConfigSaveFailed(_) => {
                tracing::error!("Configuration error: {}", err);
                ApiError::new(ErrorCode::ConfigError, err.to_string())
            }
        }
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for ApiError {}

#[cfg(test)]
mod tests {
    use super::*;
    use lumiere_core::checkout::CheckoutStep;
    use lumiere_core::ValidationError;

    #[test]
    fn test_retryable_payment_errors() {
        assert!(PaymentError::Timeout(10_000).is_retryable());
        assert!(PaymentError::Unavailable("503".into()).is_retryable());
        assert!(!PaymentError::Declined("insufficient funds".into()).is_retryable());
    }

    #[test]
    fn test_api_error_codes() {
        let err: ApiError = StoreError::from(CoreError::ProductNotFound("42".into())).into();
        assert!(matches!(err.code, ErrorCode::NotFound));
        assert_eq!(err.message, "Product not found: 42");

        let err: ApiError = StoreError::from(ValidationError::Required {
            field: "email".into(),
        })
        .into();
        assert!(matches!(err.code, ErrorCode::ValidationError));
        assert_eq!(err.message, "email is required");

        let err: ApiError = StoreError::from(CoreError::InvalidTransition {
            step: CheckoutStep::Confirmation,
            action: "go back",
        })
        .into();
        assert!(matches!(err.code, ErrorCode::InvalidState));

        let err: ApiError = StoreError::from(PaymentError::Declined("stolen card".into())).into();
        assert!(matches!(err.code, ErrorCode::PaymentError));
        assert_eq!(err.message, "Payment declined: stolen card");
    }

    #[test]
    fn test_api_error_serialization() {
        let err = ApiError::new(ErrorCode::PaymentInProgress, "busy");
        let json = serde_json::to_string(&err).unwrap();
        assert_eq!(json, r#"{"code":"PAYMENT_IN_PROGRESS","message":"busy"}"#);
    }
}
