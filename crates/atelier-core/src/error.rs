//! # Error Types
//!
//! Domain-specific error types for atelier-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  atelier-core errors (this file)                                       │
//! │  ├── TrackingError    - Malformed tracking numbers                     │
//! │  ├── ValidationError  - Input validation failures                      │
//! │  └── CoreError        - General domain errors                          │
//! │                                                                         │
//! │  atelier-service errors (separate crate)                               │
//! │  ├── StoreError       - Storage port failures                          │
//! │  └── ServiceError     - What route handlers see                        │
//! │                                                                         │
//! │  Flow: TrackingError/ValidationError → CoreError → ServiceError        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (the offending text, field, etc.)
//! 3. Errors are enum variants, never String
//! 4. Each error variant maps to a user-facing message

use thiserror::Error;

// =============================================================================
// Tracking Error
// =============================================================================

/// Tracking-number parsing errors.
///
/// A malformed tracking number is always a caller-input problem. There is no
/// recovery path here: the text is either well-formed `PREFIX-YYYY-NNNN` with
/// a known prefix, or it is rejected unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TrackingError {
    /// Text does not match the tracking-number grammar.
    ///
    /// ## When This Occurs
    /// - User pastes a mistyped number into search
    /// - An imported record carries a number from another system
    /// - Lowercase prefix, 2-digit year, missing separators, zero sequence
    #[error("invalid tracking number '{text}': {reason}")]
    InvalidFormat {
        /// The text that failed to parse.
        text: String,
        /// What the grammar expected instead.
        reason: &'static str,
    },
}

impl TrackingError {
    /// Creates an InvalidFormat error for the given input text.
    pub fn invalid_format(text: impl Into<String>, reason: &'static str) -> Self {
        TrackingError::InvalidFormat {
            text: text.into(),
            reason,
        }
    }
}

// =============================================================================
// Core Error
// =============================================================================

/// Core business logic errors.
///
/// These errors represent business rule violations or domain logic failures.
/// They should be caught and translated to user-friendly messages.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Invoice amount violates the positive-amount precondition.
    ///
    /// ## When This Occurs
    /// - Creating an invoice with a zero or negative total
    /// - A reconciliation caller skipped validation
    #[error("Invalid invoice amount: {reason}")]
    InvalidInvoiceAmount { reason: String },

    /// Payment amount violates the positive-amount precondition.
    ///
    /// ## When This Occurs
    /// - Recording a zero or negative payment
    /// - Refund flows, which this subsystem does not support
    #[error("Invalid payment amount: {reason}")]
    InvalidPaymentAmount { reason: String },

    /// Tracking-number error (wraps TrackingError).
    #[error("Tracking error: {0}")]
    Tracking(#[from] TrackingError),

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These errors occur when user input doesn't meet requirements.
/// Used for early validation before business logic runs.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Invalid format (e.g., invalid UUID, invalid tracking number).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

// =============================================================================
// Result Type Aliases
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tracking_error_message() {
        let err = TrackingError::invalid_format("q-2024-0007", "prefix must be uppercase letters");
        assert_eq!(
            err.to_string(),
            "invalid tracking number 'q-2024-0007': prefix must be uppercase letters"
        );
    }

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::Required {
            field: "customer_name".to_string(),
        };
        assert_eq!(err.to_string(), "customer_name is required");

        let err = ValidationError::MustBePositive {
            field: "payment amount".to_string(),
        };
        assert_eq!(err.to_string(), "payment amount must be positive");
    }

    #[test]
    fn test_errors_convert_to_core_error() {
        let tracking_err = TrackingError::invalid_format("Q20240007", "expected PREFIX-YYYY-NNNN");
        let core_err: CoreError = tracking_err.into();
        assert!(matches!(core_err, CoreError::Tracking(_)));

        let validation_err = ValidationError::Required {
            field: "notes".to_string(),
        };
        let core_err: CoreError = validation_err.into();
        assert!(matches!(core_err, CoreError::Validation(_)));
    }
}
