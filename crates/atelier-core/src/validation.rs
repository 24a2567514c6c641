//! # Validation Module
//!
//! Input validation utilities for Atelier CRM.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Dashboard Frontend (TypeScript)                              │
//! │  ├── Basic format checks (empty, length)                               │
//! │  └── Immediate user feedback                                           │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: Service layer (Rust)                                         │
//! │  ├── Type validation (deserialization)                                 │
//! │  └── THIS MODULE: Business rule validation                             │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: External relational store                                    │
//! │  ├── NOT NULL constraints                                              │
//! │  ├── UNIQUE constraints                                                │
//! │  └── Foreign key constraints                                           │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The reconciliation engine defines no recovery behavior for non-positive
//! amounts: the positivity validators here run in the calling layer BEFORE
//! the engine is invoked, so the engine only ever sees well-formed input.
//!
//! ## Usage
//! ```rust
//! use atelier_core::validation::{validate_payment_amount_cents, validate_tracking_number};
//!
//! // Validate a payment before recording it
//! validate_payment_amount_cents(25_000).unwrap();
//!
//! // Validate a pasted tracking number at the point of entry
//! let number = validate_tracking_number("CL-2026-0042").unwrap();
//! ```

use crate::error::ValidationError;
use crate::tracking::TrackingNumber;
use crate::{MAX_CUSTOMER_NAME_LEN, MAX_NOTES_LEN};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// String Validators
// =============================================================================

/// Validates a customer name.
///
/// ## Rules
/// - Must not be empty (after trimming)
/// - Must be at most 120 characters
///
/// ## Example
/// ```rust
/// use atelier_core::validation::validate_customer_name;
///
/// assert!(validate_customer_name("Priya Sharma").is_ok());
/// assert!(validate_customer_name("").is_err());
/// ```
pub fn validate_customer_name(name: &str) -> ValidationResult<()> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::Required {
            field: "customer_name".to_string(),
        });
    }

    if name.len() > MAX_CUSTOMER_NAME_LEN {
        return Err(ValidationError::TooLong {
            field: "customer_name".to_string(),
            max: MAX_CUSTOMER_NAME_LEN,
        });
    }

    Ok(())
}

/// Validates a free-text notes field. Empty is allowed.
pub fn validate_notes(notes: &str) -> ValidationResult<()> {
    if notes.len() > MAX_NOTES_LEN {
        return Err(ValidationError::TooLong {
            field: "notes".to_string(),
            max: MAX_NOTES_LEN,
        });
    }

    Ok(())
}

/// Validates tracking-number text at the point of entry.
///
/// ## When To Call
/// Wherever a user supplies a tracking number as text — search boxes, pasted
/// references, imports. Malformed numbers are reported as a validation error
/// here, never silently coerced.
///
/// ## Returns
/// The parsed [`TrackingNumber`] so callers work with the typed value from
/// this point on.
pub fn validate_tracking_number(text: &str) -> ValidationResult<TrackingNumber> {
    text.parse::<TrackingNumber>().map_err(|err| ValidationError::InvalidFormat {
        field: "tracking_number".to_string(),
        reason: err.to_string(),
    })
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates an invoice amount in cents.
///
/// ## Rules
/// - Must be strictly positive (> 0)
///
/// A non-positive invoice amount makes both "balance" and "status"
/// semantically undefined, so it is rejected here rather than passed through
/// to reconciliation.
pub fn validate_invoice_amount_cents(cents: i64) -> ValidationResult<()> {
    if cents <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "invoice amount".to_string(),
        });
    }

    Ok(())
}

/// Validates a payment amount in cents.
///
/// ## Rules
/// - Must be strictly positive (> 0)
/// - Zero and negative payments (refunds) are not supported
pub fn validate_payment_amount_cents(cents: i64) -> ValidationResult<()> {
    if cents <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "payment amount".to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// UUID Validators
// =============================================================================

/// Validates a UUID string format.
///
/// ## Rules
/// - Must be a valid UUID format
/// - 36 characters with hyphens: xxxxxxxx-xxxx-xxxx-xxxx-xxxxxxxxxxxx
///
/// ## Example
/// ```rust
/// use atelier_core::validation::validate_uuid;
///
/// assert!(validate_uuid("550e8400-e29b-41d4-a716-446655440000").is_ok());
/// assert!(validate_uuid("not-a-uuid").is_err());
/// ```
pub fn validate_uuid(id: &str) -> ValidationResult<()> {
    if id.trim().is_empty() {
        return Err(ValidationError::Required {
            field: "id".to_string(),
        });
    }

    uuid::Uuid::parse_str(id).map_err(|_| ValidationError::InvalidFormat {
        field: "id".to_string(),
        reason: "must be a valid UUID".to_string(),
    })?;

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tracking::TrackingPrefix;

    #[test]
    fn test_validate_customer_name() {
        assert!(validate_customer_name("Priya Sharma").is_ok());
        assert!(validate_customer_name("J").is_ok());

        assert!(validate_customer_name("").is_err());
        assert!(validate_customer_name("   ").is_err());
        assert!(validate_customer_name(&"A".repeat(200)).is_err());
    }

    #[test]
    fn test_validate_notes() {
        assert!(validate_notes("").is_ok());
        assert!(validate_notes("customer prefers white gold").is_ok());
        assert!(validate_notes(&"x".repeat(3000)).is_err());
    }

    #[test]
    fn test_validate_tracking_number() {
        let number = validate_tracking_number("CL-2026-0042").unwrap();
        assert_eq!(number.prefix(), TrackingPrefix::CallLog);
        assert_eq!(number.sequence(), 42);

        let err = validate_tracking_number("CL-26-42").unwrap_err();
        assert!(matches!(err, ValidationError::InvalidFormat { .. }));
    }

    #[test]
    fn test_validate_invoice_amount_cents() {
        assert!(validate_invoice_amount_cents(1).is_ok());
        assert!(validate_invoice_amount_cents(125_000).is_ok());

        assert!(validate_invoice_amount_cents(0).is_err());
        assert!(validate_invoice_amount_cents(-100).is_err());
    }

    #[test]
    fn test_validate_payment_amount_cents() {
        assert!(validate_payment_amount_cents(2_500).is_ok());

        assert!(validate_payment_amount_cents(0).is_err());
        assert!(validate_payment_amount_cents(-2_500).is_err());
    }

    #[test]
    fn test_validate_uuid() {
        assert!(validate_uuid("550e8400-e29b-41d4-a716-446655440000").is_ok());
        assert!(validate_uuid("").is_err());
        assert!(validate_uuid("not-a-uuid").is_err());
        assert!(validate_uuid("123").is_err());
    }
}
