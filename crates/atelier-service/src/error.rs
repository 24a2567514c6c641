//! # Service Error Types
//!
//! What the (external) route handlers see when a service call fails.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Propagation                                    │
//! │                                                                         │
//! │  TrackingError / ValidationError (atelier-core)                        │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  CoreError ─────────┐                                                  │
//! │                     ├──► ServiceError (this module)                    │
//! │  StoreError ────────┘         │                                        │
//! │                               ▼                                        │
//! │  Route handler serializes a user-friendly message                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

use atelier_core::error::{CoreError, TrackingError, ValidationError};

use crate::store::StoreError;

/// Service operation errors.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// Referenced entity does not exist.
    ///
    /// ## When This Occurs
    /// - Recording a payment against an unknown invoice id
    /// - Summarizing a deleted invoice
    #[error("{entity} not found: {id}")]
    NotFound { entity: String, id: String },

    /// Domain logic failure (wraps CoreError).
    #[error(transparent)]
    Core(#[from] CoreError),

    /// Storage port failure (wraps StoreError).
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl ServiceError {
    /// Creates a NotFound error for a given entity type and ID.
    pub fn not_found(entity: impl Into<String>, id: impl Into<String>) -> Self {
        ServiceError::NotFound {
            entity: entity.into(),
            id: id.into(),
        }
    }
}

/// Validation failures surface as the core domain error they are.
impl From<ValidationError> for ServiceError {
    fn from(err: ValidationError) -> Self {
        ServiceError::Core(err.into())
    }
}

/// Malformed tracking numbers surface unchanged, wrapped once.
impl From<TrackingError> for ServiceError {
    fn from(err: TrackingError) -> Self {
        ServiceError::Core(err.into())
    }
}

/// Result type for service operations.
pub type ServiceResult<T> = Result<T, ServiceError>;

// =============================================================================
// Unit Tests
// =============================================================================
