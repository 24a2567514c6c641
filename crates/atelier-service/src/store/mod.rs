//! # Storage Ports
//!
//! Trait seams standing in for the external relational store.
//!
//! ## Ownership
//! Invoices, payments and call logs are owned by the external store. The
//! services never hold them beyond a single computation and take no
//! responsibility for durability, querying, or transactions — those belong
//! to whatever implements these traits.
//!
//! ## Port Surface
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Storage Ports                                     │
//! │                                                                         │
//! │  CallLogStore                     InvoiceStore                         │
//! │  ─────────────                    ─────────────                        │
//! │  insert_call_log                  insert_invoice                       │
//! │                                   invoice (by id)                      │
//! │                                   insert_payment                       │
//! │                                   payments_for_invoice                 │
//! │                                   update_invoice_status               │
//! │                                                                         │
//! │  Implementations: the production store lives outside this workspace;  │
//! │  MemoryStore (below) backs the test suites.                            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use thiserror::Error;

use atelier_core::types::{CallLog, Invoice, InvoiceStatus, Payment};

pub mod memory;

pub use memory::MemoryStore;

// =============================================================================
// Store Error
// =============================================================================

/// Storage port errors.
///
/// Implementations map their native failures onto these variants so the
/// services stay backend-agnostic.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Entity not found in the store.
    #[error("{entity} not found: {id}")]
    NotFound { entity: String, id: String },

    /// Unique constraint violation.
    ///
    /// ## When This Occurs
    /// - Inserting a record with an id that already exists
    /// - Duplicate tracking number on a call log
    #[error("Duplicate {field}: '{value}' already exists")]
    Duplicate { field: String, value: String },

    /// Backend failure (connection, query, timeout).
    #[error("Store backend error: {0}")]
    Backend(String),
}

impl StoreError {
    /// Creates a NotFound error for a given entity type and ID.
    pub fn not_found(entity: impl Into<String>, id: impl Into<String>) -> Self {
        StoreError::NotFound {
            entity: entity.into(),
            id: id.into(),
        }
    }

    /// Creates a Duplicate error.
    pub fn duplicate(field: impl Into<String>, value: impl Into<String>) -> Self {
        StoreError::Duplicate {
            field: field.into(),
            value: value.into(),
        }
    }
}

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

// =============================================================================
// Ports
// =============================================================================

/// Persistence port for call logs.
#[async_trait]
pub trait CallLogStore: Send + Sync {
    /// Persists a new call log. Fails with `Duplicate` if the id or tracking
    /// number is already present.
    async fn insert_call_log(&self, call_log: &CallLog) -> StoreResult<()>;
}

/// Persistence port for invoices and their payments.
#[async_trait]
pub trait InvoiceStore: Send + Sync {
    /// Persists a new invoice.
    async fn insert_invoice(&self, invoice: &Invoice) -> StoreResult<()>;

    /// Fetches an invoice by id. `None` when absent — absence is not a store
    /// failure, the caller decides whether it is an error.
    async fn invoice(&self, id: &str) -> StoreResult<Option<Invoice>>;

    /// Persists a new payment.
    async fn insert_payment(&self, payment: &Payment) -> StoreResult<()>;

    /// Lists ALL payments recorded against an invoice, oldest first.
    ///
    /// Reconciliation always runs over this full set, never a partial sum.
    async fn payments_for_invoice(&self, invoice_id: &str) -> StoreResult<Vec<Payment>>;

    /// Writes a derived status back onto an invoice.
    async fn update_invoice_status(
        &self,
        invoice_id: &str,
        status: InvoiceStatus,
        updated_at: DateTime<Utc>,
    ) -> StoreResult<()>;
}
