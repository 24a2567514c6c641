//! # atelier-service: Application Services for Atelier CRM
//!
//! This crate implements the control flow of the CRM core over storage trait
//! seams. It owns no storage of its own: the external relational store is
//! consumed only through the opaque operations in [`store`] ("fetch invoice
//! by id", "list payments for invoice", "persist new record").
//!
//! ## Control Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Engagement Pipeline                               │
//! │                                                                         │
//! │  log_call() ──► mint CL-2026-0042 ──► persist call log                 │
//! │                      │                                                  │
//! │                      └──► quote_number()      → Q-2026-0042            │
//! │                           order_number()      → ORD-2026-0042          │
//! │                           production_number() → PRD-2026-0042          │
//! │                           (derived, never minted)                       │
//! │                                                                         │
//! │                       Accounts Receivable                               │
//! │                                                                         │
//! │  record_payment() ──► persist payment                                  │
//! │                  ──► reload FULL payment set                           │
//! │                  ──► reconcile()                                       │
//! │                  ──► write derived status back                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`store`] - Storage ports and the in-memory implementation
//! - [`engagement`] - Call logging and tracking-number derivation
//! - [`receivable`] - Invoice creation, payment recording, reconciliation
//! - [`error`] - Service error types

// =============================================================================
// Module Declarations
// =============================================================================

pub mod engagement;
pub mod error;
pub mod receivable;
pub mod store;

// =============================================================================
// Re-exports
// =============================================================================

pub use engagement::{EngagementService, NewCallLog};
pub use error::{ServiceError, ServiceResult};
pub use receivable::{InvoiceSummary, NewInvoice, NewPayment, PaymentReceipt, ReceivableService};
pub use store::{CallLogStore, InvoiceStore, MemoryStore, StoreError};
