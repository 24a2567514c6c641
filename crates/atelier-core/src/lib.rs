//! # atelier-core: Pure Business Logic for Atelier CRM
//!
//! This crate is the **heart** of Atelier CRM. It contains all business logic
//! as pure functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Atelier CRM Architecture                          │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                  Dashboard Frontend (Next.js)                   │   │
//! │  │    Call Log UI ──► Quote UI ──► Order UI ──► Invoice UI        │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ HTTP route handlers (external)         │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                    atelier-service                              │   │
//! │  │    log_call, record_payment, invoice_summary, ...              │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ atelier-core (THIS CRATE) ★                     │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │  tracking │  │ reconcile │  │   money   │  │ validation│  │   │
//! │  │   │ CL-2026-  │  │  status   │  │   Money   │  │   rules   │  │   │
//! │  │   │   0001    │  │  balance  │  │  (cents)  │  │  checks   │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Invoice, Payment, CallLog, etc.)
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`tracking`] - Tracking numbers correlating one customer engagement
//! - [`reconcile`] - Invoice status and balance derivation
//! - [`error`] - Domain error types
//! - [`validation`] - Business rule validation
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: Every function is deterministic - same input = same output
//! 2. **No I/O**: Database, network, file system access is FORBIDDEN here
//! 3. **Integer Money**: All monetary values are in cents (i64) to avoid float errors
//! 4. **Explicit Errors**: All errors are typed, never strings or panics
//!
//! ## Example Usage
//!
//! ```rust
//! use atelier_core::money::Money;
//! use atelier_core::reconcile::reconcile;
//! use atelier_core::types::InvoiceStatus;
//!
//! // An invoice for $100.00 with two recorded payments
//! let amount = Money::from_cents(10_000);
//! let payments = [Money::from_cents(6_000), Money::from_cents(4_000)];
//!
//! let result = reconcile(amount, &payments);
//! assert_eq!(result.status, InvoiceStatus::Paid);
//! assert_eq!(result.balance, Money::zero());
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod money;
pub mod reconcile;
pub mod tracking;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use atelier_core::Money` instead of
// `use atelier_core::money::Money`

pub use error::{CoreError, TrackingError, ValidationError};
pub use money::Money;
pub use reconcile::{apply_payment, reconcile, Reconciliation};
pub use tracking::{EngagementNumbers, TrackingNumber, TrackingPrefix, TrackingSequence};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Maximum length of a customer name
///
/// ## Business Reason
/// Keeps names printable on quotes and invoices without truncation.
/// Can be made configurable per-tenant in future versions.
pub const MAX_CUSTOMER_NAME_LEN: usize = 120;

/// Maximum length of a free-text notes field
///
/// ## Business Reason
/// Call logs and payments carry short operator notes, not documents.
pub const MAX_NOTES_LEN: usize = 2000;
