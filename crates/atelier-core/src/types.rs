//! # Domain Types
//!
//! Core domain types used throughout Atelier CRM.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    CallLog      │   │    Invoice      │   │    Payment      │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id (UUID)      │   │  id (UUID)      │   │  id (UUID)      │       │
//! │  │  tracking_number│   │  customer_id    │   │  invoice_id (FK)│       │
//! │  │  customer_name  │   │  amount_cents   │   │  method         │       │
//! │  │  notes          │   │  status         │   │  amount_cents   │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐                             │
//! │  │  InvoiceStatus  │   │ PaymentMethod   │                             │
//! │  │  ─────────────  │   │  ─────────────  │                             │
//! │  │  Unpaid         │   │  Cash           │                             │
//! │  │  Partial        │   │  Card           │                             │
//! │  │  Paid           │   │  BankTransfer   │                             │
//! │  └─────────────────┘   │  Check          │                             │
//! │                        └─────────────────┘                             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Dual-Key Identity Pattern
//! Every entity has:
//! - `id`: UUID v4 - immutable, used for database relations
//! - Business ID: (tracking_number, invoice number, etc.) - human-readable

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::Money;

// =============================================================================
// Invoice Status
// =============================================================================

/// The payment status of an invoice.
///
/// Derived exclusively by the reconciliation engine from the invoice amount
/// and the full set of recorded payments — never set by hand. The forward
/// path is `Unpaid -> Partial -> Paid` (a single covering payment may jump
/// straight to `Paid`); no transition moves backward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum InvoiceStatus {
    /// No payments recorded.
    Unpaid,
    /// Payments recorded, but less than the invoice amount.
    Partial,
    /// Payments cover (or exceed) the invoice amount.
    Paid,
}

impl Default for InvoiceStatus {
    fn default() -> Self {
        InvoiceStatus::Unpaid
    }
}

// =============================================================================
// Payment Method
// =============================================================================

/// How a payment was tendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    /// Physical cash payment.
    Cash,
    /// Card payment on external terminal.
    Card,
    /// Direct bank transfer.
    BankTransfer,
    /// Paper check.
    Check,
}

// =============================================================================
// Invoice
// =============================================================================

/// An accounts-receivable invoice.
///
/// ## Invariant
/// `status` is always consistent with the sum of recorded payments:
/// paid iff `sum >= amount`, partial iff `0 < sum < amount`, unpaid iff
/// `sum == 0`. The receivable service re-derives it from the full payment
/// set after every write.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Invoice {
    /// Unique identifier (UUID v4).
    pub id: String,

    /// Customer this invoice bills.
    pub customer_id: String,

    /// Total invoiced amount in cents. Always positive.
    pub amount_cents: i64,

    /// Date payment is due.
    #[ts(as = "String")]
    pub due_date: NaiveDate,

    /// Derived payment status.
    pub status: InvoiceStatus,

    /// Optional free-text notes.
    pub notes: Option<String>,

    /// When the invoice was created.
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,

    /// When the invoice was last updated (status write-backs included).
    #[ts(as = "String")]
    pub updated_at: DateTime<Utc>,
}

impl Invoice {
    /// Returns the invoiced amount as a Money type.
    #[inline]
    pub fn amount(&self) -> Money {
        Money::from_cents(self.amount_cents)
    }
}

// =============================================================================
// Payment
// =============================================================================

/// A payment recorded against an invoice.
///
/// Payments are immutable once recorded: recording one triggers a
/// recomputation of the owning invoice's status, but the payment row itself
/// is never touched again.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Payment {
    /// Unique identifier (UUID v4).
    pub id: String,

    /// Invoice this payment is applied against.
    pub invoice_id: String,

    /// How the payment was tendered.
    pub method: PaymentMethod,

    /// Amount paid in cents. Always strictly positive.
    pub amount_cents: i64,

    /// External reference (transfer id, check number, etc.).
    pub reference: Option<String>,

    /// Optional operator notes.
    pub notes: Option<String>,

    /// When the payment was recorded.
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
}

impl Payment {
    /// Returns the payment amount as Money.
    #[inline]
    pub fn amount(&self) -> Money {
        Money::from_cents(self.amount_cents)
    }
}

// =============================================================================
// Call Log
// =============================================================================

/// A logged customer call — the record that opens an engagement.
///
/// The call log is where a tracking number is *minted*; every sibling number
/// (quote, order, production) is later derived from this one, never minted
/// independently.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CallLog {
    /// Unique identifier (UUID v4).
    pub id: String,

    /// Minted tracking number in `CL-YYYY-NNNN` text form.
    pub tracking_number: String,

    /// Name the caller gave.
    pub customer_name: String,

    /// Callback phone number, if captured.
    pub phone: Option<String>,

    /// What the caller asked about (ring resize, custom piece, repair, ...).
    pub inquiry: Option<String>,

    /// Optional operator notes.
    pub notes: Option<String>,

    /// When the call was logged.
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invoice_status_default() {
        let status = InvoiceStatus::default();
        assert_eq!(status, InvoiceStatus::Unpaid);
    }

    #[test]
    fn test_invoice_amount_as_money() {
        let invoice = Invoice {
            id: "00000000-0000-0000-0000-000000000001".to_string(),
            customer_id: "00000000-0000-0000-0000-000000000002".to_string(),
            amount_cents: 125_000,
            due_date: NaiveDate::from_ymd_opt(2026, 9, 1).unwrap(),
            status: InvoiceStatus::Unpaid,
            notes: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        assert_eq!(invoice.amount(), Money::from_cents(125_000));
    }

    #[test]
    fn test_status_serializes_snake_case() {
        let json = serde_json::to_string(&InvoiceStatus::Partial).unwrap();
        assert_eq!(json, "\"partial\"");

        let json = serde_json::to_string(&PaymentMethod::BankTransfer).unwrap();
        assert_eq!(json, "\"bank_transfer\"");
    }
}
