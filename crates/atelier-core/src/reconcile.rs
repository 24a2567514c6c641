//! # Reconciliation Engine
//!
//! Derives an invoice's payment status and outstanding balance from its
//! amount and the full set of recorded payments.
//!
//! ## The Core Contract
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Reconciliation Contract                              │
//! │                                                                         │
//! │  total_paid = Σ payments                                               │
//! │  balance    = amount − total_paid     (negative when overpaid —        │
//! │                                        preserved, never clamped)       │
//! │                                                                         │
//! │  status     = Paid      if total_paid >= amount                        │
//! │             = Partial   if 0 < total_paid < amount                     │
//! │             = Unpaid    if total_paid == 0                             │
//! │                                                                         │
//! │  Pure and order-independent: permuting the payment list never changes  │
//! │  the result, and recomputing from scratch after adding one payment    │
//! │  equals incrementally applying that payment to the previous total.    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Recomputing from the *full* payment set on every write is what makes
//! concurrent payment inserts safe without invoice-level locking: whichever
//! recomputation runs last sees every durably persisted payment.
//!
//! ## Preconditions
//! The invoice amount and every payment must be strictly positive. The
//! calling layer validates this (see [`crate::validation`]) before invoking
//! the engine; refunds and negative payments are not part of this design.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::Money;
use crate::types::InvoiceStatus;

// =============================================================================
// Reconciliation Result
// =============================================================================

/// The derived financial state of an invoice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Reconciliation {
    /// Derived status: unpaid, partial, or paid.
    pub status: InvoiceStatus,

    /// Sum of all recorded payments.
    pub total_paid: Money,

    /// `amount − total_paid`. Negative when overpaid.
    pub balance: Money,
}

impl Reconciliation {
    /// True once the invoice is fully paid (or overpaid).
    #[inline]
    pub fn is_settled(&self) -> bool {
        self.status == InvoiceStatus::Paid
    }
}

// =============================================================================
// Operations
// =============================================================================

/// Reconciles an invoice against its full payment history.
///
/// ## Example
/// ```rust
/// use atelier_core::money::Money;
/// use atelier_core::reconcile::reconcile;
/// use atelier_core::types::InvoiceStatus;
///
/// let amount = Money::from_cents(10_000);
/// let result = reconcile(amount, &[Money::from_cents(4_000)]);
///
/// assert_eq!(result.status, InvoiceStatus::Partial);
/// assert_eq!(result.balance, Money::from_cents(6_000));
/// ```
pub fn reconcile(invoice_amount: Money, payments: &[Money]) -> Reconciliation {
    reconcile_total(invoice_amount, payments.iter().sum())
}

/// Applies one new payment on top of a known paid total.
///
/// This is the operation exercised on every payment write. It is guaranteed
/// to produce the same result as calling [`reconcile`] over the full
/// historical payment list — the incremental and bulk paths are the same
/// formula over the same total.
pub fn apply_payment(
    invoice_amount: Money,
    paid_so_far: Money,
    new_payment: Money,
) -> Reconciliation {
    reconcile_total(invoice_amount, paid_so_far + new_payment)
}

/// Shared status/balance derivation from a paid total.
fn reconcile_total(invoice_amount: Money, total_paid: Money) -> Reconciliation {
    let status = if total_paid >= invoice_amount {
        InvoiceStatus::Paid
    } else if total_paid.is_positive() {
        InvoiceStatus::Partial
    } else {
        InvoiceStatus::Unpaid
    };

    Reconciliation {
        status,
        total_paid,
        balance: invoice_amount - total_paid,
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
