//! # Receivable Service
//!
//! Invoice creation, payment recording, and status write-back.
//!
//! ## Payment Recording Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  record_payment(invoice_id, amount)                                     │
//! │       │                                                                 │
//! │       ├── validate amount > 0          ← precondition, fails fast      │
//! │       ├── fetch invoice                ← NotFound if absent            │
//! │       ├── persist payment              ← immutable once written        │
//! │       ├── reload FULL payment set      ← never a stale partial sum     │
//! │       ├── reconcile()                  ← pure derivation               │
//! │       └── write status back            ← last recomputation wins       │
//! │                                                                         │
//! │  Two concurrent record_payment calls on one invoice both recompute     │
//! │  from the full set after their insert is durable, so the final        │
//! │  write-back reflects every payment without invoice-level locking.     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use uuid::Uuid;

use atelier_core::money::Money;
use atelier_core::reconcile::{reconcile, Reconciliation};
use atelier_core::types::{Invoice, InvoiceStatus, Payment, PaymentMethod};
use atelier_core::validation::{
    validate_invoice_amount_cents, validate_notes, validate_payment_amount_cents, validate_uuid,
};

use crate::error::{ServiceError, ServiceResult};
use crate::store::InvoiceStore;

// =============================================================================
// Request/Response DTOs
// =============================================================================

/// Input for creating a new invoice.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewInvoice {
    pub customer_id: String,
    pub amount_cents: i64,
    pub due_date: NaiveDate,
    pub notes: Option<String>,
}

/// Input for recording a payment against an invoice.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewPayment {
    pub amount_cents: i64,
    pub method: PaymentMethod,
    pub reference: Option<String>,
    pub notes: Option<String>,
}

/// What a payment write returns to the route handler.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentReceipt {
    pub payment_id: String,
    pub reconciliation: Reconciliation,
}

/// Read-only financial view of one invoice.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceSummary {
    pub invoice: Invoice,
    pub payments: Vec<Payment>,
    pub reconciliation: Reconciliation,
}

// =============================================================================
// Receivable Service
// =============================================================================

/// Service deriving invoice lifecycle state from recorded payments.
#[derive(Debug, Clone)]
pub struct ReceivableService<S> {
    store: S,
}

impl<S: InvoiceStore> ReceivableService<S> {
    /// Creates a new ReceivableService over an invoice store.
    pub fn new(store: S) -> Self {
        ReceivableService { store }
    }

    /// Creates an invoice in `Unpaid` status with zero payments.
    pub async fn create_invoice(&self, new_invoice: NewInvoice) -> ServiceResult<Invoice> {
        debug!(customer_id = %new_invoice.customer_id, amount = %new_invoice.amount_cents, "create_invoice");

        validate_uuid(&new_invoice.customer_id)?;
        validate_invoice_amount_cents(new_invoice.amount_cents)?;
        if let Some(notes) = &new_invoice.notes {
            validate_notes(notes)?;
        }

        let now = Utc::now();
        let invoice = Invoice {
            id: Uuid::new_v4().to_string(),
            customer_id: new_invoice.customer_id,
            amount_cents: new_invoice.amount_cents,
            due_date: new_invoice.due_date,
            status: InvoiceStatus::Unpaid,
            notes: new_invoice.notes,
            created_at: now,
            updated_at: now,
        };

        self.store.insert_invoice(&invoice).await?;

        info!(invoice_id = %invoice.id, amount = %invoice.amount(), "Invoice created");

        Ok(invoice)
    }

    /// Records a payment and writes the re-derived invoice status back.
    ///
    /// The reconciliation runs over the FULL payment set reloaded after the
    /// insert — never over an incrementally tracked sum — so concurrent
    /// writers converge on a status reflecting every durable payment.
    pub async fn record_payment(
        &self,
        invoice_id: &str,
        new_payment: NewPayment,
    ) -> ServiceResult<PaymentReceipt> {
        debug!(invoice_id = %invoice_id, amount = %new_payment.amount_cents, "record_payment");

        validate_payment_amount_cents(new_payment.amount_cents)?;
        if let Some(notes) = &new_payment.notes {
            validate_notes(notes)?;
        }

        let invoice = self
            .store
            .invoice(invoice_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Invoice", invoice_id))?;

        let payment = Payment {
            id: Uuid::new_v4().to_string(),
            invoice_id: invoice_id.to_string(),
            method: new_payment.method,
            amount_cents: new_payment.amount_cents,
            reference: new_payment.reference,
            notes: new_payment.notes,
            created_at: Utc::now(),
        };
        self.store.insert_payment(&payment).await?;

        let payments = self.store.payments_for_invoice(invoice_id).await?;
        let amounts: Vec<Money> = payments.iter().map(Payment::amount).collect();
        let outcome = reconcile(invoice.amount(), &amounts);

        self.store
            .update_invoice_status(invoice_id, outcome.status, Utc::now())
            .await?;

        info!(
            invoice_id = %invoice_id,
            payment_id = %payment.id,
            total_paid = %outcome.total_paid,
            balance = %outcome.balance,
            status = ?outcome.status,
            "Payment recorded"
        );

        Ok(PaymentReceipt {
            payment_id: payment.id,
            reconciliation: outcome,
        })
    }

    /// Recomputes an invoice's financial state without writing anything.
    pub async fn invoice_summary(&self, invoice_id: &str) -> ServiceResult<InvoiceSummary> {
        let invoice = self
            .store
            .invoice(invoice_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Invoice", invoice_id))?;

        let payments = self.store.payments_for_invoice(invoice_id).await?;
        let amounts: Vec<Money> = payments.iter().map(Payment::amount).collect();
        let reconciliation = reconcile(invoice.amount(), &amounts);

        Ok(InvoiceSummary {
            invoice,
            payments,
            reconciliation,
        })
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
