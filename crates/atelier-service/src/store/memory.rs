//! # In-Memory Store
//!
//! A `HashMap`-backed implementation of the storage ports.
//!
//! Backs the service test suites and embedded/demo use. Not a persistence
//! layer: everything lives in process memory and is gone on drop.
//!
//! ## Thread Safety
//! All maps sit behind one `Mutex`, acquired per operation and released
//! before any await point (there are none inside the critical sections).
//! Cloning a `MemoryStore` clones the handle, not the data — the same
//! semantics as cloning a connection pool.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use atelier_core::types::{CallLog, Invoice, InvoiceStatus, Payment};

use super::{CallLogStore, InvoiceStore, StoreError, StoreResult};

/// Shared in-memory store implementing every port.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    inner: Arc<Mutex<Inner>>,
}

#[derive(Debug, Default)]
struct Inner {
    call_logs: HashMap<String, CallLog>,
    invoices: HashMap<String, Invoice>,
    payments: HashMap<String, Payment>,
}

impl MemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        MemoryStore::default()
    }

    /// Returns a call log by id, if present. Test/introspection helper.
    pub fn call_log(&self, id: &str) -> Option<CallLog> {
        let inner = self.inner.lock().expect("Memory store mutex poisoned");
        inner.call_logs.get(id).cloned()
    }

    /// Number of call logs held. Test/introspection helper.
    pub fn call_log_count(&self) -> usize {
        let inner = self.inner.lock().expect("Memory store mutex poisoned");
        inner.call_logs.len()
    }
}

#[async_trait]
impl CallLogStore for MemoryStore {
    async fn insert_call_log(&self, call_log: &CallLog) -> StoreResult<()> {
        let mut inner = self.inner.lock().expect("Memory store mutex poisoned");
        if inner.call_logs.contains_key(&call_log.id) {
            return Err(StoreError::duplicate("call_log.id", &call_log.id));
        }
        if inner
            .call_logs
            .values()
            .any(|existing| existing.tracking_number == call_log.tracking_number)
        {
            return Err(StoreError::duplicate(
                "call_log.tracking_number",
                &call_log.tracking_number,
            ));
        }
        inner
            .call_logs
            .insert(call_log.id.clone(), call_log.clone());
        Ok(())
    }
}

#[async_trait]
impl InvoiceStore for MemoryStore {
    async fn insert_invoice(&self, invoice: &Invoice) -> StoreResult<()> {
        let mut inner = self.inner.lock().expect("Memory store mutex poisoned");
        if inner.invoices.contains_key(&invoice.id) {
            return Err(StoreError::duplicate("invoice.id", &invoice.id));
        }
        inner.invoices.insert(invoice.id.clone(), invoice.clone());
        Ok(())
    }

    async fn invoice(&self, id: &str) -> StoreResult<Option<Invoice>> {
        let inner = self.inner.lock().expect("Memory store mutex poisoned");
        Ok(inner.invoices.get(id).cloned())
    }

    async fn insert_payment(&self, payment: &Payment) -> StoreResult<()> {
        let mut inner = self.inner.lock().expect("Memory store mutex poisoned");
        if inner.payments.contains_key(&payment.id) {
            return Err(StoreError::duplicate("payment.id", &payment.id));
        }
        if !inner.invoices.contains_key(&payment.invoice_id) {
            return Err(StoreError::not_found("Invoice", &payment.invoice_id));
        }
        inner.payments.insert(payment.id.clone(), payment.clone());
        Ok(())
    }

    async fn payments_for_invoice(&self, invoice_id: &str) -> StoreResult<Vec<Payment>> {
        let inner = self.inner.lock().expect("Memory store mutex poisoned");
        let mut payments: Vec<Payment> = inner
            .payments
            .values()
            .filter(|p| p.invoice_id == invoice_id)
            .cloned()
            .collect();
        payments.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        Ok(payments)
    }

    async fn update_invoice_status(
        &self,
        invoice_id: &str,
        status: InvoiceStatus,
        updated_at: DateTime<Utc>,
    ) -> StoreResult<()> {
        let mut inner = self.inner.lock().expect("Memory store mutex poisoned");
        let invoice = inner
            .invoices
            .get_mut(invoice_id)
            .ok_or_else(|| StoreError::not_found("Invoice", invoice_id))?;
        invoice.status = status;
        invoice.updated_at = updated_at;
        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use atelier_core::types::PaymentMethod;

    fn sample_invoice(id: &str) -> Invoice {
        Invoice {
            id: id.to_string(),
            customer_id: "00000000-0000-0000-0000-000000000002".to_string(),
            amount_cents: 50_000,
            due_date: NaiveDate::from_ymd_opt(2026, 9, 1).unwrap(),
            status: InvoiceStatus::Unpaid,
            notes: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn sample_payment(id: &str, invoice_id: &str, amount_cents: i64) -> Payment {
        Payment {
            id: id.to_string(),
            invoice_id: invoice_id.to_string(),
            method: PaymentMethod::Cash,
            amount_cents,
            reference: None,
            notes: None,
            created_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_insert_and_fetch_invoice() {
        let store = MemoryStore::new();
        store.insert_invoice(&sample_invoice("inv-1")).await.unwrap();

        let fetched = store.invoice("inv-1").await.unwrap().unwrap();
        assert_eq!(fetched.amount_cents, 50_000);

        assert!(store.invoice("inv-2").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_duplicate_invoice_rejected() {
        let store = MemoryStore::new();
        store.insert_invoice(&sample_invoice("inv-1")).await.unwrap();

        let err = store.insert_invoice(&sample_invoice("inv-1")).await;
        assert!(matches!(err, Err(StoreError::Duplicate { .. })));
    }

    #[tokio::test]
    async fn test_payment_requires_existing_invoice() {
        let store = MemoryStore::new();
        let err = store
            .insert_payment(&sample_payment("pay-1", "inv-missing", 1_000))
            .await;
        assert!(matches!(err, Err(StoreError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_payments_listed_per_invoice() {
        let store = MemoryStore::new();
        store.insert_invoice(&sample_invoice("inv-1")).await.unwrap();
        store.insert_invoice(&sample_invoice("inv-2")).await.unwrap();

        store
            .insert_payment(&sample_payment("pay-1", "inv-1", 1_000))
            .await
            .unwrap();
        store
            .insert_payment(&sample_payment("pay-2", "inv-1", 2_000))
            .await
            .unwrap();
        store
            .insert_payment(&sample_payment("pay-3", "inv-2", 3_000))
            .await
            .unwrap();

        let payments = store.payments_for_invoice("inv-1").await.unwrap();
        assert_eq!(payments.len(), 2);
        assert!(payments.iter().all(|p| p.invoice_id == "inv-1"));
    }

    #[tokio::test]
    async fn test_update_invoice_status() {
        let store = MemoryStore::new();
        store.insert_invoice(&sample_invoice("inv-1")).await.unwrap();

        let now = Utc::now();
        store
            .update_invoice_status("inv-1", InvoiceStatus::Partial, now)
            .await
            .unwrap();

        let fetched = store.invoice("inv-1").await.unwrap().unwrap();
        assert_eq!(fetched.status, InvoiceStatus::Partial);
        assert_eq!(fetched.updated_at, now);

        let err = store
            .update_invoice_status("inv-missing", InvoiceStatus::Paid, now)
            .await;
        assert!(matches!(err, Err(StoreError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_clone_shares_data() {
        let store = MemoryStore::new();
        let handle = store.clone();
        store.insert_invoice(&sample_invoice("inv-1")).await.unwrap();

        assert!(handle.invoice("inv-1").await.unwrap().is_some());
    }
}
