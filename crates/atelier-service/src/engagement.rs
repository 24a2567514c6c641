//! # Engagement Service
//!
//! Call logging and tracking-number derivation — the front half of the
//! engagement pipeline.
//!
//! ## Minting Discipline
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  log_call()                 ← the ONLY operation that mints            │
//! │      │                                                                  │
//! │      ▼                                                                  │
//! │  CL-2026-0042  ──► quote_number()      → Q-2026-0042                   │
//! │                ──► order_number()      → ORD-2026-0042                 │
//! │                ──► production_number() → PRD-2026-0042                 │
//! │                                                                         │
//! │  Derivations reuse the call log's sequence; the counter never moves.   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The quote/order/production records themselves are plain CRUD owned by the
//! route handlers; this service hands them the correlated number to stamp on
//! whatever they persist.

use std::sync::Arc;

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use uuid::Uuid;

use atelier_core::tracking::{
    derive_sibling, related_set, EngagementNumbers, TrackingNumber, TrackingPrefix,
    TrackingSequence,
};
use atelier_core::types::CallLog;
use atelier_core::validation::{validate_customer_name, validate_notes};

use crate::error::ServiceResult;
use crate::store::CallLogStore;

// =============================================================================
// Request DTOs
// =============================================================================

/// Input for logging a new customer call.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewCallLog {
    pub customer_name: String,
    pub phone: Option<String>,
    pub inquiry: Option<String>,
    pub notes: Option<String>,
}

// =============================================================================
// Engagement Service
// =============================================================================

/// Service for opening engagements and correlating their record numbers.
///
/// Holds the process-wide [`TrackingSequence`] behind an `Arc`: every
/// instance (one per worker, typically) mints from the same counter.
#[derive(Debug, Clone)]
pub struct EngagementService<S> {
    store: S,
    sequence: Arc<TrackingSequence>,
}

impl<S: CallLogStore> EngagementService<S> {
    /// Creates a new EngagementService over a call-log store and the shared
    /// mint counter.
    pub fn new(store: S, sequence: Arc<TrackingSequence>) -> Self {
        EngagementService { store, sequence }
    }

    /// Logs a customer call, minting its tracking number.
    ///
    /// ## What This Does
    /// 1. Validates the caller-supplied fields
    /// 2. Advances the process-wide sequence counter (atomic, never reused)
    /// 3. Persists the call log carrying the minted `CL` number
    pub async fn log_call(&self, new_call: NewCallLog) -> ServiceResult<CallLog> {
        debug!(customer_name = %new_call.customer_name, "log_call");

        validate_customer_name(&new_call.customer_name)?;
        if let Some(notes) = &new_call.notes {
            validate_notes(notes)?;
        }

        let number = self.sequence.mint_call_log();
        let call_log = CallLog {
            id: Uuid::new_v4().to_string(),
            tracking_number: number.to_string(),
            customer_name: new_call.customer_name.trim().to_string(),
            phone: new_call.phone,
            inquiry: new_call.inquiry,
            notes: new_call.notes,
            created_at: Utc::now(),
        };

        self.store.insert_call_log(&call_log).await?;

        info!(
            call_log_id = %call_log.id,
            tracking_number = %call_log.tracking_number,
            "Call logged"
        );

        Ok(call_log)
    }

    /// Derives the quote number for a call-log number.
    ///
    /// ## Errors
    /// `InvalidFormat` (via the core) when the text does not parse.
    pub fn quote_number(&self, call_log_number: &str) -> ServiceResult<TrackingNumber> {
        Ok(derive_sibling(call_log_number, TrackingPrefix::Quote)?)
    }

    /// Derives the order number for a call-log number.
    pub fn order_number(&self, call_log_number: &str) -> ServiceResult<TrackingNumber> {
        Ok(derive_sibling(call_log_number, TrackingPrefix::Order)?)
    }

    /// Derives the production-batch number for a call-log number.
    pub fn production_number(&self, call_log_number: &str) -> ServiceResult<TrackingNumber> {
        Ok(derive_sibling(call_log_number, TrackingPrefix::Production)?)
    }

    /// Returns all four numbers of the engagement the given number belongs to.
    ///
    /// Accepts any of the four sibling forms — searching by an order number
    /// finds the same engagement as searching by its call-log number.
    pub fn engagement_numbers(&self, number: &str) -> ServiceResult<EngagementNumbers> {
        Ok(related_set(number)?)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use atelier_core::error::{CoreError, TrackingError};
    use atelier_core::ValidationError;

    use crate::error::ServiceError;
    use crate::store::MemoryStore;

    fn service() -> (EngagementService<MemoryStore>, MemoryStore, Arc<TrackingSequence>) {
        let store = MemoryStore::new();
        let sequence = Arc::new(TrackingSequence::new());
        (
            EngagementService::new(store.clone(), sequence.clone()),
            store,
            sequence,
        )
    }

    fn new_call(name: &str) -> NewCallLog {
        NewCallLog {
            customer_name: name.to_string(),
            phone: Some("+1-555-0142".to_string()),
            inquiry: Some("custom engagement ring".to_string()),
            notes: None,
        }
    }

    #[tokio::test]
    async fn test_log_call_mints_sequential_numbers() {
        let (service, store, _) = service();

        let first = service.log_call(new_call("Priya Sharma")).await.unwrap();
        let second = service.log_call(new_call("Dana Whitfield")).await.unwrap();

        let first_number: TrackingNumber = first.tracking_number.parse().unwrap();
        let second_number: TrackingNumber = second.tracking_number.parse().unwrap();

        assert_eq!(first_number.prefix(), TrackingPrefix::CallLog);
        assert_eq!(first_number.sequence(), 1);
        assert_eq!(second_number.sequence(), 2);
        assert_eq!(store.call_log_count(), 2);
        assert_eq!(store.call_log(&first.id).unwrap().customer_name, "Priya Sharma");
    }

    #[tokio::test]
    async fn test_log_call_rejects_empty_name() {
        let (service, store, _) = service();

        let err = service.log_call(new_call("   ")).await.unwrap_err();
        assert!(matches!(
            err,
            ServiceError::Core(CoreError::Validation(ValidationError::Required { .. }))
        ));
        assert_eq!(store.call_log_count(), 0);
    }

    #[tokio::test]
    async fn test_derivation_never_advances_the_counter() {
        let (service, _, sequence) = service();

        let call = service.log_call(new_call("Priya Sharma")).await.unwrap();
        let before = sequence.snapshot();

        let quote = service.quote_number(&call.tracking_number).unwrap();
        let order = service.order_number(&call.tracking_number).unwrap();
        let production = service.production_number(&call.tracking_number).unwrap();

        assert_eq!(sequence.snapshot(), before);

        let minted: TrackingNumber = call.tracking_number.parse().unwrap();
        for derived in [quote, order, production] {
            assert!(derived.is_related_to(&minted));
        }
    }

    #[tokio::test]
    async fn test_engagement_numbers_from_any_sibling() {
        let (service, _, _) = service();

        let call = service.log_call(new_call("Priya Sharma")).await.unwrap();
        let order = service.order_number(&call.tracking_number).unwrap();

        let set = service.engagement_numbers(&order.to_string()).unwrap();
        assert_eq!(set.call_log.to_string(), call.tracking_number);
    }

    #[tokio::test]
    async fn test_malformed_number_is_rejected() {
        let (service, _, _) = service();

        let err = service.quote_number("CL-26-0042").unwrap_err();
        assert!(matches!(
            err,
            ServiceError::Core(CoreError::Tracking(TrackingError::InvalidFormat { .. }))
        ));
    }
}
