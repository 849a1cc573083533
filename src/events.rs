use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::decimal::Money;
use crate::types::{InstallmentId, PaymentMethod};

/// events emitted while recording payments
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Event {
    /// request passed local checks and was dispatched to the backend
    PaymentSubmitted {
        installment_id: InstallmentId,
        amount: Money,
        method: PaymentMethod,
        idempotency_key: Uuid,
        timestamp: DateTime<Utc>,
    },
    /// backend accepted the payment and returned the new balance
    PaymentRecorded {
        installment_id: InstallmentId,
        payment_id: Uuid,
        amount: Money,
        remaining_amount: Money,
        timestamp: DateTime<Utc>,
    },
    /// request failed a local precondition; the backend was never contacted
    PaymentRejected {
        installment_id: InstallmentId,
        amount: Money,
        reason: String,
        timestamp: DateTime<Utc>,
    },
    /// a recorded payment brought the balance to zero
    InstallmentSettled {
        installment_id: InstallmentId,
        final_payment: Money,
        timestamp: DateTime<Utc>,
    },
}

/// event store for collecting events during operations
#[derive(Debug, Default)]
pub struct EventStore {
    events: Vec<Event>,
}

impl EventStore {
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    pub fn emit(&mut self, event: Event) {
        self.events.push(event);
    }

    pub fn take_events(&mut self) -> Vec<Event> {
        std::mem::take(&mut self.events)
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_take_events_drains_store() {
        let mut store = EventStore::new();
        store.emit(Event::PaymentRejected {
            installment_id: Uuid::new_v4(),
            amount: Money::from_major(100),
            reason: "test".to_string(),
            timestamp: Utc::now(),
        });

        assert_eq!(store.events().len(), 1);
        let taken = store.take_events();
        assert_eq!(taken.len(), 1);
        assert!(store.events().is_empty());
    }
}
