use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::decimal::Money;
use crate::errors::Result;
use crate::types::{InstallmentId, Payment, PaymentMethod};

/// payment submission as dispatched to the backend
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GatewayRequest {
    pub installment_id: InstallmentId,
    pub amount: Money,
    pub method: PaymentMethod,
    /// fresh per attempt so the backend can deduplicate network-level retries
    pub idempotency_key: Uuid,
    pub submitted_at: DateTime<Utc>,
}

/// backend's answer to a successful submission
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentReceipt {
    pub payment: Payment,
    /// updated balance, input to the next status derivation
    pub remaining_amount: Money,
}

/// the backend collaborator that owns installment balances
///
/// Implementations are expected to honor `PlanPolicy::gateway_timeout_secs`
/// and report expiry as `PlanError::GatewayTimeout`; the recorder never
/// retries on its own.
pub trait PaymentGateway {
    fn submit(&self, request: &GatewayRequest) -> Result<PaymentReceipt>;
}

/// toast severity as the frontend understands it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationVariant {
    Default,
    Destructive,
}

/// user-visible feedback message
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notification {
    pub title: String,
    pub description: String,
    pub variant: NotificationVariant,
}

impl Notification {
    pub fn success(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            variant: NotificationVariant::Default,
        }
    }

    pub fn error(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            variant: NotificationVariant::Destructive,
        }
    }
}

/// fire-and-forget sink for user feedback; no acknowledgement expected
pub trait NotificationSink {
    fn notify(&self, notification: Notification);
}
