pub mod gateway;
pub mod recorder;

use serde::{Deserialize, Serialize};

use crate::config::PlanPolicy;
use crate::decimal::Money;
use crate::errors::{PlanError, Result};
use crate::types::{Installment, InstallmentId, PaymentMethod};

pub use gateway::{
    GatewayRequest, Notification, NotificationSink, NotificationVariant, PaymentGateway,
    PaymentReceipt,
};
pub use recorder::PaymentRecorder;

/// a payment the customer wants to submit against an installment
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PaymentRequest {
    pub installment_id: InstallmentId,
    pub amount: Money,
    pub method: PaymentMethod,
}

impl PaymentRequest {
    /// local precondition checks; advisory only, the backend stays authoritative
    pub fn precheck(&self, installment: &Installment, policy: &PlanPolicy) -> Result<()> {
        if installment.is_settled() {
            return Err(PlanError::AlreadySettled);
        }

        if !self.amount.is_positive() {
            return Err(PlanError::InvalidPaymentAmount {
                amount: self.amount,
            });
        }

        if self.amount > installment.remaining_amount {
            return Err(PlanError::PaymentExceedsRemaining {
                remaining: installment.remaining_amount,
                requested: self.amount,
            });
        }

        if !policy.method_allowed(self.method) {
            return Err(PlanError::MethodNotAllowed {
                method: self.method,
            });
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, TimeZone, Utc};
    use uuid::Uuid;

    fn installment(remaining: i64) -> Installment {
        Installment {
            id: Uuid::new_v4(),
            product_id: Uuid::new_v4(),
            total_amount: Money::from_major(100_000),
            remaining_amount: Money::from_major(remaining),
            installment_amount: None,
            due_date: NaiveDate::from_ymd_opt(2025, 7, 15).unwrap(),
            created_at: Utc.with_ymd_and_hms(2025, 1, 10, 0, 0, 0).unwrap(),
        }
    }

    fn request(inst: &Installment, amount: i64) -> PaymentRequest {
        PaymentRequest {
            installment_id: inst.id,
            amount: Money::from_major(amount),
            method: PaymentMethod::CreditCard,
        }
    }

    #[test]
    fn test_precheck_accepts_partial_and_full() {
        let policy = PlanPolicy::default();
        let inst = installment(20_000);

        assert!(request(&inst, 5_000).precheck(&inst, &policy).is_ok());
        assert!(request(&inst, 20_000).precheck(&inst, &policy).is_ok());
    }

    #[test]
    fn test_precheck_rejects_over_remaining() {
        let policy = PlanPolicy::default();
        let inst = installment(20_000);

        let err = request(&inst, 30_000).precheck(&inst, &policy).unwrap_err();
        assert!(matches!(err, PlanError::PaymentExceedsRemaining { .. }));
    }

    #[test]
    fn test_precheck_rejects_non_positive_amount() {
        let policy = PlanPolicy::default();
        let inst = installment(20_000);

        assert!(request(&inst, 0).precheck(&inst, &policy).is_err());
        assert!(request(&inst, -100).precheck(&inst, &policy).is_err());
    }

    #[test]
    fn test_precheck_rejects_disallowed_method() {
        let mut policy = PlanPolicy::default();
        policy.allowed_methods = vec![PaymentMethod::BankTransfer];
        let inst = installment(20_000);

        let err = request(&inst, 5_000).precheck(&inst, &policy).unwrap_err();
        assert!(matches!(
            err,
            PlanError::MethodNotAllowed {
                method: PaymentMethod::CreditCard
            }
        ));
    }

    #[test]
    fn test_precheck_rejects_settled_installment() {
        let policy = PlanPolicy::default();
        let inst = installment(0);

        let err = request(&inst, 1_000).precheck(&inst, &policy).unwrap_err();
        assert!(matches!(err, PlanError::AlreadySettled));
    }
}
