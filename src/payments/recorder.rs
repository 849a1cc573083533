use hourglass_rs::SafeTimeProvider;
use uuid::Uuid;

use crate::config::PlanPolicy;
use crate::errors::{PlanError, Result};
use crate::events::{Event, EventStore};
use crate::payments::gateway::{
    GatewayRequest, Notification, NotificationSink, PaymentGateway, PaymentReceipt,
};
use crate::payments::PaymentRequest;
use crate::types::Installment;

/// validates a payment locally, then delegates to the backend collaborator
///
/// Dispatch is at-most-once: a request that reaches the gateway is never
/// retried here, and a request that fails a precheck never reaches it.
pub struct PaymentRecorder<G, N> {
    gateway: G,
    notifier: N,
    policy: PlanPolicy,
    events: EventStore,
}

impl<G: PaymentGateway, N: NotificationSink> PaymentRecorder<G, N> {
    pub fn new(gateway: G, notifier: N, policy: PlanPolicy) -> Self {
        Self {
            gateway,
            notifier,
            policy,
            events: EventStore::new(),
        }
    }

    /// submit a payment against an installment snapshot
    ///
    /// On success the receipt carries the backend's updated balance, which the
    /// caller feeds into the next `derive_view`. While a submission is in
    /// flight the caller must not start another for the same installment.
    pub fn submit_payment(
        &mut self,
        installment: &Installment,
        request: PaymentRequest,
        time_provider: &SafeTimeProvider,
    ) -> Result<PaymentReceipt> {
        let now = time_provider.now();

        if let Err(err) = request.precheck(installment, &self.policy) {
            self.events.emit(Event::PaymentRejected {
                installment_id: installment.id,
                amount: request.amount,
                reason: err.to_string(),
                timestamp: now,
            });
            self.notifier
                .notify(Notification::error("Payment failed", err.to_string()));
            return Err(err);
        }

        let idempotency_key = Uuid::new_v4();
        self.events.emit(Event::PaymentSubmitted {
            installment_id: installment.id,
            amount: request.amount,
            method: request.method,
            idempotency_key,
            timestamp: now,
        });

        let gateway_request = GatewayRequest {
            installment_id: installment.id,
            amount: request.amount,
            method: request.method,
            idempotency_key,
            submitted_at: now,
        };

        match self.gateway.submit(&gateway_request) {
            Ok(receipt) => {
                self.events.emit(Event::PaymentRecorded {
                    installment_id: installment.id,
                    payment_id: receipt.payment.id,
                    amount: receipt.payment.amount,
                    remaining_amount: receipt.remaining_amount,
                    timestamp: now,
                });

                if receipt.remaining_amount.is_zero() {
                    self.events.emit(Event::InstallmentSettled {
                        installment_id: installment.id,
                        final_payment: receipt.payment.amount,
                        timestamp: now,
                    });
                    self.notifier.notify(Notification::success(
                        "Installment completed",
                        format!("Final payment of {} received", receipt.payment.amount),
                    ));
                } else {
                    self.notifier.notify(Notification::success(
                        "Payment successful",
                        format!(
                            "{} paid, {} remaining",
                            receipt.payment.amount, receipt.remaining_amount
                        ),
                    ));
                }

                Ok(receipt)
            }
            Err(err) => {
                // backend message surfaces verbatim, no automatic retry
                let description = match &err {
                    PlanError::Gateway { message } => message.clone(),
                    other => other.to_string(),
                };
                self.notifier
                    .notify(Notification::error("Payment failed", description));
                Err(err)
            }
        }
    }

    pub fn policy(&self) -> &PlanPolicy {
        &self.policy
    }

    pub fn events(&self) -> &[Event] {
        self.events.events()
    }

    pub fn take_events(&mut self) -> Vec<Event> {
        self.events.take_events()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decimal::Money;
    use crate::payments::gateway::NotificationVariant;
    use crate::types::{Payment, PaymentMethod};
    use chrono::{NaiveDate, TimeZone, Utc};
    use hourglass_rs::TimeSource;
    use std::cell::RefCell;

    struct StubGateway {
        calls: RefCell<Vec<GatewayRequest>>,
        response: fn(&GatewayRequest) -> Result<PaymentReceipt>,
    }

    impl StubGateway {
        fn accepting() -> Self {
            Self {
                calls: RefCell::new(Vec::new()),
                response: |req| {
                    Ok(PaymentReceipt {
                        payment: Payment {
                            id: Uuid::new_v4(),
                            installment_id: req.installment_id,
                            amount: req.amount,
                            payment_date: req.submitted_at,
                        },
                        remaining_amount: Money::from_major(20_000) - req.amount,
                    })
                },
            }
        }

        fn failing() -> Self {
            Self {
                calls: RefCell::new(Vec::new()),
                response: |_| {
                    Err(PlanError::Gateway {
                        message: "Payment is less than the installment amount".to_string(),
                    })
                },
            }
        }
    }

    impl PaymentGateway for &StubGateway {
        fn submit(&self, request: &GatewayRequest) -> Result<PaymentReceipt> {
            self.calls.borrow_mut().push(request.clone());
            (self.response)(request)
        }
    }

    #[derive(Default)]
    struct RecordingSink {
        notifications: RefCell<Vec<Notification>>,
    }

    impl NotificationSink for &RecordingSink {
        fn notify(&self, notification: Notification) {
            self.notifications.borrow_mut().push(notification);
        }
    }

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

    fn clock() -> SafeTimeProvider {
        SafeTimeProvider::new(TimeSource::Test(
            Utc.with_ymd_and_hms(2025, 6, 16, 12, 0, 0).unwrap(),
        ))
    }

    fn request(inst: &Installment, amount: i64) -> PaymentRequest {
        PaymentRequest {
            installment_id: inst.id,
            amount: Money::from_major(amount),
            method: PaymentMethod::MobileBanking,
        }
    }

    #[test]
    fn test_precheck_failure_never_reaches_gateway() {
        let gateway = StubGateway::accepting();
        let sink = RecordingSink::default();
        let inst = installment(20_000);

        let mut recorder = PaymentRecorder::new(&gateway, &sink, PlanPolicy::default());
        let err = recorder
            .submit_payment(&inst, request(&inst, 30_000), &clock())
            .unwrap_err();

        assert!(matches!(err, PlanError::PaymentExceedsRemaining { .. }));
        assert!(gateway.calls.borrow().is_empty());

        let events = recorder.take_events();
        assert_eq!(events.len(), 1);
        assert!(matches!(events[0], Event::PaymentRejected { .. }));

        let notifications = sink.notifications.borrow();
        assert_eq!(notifications.len(), 1);
        assert_eq!(notifications[0].variant, NotificationVariant::Destructive);
    }

    #[test]
    fn test_successful_partial_payment() {
        let gateway = StubGateway::accepting();
        let sink = RecordingSink::default();
        let inst = installment(20_000);

        let mut recorder = PaymentRecorder::new(&gateway, &sink, PlanPolicy::default());
        let receipt = recorder
            .submit_payment(&inst, request(&inst, 5_000), &clock())
            .unwrap();

        assert_eq!(receipt.remaining_amount, Money::from_major(15_000));
        assert_eq!(gateway.calls.borrow().len(), 1);

        let events = recorder.take_events();
        assert!(matches!(events[0], Event::PaymentSubmitted { .. }));
        assert!(matches!(events[1], Event::PaymentRecorded { .. }));
        assert_eq!(events.len(), 2);

        let notifications = sink.notifications.borrow();
        assert_eq!(notifications[0].variant, NotificationVariant::Default);
    }

    #[test]
    fn test_final_payment_emits_settlement() {
        let gateway = StubGateway::accepting();
        let sink = RecordingSink::default();
        let inst = installment(20_000);

        let mut recorder = PaymentRecorder::new(&gateway, &sink, PlanPolicy::default());
        let receipt = recorder
            .submit_payment(&inst, request(&inst, 20_000), &clock())
            .unwrap();

        assert!(receipt.remaining_amount.is_zero());
        let events = recorder.take_events();
        assert!(events
            .iter()
            .any(|e| matches!(e, Event::InstallmentSettled { .. })));
    }

    #[test]
    fn test_backend_error_surfaces_verbatim() {
        let gateway = StubGateway::failing();
        let sink = RecordingSink::default();
        let inst = installment(20_000);

        let mut recorder = PaymentRecorder::new(&gateway, &sink, PlanPolicy::default());
        let err = recorder
            .submit_payment(&inst, request(&inst, 5_000), &clock())
            .unwrap_err();

        assert!(matches!(err, PlanError::Gateway { .. }));
        // dispatched exactly once, not retried
        assert_eq!(gateway.calls.borrow().len(), 1);

        let notifications = sink.notifications.borrow();
        assert_eq!(
            notifications[0].description,
            "Payment is less than the installment amount"
        );
    }

    #[test]
    fn test_fresh_idempotency_key_per_attempt() {
        let gateway = StubGateway::accepting();
        let sink = RecordingSink::default();
        let inst = installment(20_000);

        let mut recorder = PaymentRecorder::new(&gateway, &sink, PlanPolicy::default());
        recorder
            .submit_payment(&inst, request(&inst, 1_000), &clock())
            .unwrap();
        recorder
            .submit_payment(&inst, request(&inst, 1_000), &clock())
            .unwrap();

        let calls = gateway.calls.borrow();
        assert_ne!(calls[0].idempotency_key, calls[1].idempotency_key);
    }
}
