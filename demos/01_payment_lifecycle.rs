/// pay an installment down to settlement with a controlled clock
use std::cell::RefCell;

use installment_plan_rs::chrono::{NaiveDate, TimeZone, Utc};
use installment_plan_rs::{
    derive_view, schedule, GatewayRequest, Installment, Money, Notification, NotificationSink,
    PaymentGateway, PaymentMethod, PaymentReceipt, PaymentRecorder, PaymentRequest, PlanPolicy,
    Payment, Result, SafeTimeProvider, TimeSource, Uuid,
};

/// in-memory stand-in for the backend: applies the payment and rolls the due date
struct FakeBackend {
    installment: RefCell<Installment>,
}

impl PaymentGateway for &FakeBackend {
    fn submit(&self, request: &GatewayRequest) -> Result<PaymentReceipt> {
        let mut installment = self.installment.borrow_mut();
        installment.remaining_amount = installment.remaining_amount - request.amount;
        if let Some(next) = schedule::roll_forward(&installment) {
            installment.due_date = next;
        }

        Ok(PaymentReceipt {
            payment: Payment {
                id: Uuid::new_v4(),
                installment_id: request.installment_id,
                amount: request.amount,
                payment_date: request.submitted_at,
            },
            remaining_amount: installment.remaining_amount,
        })
    }
}

struct ConsoleSink;

impl NotificationSink for ConsoleSink {
    fn notify(&self, notification: Notification) {
        println!("[{:?}] {}: {}", notification.variant, notification.title, notification.description);
    }
}

fn main() -> Result<()> {
    let created = Utc.with_ymd_and_hms(2025, 1, 10, 9, 0, 0).unwrap();
    let time = SafeTimeProvider::new(TimeSource::Test(created));

    let backend = FakeBackend {
        installment: RefCell::new(Installment {
            id: Uuid::new_v4(),
            product_id: Uuid::new_v4(),
            total_amount: Money::from_major(60_000),
            remaining_amount: Money::from_major(60_000),
            installment_amount: Some(Money::from_major(20_000)),
            due_date: NaiveDate::from_ymd_opt(2025, 2, 15).unwrap(),
            created_at: created,
        }),
    };

    let policy = PlanPolicy::default();
    let mut recorder = PaymentRecorder::new(&backend, ConsoleSink, policy.clone());

    for _ in 0..3 {
        let snapshot = backend.installment.borrow().clone();
        let request = PaymentRequest {
            installment_id: snapshot.id,
            amount: Money::from_major(20_000),
            method: PaymentMethod::MobileBanking,
        };
        let receipt = recorder.submit_payment(&snapshot, request, &time)?;

        let snapshot = backend.installment.borrow().clone();
        let view = derive_view(&snapshot, &policy, &time);
        println!(
            "remaining {} -> {:?}, {}% paid",
            receipt.remaining_amount, view.status, view.progress_percent
        );
    }

    for event in recorder.take_events() {
        println!("event: {event:?}");
    }

    Ok(())
}
