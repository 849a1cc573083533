use chrono::{Datelike, Duration, NaiveDate};
use hourglass_rs::SafeTimeProvider;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use crate::config::PlanPolicy;
use crate::decimal::Money;
use crate::types::{Installment, InstallmentStatus, Payment};

/// display state derived from an installment snapshot; recomputed on every
/// fetch and never cached across render cycles
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstallmentView {
    pub status: InstallmentStatus,
    pub progress_percent: u8,
    /// backend's due date passed through unchanged; this crate never rolls it
    pub next_payment_date: NaiveDate,
}

/// map an installment snapshot plus the current instant to its display state
///
/// Never panics: records violating 0 <= remaining <= total are clamped into
/// range and logged, since they indicate a backend integrity problem upstream.
pub fn derive_view(
    installment: &Installment,
    policy: &PlanPolicy,
    time_provider: &SafeTimeProvider,
) -> InstallmentView {
    let now = time_provider.now();

    let total = installment.total_amount.max(Money::ZERO);
    let remaining = installment.remaining_amount.clamp(Money::ZERO, total);
    if total != installment.total_amount || remaining != installment.remaining_amount {
        log::warn!(
            "installment {} violates balance invariant (total {}, remaining {}), clamping",
            installment.id,
            installment.total_amount,
            installment.remaining_amount,
        );
    }

    let progress_percent = if total.is_zero() {
        100
    } else {
        let paid = total - remaining;
        let pct = (paid.as_decimal() / total.as_decimal() * Decimal::from(100))
            .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero);
        pct.to_u8().unwrap_or(0).min(100)
    };

    let status = if remaining.is_zero() {
        InstallmentStatus::Completed
    } else if now.date_naive() > installment.due_date {
        InstallmentStatus::Overdue
    } else if remaining == total
        && now < installment.created_at + Duration::days(policy.pending_grace_days as i64)
    {
        InstallmentStatus::Pending
    } else {
        InstallmentStatus::Active
    };

    InstallmentView {
        status,
        progress_percent,
        next_payment_date: installment.due_date,
    }
}

/// aggregate figures shown on the customer dashboard
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardStats {
    pub open_installments: usize,
    pub total_due: Money,
    pub overdue_count: usize,
    pub received_this_month: Money,
}

impl DashboardStats {
    pub fn compute(
        installments: &[Installment],
        payments: &[Payment],
        policy: &PlanPolicy,
        time_provider: &SafeTimeProvider,
    ) -> Self {
        let now = time_provider.now();

        let mut open_installments = 0;
        let mut total_due = Money::ZERO;
        let mut overdue_count = 0;

        for installment in installments {
            let view = derive_view(installment, policy, time_provider);
            match view.status {
                InstallmentStatus::Completed => {}
                InstallmentStatus::Overdue => {
                    open_installments += 1;
                    overdue_count += 1;
                }
                _ => open_installments += 1,
            }
            total_due += installment
                .remaining_amount
                .clamp(Money::ZERO, installment.total_amount.max(Money::ZERO));
        }

        let received_this_month = payments
            .iter()
            .filter(|p| {
                p.payment_date.year() == now.year() && p.payment_date.month() == now.month()
            })
            .fold(Money::ZERO, |acc, p| acc + p.amount);

        Self {
            open_installments,
            total_due,
            overdue_count,
            received_this_month,
        }
    }
}
