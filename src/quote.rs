use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::config::{PlanPolicy, MAX_DUE_DAY, MIN_DUE_DAY};
use crate::decimal::{Money, Rate};
use crate::errors::{PlanError, Result};
use crate::types::{QuoteMode, Tenor};

/// plan parameters a customer picks in the calculator
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlanRequest {
    pub price: Money,
    pub tenor: Tenor,
    /// upfront portion of the price, in whole percent
    pub down_payment_percent: u32,
    /// day of month each payment falls due
    pub due_day: u32,
}

impl PlanRequest {
    /// reject out-of-range parameters instead of silently clamping them
    pub fn validate(&self, policy: &PlanPolicy) -> Result<()> {
        if !self.price.is_positive() {
            return Err(PlanError::InvalidPrice { price: self.price });
        }

        if self.down_payment_percent < policy.min_down_payment_percent
            || self.down_payment_percent > policy.max_down_payment_percent
        {
            return Err(PlanError::DownPaymentOutOfRange {
                percent: self.down_payment_percent,
                min: policy.min_down_payment_percent,
                max: policy.max_down_payment_percent,
            });
        }

        if self.due_day < MIN_DUE_DAY || self.due_day > MAX_DUE_DAY {
            return Err(PlanError::InvalidDueDay { day: self.due_day });
        }

        Ok(())
    }
}

/// computed plan breakdown, replaced wholesale on every parameter change
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlanQuote {
    pub mode: QuoteMode,
    pub interest_rate: Rate,
    pub down_payment: Money,
    pub financed_amount: Money,
    pub periodic_payment: Money,
    pub total_payable: Money,
    pub tenor: Tenor,
}

/// compute a quote for a validated request; pure, no I/O
pub fn quote(request: &PlanRequest, policy: &PlanPolicy) -> Result<PlanQuote> {
    request.validate(policy)?;

    let down_payment = request
        .price
        .percentage(Decimal::from(request.down_payment_percent));
    let financed = request.price - down_payment;
    let months = Decimal::from(request.tenor.months());

    match policy.quote_mode {
        QuoteMode::InterestBearing => {
            let rate = policy.rate_table.rate_for(request.tenor);
            // interest stays unrounded until it lands in a money field, so the
            // total is recomputed rather than accumulated from rounded terms
            let interest = financed.as_decimal() * rate.as_decimal();
            let periodic = Money::from_decimal((financed.as_decimal() + interest) / months);
            let total =
                Money::from_decimal(down_payment.as_decimal() + financed.as_decimal() + interest);

            Ok(PlanQuote {
                mode: QuoteMode::InterestBearing,
                interest_rate: rate,
                down_payment,
                financed_amount: financed,
                periodic_payment: periodic,
                total_payable: total,
                tenor: request.tenor,
            })
        }
        QuoteMode::ZeroInterest => Ok(PlanQuote {
            mode: QuoteMode::ZeroInterest,
            interest_rate: Rate::ZERO,
            down_payment,
            financed_amount: financed,
            periodic_payment: Money::from_decimal(financed.as_decimal() / months),
            // price exactly, never re-derived through the periodic term
            total_payable: request.price,
            tenor: request.tenor,
        }),
    }
}
