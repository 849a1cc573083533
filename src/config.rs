use serde::{Deserialize, Serialize};

use crate::decimal::Rate;
use crate::types::{PaymentMethod, QuoteMode, Tenor};

/// earliest selectable due day of month
pub const MIN_DUE_DAY: u32 = 1;
/// latest selectable due day of month, capped at 28 to avoid month-length edge cases
pub const MAX_DUE_DAY: u32 = 28;

/// interest rate by tenor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RateTable {
    pub months_3: Rate,
    pub months_6: Rate,
    pub months_9: Rate,
    pub months_12: Rate,
}

impl RateTable {
    pub fn rate_for(&self, tenor: Tenor) -> Rate {
        match tenor {
            Tenor::Months3 => self.months_3,
            Tenor::Months6 => self.months_6,
            Tenor::Months9 => self.months_9,
            Tenor::Months12 => self.months_12,
        }
    }

    /// flat zero for every tenor
    pub fn zero() -> Self {
        Self {
            months_3: Rate::ZERO,
            months_6: Rate::ZERO,
            months_9: Rate::ZERO,
            months_12: Rate::ZERO,
        }
    }
}

impl Default for RateTable {
    fn default() -> Self {
        Self {
            months_3: Rate::from_percentage(5),
            months_6: Rate::from_percentage(8),
            months_9: Rate::from_percentage(10),
            months_12: Rate::from_percentage(12),
        }
    }
}

/// merchant policy governing quoting and payment acceptance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanPolicy {
    pub quote_mode: QuoteMode,
    pub rate_table: RateTable,
    /// inclusive down payment percent bounds
    pub min_down_payment_percent: u32,
    pub max_down_payment_percent: u32,
    /// window after creation during which an untouched installment shows as pending
    pub pending_grace_days: u32,
    pub allowed_methods: Vec<PaymentMethod>,
    /// upper bound for a single backend dispatch; expiry is reported, never retried
    pub gateway_timeout_secs: u64,
}

impl PlanPolicy {
    /// interest-bearing plans with the standard tenor rate table
    pub fn interest_bearing() -> Self {
        Self {
            quote_mode: QuoteMode::InterestBearing,
            rate_table: RateTable::default(),
            min_down_payment_percent: 10,
            max_down_payment_percent: 50,
            pending_grace_days: 7,
            allowed_methods: PaymentMethod::ALL.to_vec(),
            gateway_timeout_secs: 30,
        }
    }

    /// promotional zero-interest plans, total payable equals price
    pub fn zero_interest() -> Self {
        Self {
            quote_mode: QuoteMode::ZeroInterest,
            rate_table: RateTable::zero(),
            ..Self::interest_bearing()
        }
    }

    pub fn method_allowed(&self, method: PaymentMethod) -> bool {
        self.allowed_methods.contains(&method)
    }
}

impl Default for PlanPolicy {
    fn default() -> Self {
        Self::interest_bearing()
    }
}
