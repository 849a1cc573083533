use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::decimal::Money;
use crate::errors::PlanError;

/// unique identifier for an installment
pub type InstallmentId = Uuid;

/// unique identifier for a payment
pub type PaymentId = Uuid;

/// supported repayment periods
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Tenor {
    Months3,
    Months6,
    Months9,
    Months12,
}

impl Tenor {
    pub const ALL: [Tenor; 4] = [
        Tenor::Months3,
        Tenor::Months6,
        Tenor::Months9,
        Tenor::Months12,
    ];

    pub fn months(&self) -> u32 {
        match self {
            Tenor::Months3 => 3,
            Tenor::Months6 => 6,
            Tenor::Months9 => 9,
            Tenor::Months12 => 12,
        }
    }
}

impl TryFrom<u32> for Tenor {
    type Error = PlanError;

    fn try_from(months: u32) -> Result<Self, Self::Error> {
        match months {
            3 => Ok(Tenor::Months3),
            6 => Ok(Tenor::Months6),
            9 => Ok(Tenor::Months9),
            12 => Ok(Tenor::Months12),
            _ => Err(PlanError::UnsupportedTenor { months }),
        }
    }
}

/// which of the two quoting rules to apply
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum QuoteMode {
    /// interest on the financed amount, rate by tenor
    #[default]
    InterestBearing,
    /// financed amount split evenly, total payable equals price
    ZeroInterest,
}

/// derived display status of an installment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InstallmentStatus {
    /// created, no payment made yet
    Pending,
    /// payments accruing, not past due
    Active,
    /// past the due date with a balance remaining
    Overdue,
    /// fully paid down
    Completed,
}

/// accepted payment channels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    CreditCard,
    BankTransfer,
    MobileBanking,
}

impl PaymentMethod {
    pub const ALL: [PaymentMethod; 3] = [
        PaymentMethod::CreditCard,
        PaymentMethod::BankTransfer,
        PaymentMethod::MobileBanking,
    ];
}

/// installment record as the backend returns it; read-only to this crate
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Installment {
    pub id: InstallmentId,
    pub product_id: Uuid,
    pub total_amount: Money,
    pub remaining_amount: Money,
    /// per-month amount the backend expects, when it provides one
    pub installment_amount: Option<Money>,
    pub due_date: NaiveDate,
    pub created_at: DateTime<Utc>,
}

impl Installment {
    /// check invariant 0 <= remaining <= total
    pub fn is_consistent(&self) -> bool {
        !self.remaining_amount.is_negative() && self.remaining_amount <= self.total_amount
    }

    pub fn is_settled(&self) -> bool {
        self.remaining_amount.is_zero()
    }

    /// amount paid so far
    pub fn paid_amount(&self) -> Money {
        (self.total_amount - self.remaining_amount).max(Money::ZERO)
    }
}

/// payment record created by a successful submission
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Payment {
    pub id: PaymentId,
    pub installment_id: InstallmentId,
    pub amount: Money,
    pub payment_date: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tenor_from_months() {
        assert_eq!(Tenor::try_from(6).unwrap(), Tenor::Months6);
        assert_eq!(Tenor::try_from(12).unwrap().months(), 12);

        // the original calculator silently fell back to 3 months here
        assert!(matches!(
            Tenor::try_from(7),
            Err(PlanError::UnsupportedTenor { months: 7 })
        ));
        assert!(Tenor::try_from(0).is_err());
    }

    #[test]
    fn test_payment_method_wire_names() {
        let json = serde_json::to_string(&PaymentMethod::MobileBanking).unwrap();
        assert_eq!(json, "\"mobile_banking\"");

        let back: PaymentMethod = serde_json::from_str("\"credit_card\"").unwrap();
        assert_eq!(back, PaymentMethod::CreditCard);
    }

    #[test]
    fn test_installment_consistency() {
        let inst = Installment {
            id: Uuid::new_v4(),
            product_id: Uuid::new_v4(),
            total_amount: Money::from_major(100_000),
            remaining_amount: Money::from_major(25_000),
            installment_amount: None,
            due_date: NaiveDate::from_ymd_opt(2025, 6, 15).unwrap(),
            created_at: Utc::now(),
        };
        assert!(inst.is_consistent());
        assert!(!inst.is_settled());
        assert_eq!(inst.paid_amount(), Money::from_major(75_000));

        let broken = Installment {
            remaining_amount: Money::from_major(120_000),
            ..inst
        };
        assert!(!broken.is_consistent());
    }
}
