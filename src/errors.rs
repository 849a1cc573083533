use thiserror::Error;

use crate::decimal::Money;
use crate::types::PaymentMethod;

#[derive(Error, Debug)]
pub enum PlanError {
    #[error("invalid price: {price}")]
    InvalidPrice {
        price: Money,
    },

    #[error("unsupported tenor: {months} months (supported: 3, 6, 9, 12)")]
    UnsupportedTenor {
        months: u32,
    },

    #[error("down payment percent out of range: {percent} (allowed {min}..={max})")]
    DownPaymentOutOfRange {
        percent: u32,
        min: u32,
        max: u32,
    },

    #[error("invalid due day: {day} (allowed 1..=28)")]
    InvalidDueDay {
        day: u32,
    },

    #[error("invalid payment amount: {amount}")]
    InvalidPaymentAmount {
        amount: Money,
    },

    #[error("payment exceeds remaining balance: remaining {remaining}, requested {requested}")]
    PaymentExceedsRemaining {
        remaining: Money,
        requested: Money,
    },

    #[error("payment method not allowed: {method:?}")]
    MethodNotAllowed {
        method: PaymentMethod,
    },

    #[error("installment already settled")]
    AlreadySettled,

    #[error("backend rejected payment: {message}")]
    Gateway {
        message: String,
    },

    #[error("backend did not respond within {timeout_secs}s")]
    GatewayTimeout {
        timeout_secs: u64,
    },
}

pub type Result<T> = std::result::Result<T, PlanError>;
