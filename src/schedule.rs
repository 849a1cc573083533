use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;

use crate::decimal::Money;
use crate::types::{Installment, Tenor};

/// build a due date from a day-of-month, clamping to the month's last day
pub fn due_date_for_day(day: u32, reference: NaiveDate) -> NaiveDate {
    let last = days_in_month(reference.year(), reference.month());
    let safe_day = day.clamp(1, last);
    // safe_day is always a valid day of this month
    reference.with_day(safe_day).unwrap_or(reference)
}

/// advance one calendar month, end-of-month safe (jan 31 -> feb 28/29)
pub fn next_due_date(date: NaiveDate) -> NaiveDate {
    let (year, month) = if date.month() == 12 {
        (date.year() + 1, 1)
    } else {
        (date.year(), date.month() + 1)
    };
    let day = date.day().min(days_in_month(year, month));
    NaiveDate::from_ymd_opt(year, month, day).unwrap_or(date)
}

/// per-month amount for a balance spread over a tenor, rounded up to the
/// minor unit so the final payment is never short
pub fn periodic_amount(remaining: Money, tenor: Tenor) -> Money {
    Money::from_decimal_ceil(remaining.as_decimal() / Decimal::from(tenor.months()))
}

/// the backend's post-payment rule: the due date advances one month while a
/// balance remains and freezes once the installment settles
pub fn roll_forward(installment: &Installment) -> Option<NaiveDate> {
    if installment.remaining_amount.is_positive() {
        Some(next_due_date(installment.due_date))
    } else {
        None
    }
}

fn days_in_month(year: i32, month: u32) -> u32 {
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        2 => {
            if is_leap_year(year) {
                29
            } else {
                28
            }
        }
        _ => 30,
    }
}

fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || (year % 400 == 0)
}
