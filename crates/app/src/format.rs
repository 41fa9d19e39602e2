//! Display formatting (Indonesian conventions).

use chrono::{Datelike, NaiveDate};
use rust_decimal::{Decimal, RoundingStrategy};
use serde::Serialize;

const MONTHS: [&str; 12] = [
    "Januari",
    "Februari",
    "Maret",
    "April",
    "Mei",
    "Juni",
    "Juli",
    "Agustus",
    "September",
    "Oktober",
    "November",
    "Desember",
];

/// Group the integer part in triples with `.`; fractional part (at most two
/// digits) after `,`.
///
/// `4850000` → `4.850.000`, `-1234.5` → `-1.234,5`.
pub fn format_number(value: Decimal) -> String {
    let rounded = round_for_display(value);
    let negative = rounded.is_sign_negative() && !rounded.is_zero();
    let digits = rounded.abs().to_string();

    let (whole, fraction) = match digits.split_once('.') {
        Some((whole, fraction)) => (whole, Some(fraction)),
        None => (digits.as_str(), None),
    };

    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 2);
    if negative {
        out.push('-');
    }
    for (i, ch) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            out.push('.');
        }
        out.push(ch);
    }
    if let Some(fraction) = fraction {
        out.push(',');
        out.push_str(fraction);
    }
    out
}

/// Two decimal places, half away from zero, trailing zeros dropped.
fn round_for_display(value: Decimal) -> Decimal {
    value
        .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
        .normalize()
}

/// `Rp ` + [`format_number`].
pub fn format_currency(value: Decimal) -> String {
    format!("Rp {}", format_number(value))
}

/// Long calendar form, e.g. `10 Januari 2024`.
pub fn format_date_long(date: NaiveDate) -> String {
    let month = MONTHS[date.month0() as usize];
    format!("{} {} {}", date.day(), month, date.year())
}

/// Visual treatment of the balance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BalanceTone {
    NonNegative,
    Negative,
}

impl BalanceTone {
    /// Tone of the balance as displayed, so it agrees with [`format_number`].
    pub fn of(balance: Decimal) -> Self {
        if round_for_display(balance) < Decimal::ZERO {
            BalanceTone::Negative
        } else {
            BalanceTone::NonNegative
        }
    }
}
