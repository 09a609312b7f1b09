//! Price representation and display formatting.
//!
//! Prices are decimal amounts in the currency's standard unit (tenge, not
//! tiyn). The storefront sells in KZT; display formatting groups thousands
//! with spaces and appends the tenge sign with no fraction digits.

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

/// A price with currency information.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Price {
    /// Amount in the currency's standard unit (e.g., tenge, not tiyn).
    pub amount: Decimal,
    /// ISO 4217 currency code.
    pub currency_code: CurrencyCode,
}

impl Price {
    /// Create a new price.
    #[must_use]
    pub const fn new(amount: Decimal, currency_code: CurrencyCode) -> Self {
        Self {
            amount,
            currency_code,
        }
    }

    /// Create a KZT price.
    #[must_use]
    pub const fn kzt(amount: Decimal) -> Self {
        Self::new(amount, CurrencyCode::KZT)
    }

    /// Format for display (e.g., "12 500 ₸").
    #[must_use]
    pub fn display(&self) -> String {
        match self.currency_code {
            CurrencyCode::KZT => format_kzt(self.amount),
            CurrencyCode::USD => format!("${:.2}", self.amount),
            CurrencyCode::EUR => format!("€{:.2}", self.amount),
        }
    }
}

/// ISO 4217 currency codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum CurrencyCode {
    #[default]
    KZT,
    USD,
    EUR,
}

/// Format a KZT amount: rounded to whole tenge, thousands grouped with
/// spaces, tenge sign suffix (e.g., `1 250 000 ₸`).
#[must_use]
pub fn format_kzt(amount: Decimal) -> String {
    let rounded = amount
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .normalize();
    let digits = rounded.abs().to_string();
    let sign = if rounded.is_sign_negative() && !rounded.is_zero() {
        "-"
    } else {
        ""
    };
    format!("{sign}{} ₸", group_thousands(&digits))
}

/// Insert a space between every group of three digits, from the right.
fn group_thousands(digits: &str) -> String {
    let chars: Vec<char> = digits.chars().collect();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in chars.iter().enumerate() {
        if i > 0 && (chars.len() - i).is_multiple_of(3) {
            out.push(' ');
        }
        out.push(*c);
    }
    out
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    #[test]
    fn test_format_kzt_small() {
        assert_eq!(format_kzt(Decimal::from(0)), "0 ₸");
        assert_eq!(format_kzt(Decimal::from(5)), "5 ₸");
        assert_eq!(format_kzt(Decimal::from(999)), "999 ₸");
    }

    #[test]
    fn test_format_kzt_grouping() {
        assert_eq!(format_kzt(Decimal::from(1000)), "1 000 ₸");
        assert_eq!(format_kzt(Decimal::from(12500)), "12 500 ₸");
        assert_eq!(format_kzt(Decimal::from(1250000)), "1 250 000 ₸");
    }

    #[test]
    fn test_format_kzt_rounds_to_whole() {
        assert_eq!(format_kzt(Decimal::new(14995, 1)), "1 500 ₸");
        assert_eq!(format_kzt(Decimal::new(14994, 1)), "1 499 ₸");
    }

    #[test]
    fn test_format_kzt_negative() {
        assert_eq!(format_kzt(Decimal::from(-1000)), "-1 000 ₸");
    }

    #[test]
    fn test_price_display() {
        let price = Price::kzt(Decimal::from(4990));
        assert_eq!(price.display(), "4 990 ₸");
    }
}
