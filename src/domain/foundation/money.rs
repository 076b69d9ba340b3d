//! Money value object.
//!
//! Amounts are held in minor units (cents) to keep arithmetic exact. The
//! gateway formats amounts as decimal strings ("150000.00"), so parsing and
//! formatting are part of the wire contract.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::errors::ValidationError;

/// An exact monetary amount in minor units (cents).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Money(i64);

impl Money {
    /// Zero amount.
    pub const ZERO: Money = Money(0);

    /// Creates a Money from minor units.
    pub fn from_cents(cents: i64) -> Self {
        Self(cents)
    }

    /// Parses a decimal-formatted amount string ("150000.00" or "150000").
    ///
    /// At most two fraction digits are accepted; fewer are zero-padded.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError::InvalidFormat` for empty, negative-malformed,
    /// or non-numeric input.
    pub fn parse_decimal(s: &str) -> Result<Self, ValidationError> {
        let s = s.trim();
        if s.is_empty() {
            return Err(ValidationError::empty_field("amount"));
        }

        let (sign, digits) = match s.strip_prefix('-') {
            Some(rest) => (-1i64, rest),
            None => (1i64, s),
        };

        let (whole, frac) = match digits.split_once('.') {
            Some((w, f)) => (w, f),
            None => (digits, ""),
        };

        if whole.is_empty() || !whole.bytes().all(|b| b.is_ascii_digit()) {
            return Err(ValidationError::invalid_format("amount", s));
        }
        if frac.len() > 2 || !frac.bytes().all(|b| b.is_ascii_digit()) {
            return Err(ValidationError::invalid_format("amount", s));
        }

        let whole: i64 = whole
            .parse()
            .map_err(|_| ValidationError::invalid_format("amount", s))?;
        let frac_cents: i64 = match frac.len() {
            0 => 0,
            1 => frac.parse::<i64>().unwrap_or(0) * 10,
            _ => frac.parse().unwrap_or(0),
        };

        Ok(Self(sign * (whole * 100 + frac_cents)))
    }

    /// Returns the amount in minor units.
    pub fn cents(&self) -> i64 {
        self.0
    }

    /// Checked addition.
    pub fn checked_add(&self, other: Money) -> Option<Money> {
        self.0.checked_add(other.0).map(Money)
    }

    /// Multiplies the amount by a quantity, `None` on overflow.
    pub fn checked_times(&self, quantity: u32) -> Option<Money> {
        self.0.checked_mul(i64::from(quantity)).map(Money)
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.abs();
        write!(f, "{}{}.{:02}", sign, abs / 100, abs % 100)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_whole_amounts() {
        assert_eq!(Money::parse_decimal("150000").unwrap().cents(), 15_000_000);
    }

    #[test]
    fn parses_two_fraction_digits() {
        assert_eq!(Money::parse_decimal("150000.00").unwrap().cents(), 15_000_000);
        assert_eq!(Money::parse_decimal("99.95").unwrap().cents(), 9995);
    }

    #[test]
    fn pads_single_fraction_digit() {
        assert_eq!(Money::parse_decimal("10.5").unwrap().cents(), 1050);
    }

    #[test]
    fn rejects_garbage() {
        assert!(Money::parse_decimal("").is_err());
        assert!(Money::parse_decimal("abc").is_err());
        assert!(Money::parse_decimal("10.999").is_err());
        assert!(Money::parse_decimal("10,50").is_err());
    }

    #[test]
    fn formats_with_two_fraction_digits() {
        assert_eq!(Money::from_cents(15_000_000).to_string(), "150000.00");
        assert_eq!(Money::from_cents(1050).to_string(), "10.50");
        assert_eq!(Money::from_cents(-75).to_string(), "-0.75");
    }

    #[test]
    fn checked_times_scales_by_quantity() {
        assert_eq!(
            Money::from_cents(2500).checked_times(3),
            Some(Money::from_cents(7500))
        );
    }

    #[test]
    fn checked_times_rejects_overflow() {
        assert_eq!(Money::from_cents(i64::MAX).checked_times(2), None);
        assert_eq!(
            Money::from_cents(i64::MAX).checked_times(1),
            Some(Money::from_cents(i64::MAX))
        );
    }

    #[test]
    fn checked_add_accumulates() {
        let a = Money::from_cents(100);
        let b = Money::from_cents(250);
        assert_eq!(a.checked_add(b).unwrap().cents(), 350);
    }
}
