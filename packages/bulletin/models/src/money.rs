//! Exact currency amounts.
//!
//! Amounts are held as integer cents so that summing many rows is exact and
//! independent of the order the rows arrive in.

use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign};
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// A non-negative amount of money with two decimal places.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Money {
    cents: u64,
}

impl Money {
    /// Zero.
    pub const ZERO: Self = Self { cents: 0 };

    /// Creates an amount from a number of cents.
    #[must_use]
    pub const fn from_cents(cents: u64) -> Self {
        Self { cents }
    }

    /// Returns the amount in cents.
    #[must_use]
    pub const fn cents(self) -> u64 {
        self.cents
    }

    /// Returns `true` if the amount is zero.
    #[must_use]
    pub const fn is_zero(self) -> bool {
        self.cents == 0
    }

    /// Parses plain decimal text such as `"50000.00"`, `"12"` or `"0.5"`.
    ///
    /// Digits past the second decimal place are rounded half-up.
    ///
    /// # Errors
    ///
    /// Returns [`ParseMoneyError`] if `s` contains anything other than
    /// ASCII digits and at most one `.`, or if the amount overflows.
    pub fn parse_plain(s: &str) -> Result<Self, ParseMoneyError> {
        let err = || ParseMoneyError {
            input: s.to_owned(),
        };

        let (whole, fraction) = s.split_once('.').unwrap_or((s, ""));

        if whole.is_empty() && fraction.is_empty() {
            return Err(err());
        }
        if !whole.bytes().all(|b| b.is_ascii_digit())
            || !fraction.bytes().all(|b| b.is_ascii_digit())
        {
            return Err(err());
        }

        let whole: u64 = if whole.is_empty() {
            0
        } else {
            whole.parse().map_err(|_| err())?
        };

        let digits = fraction.as_bytes();
        let digit = |i: usize| digits.get(i).map_or(0, |b| u64::from(b - b'0'));
        let mut cents = digit(0) * 10 + digit(1);
        if digit(2) >= 5 {
            cents += 1;
        }

        whole
            .checked_mul(100)
            .and_then(|c| c.checked_add(cents))
            .map(Self::from_cents)
            .ok_or_else(err)
    }

    /// Approximate value as a float, for ratios and display scaling.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn as_f64(self) -> f64 {
        self.cents as f64 / 100.0
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{:02}", self.cents / 100, self.cents % 100)
    }
}

impl FromStr for Money {
    type Err = ParseMoneyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_plain(s.trim())
    }
}

impl Add for Money {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::from_cents(self.cents.saturating_add(rhs.cents))
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, Add::add)
    }
}

impl<'a> Sum<&'a Self> for Money {
    fn sum<I: Iterator<Item = &'a Self>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

impl Serialize for Money {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Money {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Error returned when text is not a plain decimal amount.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseMoneyError {
    /// The text that failed to parse.
    pub input: String,
}

impl fmt::Display for ParseMoneyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid amount '{}': expected plain decimal text", self.input)
    }
}

impl std::error::Error for ParseMoneyError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn displays_two_decimal_places() {
        assert_eq!(Money::from_cents(5_000_000).to_string(), "50000.00");
        assert_eq!(Money::from_cents(7).to_string(), "0.07");
    }

    #[test]
    fn parses_plain_decimal_text() {
        assert_eq!(Money::parse_plain("1234.56").unwrap().cents(), 123_456);
        assert_eq!(Money::parse_plain("12").unwrap().cents(), 1_200);
        assert_eq!(Money::parse_plain("0.5").unwrap().cents(), 50);
        assert_eq!(Money::parse_plain(".25").unwrap().cents(), 25);
    }

    #[test]
    fn rounds_extra_fraction_digits_half_up() {
        assert_eq!(Money::parse_plain("1.005").unwrap().cents(), 101);
        assert_eq!(Money::parse_plain("1.004").unwrap().cents(), 100);
    }

    #[test]
    fn rejects_locale_punctuation_and_signs() {
        assert!(Money::parse_plain("1.234,56").is_err());
        assert!(Money::parse_plain("-3.00").is_err());
        assert!(Money::parse_plain("").is_err());
        assert!(Money::parse_plain(".").is_err());
    }

    #[test]
    fn sum_is_exact() {
        let total: Money = [10, 20, 30].into_iter().map(Money::from_cents).sum();
        assert_eq!(total, Money::from_cents(60));
    }
}
