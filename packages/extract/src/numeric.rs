//! Locale-aware number normalization.
//!
//! Bulletins print amounts the Brazilian way (`"1.234,56"`). A handful of
//! garbled tokens among thousands of rows must not abort a batch, so every
//! parser here degrades to zero instead of failing.

use cinedata_bulletin_models::Money;

use crate::config::NumberFormat;

impl NumberFormat {
    /// Parses a currency amount such as `"R$ 50.000,00"`.
    ///
    /// Strips the currency marker and surrounding whitespace, drops
    /// thousands separators and turns the decimal separator into a plain
    /// decimal point. Returns [`Money::ZERO`] if what remains is not a
    /// non-negative decimal number.
    #[must_use]
    pub fn parse_currency(&self, s: &str) -> Money {
        let unmarked = if self.currency_marker.is_empty() {
            s.to_owned()
        } else {
            s.replace(self.currency_marker.as_str(), "")
        };

        let plain: String = unmarked
            .trim()
            .chars()
            .filter(|&c| c != self.thousands_separator)
            .map(|c| if c == self.decimal_separator { '.' } else { c })
            .collect();

        Money::parse_plain(&plain).unwrap_or_else(|_| {
            log::trace!("Unparseable amount {s:?}, using 0");
            Money::ZERO
        })
    }

    /// Parses a grouped integer such as `"12.345"`.
    ///
    /// Returns `0` if the token is not a non-negative integer once
    /// thousands separators are removed.
    #[must_use]
    pub fn parse_integer(&self, s: &str) -> u64 {
        let plain: String = s
            .chars()
            .filter(|&c| c != self.thousands_separator)
            .collect();

        plain.trim().parse().unwrap_or_else(|_| {
            log::trace!("Unparseable integer {s:?}, using 0");
            0
        })
    }
}

/// [`NumberFormat::parse_currency`] with Brazilian punctuation.
#[must_use]
pub fn parse_currency(s: &str) -> Money {
    NumberFormat::default().parse_currency(s)
}

/// [`NumberFormat::parse_integer`] with Brazilian punctuation.
#[must_use]
pub fn parse_integer(s: &str) -> u64 {
    NumberFormat::default().parse_integer(s)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_brazilian_currency() {
        assert_eq!(parse_currency("1.234,56"), Money::from_cents(123_456));
        assert_eq!(parse_currency("50.000,00"), Money::from_cents(5_000_000));
        assert_eq!(parse_currency("R$ 7,5"), Money::from_cents(750));
        assert_eq!(parse_currency("  999 "), Money::from_cents(99_900));
    }

    #[test]
    fn currency_degrades_to_zero() {
        assert_eq!(parse_currency(""), Money::ZERO);
        assert_eq!(parse_currency("R$"), Money::ZERO);
        assert_eq!(parse_currency("n/d"), Money::ZERO);
        assert_eq!(parse_currency("12,34,56"), Money::ZERO);
        assert_eq!(parse_currency("-10,00"), Money::ZERO);
    }

    #[test]
    fn parses_grouped_integers() {
        assert_eq!(parse_integer("12.345"), 12_345);
        assert_eq!(parse_integer("1.234.567"), 1_234_567);
        assert_eq!(parse_integer("42"), 42);
    }

    #[test]
    fn integer_degrades_to_zero() {
        assert_eq!(parse_integer(""), 0);
        assert_eq!(parse_integer("abc"), 0);
        assert_eq!(parse_integer("1,5"), 0);
        assert_eq!(parse_integer("-3"), 0);
    }

    #[test]
    fn honours_custom_punctuation() {
        let format = NumberFormat {
            currency_marker: "US$".to_owned(),
            thousands_separator: ',',
            decimal_separator: '.',
        };
        assert_eq!(format.parse_currency("US$ 1,234.56"), Money::from_cents(123_456));
        assert_eq!(format.parse_integer("12,345"), 12_345);
    }
}
