//! Money type and the storefront's price wire format.
//!
//! Prices are whole pesos: the storefront never shows a fraction, so amounts
//! are plain integers with no minor unit. Display strings follow one fixed
//! layout, `$` followed by digits grouped in threes with `.` between groups
//! (`$2.500`, `$12.000`). That layout is a declared format, not locale-aware
//! currency parsing.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Currency symbol that prefixes every display price.
pub const CURRENCY_SYMBOL: &str = "$";

/// Separator between digit groups.
pub const THOUSANDS_SEPARATOR: char = '.';

/// Reasons a display price fails to parse.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PriceParseError {
    /// Input does not start with the currency symbol.
    #[error("missing currency symbol")]
    MissingSymbol,

    /// Nothing after the currency symbol.
    #[error("no digits after currency symbol")]
    Empty,

    /// A character that is neither a digit nor the separator.
    #[error("unexpected character {0:?}")]
    InvalidCharacter(char),

    /// Separator in the wrong place (groups must be 1-3 digits, then exactly 3).
    #[error("malformed digit grouping")]
    MalformedGrouping,

    /// Amount does not fit in an `i64`.
    #[error("amount too large")]
    TooLarge,
}

/// A monetary value in whole pesos.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default)]
#[serde(transparent)]
pub struct Money {
    /// Amount in pesos.
    pub amount: i64,
}

impl Money {
    /// Create a new Money value.
    pub fn new(amount: i64) -> Self {
        Self { amount }
    }

    /// Zero pesos.
    pub fn zero() -> Self {
        Self::new(0)
    }

    /// Parse a display price such as `"$2.500"`.
    ///
    /// ```
    /// use dulce_commerce::money::Money;
    /// let price = Money::parse_display("$12.000").unwrap();
    /// assert_eq!(price.amount, 12000);
    /// ```
    pub fn parse_display(input: &str) -> Result<Self, PriceParseError> {
        let digits = input
            .trim()
            .strip_prefix(CURRENCY_SYMBOL)
            .ok_or(PriceParseError::MissingSymbol)?;

        if digits.is_empty() {
            return Err(PriceParseError::Empty);
        }
        if let Some(c) = digits
            .chars()
            .find(|c| !c.is_ascii_digit() && *c != THOUSANDS_SEPARATOR)
        {
            return Err(PriceParseError::InvalidCharacter(c));
        }

        let groups: Vec<&str> = digits.split(THOUSANDS_SEPARATOR).collect();
        if let Some((first, rest)) = groups.split_first() {
            if !rest.is_empty()
                && (first.is_empty() || first.len() > 3 || rest.iter().any(|g| g.len() != 3))
            {
                return Err(PriceParseError::MalformedGrouping);
            }
        }

        let mut amount: i64 = 0;
        for digit in digits.chars().filter_map(|c| c.to_digit(10)) {
            amount = amount
                .checked_mul(10)
                .and_then(|a| a.checked_add(i64::from(digit)))
                .ok_or(PriceParseError::TooLarge)?;
        }
        Ok(Self::new(amount))
    }

    /// Format as a display string (e.g., `"$5.000"`).
    pub fn display(&self) -> String {
        if self.amount < 0 {
            format!("-{}{}", CURRENCY_SYMBOL, self.display_amount())
        } else {
            format!("{}{}", CURRENCY_SYMBOL, self.display_amount())
        }
    }

    /// Format the grouped digits without symbol or sign (e.g., `"5.000"`).
    pub fn display_amount(&self) -> String {
        let digits = self.amount.unsigned_abs().to_string();
        let mut out = String::with_capacity(digits.len() + digits.len() / 3);
        for (i, ch) in digits.chars().enumerate() {
            if i > 0 && (digits.len() - i) % 3 == 0 {
                out.push(THOUSANDS_SEPARATOR);
            }
            out.push(ch);
        }
        out
    }

    /// Add, returning `None` on overflow.
    pub fn try_add(&self, other: &Money) -> Option<Money> {
        self.amount.checked_add(other.amount).map(Money::new)
    }

    /// Multiply by a quantity, returning `None` on overflow.
    pub fn try_multiply(&self, factor: i64) -> Option<Money> {
        self.amount.checked_mul(factor).map(Money::new)
    }
}

impl FromStr for Money {
    type Err = PriceParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_display(s)
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_grouped_prices() {
        assert_eq!(Money::parse_display("$2.500").unwrap().amount, 2500);
        assert_eq!(Money::parse_display("$12.000").unwrap().amount, 12000);
        assert_eq!(Money::parse_display("$1.234.567").unwrap().amount, 1_234_567);
    }

    #[test]
    fn test_parse_ungrouped_and_padded() {
        assert_eq!(Money::parse_display("$500").unwrap().amount, 500);
        assert_eq!(Money::parse_display("$0").unwrap().amount, 0);
        assert_eq!(Money::parse_display("  $4.800\n").unwrap().amount, 4800);
    }

    #[test]
    fn test_parse_rejects_other_layouts() {
        assert_eq!(Money::parse_display("2.500"), Err(PriceParseError::MissingSymbol));
        assert_eq!(Money::parse_display("$"), Err(PriceParseError::Empty));
        assert_eq!(
            Money::parse_display("$2,500"),
            Err(PriceParseError::InvalidCharacter(','))
        );
        assert_eq!(
            Money::parse_display("$2.50"),
            Err(PriceParseError::MalformedGrouping)
        );
        assert_eq!(
            Money::parse_display("$.500"),
            Err(PriceParseError::MalformedGrouping)
        );
        assert_eq!(
            Money::parse_display("$1234.000"),
            Err(PriceParseError::MalformedGrouping)
        );
        assert_eq!(
            Money::parse_display("$99.999.999.999.999.999.999"),
            Err(PriceParseError::TooLarge)
        );
    }

    #[test]
    fn test_display() {
        assert_eq!(Money::new(0).display(), "$0");
        assert_eq!(Money::new(999).display(), "$999");
        assert_eq!(Money::new(5000).display(), "$5.000");
        assert_eq!(Money::new(1_234_567).display(), "$1.234.567");
        assert_eq!(Money::new(-2500).display(), "-$2.500");
    }

    #[test]
    fn test_display_parses_back() {
        for amount in [0, 7, 2500, 10500, 1_000_000] {
            let m = Money::new(amount);
            assert_eq!(Money::parse_display(&m.display()).unwrap(), m);
        }
    }

    #[test]
    fn test_checked_arithmetic() {
        let a = Money::new(2500);
        assert_eq!(a.try_multiply(2), Some(Money::new(5000)));
        assert_eq!(a.try_add(&Money::new(500)), Some(Money::new(3000)));
        assert_eq!(Money::new(i64::MAX).try_add(&Money::new(1)), None);
        assert_eq!(Money::new(i64::MAX).try_multiply(2), None);
    }

    #[test]
    fn test_from_str() {
        let m: Money = "$3.200".parse().unwrap();
        assert_eq!(m.amount, 3200);
    }
}
