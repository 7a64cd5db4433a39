//! Money type for representing CHF amounts
//!
//! Internally stores amounts in centimes (i64) to avoid floating-point
//! precision issues. Provides safe arithmetic operations and formatting.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Add;

/// ISO code of the only currency expenses are claimed in
pub const CURRENCY: &str = "CHF";

/// Represents a monetary amount stored as centimes (hundredths of a franc)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Money(i64);

impl Money {
    /// Create a Money amount from centimes
    ///
    /// # Examples
    /// ```
    /// use tripdesk::models::Money;
    /// let amount = Money::from_cents(1050); // CHF 10.50
    /// assert_eq!(amount.to_string(), "CHF 10.50");
    /// ```
    pub const fn from_cents(cents: i64) -> Self {
        Self(cents)
    }

    /// Create a zero Money amount
    pub const fn zero() -> Self {
        Self(0)
    }

    /// Get the amount in centimes
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Get the whole francs portion (truncated toward zero)
    pub const fn francs(&self) -> i64 {
        self.0 / 100
    }

    /// Get the centimes portion (0-99)
    pub const fn cents_part(&self) -> i64 {
        (self.0 % 100).abs()
    }

    /// Check if the amount is zero
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Check if the amount is negative
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Parse a money amount from user input
    ///
    /// Accepts `120`, `120.5`, `120.50`, `CHF 120.50`, `-5.00` and grouped
    /// thousands written as `1'234.50` or `1,234.50`.
    pub fn parse(s: &str) -> Result<Self, MoneyParseError> {
        let original = s;
        let invalid = || MoneyParseError::InvalidFormat(original.trim().to_string());

        let mut s = s.trim();
        if let Some(prefix) = s.get(..CURRENCY.len()) {
            if prefix.eq_ignore_ascii_case(CURRENCY) {
                s = s[CURRENCY.len()..].trim_start();
            }
        }

        let (negative, s) = match s.strip_prefix('-') {
            Some(stripped) => (true, stripped),
            None => (false, s),
        };

        let (whole, fraction) = match s.split_once('.') {
            Some((whole, fraction)) => (whole, Some(fraction)),
            None => (s, None),
        };

        let francs = parse_grouped_integer(whole).ok_or_else(invalid)?;

        let cents = match fraction {
            None => 0,
            Some(digits) if !digits.chars().all(|c| c.is_ascii_digit()) => {
                return Err(invalid())
            }
            Some(digits) => match digits.len() {
                0 => 0,
                1 => digits.parse::<i64>().map_err(|_| invalid())? * 10,
                2 => digits.parse::<i64>().map_err(|_| invalid())?,
                _ => return Err(MoneyParseError::TooPrecise(original.trim().to_string())),
            },
        };

        let total = francs
            .checked_mul(100)
            .and_then(|c| c.checked_add(cents))
            .ok_or_else(invalid)?;

        Ok(Self(if negative { -total } else { total }))
    }

    /// Amount with two decimals and no currency code, e.g. `1234.50`
    pub fn format_plain(&self) -> String {
        let sign = if self.is_negative() { "-" } else { "" };
        format!("{}{}.{:02}", sign, self.francs().abs(), self.cents_part())
    }

    /// Amount with thousands grouping and no currency code, e.g. `1,234.50`
    pub fn format_grouped(&self) -> String {
        let digits = self.francs().abs().to_string();
        let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
        for (i, c) in digits.chars().enumerate() {
            if i > 0 && (digits.len() - i) % 3 == 0 {
                grouped.push(',');
            }
            grouped.push(c);
        }
        let sign = if self.is_negative() { "-" } else { "" };
        format!("{}{}.{:02}", sign, grouped, self.cents_part())
    }
}

/// Parses `1234`, `1,234` or `1'234`; groups after the first must be 3 digits.
fn parse_grouped_integer(s: &str) -> Option<i64> {
    if s.is_empty() {
        return None;
    }
    let mut groups = s.split([',', '\'']);
    let first = groups.next()?;
    if first.is_empty() || !first.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    let mut digits = first.to_string();
    for group in groups {
        if group.len() != 3 || !group.chars().all(|c| c.is_ascii_digit()) {
            return None;
        }
        digits.push_str(group);
    }
    digits.parse().ok()
}

impl Default for Money {
    fn default() -> Self {
        Self::zero()
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", CURRENCY, self.format_grouped())
    }
}

impl Add for Money {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self(self.0 + other.0)
    }
}

impl std::iter::Sum for Money {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Money::zero(), |acc, m| acc + m)
    }
}

/// Error type for money parsing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoneyParseError {
    InvalidFormat(String),
    TooPrecise(String),
}

impl fmt::Display for MoneyParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MoneyParseError::InvalidFormat(s) => write!(f, "Invalid money format: {}", s),
            MoneyParseError::TooPrecise(s) => {
                write!(f, "Amount has more than two decimal places: {}", s)
            }
        }
    }
}

impl std::error::Error for MoneyParseError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_cents() {
        let m = Money::from_cents(1050);
        assert_eq!(m.cents(), 1050);
        assert_eq!(m.francs(), 10);
        assert_eq!(m.cents_part(), 50);
    }

    #[test]
    fn test_display() {
        assert_eq!(Money::from_cents(1050).to_string(), "CHF 10.50");
        assert_eq!(Money::zero().to_string(), "CHF 0.00");
        assert_eq!(Money::from_cents(123456789).to_string(), "CHF 1,234,567.89");
        assert_eq!(Money::from_cents(-1050).to_string(), "CHF -10.50");
    }

    #[test]
    fn test_format_plain() {
        assert_eq!(Money::from_cents(18075).format_plain(), "180.75");
        assert_eq!(Money::from_cents(5).format_plain(), "0.05");
        assert_eq!(Money::from_cents(123456).format_plain(), "1234.56");
    }

    #[test]
    fn test_parse() {
        assert_eq!(Money::parse("10.50").unwrap().cents(), 1050);
        assert_eq!(Money::parse("CHF 10.50").unwrap().cents(), 1050);
        assert_eq!(Money::parse("chf10").unwrap().cents(), 1000);
        assert_eq!(Money::parse("-10.50").unwrap().cents(), -1050);
        assert_eq!(Money::parse("10.5").unwrap().cents(), 1050);
        assert_eq!(Money::parse("0.05").unwrap().cents(), 5);
        assert_eq!(Money::parse("1'234.50").unwrap().cents(), 123450);
        assert_eq!(Money::parse("1,234").unwrap().cents(), 123400);
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(Money::parse("").is_err());
        assert!(Money::parse("abc").is_err());
        assert!(Money::parse("1,5").is_err());
        assert!(Money::parse("1.2.3").is_err());
        assert_eq!(
            Money::parse("10.555"),
            Err(MoneyParseError::TooPrecise("10.555".into()))
        );
    }

    #[test]
    fn test_sum() {
        let total: Money = [12000, 4550, 0, 1525]
            .into_iter()
            .map(Money::from_cents)
            .sum();
        assert_eq!(total.cents(), 18075);
    }

    #[test]
    fn test_serialization() {
        let m = Money::from_cents(1050);
        let json = serde_json::to_string(&m).unwrap();
        assert_eq!(json, "1050");

        let deserialized: Money = serde_json::from_str(&json).unwrap();
        assert_eq!(m, deserialized);
    }
}
