//! Money type for representing currency amounts
//!
//! Wraps `rust_decimal::Decimal` so amounts keep their decimal form through
//! every period conversion; nothing here touches floating point. Arithmetic
//! saturates at the decimal range instead of panicking.

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, AddAssign, Neg, Sub, SubAssign};
use std::str::FromStr;

/// Represents a monetary amount as an exact decimal
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Money(Decimal);

impl Money {
    /// Create a Money amount from a decimal
    pub const fn new(amount: Decimal) -> Self {
        Self(amount)
    }

    /// Create a zero Money amount
    pub const fn zero() -> Self {
        Self(Decimal::ZERO)
    }

    /// Get the underlying decimal
    pub const fn amount(&self) -> Decimal {
        self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    pub fn is_positive(&self) -> bool {
        self.0 > Decimal::ZERO
    }

    pub fn is_negative(&self) -> bool {
        self.0 < Decimal::ZERO
    }

    /// Get the absolute value
    pub fn abs(&self) -> Self {
        Self(self.0.abs())
    }

    /// Multiply by `numerator / denominator`, multiplying first to keep precision.
    ///
    /// Falls back to dividing first when the product would overflow, and
    /// saturates when the result itself is out of range. A zero denominator
    /// yields zero.
    pub fn scale(&self, numerator: Decimal, denominator: Decimal) -> Self {
        if denominator.is_zero() {
            return Self::zero();
        }
        Self(ratio(self.0, numerator, denominator))
    }

    /// Round to cents, half away from zero
    pub fn round_cents(&self) -> Self {
        Self(
            self.0
                .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero),
        )
    }

    /// Round up to the next multiple of `step`.
    ///
    /// Amounts already on a multiple are unchanged; a non-positive step
    /// returns the amount as-is.
    pub fn round_up_to(&self, step: Decimal) -> Self {
        if step <= Decimal::ZERO {
            return *self;
        }
        (self.0 / step)
            .ceil()
            .checked_mul(step)
            .map_or(*self, Self)
    }

    /// This amount as a percentage of `total`; zero when `total` is zero.
    pub fn percent_of(&self, total: Money) -> Decimal {
        if total.is_zero() {
            return Decimal::ZERO;
        }
        ratio(self.0, Decimal::ONE_HUNDRED, total.0)
    }

    /// Parse a money amount from a string
    ///
    /// Accepts formats: "10.50", "-10.50", "$10.50", "10", "1,250.00"
    pub fn parse(s: &str) -> Result<Self, MoneyParseError> {
        let trimmed = s.trim();

        let (negative, rest) = match trimmed.strip_prefix('-') {
            Some(stripped) => (true, stripped),
            None => (false, trimmed),
        };

        let rest = rest.strip_prefix('$').unwrap_or(rest);
        let cleaned: String = rest.chars().filter(|c| *c != ',').collect();

        if cleaned.is_empty() || cleaned.starts_with('-') || cleaned.starts_with('+') {
            return Err(MoneyParseError::InvalidFormat(s.to_string()));
        }

        let value = Decimal::from_str(&cleaned)
            .map_err(|_| MoneyParseError::InvalidFormat(s.to_string()))?;

        Ok(Self(if negative { -value } else { value }))
    }

    /// Format with a currency symbol, always two decimals
    pub fn format_with_symbol(&self, symbol: &str) -> String {
        let rounded = self.round_cents().0;
        if rounded < Decimal::ZERO {
            format!("-{}{:.2}", symbol, rounded.abs())
        } else {
            format!("{}{:.2}", symbol, rounded)
        }
    }
}

/// `value * numerator / denominator` without panicking; `denominator` must be non-zero
fn ratio(value: Decimal, numerator: Decimal, denominator: Decimal) -> Decimal {
    value
        .checked_mul(numerator)
        .and_then(|v| v.checked_div(denominator))
        .or_else(|| {
            value
                .checked_div(denominator)
                .and_then(|v| v.checked_mul(numerator))
        })
        .unwrap_or_else(|| {
            let negative = value.is_sign_negative()
                ^ numerator.is_sign_negative()
                ^ denominator.is_sign_negative();
            if negative {
                Decimal::MIN
            } else {
                Decimal::MAX
            }
        })
}

impl Default for Money {
    fn default() -> Self {
        Self::zero()
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_with_symbol("$"))
    }
}

impl From<Decimal> for Money {
    fn from(amount: Decimal) -> Self {
        Self(amount)
    }
}

impl Add for Money {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self(self.0.saturating_add(other.0))
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, other: Self) {
        self.0 = self.0.saturating_add(other.0);
    }
}

impl Sub for Money {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        Self(self.0.saturating_sub(other.0))
    }
}

impl SubAssign for Money {
    fn sub_assign(&mut self, other: Self) {
        self.0 = self.0.saturating_sub(other.0);
    }
}

impl Neg for Money {
    type Output = Self;

    fn neg(self) -> Self {
        Self(-self.0)
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
}

impl fmt::Display for MoneyParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MoneyParseError::InvalidFormat(s) => write!(f, "Invalid money format: {}", s),
        }
    }
}

impl std::error::Error for MoneyParseError {}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_display() {
        assert_eq!(Money::new(dec!(10.5)).to_string(), "$10.50");
        assert_eq!(Money::zero().to_string(), "$0.00");
        assert_eq!(Money::new(dec!(-10.5)).to_string(), "-$10.50");
        assert_eq!(Money::new(dec!(434.857142)).to_string(), "$434.86");
    }

    #[test]
    fn test_format_with_symbol() {
        assert_eq!(Money::new(dec!(12)).format_with_symbol("€"), "€12.00");
        assert_eq!(Money::new(dec!(-3.456)).format_with_symbol("£"), "-£3.46");
    }

    #[test]
    fn test_arithmetic() {
        let a = Money::new(dec!(10.00));
        let b = Money::new(dec!(5.25));

        assert_eq!((a + b).amount(), dec!(15.25));
        assert_eq!((a - b).amount(), dec!(4.75));
        assert_eq!((-a).amount(), dec!(-10.00));
    }

    #[test]
    fn test_parse() {
        assert_eq!(Money::parse("10.50").unwrap().amount(), dec!(10.50));
        assert_eq!(Money::parse("$10.50").unwrap().amount(), dec!(10.50));
        assert_eq!(Money::parse("-10.50").unwrap().amount(), dec!(-10.50));
        assert_eq!(Money::parse("10").unwrap().amount(), dec!(10));
        assert_eq!(Money::parse("1,250.75").unwrap().amount(), dec!(1250.75));
        assert!(Money::parse("abc").is_err());
        assert!(Money::parse("").is_err());
        assert!(Money::parse("--5").is_err());
    }

    #[test]
    fn test_scale() {
        let m = Money::new(dec!(1200));
        assert_eq!(m.scale(dec!(1), dec!(12)).amount(), dec!(100));
        assert!(m.scale(dec!(1), Decimal::ZERO).is_zero());
    }

    #[test]
    fn test_scale_large_amounts() {
        // 3e27 * 30.44 overflows before the divide; the result itself fits
        let big = Money::new(Decimal::from_i128_with_scale(3_000_000_000_000_000_000_000_000_000, 0));
        let scaled = big.scale(dec!(30.44), dec!(7));
        assert!(scaled.amount() > dec!(13045000000000000000000000000));
        assert!(scaled.amount() < dec!(13046000000000000000000000000));

        assert_eq!(Money::new(Decimal::MAX).scale(dec!(365.25), dec!(1)).amount(), Decimal::MAX);
        assert_eq!(Money::new(Decimal::MIN).scale(dec!(2), dec!(1)).amount(), Decimal::MIN);
    }

    #[test]
    fn test_arithmetic_saturates() {
        let max = Money::new(Decimal::MAX);
        assert_eq!((max + max).amount(), Decimal::MAX);
        assert_eq!((-max - max).amount(), Decimal::MIN);

        let total: Money = vec![max, Money::new(dec!(1))].into_iter().sum();
        assert_eq!(total.amount(), Decimal::MAX);
    }

    #[test]
    fn test_round_up_to() {
        assert_eq!(Money::new(dec!(434.86)).round_up_to(dec!(10)).amount(), dec!(440));
        assert_eq!(Money::new(dec!(430)).round_up_to(dec!(10)).amount(), dec!(430));
        assert_eq!(Money::zero().round_up_to(dec!(10)).amount(), dec!(0));
        assert_eq!(Money::new(dec!(7)).round_up_to(Decimal::ZERO).amount(), dec!(7));
    }

    #[test]
    fn test_percent_of() {
        let spent = Money::new(dec!(40));
        assert_eq!(spent.percent_of(Money::new(dec!(50))), dec!(80));
        assert_eq!(spent.percent_of(Money::zero()), Decimal::ZERO);
        assert_eq!(Money::new(Decimal::MAX).percent_of(Money::new(dec!(1))), Decimal::MAX);
    }

    #[test]
    fn test_sum() {
        let total: Money = vec![
            Money::new(dec!(1.10)),
            Money::new(dec!(2.20)),
            Money::new(dec!(3.30)),
        ]
        .into_iter()
        .sum();
        assert_eq!(total.amount(), dec!(6.60));
    }

    #[test]
    fn test_serialization_keeps_decimal_form() {
        let m = Money::new(dec!(10.50));
        let json = serde_json::to_string(&m).unwrap();
        assert_eq!(json, "\"10.50\"");

        let deserialized: Money = serde_json::from_str(&json).unwrap();
        assert_eq!(m, deserialized);

        let from_number: Money = serde_json::from_str("12.5").unwrap();
        assert_eq!(from_number.amount(), dec!(12.5));
    }
}
