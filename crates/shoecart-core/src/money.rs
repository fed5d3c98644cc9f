//! # Money Module
//!
//! Provides the `Money` type for handling prices safely.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  The storefront API sends prices as JSON numbers:                       │
//! │    { "price": 139.9 }                                                   │
//! │                                                                         │
//! │  Summing those as floats drifts:                                        │
//! │    0.1 + 0.2 = 0.30000000000000004                                      │
//! │                                                                         │
//! │  OUR SOLUTION: convert once at the boundary, then integer cents         │
//! │    139.9 ──► 13990 cents ──► totals ──► 139.9 on the way back out       │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use shoecart_core::money::{Locale, Money};
//!
//! let price = Money::from_cents(13990);
//! let line_total = price.multiply_quantity(2);
//! assert_eq!(line_total.cents(), 27980);
//! assert_eq!(line_total.format(Locale::PtBr), "R$ 279,80");
//! ```

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::ops::{Add, AddAssign, Mul};

// =============================================================================
// Money Type
// =============================================================================

/// A monetary value in the smallest currency unit (centavos / cents).
///
/// ## Serialization
/// On the wire and in the cart snapshot a price is a decimal JSON number
/// (`139.9`). Conversion happens only in `Serialize`/`Deserialize`; all
/// arithmetic stays on `i64`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from cents.
    ///
    /// ```rust
    /// use shoecart_core::money::Money;
    ///
    /// let price = Money::from_cents(1099);
    /// assert_eq!(price.cents(), 1099);
    /// ```
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Creates a Money value from a decimal amount, rounding to the nearest cent.
    ///
    /// Only used where the storefront API hands us a JSON number. Sub-cent
    /// digits are lost: a snapshot price of `139.994` loads as 13999 cents
    /// and is written back as `139.99` on the next commit. Amounts beyond
    /// the `i64` range clamp to its bounds.
    ///
    /// ```rust
    /// use shoecart_core::money::Money;
    ///
    /// assert_eq!(Money::from_decimal(139.9).cents(), 13990);
    /// assert_eq!(Money::from_decimal(0.1 + 0.2).cents(), 30);
    /// ```
    pub fn from_decimal(amount: f64) -> Self {
        Money((amount * 100.0).round() as i64)
    }

    /// Returns the decimal representation (for serialization only).
    pub fn to_decimal(&self) -> f64 {
        self.0 as f64 / 100.0
    }

    /// Returns the value in cents.
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Returns the major unit portion.
    #[inline]
    pub const fn major(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the minor unit portion (always 0-99).
    #[inline]
    pub const fn minor(&self) -> i64 {
        (self.0 % 100).abs()
    }

    /// Returns zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    /// Checks if the value is negative.
    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Multiplies money by a quantity, saturating at the `i64` bounds.
    ///
    /// ```rust
    /// use shoecart_core::money::Money;
    ///
    /// let unit_price = Money::from_cents(299);
    /// assert_eq!(unit_price.multiply_quantity(3).cents(), 897);
    /// ```
    #[inline]
    pub const fn multiply_quantity(&self, qty: i64) -> Self {
        Money(self.0.saturating_mul(qty))
    }

    /// Formats the value for display in the given locale.
    ///
    /// ```rust
    /// use shoecart_core::money::{Locale, Money};
    ///
    /// let price = Money::from_cents(123456);
    /// assert_eq!(price.format(Locale::PtBr), "R$ 1.234,56");
    /// assert_eq!(price.format(Locale::En), "$1,234.56");
    /// ```
    pub fn format(&self, locale: Locale) -> String {
        let sign = if self.is_negative() { "-" } else { "" };
        let grouped = group_thousands(self.major().abs(), locale.group_separator());

        format!(
            "{}{}{}{}{:02}",
            sign,
            locale.currency_prefix(),
            grouped,
            locale.decimal_separator(),
            self.minor()
        )
    }
}

fn group_thousands(value: i64, separator: char) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);

    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(separator);
        }
        out.push(ch);
    }

    out
}

// =============================================================================
// Locale
// =============================================================================

/// Display locale for prices and user-facing messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Locale {
    /// Brazilian Portuguese, the storefront's native locale.
    #[default]
    #[serde(rename = "pt-BR")]
    PtBr,

    /// English.
    #[serde(rename = "en")]
    En,
}

impl Locale {
    fn currency_prefix(&self) -> &'static str {
        match self {
            Locale::PtBr => "R$ ",
            Locale::En => "$",
        }
    }

    fn decimal_separator(&self) -> char {
        match self {
            Locale::PtBr => ',',
            Locale::En => '.',
        }
    }

    fn group_separator(&self) -> char {
        match self {
            Locale::PtBr => '.',
            Locale::En => ',',
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Locale::PtBr => write!(f, "pt-BR"),
            Locale::En => write!(f, "en"),
        }
    }
}

impl std::str::FromStr for Locale {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace('_', "-").as_str() {
            "pt-br" | "pt" => Ok(Locale::PtBr),
            "en" | "en-us" => Ok(Locale::En),
            other => Err(format!(
                "Unknown locale: '{}'. Valid options: pt-BR, en",
                other
            )),
        }
    }
}

// =============================================================================
// Trait Implementations
//
// Arithmetic saturates at the i64 bounds.
// =============================================================================

/// Debug-friendly display; use [`Money::format`] for the UI.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(f, "{}{}.{:02}", sign, self.major().abs(), self.minor())
    }
}

impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0.saturating_add(other.0))
    }
}

impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 = self.0.saturating_add(other.0);
    }
}

impl Mul<i64> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: i64) -> Self {
        self.multiply_quantity(qty)
    }
}

impl std::iter::Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), |acc, m| acc + m)
    }
}

impl Serialize for Money {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(self.to_decimal())
    }
}

impl<'de> Deserialize<'de> for Money {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let amount = f64::deserialize(deserializer)?;
        if !amount.is_finite() {
            return Err(serde::de::Error::custom("price must be a finite number"));
        }
        Ok(Money::from_decimal(amount))
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_decimal_rounds_to_cents() {
        assert_eq!(Money::from_decimal(139.9).cents(), 13990);
        assert_eq!(Money::from_decimal(179.9).cents(), 17990);
        assert_eq!(Money::from_decimal(0.005).cents(), 1);
        assert_eq!(Money::from_decimal(12.0).cents(), 1200);
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", Money::from_cents(1099)), "10.99");
        assert_eq!(format!("{}", Money::from_cents(-550)), "-5.50");
        assert_eq!(format!("{}", Money::from_cents(0)), "0.00");
    }

    #[test]
    fn test_format_locales() {
        let price = Money::from_cents(13990);
        assert_eq!(price.format(Locale::PtBr), "R$ 139,90");
        assert_eq!(price.format(Locale::En), "$139.90");

        let big = Money::from_cents(123_456_789);
        assert_eq!(big.format(Locale::PtBr), "R$ 1.234.567,89");
        assert_eq!(big.format(Locale::En), "$1,234,567.89");

        assert_eq!(Money::from_cents(-5).format(Locale::En), "-$0.05");
    }

    #[test]
    fn test_arithmetic() {
        let a = Money::from_cents(1000);
        let b = Money::from_cents(500);

        assert_eq!((a + b).cents(), 1500);
        assert_eq!((a * 3).cents(), 3000);

        let total: Money = vec![a, b, b].into_iter().sum();
        assert_eq!(total.cents(), 2000);
    }

    #[test]
    fn test_arithmetic_saturates() {
        let price = Money::from_cents(17990);
        assert_eq!(price.multiply_quantity(i64::MAX).cents(), i64::MAX);
        assert_eq!((price * 1_000_000_000_000_000).cents(), i64::MAX);
        assert_eq!(Money::from_cents(-1).multiply_quantity(i64::MAX).cents(), -i64::MAX);

        let max = Money::from_cents(i64::MAX);
        assert_eq!((max + price).cents(), i64::MAX);

        let mut acc = max;
        acc += price;
        assert_eq!(acc, max);

        let total: Money = vec![max, max, price].into_iter().sum();
        assert_eq!(total.cents(), i64::MAX);
    }

    #[test]
    fn test_sub_cent_prices_round_on_load() {
        let price: Money = serde_json::from_str("139.994").unwrap();
        assert_eq!(price.cents(), 13999);
        assert_eq!(serde_json::to_string(&price).unwrap(), "139.99");
    }

    #[test]
    fn test_json_number_round_trip() {
        let price: Money = serde_json::from_str("139.9").unwrap();
        assert_eq!(price.cents(), 13990);
        assert_eq!(serde_json::to_string(&price).unwrap(), "139.9");
    }

    #[test]
    fn test_locale_parsing() {
        assert_eq!("pt-BR".parse::<Locale>().unwrap(), Locale::PtBr);
        assert_eq!("pt_br".parse::<Locale>().unwrap(), Locale::PtBr);
        assert_eq!("en".parse::<Locale>().unwrap(), Locale::En);
        assert!("fr".parse::<Locale>().is_err());
    }
}
