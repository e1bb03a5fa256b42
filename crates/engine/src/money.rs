use std::{
    fmt,
    ops::{Add, AddAssign, Neg, Sub, SubAssign},
};

use crate::{Currency, EngineError};

/// Signed money amount represented as **integer minor units**.
///
/// Use this type for all monetary values flowing through the engine (flow
/// amounts, record amounts, withheld tax) to avoid floating-point drift.
/// Asset balances are the one exception: their unit depends on the asset
/// kind (money, shares, metal weight), so they stay `f64` and cross into
/// `Money` only at the submission boundary.
///
/// The value is signed:
/// - positive = income / increase
/// - negative = expense / decrease
///
/// # Examples
///
/// ```rust
/// use engine::{Currency, Money};
///
/// let amount = Money::parse_major("12.34", Currency::Usd).unwrap();
/// assert_eq!(amount.minor(), 1234);
/// assert_eq!(amount.format(Currency::Usd), "12.34 USD");
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(transparent)]
pub struct Money(i64);

impl Money {
    pub const ZERO: Money = Money(0);

    /// Creates a new amount from integer minor units.
    #[must_use]
    pub const fn new(minor: i64) -> Self {
        Self(minor)
    }

    /// Returns the raw value in minor units.
    #[must_use]
    pub const fn minor(self) -> i64 {
        self.0
    }

    /// Returns `true` if the amount is 0.
    #[must_use]
    pub const fn is_zero(self) -> bool {
        self.0 == 0
    }

    /// Returns `true` if the amount is positive.
    #[must_use]
    pub const fn is_positive(self) -> bool {
        self.0 > 0
    }

    /// Returns `true` if the amount is negative.
    #[must_use]
    pub const fn is_negative(self) -> bool {
        self.0 < 0
    }

    /// Absolute value.
    #[must_use]
    pub const fn abs(self) -> Money {
        Money(self.0.abs())
    }

    /// Checked addition (returns `None` on overflow).
    #[must_use]
    pub fn checked_add(self, rhs: Money) -> Option<Money> {
        self.0.checked_add(rhs.0).map(Money)
    }

    /// Checked subtraction (returns `None` on overflow).
    #[must_use]
    pub fn checked_sub(self, rhs: Money) -> Option<Money> {
        self.0.checked_sub(rhs.0).map(Money)
    }

    /// Value in major units as a float. Only for calculation inputs and
    /// display math; persisted values stay in minor units.
    #[must_use]
    pub fn to_major(self, currency: Currency) -> f64 {
        self.0 as f64 / currency.factor() as f64
    }

    /// Converts a major-unit float back into minor units, rounding half
    /// away from zero.
    #[must_use]
    pub fn from_major_f64(value: f64, currency: Currency) -> Money {
        Money((value * currency.factor() as f64).round() as i64)
    }

    /// Formats the amount with its currency code, e.g. `-10.50 USD`.
    #[must_use]
    pub fn format(self, currency: Currency) -> String {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        let digits = currency.minor_units();
        if digits == 0 {
            return format!("{sign}{abs} {currency}");
        }
        let factor = currency.factor().unsigned_abs();
        let major = abs / factor;
        let frac = abs % factor;
        format!("{sign}{major}.{frac:0width$} {currency}", width = digits as usize)
    }

    /// Parses a decimal string in major units into minor units.
    ///
    /// Accepts `.` or `,` as decimal separator and an optional leading
    /// `+`/`-`. Rejects more fraction digits than the currency carries
    /// (`12.345` for USD, any fraction at all for KRW).
    pub fn parse_major(s: &str, currency: Currency) -> Result<Money, EngineError> {
        let empty = || EngineError::InvalidDraft("empty amount".to_string());
        let invalid = || EngineError::InvalidDraft("invalid amount".to_string());
        let overflow = || EngineError::InvalidDraft("amount too large".to_string());

        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(empty());
        }

        let (sign, rest) = if let Some(stripped) = trimmed.strip_prefix('-') {
            (-1i64, stripped)
        } else if let Some(stripped) = trimmed.strip_prefix('+') {
            (1i64, stripped)
        } else {
            (1i64, trimmed)
        };

        let rest = rest.trim();
        if rest.is_empty() {
            return Err(empty());
        }

        let rest = rest.replace(',', ".");
        let mut parts = rest.split('.');
        let major_str = parts.next().ok_or_else(invalid)?;
        let frac_str = parts.next();

        if parts.next().is_some() {
            return Err(invalid());
        }

        if major_str.is_empty() || !major_str.chars().all(|c| c.is_ascii_digit()) {
            return Err(invalid());
        }

        let major: i64 = major_str.parse().map_err(|_| invalid())?;

        let max_digits = currency.minor_units() as usize;
        let frac: i64 = match frac_str {
            None | Some("") => 0,
            Some(frac) => {
                if !frac.chars().all(|c| c.is_ascii_digit()) {
                    return Err(invalid());
                }
                if frac.len() > max_digits {
                    return Err(EngineError::InvalidDraft(format!(
                        "too many decimals for {currency}"
                    )));
                }
                let parsed: i64 = frac.parse().map_err(|_| invalid())?;
                parsed * 10_i64.pow((max_digits - frac.len()) as u32)
            }
        };

        let total = major
            .checked_mul(currency.factor())
            .and_then(|v| v.checked_add(frac))
            .ok_or_else(overflow)?;

        let signed = if sign < 0 {
            total.checked_neg().ok_or_else(overflow)?
        } else {
            total
        };

        Ok(Money(signed))
    }
}

impl From<i64> for Money {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

impl From<Money> for i64 {
    fn from(value: Money) -> Self {
        value.0
    }
}

impl Add for Money {
    type Output = Money;

    fn add(self, rhs: Money) -> Self::Output {
        Money(self.0 + rhs.0)
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, rhs: Money) {
        self.0 += rhs.0;
    }
}

impl Sub for Money {
    type Output = Money;

    fn sub(self, rhs: Money) -> Self::Output {
        Money(self.0 - rhs.0)
    }
}

impl SubAssign for Money {
    fn sub_assign(&mut self, rhs: Money) {
        self.0 -= rhs.0;
    }
}

impl Neg for Money {
    type Output = Money;

    fn neg(self) -> Self::Output {
        Money(-self.0)
    }
}

impl fmt::Display for Money {
    /// Bare minor-unit value. Use [`Money::format`] when a currency is at
    /// hand.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_includes_currency_code() {
        assert_eq!(Money::new(0).format(Currency::Usd), "0.00 USD");
        assert_eq!(Money::new(1).format(Currency::Usd), "0.01 USD");
        assert_eq!(Money::new(1050).format(Currency::Eur), "10.50 EUR");
        assert_eq!(Money::new(-1050).format(Currency::Usd), "-10.50 USD");
        assert_eq!(Money::new(1050).format(Currency::Krw), "1050 KRW");
    }

    #[test]
    fn parse_accepts_dot_or_comma() {
        assert_eq!(Money::parse_major("10", Currency::Usd).unwrap().minor(), 1000);
        assert_eq!(Money::parse_major("10.5", Currency::Usd).unwrap().minor(), 1050);
        assert_eq!(Money::parse_major("10,50", Currency::Eur).unwrap().minor(), 1050);
        assert_eq!(Money::parse_major("-0.01", Currency::Usd).unwrap().minor(), -1);
        assert_eq!(Money::parse_major("+1.00", Currency::Usd).unwrap().minor(), 100);
        assert_eq!(Money::parse_major("  2.30 ", Currency::Usd).unwrap().minor(), 230);
    }

    #[test]
    fn parse_respects_currency_fraction_digits() {
        assert!(Money::parse_major("12.345", Currency::Usd).is_err());
        assert!(Money::parse_major("100.5", Currency::Krw).is_err());
        assert_eq!(Money::parse_major("100", Currency::Krw).unwrap().minor(), 100);
    }

    #[test]
    fn major_round_trip() {
        let amount = Money::from_major_f64(150.0, Currency::Usd);
        assert_eq!(amount.minor(), 15000);
        assert!((amount.to_major(Currency::Usd) - 150.0).abs() < f64::EPSILON);
    }

    #[test]
    fn from_major_rounds_half_away_from_zero() {
        assert_eq!(Money::from_major_f64(0.005, Currency::Usd).minor(), 1);
        assert_eq!(Money::from_major_f64(-0.005, Currency::Usd).minor(), -1);
    }
}
