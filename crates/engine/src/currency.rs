use serde::{Deserialize, Serialize};

use crate::EngineError;

/// ISO-like currency code attached to assets and flow amounts.
///
/// ## Minor units
///
/// The engine stores monetary values as an `i64` number of **minor units**
/// (see `Money`). `minor_units()` returns how many fraction digits sit
/// between:
/// - major units (human input/output, e.g. `10.50 USD`)
/// - minor units (stored integers, e.g. `1050`)
///
/// KRW has no fraction digits, so `1050 KRW` is stored as `1050`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    #[default]
    Usd,
    Eur,
    Krw,
}

impl Currency {
    /// Canonical currency code.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Currency::Usd => "USD",
            Currency::Eur => "EUR",
            Currency::Krw => "KRW",
        }
    }

    /// Number of fraction digits used when formatting/parsing amounts.
    #[must_use]
    pub const fn minor_units(self) -> u8 {
        match self {
            Currency::Usd | Currency::Eur => 2,
            Currency::Krw => 0,
        }
    }

    /// Scale factor between one major unit and its minor units.
    #[must_use]
    pub const fn factor(self) -> i64 {
        match self.minor_units() {
            0 => 1,
            1 => 10,
            _ => 100,
        }
    }
}

impl core::fmt::Display for Currency {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.code())
    }
}

impl TryFrom<&str> for Currency {
    type Error = EngineError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim().to_ascii_uppercase().as_str() {
            "USD" => Ok(Currency::Usd),
            "EUR" => Ok(Currency::Eur),
            "KRW" => Ok(Currency::Krw),
            other => Err(EngineError::InvalidDraft(format!(
                "unsupported currency: {other}"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_round_trip() {
        for cur in [Currency::Usd, Currency::Eur, Currency::Krw] {
            assert_eq!(Currency::try_from(cur.code()).unwrap(), cur);
        }
    }

    #[test]
    fn krw_has_no_fraction_digits() {
        assert_eq!(Currency::Krw.minor_units(), 0);
        assert_eq!(Currency::Krw.factor(), 1);
        assert_eq!(Currency::Usd.factor(), 100);
    }

    #[test]
    fn rejects_unknown_code() {
        assert!(Currency::try_from("GBP").is_err());
    }
}
