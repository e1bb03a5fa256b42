//! Dividend tax withholding.

use crate::{Market, Money};

/// Withholding applied when no market is known for the paying holding.
pub const DEFAULT_WITHHOLDING_RATE: f64 = 0.30;
/// Korean-market dividend withholding (14% income tax + 1.4% local).
pub const KR_WITHHOLDING_RATE: f64 = 0.154;

/// Default withholding rate for a holding's market.
#[must_use]
pub const fn withholding_rate(market: Option<Market>) -> f64 {
    match market {
        Some(Market::Kr) => KR_WITHHOLDING_RATE,
        _ => DEFAULT_WITHHOLDING_RATE,
    }
}

/// A gross dividend split into withheld tax and the net that lands in the
/// account.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Withholding {
    pub rate: f64,
    pub gross: Money,
    pub withheld: Money,
    pub net: Money,
}

/// Splits a gross dividend at the given rate. The withheld part rounds
/// half away from zero in minor units, so `withheld + net == gross` holds
/// exactly.
#[must_use]
pub fn withhold(gross: Money, rate: f64) -> Withholding {
    let withheld = Money::new((gross.minor() as f64 * rate).round() as i64);
    Withholding {
        rate,
        gross,
        withheld,
        net: gross - withheld,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn us_dividend_withholds_thirty_percent() {
        let split = withhold(Money::new(100_00), withholding_rate(Some(Market::Us)));
        assert_eq!(split.withheld, Money::new(30_00));
        assert_eq!(split.net, Money::new(70_00));
    }

    #[test]
    fn kr_market_overrides_the_default_rate() {
        let split = withhold(Money::new(100_00), withholding_rate(Some(Market::Kr)));
        assert_eq!(split.withheld, Money::new(15_40));
        assert_eq!(split.net, Money::new(84_60));
    }

    #[test]
    fn unknown_market_falls_back_to_default() {
        assert!((withholding_rate(None) - DEFAULT_WITHHOLDING_RATE).abs() < f64::EPSILON);
        assert!(
            (withholding_rate(Some(Market::Eu)) - DEFAULT_WITHHOLDING_RATE).abs() < f64::EPSILON
        );
    }

    #[test]
    fn split_always_sums_to_gross() {
        for minor in [1, 33, 99, 100_00, 12_345_67] {
            let split = withhold(Money::new(minor), 0.154);
            assert_eq!(split.withheld + split.net, split.gross);
        }
    }
}
