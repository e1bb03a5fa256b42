//! Compound-interest rate conversions between a payout period and a year.

use serde::{Deserialize, Serialize};

use crate::EngineError;

/// How often a deposit pays interest.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PayoutPeriod {
    Weekly,
    Monthly,
    Quarterly,
    SemiAnnual,
    Annual,
    Biennial,
    Triennial,
    Quinquennial,
}

impl PayoutPeriod {
    pub const ALL: [PayoutPeriod; 8] = [
        PayoutPeriod::Weekly,
        PayoutPeriod::Monthly,
        PayoutPeriod::Quarterly,
        PayoutPeriod::SemiAnnual,
        PayoutPeriod::Annual,
        PayoutPeriod::Biennial,
        PayoutPeriod::Triennial,
        PayoutPeriod::Quinquennial,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            PayoutPeriod::Weekly => "weekly",
            PayoutPeriod::Monthly => "monthly",
            PayoutPeriod::Quarterly => "quarterly",
            PayoutPeriod::SemiAnnual => "semi_annual",
            PayoutPeriod::Annual => "annual",
            PayoutPeriod::Biennial => "biennial",
            PayoutPeriod::Triennial => "triennial",
            PayoutPeriod::Quinquennial => "quinquennial",
        }
    }

    /// Payouts per year. Fractional for periods longer than a year
    /// (biennial pays 0.5 times per year).
    #[must_use]
    pub const fn per_year(self) -> f64 {
        match self {
            PayoutPeriod::Weekly => 52.0,
            PayoutPeriod::Monthly => 12.0,
            PayoutPeriod::Quarterly => 4.0,
            PayoutPeriod::SemiAnnual => 2.0,
            PayoutPeriod::Annual => 1.0,
            PayoutPeriod::Biennial => 0.5,
            PayoutPeriod::Triennial => 1.0 / 3.0,
            PayoutPeriod::Quinquennial => 0.2,
        }
    }
}

impl TryFrom<&str> for PayoutPeriod {
    type Error = EngineError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim().to_ascii_lowercase().as_str() {
            "weekly" => Ok(PayoutPeriod::Weekly),
            "monthly" => Ok(PayoutPeriod::Monthly),
            "quarterly" => Ok(PayoutPeriod::Quarterly),
            "semi_annual" => Ok(PayoutPeriod::SemiAnnual),
            "annual" => Ok(PayoutPeriod::Annual),
            "biennial" => Ok(PayoutPeriod::Biennial),
            "triennial" => Ok(PayoutPeriod::Triennial),
            "quinquennial" => Ok(PayoutPeriod::Quinquennial),
            other => Err(EngineError::InvalidDraft(format!(
                "unknown payout period: {other}"
            ))),
        }
    }
}

/// Interest earned over one period as a fraction of the principal.
/// `None` when the principal is zero or negative.
#[must_use]
pub fn period_rate(amount: f64, principal: f64) -> Option<f64> {
    if principal <= 0.0 {
        return None;
    }
    Some(amount / principal)
}

/// Compounds a per-period rate into an effective annual rate.
#[must_use]
pub fn annualize(period_rate: f64, period: PayoutPeriod) -> f64 {
    (1.0 + period_rate).powf(period.per_year()) - 1.0
}

/// Inverse of [`annualize`]: the per-period rate that compounds to the
/// given annual rate.
#[must_use]
pub fn period_rate_from_annual(annual_rate: f64, period: PayoutPeriod) -> f64 {
    (1.0 + annual_rate).powf(1.0 / period.per_year()) - 1.0
}

/// Effective annual rate for one observed payout. `None` when the
/// principal is zero or negative.
#[must_use]
pub fn annual_rate(amount: f64, principal: f64, period: PayoutPeriod) -> Option<f64> {
    period_rate(amount, principal).map(|rate| annualize(rate, period))
}

/// Projects the interest one period will pay on `principal` at the given
/// annual rate.
#[must_use]
pub fn project_period_amount(annual_rate: f64, principal: f64, period: PayoutPeriod) -> f64 {
    principal * period_rate_from_annual(annual_rate, period)
}
