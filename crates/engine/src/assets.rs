//! The module contains the `Asset` struct and the enums that classify it.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{Currency, EngineError, calc::interest::PayoutPeriod, calc::metals::MetalUnit};

/// What an asset holds and therefore what unit its `balance` is in.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssetKind {
    Cash,
    Deposit,
    Stock,
    Etf,
    Metal,
    RealEstate,
    Other,
}

impl AssetKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            AssetKind::Cash => "cash",
            AssetKind::Deposit => "deposit",
            AssetKind::Stock => "stock",
            AssetKind::Etf => "etf",
            AssetKind::Metal => "metal",
            AssetKind::RealEstate => "real_estate",
            AssetKind::Other => "other",
        }
    }

    /// Balance is a money amount in major units.
    #[must_use]
    pub const fn is_money(self) -> bool {
        matches!(
            self,
            AssetKind::Cash | AssetKind::Deposit | AssetKind::RealEstate | AssetKind::Other
        )
    }

    /// Balance is a share count.
    #[must_use]
    pub const fn is_holding(self) -> bool {
        matches!(self, AssetKind::Stock | AssetKind::Etf)
    }
}

impl TryFrom<&str> for AssetKind {
    type Error = EngineError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim().to_ascii_lowercase().as_str() {
            "cash" => Ok(AssetKind::Cash),
            "deposit" => Ok(AssetKind::Deposit),
            "stock" => Ok(AssetKind::Stock),
            "etf" => Ok(AssetKind::Etf),
            "metal" => Ok(AssetKind::Metal),
            "real_estate" => Ok(AssetKind::RealEstate),
            "other" => Ok(AssetKind::Other),
            other => Err(EngineError::InvalidDraft(format!(
                "unknown asset kind: {other}"
            ))),
        }
    }
}

/// Metal held by a bullion asset. The asset's `balance` is a weight in the
/// asset's [`MetalUnit`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MetalKind {
    Gold,
    Silver,
    Platinum,
}

impl MetalKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            MetalKind::Gold => "gold",
            MetalKind::Silver => "silver",
            MetalKind::Platinum => "platinum",
        }
    }

    /// Display name used when an asset is created without an explicit name.
    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            MetalKind::Gold => "Gold",
            MetalKind::Silver => "Silver",
            MetalKind::Platinum => "Platinum",
        }
    }
}

impl TryFrom<&str> for MetalKind {
    type Error = EngineError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim().to_ascii_lowercase().as_str() {
            "gold" => Ok(MetalKind::Gold),
            "silver" => Ok(MetalKind::Silver),
            "platinum" => Ok(MetalKind::Platinum),
            other => Err(EngineError::InvalidDraft(format!(
                "unknown metal: {other}"
            ))),
        }
    }
}

/// Listing market of a traded holding. Drives the default dividend
/// withholding rate.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Market {
    Us,
    Kr,
    Eu,
}

impl Market {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Market::Us => "us",
            Market::Kr => "kr",
            Market::Eu => "eu",
        }
    }
}

impl TryFrom<&str> for Market {
    type Error = EngineError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim().to_ascii_lowercase().as_str() {
            "us" => Ok(Market::Us),
            "kr" => Ok(Market::Kr),
            "eu" => Ok(Market::Eu),
            other => Err(EngineError::InvalidDraft(format!(
                "unknown market: {other}"
            ))),
        }
    }
}

/// An asset as known to the backend.
///
/// `balance` is polymorphic: a money amount in major units for
/// [`AssetKind::is_money`] kinds, a share count for holdings, a weight in
/// `unit` for metals. The submission paths convert at the boundary.
#[derive(Clone, Debug, PartialEq)]
pub struct Asset {
    /// Stable identifier, generated by the backend on creation.
    pub id: Uuid,
    pub name: String,
    pub kind: AssetKind,
    pub currency: Currency,
    pub balance: f64,
    pub ticker: Option<String>,
    pub metal: Option<MetalKind>,
    pub unit: Option<MetalUnit>,
    pub market: Option<Market>,
    /// Last annual interest rate saved for a deposit, as a fraction.
    pub saved_rate: Option<f64>,
    pub rate_period: Option<PayoutPeriod>,
    /// Lifetime realized profit and loss in minor units.
    pub realized_pl_minor: i64,
}

impl Asset {
    #[must_use]
    pub fn new(name: impl Into<String>, kind: AssetKind, currency: Currency) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            kind,
            currency,
            balance: 0.0,
            ticker: None,
            metal: None,
            unit: None,
            market: None,
            saved_rate: None,
            rate_period: None,
            realized_pl_minor: 0,
        }
    }
}

/// Which party of the flow a pending asset creation belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AssetSide {
    Source,
    Destination,
}

impl AssetSide {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            AssetSide::Source => "source",
            AssetSide::Destination => "destination",
        }
    }
}

/// A creation the user staged from the form. Realized during submission,
/// never before.
#[derive(Clone, Debug, PartialEq)]
pub struct NewAssetRequest {
    pub side: AssetSide,
    pub name: String,
    pub kind: AssetKind,
    pub ticker: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_strings_round_trip() {
        for kind in [
            AssetKind::Cash,
            AssetKind::Deposit,
            AssetKind::Stock,
            AssetKind::Etf,
            AssetKind::Metal,
            AssetKind::RealEstate,
            AssetKind::Other,
        ] {
            assert_eq!(AssetKind::try_from(kind.as_str()).unwrap(), kind);
        }
    }

    #[test]
    fn balance_unit_classes_are_disjoint() {
        assert!(AssetKind::Cash.is_money());
        assert!(AssetKind::RealEstate.is_money());
        assert!(AssetKind::Stock.is_holding());
        assert!(!AssetKind::Stock.is_money());
        assert!(!AssetKind::Metal.is_money());
        assert!(!AssetKind::Metal.is_holding());
    }
}
