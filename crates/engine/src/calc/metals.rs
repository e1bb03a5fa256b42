//! Weight conversions for bullion assets.
//!
//! All conversions pass through grams so every unit pair works without a
//! quadratic conversion table.

use serde::{Deserialize, Serialize};

use crate::EngineError;

/// Weight unit a metal asset is denominated in.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MetalUnit {
    Gram,
    Kilogram,
    TroyOunce,
    /// Korean bullion unit, 3.75 g.
    Don,
}

impl MetalUnit {
    pub const ALL: [MetalUnit; 4] = [
        MetalUnit::Gram,
        MetalUnit::Kilogram,
        MetalUnit::TroyOunce,
        MetalUnit::Don,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            MetalUnit::Gram => "gram",
            MetalUnit::Kilogram => "kilogram",
            MetalUnit::TroyOunce => "troy_ounce",
            MetalUnit::Don => "don",
        }
    }

    /// Grams in one of this unit.
    #[must_use]
    pub const fn grams(self) -> f64 {
        match self {
            MetalUnit::Gram => 1.0,
            MetalUnit::Kilogram => 1000.0,
            MetalUnit::TroyOunce => 31.103_476_8,
            MetalUnit::Don => 3.75,
        }
    }
}

impl TryFrom<&str> for MetalUnit {
    type Error = EngineError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim().to_ascii_lowercase().as_str() {
            "gram" | "g" => Ok(MetalUnit::Gram),
            "kilogram" | "kg" => Ok(MetalUnit::Kilogram),
            "troy_ounce" | "oz" => Ok(MetalUnit::TroyOunce),
            "don" => Ok(MetalUnit::Don),
            other => Err(EngineError::InvalidDraft(format!(
                "unknown weight unit: {other}"
            ))),
        }
    }
}

#[must_use]
pub fn to_grams(weight: f64, unit: MetalUnit) -> f64 {
    weight * unit.grams()
}

#[must_use]
pub fn from_grams(grams: f64, unit: MetalUnit) -> f64 {
    grams / unit.grams()
}

/// Converts a weight between units.
#[must_use]
pub fn convert(weight: f64, from: MetalUnit, to: MetalUnit) -> f64 {
    from_grams(to_grams(weight, from), to)
}

/// Converts a per-unit price between units (price per troy ounce to price
/// per don and so on).
#[must_use]
pub fn convert_price(price: f64, from: MetalUnit, to: MetalUnit) -> f64 {
    let per_gram = price / from.grams();
    per_gram * to.grams()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn troy_ounce_to_grams() {
        assert!((convert(1.0, MetalUnit::TroyOunce, MetalUnit::Gram) - 31.103_476_8).abs() < 1e-9);
    }

    #[test]
    fn don_to_grams() {
        assert!((convert(2.0, MetalUnit::Don, MetalUnit::Gram) - 7.5).abs() < 1e-12);
    }

    #[test]
    fn conversion_round_trips() {
        for from in MetalUnit::ALL {
            for to in MetalUnit::ALL {
                let back = convert(convert(3.2, from, to), to, from);
                assert!((back - 3.2).abs() < 1e-9, "{from:?} -> {to:?}");
            }
        }
    }

    #[test]
    fn price_conversion_inverts_weight_conversion() {
        // 100 per gram is 375 per don.
        let per_don = convert_price(100.0, MetalUnit::Gram, MetalUnit::Don);
        assert!((per_don - 375.0).abs() < 1e-9);
    }
}
