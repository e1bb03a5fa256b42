//! Average cost and realized profit for share holdings.

/// One past acquisition of a holding, in major units.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Lot {
    pub units: f64,
    /// Total cost of the lot, not per unit.
    pub cost: f64,
}

/// Weighted average cost per unit across the given lots.
///
/// `None` when the lots carry no positive unit total, which keeps a
/// division by zero (or a negative basis) out of downstream P/L math.
#[must_use]
pub fn weighted_average_cost(lots: &[Lot]) -> Option<f64> {
    let units: f64 = lots.iter().map(|lot| lot.units).sum();
    if units <= 0.0 {
        return None;
    }
    let cost: f64 = lots.iter().map(|lot| lot.cost).sum();
    Some(cost / units)
}

/// Realized profit or loss of a sale, in major units.
#[must_use]
pub fn realized_pl(sale_price_per_unit: f64, avg_cost_per_unit: f64, units: f64) -> f64 {
    (sale_price_per_unit - avg_cost_per_unit) * units
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn average_cost_weights_by_units() {
        let lots = [
            Lot { units: 10.0, cost: 1000.0 },
            Lot { units: 10.0, cost: 1400.0 },
        ];
        let avg = weighted_average_cost(&lots).unwrap();
        assert!((avg - 120.0).abs() < 1e-12);
    }

    #[test]
    fn no_units_no_average() {
        assert_eq!(weighted_average_cost(&[]), None);
        assert_eq!(
            weighted_average_cost(&[Lot { units: 0.0, cost: 500.0 }]),
            None
        );
    }

    #[test]
    fn realized_pl_scales_with_units() {
        assert!((realized_pl(120.0, 100.0, 20.0) - 400.0).abs() < 1e-12);
        assert!((realized_pl(90.0, 100.0, 5.0) + 50.0).abs() < 1e-12);
    }
}
