//! Amortized loan payment.

/// Fixed monthly payment that amortizes `principal` over `months` at the
/// given annual rate (compounded monthly).
///
/// `None` when `months` is zero. A zero or negative rate degrades to a
/// straight division of the principal.
#[must_use]
pub fn amortized_payment(principal: f64, annual_rate: f64, months: u32) -> Option<f64> {
    if months == 0 {
        return None;
    }
    let n = months as f64;
    if annual_rate <= 0.0 {
        return Some(principal / n);
    }
    let rate = annual_rate / 12.0;
    let compounded = (1.0 + rate).powf(n);
    Some(principal * rate * compounded / (compounded - 1.0))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn thirty_year_mortgage_payment() {
        let payment = amortized_payment(300_000.0, 0.06, 360).unwrap();
        assert!((payment - 1798.65).abs() < 0.01);
    }

    #[test]
    fn zero_rate_divides_evenly() {
        let payment = amortized_payment(12_000.0, 0.0, 12).unwrap();
        assert!((payment - 1000.0).abs() < f64::EPSILON);
    }

    #[test]
    fn zero_term_has_no_payment() {
        assert_eq!(amortized_payment(12_000.0, 0.05, 0), None);
    }

    #[test]
    fn payments_cover_principal_plus_interest() {
        let payment = amortized_payment(10_000.0, 0.12, 12).unwrap();
        assert!(payment * 12.0 > 10_000.0);
        assert!(payment * 12.0 < 10_700.0);
    }
}
