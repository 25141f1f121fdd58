//! Interest rate conversions
//!
//! Canadian mortgage rates are posted as nominal annual rates compounded
//! semi-annually, whatever the payment frequency. Every conversion in the crate
//! (payment formula, amortization loop, inflation) goes through this module.

/// Convert a posted nominal annual rate to an effective annual rate
/// assuming semi-annual compounding: (1 + j/2)^2 - 1
pub fn effective_annual_rate(nominal_rate: f64) -> f64 {
    (1.0 + nominal_rate / 2.0).powf(2.0) - 1.0
}

/// Convert an effective annual rate to the equivalent rate per period
/// for `periods_per_year` compounding periods
pub fn periodic_rate(effective_rate: f64, periods_per_year: u32) -> f64 {
    (1.0 + effective_rate).powf(1.0 / periods_per_year as f64) - 1.0
}

/// Periodic rate implied by a posted nominal rate for the given number of payments per year
pub fn periodic_rate_from_nominal(nominal_rate: f64, periods_per_year: u32) -> f64 {
    periodic_rate(effective_annual_rate(nominal_rate), periods_per_year)
}

/// Convert an annual return (or inflation rate) to a compound monthly rate
pub fn annual_to_monthly_return(annual_return: f64) -> f64 {
    periodic_rate(annual_return, 12)
}

/// Scale an annual standard deviation to a monthly one.
///
/// This is the usual sqrt(12) rule, which assumes independent monthly returns.
/// Treat it as a first approximation only.
pub fn annual_to_monthly_stdev(annual_stdev: f64) -> f64 {
    annual_stdev / 12.0_f64.sqrt()
}

/// Round a dollar amount to cents, half away from zero
pub fn round_cents(amount: f64) -> f64 {
    (amount * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_effective_rate() {
        // 6% posted -> 6.09% effective
        assert_abs_diff_eq!(effective_annual_rate(0.06), 0.0609, epsilon = 1e-12);
        assert_eq!(effective_annual_rate(0.0), 0.0);
    }

    #[test]
    fn test_periodic_rate_compounds_back() {
        let effective = effective_annual_rate(0.05);
        let monthly = periodic_rate(effective, 12);
        assert_abs_diff_eq!((1.0 + monthly).powi(12) - 1.0, effective, epsilon = 1e-12);

        let bi_weekly = periodic_rate_from_nominal(0.05, 26);
        assert_abs_diff_eq!((1.0 + bi_weekly).powi(26) - 1.0, effective, epsilon = 1e-12);
    }

    #[test]
    fn test_annual_to_monthly() {
        let monthly = annual_to_monthly_return(0.02);
        assert_abs_diff_eq!(monthly, 0.001651581, epsilon = 1e-9);
        assert_abs_diff_eq!(annual_to_monthly_stdev(0.12), 0.0346410, epsilon = 1e-6);
    }

    #[test]
    fn test_round_cents() {
        assert_eq!(round_cents(639.8149), 639.81);
        assert_eq!(round_cents(0.125), 0.13);
        assert_eq!(round_cents(-1.005), -1.0);
    }
}
