//! Loan terms and fixed periodic payment formulas

use std::fmt;
use std::str::FromStr;

use chrono::{Duration, Months, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::{HousingError, Result};
use crate::rates::{periodic_rate_from_nominal, round_cents};

/// How often mortgage payments are made
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentFrequency {
    /// 12 payments per year
    #[default]
    Monthly,
    /// 26 payments per year, annuity recomputed at the bi-weekly rate
    #[serde(alias = "bi-weekly", alias = "biweekly")]
    BiWeekly,
    /// 26 payments per year of half the monthly payment
    #[serde(rename = "acc_bi_weekly", alias = "accelerated_bi_weekly", alias = "acc-bi-weekly")]
    AcceleratedBiWeekly,
}

impl PaymentFrequency {
    /// Number of payments per year
    pub fn periods_per_year(&self) -> u32 {
        match self {
            PaymentFrequency::Monthly => 12,
            PaymentFrequency::BiWeekly | PaymentFrequency::AcceleratedBiWeekly => 26,
        }
    }

    /// Date of the payment `periods_elapsed` periods after `start`
    ///
    /// Months are added from the start date rather than chained, so a schedule
    /// starting on the 31st returns to the 31st whenever the month allows it.
    pub fn date_after(&self, start: NaiveDate, periods_elapsed: u32) -> Option<NaiveDate> {
        match self {
            PaymentFrequency::Monthly => start.checked_add_months(Months::new(periods_elapsed)),
            PaymentFrequency::BiWeekly | PaymentFrequency::AcceleratedBiWeekly => {
                start.checked_add_signed(Duration::weeks(2 * periods_elapsed as i64))
            }
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentFrequency::Monthly => "monthly",
            PaymentFrequency::BiWeekly => "bi_weekly",
            PaymentFrequency::AcceleratedBiWeekly => "acc_bi_weekly",
        }
    }
}

impl fmt::Display for PaymentFrequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PaymentFrequency {
    type Err = HousingError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "monthly" => Ok(PaymentFrequency::Monthly),
            "bi_weekly" | "biweekly" => Ok(PaymentFrequency::BiWeekly),
            "acc_bi_weekly" | "accelerated_bi_weekly" => Ok(PaymentFrequency::AcceleratedBiWeekly),
            other => Err(HousingError::invalid(format!(
                "unsupported payment frequency '{}' (expected monthly, bi_weekly or acc_bi_weekly)",
                other
            ))),
        }
    }
}

/// Terms of a fixed-rate mortgage
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Loan {
    /// Amount borrowed
    pub principal: f64,

    /// Amortization period in years (not the rate term)
    pub years: u32,

    /// Posted nominal annual rate, e.g. 0.06 for 6%
    pub nominal_rate: f64,

    /// Payment frequency
    pub frequency: PaymentFrequency,
}

impl Loan {
    /// Create a loan, validating its terms
    pub fn new(principal: f64, years: u32, nominal_rate: f64, frequency: PaymentFrequency) -> Result<Self> {
        validate_terms(principal, years, nominal_rate)?;
        Ok(Self {
            principal,
            years,
            nominal_rate,
            frequency,
        })
    }

    /// Monthly loan with the given terms
    pub fn monthly(principal: f64, years: u32, nominal_rate: f64) -> Result<Self> {
        Self::new(principal, years, nominal_rate, PaymentFrequency::Monthly)
    }

    /// Same loan paid on a different schedule
    pub fn with_frequency(mut self, frequency: PaymentFrequency) -> Self {
        self.frequency = frequency;
        self
    }

    /// Interest rate charged per payment period
    pub fn periodic_rate(&self) -> f64 {
        periodic_rate_from_nominal(self.nominal_rate, self.frequency.periods_per_year())
    }

    /// Scheduled payment for the loan's frequency
    pub fn scheduled_payment(&self) -> Result<f64> {
        payment(self.principal, self.years, self.nominal_rate, self.frequency)
    }
}

fn validate_terms(principal: f64, years: u32, nominal_rate: f64) -> Result<()> {
    if !principal.is_finite() || principal <= 0.0 {
        return Err(HousingError::invalid(format!("principal must be positive, got {}", principal)));
    }
    if years == 0 {
        return Err(HousingError::invalid("amortization period must be at least one year"));
    }
    if !nominal_rate.is_finite() || nominal_rate < 0.0 {
        return Err(HousingError::invalid(format!(
            "nominal rate must be a non-negative decimal, got {}",
            nominal_rate
        )));
    }
    Ok(())
}

/// Level payment that fully amortizes `principal` over `periods` at `rate` per period
fn annuity_payment(principal: f64, rate: f64, periods: u32) -> f64 {
    let n = periods as f64;
    if rate.abs() < 1e-15 {
        return principal / n;
    }
    // Discount form stays finite for long terms, tending to principal * rate
    principal * rate / (1.0 - (1.0 + rate).powf(-n))
}

fn annuity_for(principal: f64, years: u32, nominal_rate: f64, periods_per_year: u32) -> Result<f64> {
    validate_terms(principal, years, nominal_rate)?;
    let periods = years.checked_mul(periods_per_year).ok_or_else(|| {
        HousingError::invalid(format!("amortization period of {} years is too long", years))
    })?;
    let rate = periodic_rate_from_nominal(nominal_rate, periods_per_year);
    Ok(round_cents(annuity_payment(principal, rate, periods)))
}

/// Monthly payment for a mortgage, rounded to cents
///
/// `nominal_rate` is the posted rate; it is compounded semi-annually.
pub fn monthly_payment(principal: f64, years: u32, nominal_rate: f64) -> Result<f64> {
    annuity_for(principal, years, nominal_rate, 12)
}

/// Bi-weekly payment: the annuity recomputed for 26 periods per year
pub fn bi_weekly_payment(principal: f64, years: u32, nominal_rate: f64) -> Result<f64> {
    annuity_for(principal, years, nominal_rate, 26)
}

/// Accelerated bi-weekly payment: half the monthly payment, paid 26 times a year
pub fn accelerated_bi_weekly_payment(principal: f64, years: u32, nominal_rate: f64) -> Result<f64> {
    Ok(round_cents(monthly_payment(principal, years, nominal_rate)? / 2.0))
}

/// Scheduled payment for any frequency
pub fn payment(principal: f64, years: u32, nominal_rate: f64, frequency: PaymentFrequency) -> Result<f64> {
    match frequency {
        PaymentFrequency::Monthly => monthly_payment(principal, years, nominal_rate),
        PaymentFrequency::BiWeekly => bi_weekly_payment(principal, years, nominal_rate),
        PaymentFrequency::AcceleratedBiWeekly => accelerated_bi_weekly_payment(principal, years, nominal_rate),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_monthly_payment() {
        assert_eq!(monthly_payment(100_000.0, 25, 0.06).unwrap(), 639.81);
        assert_eq!(monthly_payment(250_000.0, 25, 0.03).unwrap(), 1183.11);
    }

    #[test]
    fn test_bi_weekly_payment() {
        assert_eq!(bi_weekly_payment(100_000.0, 25, 0.06).unwrap(), 294.90);
        assert_eq!(bi_weekly_payment(250_000.0, 25, 0.03).unwrap(), 545.69);
    }

    #[test]
    fn test_accelerated_bi_weekly_payment() {
        assert_eq!(accelerated_bi_weekly_payment(100_000.0, 25, 0.06).unwrap(), 319.90);
        assert_eq!(accelerated_bi_weekly_payment(250_000.0, 25, 0.03).unwrap(), 591.55);
    }

    #[test]
    fn test_accelerated_pays_more_per_year() {
        let bi_weekly = bi_weekly_payment(100_000.0, 25, 0.06).unwrap() * 26.0;
        let accelerated = accelerated_bi_weekly_payment(100_000.0, 25, 0.06).unwrap() * 26.0;
        let monthly = monthly_payment(100_000.0, 25, 0.06).unwrap() * 12.0;
        assert!(accelerated > monthly);
        assert!(accelerated > bi_weekly);
    }

    #[test]
    fn test_zero_rate_is_straight_line() {
        assert_eq!(monthly_payment(12_000.0, 1, 0.0).unwrap(), 1000.0);
    }

    #[test]
    fn test_long_term_payment_stays_finite() {
        let payment = monthly_payment(100_000.0, 12_500, 0.06).unwrap();
        assert!(payment.is_finite());
        let interest = round_cents(periodic_rate_from_nominal(0.06, 12) * 100_000.0);
        assert_eq!(payment, interest);
    }

    #[test]
    fn test_period_count_overflow_rejected() {
        assert!(matches!(
            bi_weekly_payment(100_000.0, u32::MAX / 10, 0.06),
            Err(HousingError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_invalid_terms() {
        assert!(matches!(monthly_payment(0.0, 25, 0.05), Err(HousingError::InvalidInput(_))));
        assert!(matches!(monthly_payment(-5.0, 25, 0.05), Err(HousingError::InvalidInput(_))));
        assert!(matches!(bi_weekly_payment(100_000.0, 0, 0.05), Err(HousingError::InvalidInput(_))));
        assert!(matches!(monthly_payment(100_000.0, 25, -0.01), Err(HousingError::InvalidInput(_))));
        assert!(Loan::new(f64::NAN, 25, 0.05, PaymentFrequency::Monthly).is_err());
    }

    #[test]
    fn test_frequency_parsing() {
        assert_eq!("monthly".parse::<PaymentFrequency>().unwrap(), PaymentFrequency::Monthly);
        assert_eq!("bi-weekly".parse::<PaymentFrequency>().unwrap(), PaymentFrequency::BiWeekly);
        assert_eq!(
            "acc_bi_weekly".parse::<PaymentFrequency>().unwrap(),
            PaymentFrequency::AcceleratedBiWeekly
        );
        assert!(matches!(
            "weekly".parse::<PaymentFrequency>(),
            Err(HousingError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_frequency_serde_names() {
        let parsed: PaymentFrequency = serde_json::from_str("\"acc_bi_weekly\"").unwrap();
        assert_eq!(parsed, PaymentFrequency::AcceleratedBiWeekly);
        assert_eq!(serde_json::to_string(&PaymentFrequency::BiWeekly).unwrap(), "\"bi_weekly\"");
    }

    #[test]
    fn test_payment_dates() {
        let start = NaiveDate::from_ymd_opt(2024, 1, 31).unwrap();
        assert_eq!(
            PaymentFrequency::Monthly.date_after(start, 1),
            NaiveDate::from_ymd_opt(2024, 2, 29)
        );
        assert_eq!(
            PaymentFrequency::Monthly.date_after(start, 2),
            NaiveDate::from_ymd_opt(2024, 3, 31)
        );
        assert_eq!(
            PaymentFrequency::BiWeekly.date_after(start, 1),
            NaiveDate::from_ymd_opt(2024, 2, 14)
        );
    }
}
