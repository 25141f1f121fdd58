//! Deterministic growth of an investment account with monthly contributions

use chrono::{Months, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::{HousingError, Result};
use crate::rates::{annual_to_monthly_return, round_cents};

/// One month of an investment schedule
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvestmentRow {
    /// Period number (0-indexed)
    pub period: u32,
    pub date: NaiveDate,
    pub beginning_balance: f64,
    /// Growth (rounded to cents) plus the contribution
    pub increase: f64,
    pub ending_balance: f64,
}

/// Grow `start_balance` at `annual_growth_rate` for `years`, contributing monthly
pub fn invest(
    start_balance: f64,
    annual_growth_rate: f64,
    years: u32,
    monthly_contribution: f64,
    start_date: NaiveDate,
) -> Result<Vec<InvestmentRow>> {
    if !(start_balance.is_finite() && start_balance >= 0.0) {
        return Err(HousingError::invalid(format!("starting balance must be non-negative, got {}", start_balance)));
    }
    if !(annual_growth_rate.is_finite() && annual_growth_rate > -1.0) {
        return Err(HousingError::invalid(format!("growth rate must exceed -100%, got {}", annual_growth_rate)));
    }
    if !monthly_contribution.is_finite() {
        return Err(HousingError::invalid("monthly contribution must be finite"));
    }

    let rate = annual_to_monthly_return(annual_growth_rate);
    let periods = years
        .checked_mul(12)
        .ok_or_else(|| HousingError::invalid(format!("investment horizon of {} years is too long", years)))?;
    let mut rows = Vec::with_capacity(periods as usize);
    let mut balance = start_balance;

    for period in 0..periods {
        let increase = round_cents(rate * balance) + monthly_contribution;
        let date = start_date
            .checked_add_months(Months::new(period))
            .unwrap_or(NaiveDate::MAX);
        rows.push(InvestmentRow {
            period,
            date,
            beginning_balance: balance,
            increase,
            ending_balance: balance + increase,
        });
        balance += increase;
    }

    Ok(rows)
}
