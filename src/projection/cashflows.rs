//! Monthly cash flows of owning versus renting

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::mortgage::MonthlyAmortizationRow;

/// `base` grown by `monthly_inflation` each month, starting at `base` in month 0
pub fn inflated_series(base: f64, monthly_inflation: f64, periods: usize) -> Vec<f64> {
    let growth = 1.0 + monthly_inflation;
    let mut factor = 1.0;
    let mut series = Vec::with_capacity(periods);
    for _ in 0..periods {
        series.push(base * factor);
        factor *= growth;
    }
    series
}

/// Running sum
pub fn cumulative_sum(values: &[f64]) -> Vec<f64> {
    values
        .iter()
        .scan(0.0, |total, v| {
            *total += v;
            Some(*total)
        })
        .collect()
}

/// A single month of cash flows, for tabular output
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CashflowRow {
    #[serde(rename = "Month")]
    pub month: NaiveDate,
    #[serde(rename = "MortgagePayment")]
    pub mortgage_payment: f64,
    #[serde(rename = "OwnershipCost")]
    pub ownership_cost: f64,
    #[serde(rename = "Own")]
    pub own: f64,
    #[serde(rename = "Rent")]
    pub rent: f64,
    #[serde(rename = "Net")]
    pub net: f64,
    #[serde(rename = "Invest")]
    pub invest: f64,
    #[serde(rename = "Drawdown")]
    pub drawdown: f64,
}

/// Per-month cash flow series, all of the same length
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CashflowSeries {
    pub months: Vec<NaiveDate>,
    /// Total mortgage payment made in the month
    pub mortgage_payments: Vec<f64>,
    /// Property tax, maintenance and other costs of owning, inflated
    pub ownership_costs: Vec<f64>,
    /// Everything an owner pays; month 0 includes the cash paid at purchase
    pub own: Vec<f64>,
    /// Inflated rent
    pub rent: Vec<f64>,
    /// own - rent
    pub net: Vec<f64>,
    /// Positive part of net: what a renter can invest
    pub invest: Vec<f64>,
    /// Negative part of net: what a renter withdraws
    pub drawdown: Vec<f64>,
}

impl CashflowSeries {
    /// Cash flows over the months of a mortgage schedule
    pub fn build(
        schedule: &[MonthlyAmortizationRow],
        ownership_cost: f64,
        monthly_rent: f64,
        monthly_inflation: f64,
        upfront_cash: f64,
    ) -> Self {
        let periods = schedule.len();
        let months: Vec<NaiveDate> = schedule.iter().map(|r| r.month).collect();
        let mortgage_payments: Vec<f64> = schedule.iter().map(|r| r.total_payment).collect();
        let ownership_costs = inflated_series(ownership_cost, monthly_inflation, periods);
        let rent = inflated_series(monthly_rent, monthly_inflation, periods);

        let mut own: Vec<f64> = mortgage_payments
            .iter()
            .zip(&ownership_costs)
            .map(|(payment, cost)| payment + cost)
            .collect();
        if let Some(first) = own.first_mut() {
            *first += upfront_cash;
        }

        let net: Vec<f64> = own.iter().zip(&rent).map(|(o, r)| o - r).collect();
        let invest = net.iter().map(|n| n.max(0.0)).collect();
        let drawdown = net.iter().map(|n| n.min(0.0)).collect();

        Self {
            months,
            mortgage_payments,
            ownership_costs,
            own,
            rent,
            net,
            invest,
            drawdown,
        }
    }

    pub fn len(&self) -> usize {
        self.own.len()
    }

    pub fn is_empty(&self) -> bool {
        self.own.is_empty()
    }

    /// Total withdrawn by the renter up to and including each month (non-positive)
    pub fn cumulative_drawdown(&self) -> Vec<f64> {
        cumulative_sum(&self.drawdown)
    }

    pub fn cumulative_net(&self) -> Vec<f64> {
        cumulative_sum(&self.net)
    }

    pub fn total_own(&self) -> f64 {
        self.own.iter().sum()
    }

    pub fn total_rent(&self) -> f64 {
        self.rent.iter().sum()
    }

    pub fn row(&self, period: usize) -> Option<CashflowRow> {
        Some(CashflowRow {
            month: *self.months.get(period)?,
            mortgage_payment: self.mortgage_payments[period],
            ownership_cost: self.ownership_costs[period],
            own: self.own[period],
            rent: self.rent[period],
            net: self.net[period],
            invest: self.invest[period],
            drawdown: self.drawdown[period],
        })
    }

    pub fn rows(&self) -> impl Iterator<Item = CashflowRow> + '_ {
        (0..self.len()).filter_map(move |p| self.row(p))
    }
}
