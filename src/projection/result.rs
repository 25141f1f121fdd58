//! Projection output: net worth grids and their statistics

use chrono::NaiveDate;
use log::warn;
use serde::{Deserialize, Serialize};

use crate::house::PurchaseResult;
use crate::mortgage::{AmortizationSchedule, MonthlyAmortizationRow};
use crate::simulation::{mean, percentile, Grid};
use super::cashflows::CashflowSeries;
use super::config::RentOrOwnConfig;

/// Mean and percentiles of one period across simulations
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DistributionStats {
    pub mean: f64,
    pub median: f64,
    pub p05: f64,
    pub p95: f64,
}

impl DistributionStats {
    pub fn from_values(values: &[f64]) -> Self {
        Self {
            mean: mean(values),
            median: percentile(values, 50.0),
            p05: percentile(values, 5.0),
            p95: percentile(values, 95.0),
        }
    }
}

/// Both net worths at one period, per simulation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    /// Period actually used, after clamping to the horizon
    pub period: usize,
    pub month: NaiveDate,
    pub own: Vec<f64>,
    pub rent: Vec<f64>,
    pub own_stats: DistributionStats,
    pub rent_stats: DistributionStats,
    /// Share of simulations in which owning is worth more than renting
    pub own_ahead_share: f64,
}

/// Headline figures of a projection, taken at the final period
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectionSummary {
    pub periods: usize,
    pub simulations: usize,
    pub mortgage: f64,
    pub upfront_cash: f64,
    pub scheduled_payment: f64,
    pub total_interest: f64,
    pub payoff_date: Option<NaiveDate>,
    pub own: DistributionStats,
    pub rent: DistributionStats,
    pub own_ahead_share: f64,
}

/// Per-period percentiles, for tabular output
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PercentileRow {
    #[serde(rename = "Month")]
    pub month: NaiveDate,
    #[serde(rename = "OwnP05")]
    pub own_p05: f64,
    #[serde(rename = "OwnMedian")]
    pub own_median: f64,
    #[serde(rename = "OwnP95")]
    pub own_p95: f64,
    #[serde(rename = "RentP05")]
    pub rent_p05: f64,
    #[serde(rename = "RentMedian")]
    pub rent_median: f64,
    #[serde(rename = "RentP95")]
    pub rent_p95: f64,
}

/// Result of a rent-versus-own projection
#[derive(Debug, Clone)]
pub struct RentOwnProjection {
    pub(crate) config: RentOrOwnConfig,
    pub(crate) purchase: PurchaseResult,
    pub(crate) schedule: AmortizationSchedule,
    pub(crate) monthly_schedule: Vec<MonthlyAmortizationRow>,
    pub(crate) cashflows: CashflowSeries,
    pub(crate) own_net_worth: Grid,
    pub(crate) rent_net_worth: Grid,
    pub(crate) seed: Option<u64>,
}

impl RentOwnProjection {
    pub fn config(&self) -> &RentOrOwnConfig {
        &self.config
    }

    pub fn purchase(&self) -> &PurchaseResult {
        &self.purchase
    }

    /// Mortgage schedule at the payment frequency
    pub fn schedule(&self) -> &AmortizationSchedule {
        &self.schedule
    }

    /// Mortgage schedule aggregated by calendar month
    pub fn monthly_schedule(&self) -> &[MonthlyAmortizationRow] {
        &self.monthly_schedule
    }

    pub fn cashflows(&self) -> &CashflowSeries {
        &self.cashflows
    }

    /// House value less mortgage balance, months x simulations
    pub fn own_net_worth(&self) -> &Grid {
        &self.own_net_worth
    }

    /// Investment value less withdrawals, months x simulations
    pub fn rent_net_worth(&self) -> &Grid {
        &self.rent_net_worth
    }

    pub fn periods(&self) -> usize {
        self.own_net_worth.periods()
    }

    pub fn simulations(&self) -> usize {
        self.own_net_worth.simulations()
    }

    /// Seed of the simulated returns; None when paths were supplied by the caller
    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    /// Both net worths at `period`; a period past the horizon is clamped to the last one
    pub fn snapshot(&self, period: usize) -> Snapshot {
        let last = self.periods().saturating_sub(1);
        let period = if period > last {
            warn!(
                "Period {} is beyond the {}-month horizon, using period {}",
                period,
                self.periods(),
                last
            );
            last
        } else {
            period
        };

        let own = self.own_net_worth.row(period).to_vec();
        let rent = self.rent_net_worth.row(period).to_vec();
        let ahead = own.iter().zip(&rent).filter(|(o, r)| o > r).count();

        Snapshot {
            period,
            month: self.cashflows.months[period],
            own_stats: DistributionStats::from_values(&own),
            rent_stats: DistributionStats::from_values(&rent),
            own_ahead_share: ahead as f64 / own.len() as f64,
            own,
            rent,
        }
    }

    /// Summary at the final period
    pub fn summary(&self) -> ProjectionSummary {
        let last = self.snapshot(self.periods().saturating_sub(1));

        ProjectionSummary {
            periods: self.periods(),
            simulations: self.simulations(),
            mortgage: self.purchase.mortgage,
            upfront_cash: self.purchase.cash,
            scheduled_payment: self.schedule.scheduled_payment,
            total_interest: self.schedule.total_interest(),
            payoff_date: self.schedule.payoff_date(),
            own: last.own_stats,
            rent: last.rent_stats,
            own_ahead_share: last.own_ahead_share,
        }
    }

    /// 5th, 50th and 95th percentiles of both net worths for every month
    pub fn percentile_rows(&self) -> Vec<PercentileRow> {
        let own = [5.0, 50.0, 95.0].map(|q| self.own_net_worth.percentile_by_period(q));
        let rent = [5.0, 50.0, 95.0].map(|q| self.rent_net_worth.percentile_by_period(q));

        self.cashflows
            .months
            .iter()
            .enumerate()
            .map(|(t, &month)| PercentileRow {
                month,
                own_p05: own[0][t],
                own_median: own[1][t],
                own_p95: own[2][t],
                rent_p05: rent[0][t],
                rent_median: rent[1][t],
                rent_p95: rent[2][t],
            })
            .collect()
    }
}
