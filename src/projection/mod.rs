//! Rent-versus-own projections

mod config;
mod cashflows;
mod engine;
mod result;

pub use config::RentOrOwnConfig;
pub use cashflows::{CashflowRow, CashflowSeries, cumulative_sum, inflated_series};
pub use engine::RentOrOwnProjector;
pub use result::{DistributionStats, PercentileRow, ProjectionSummary, RentOwnProjection, Snapshot};
