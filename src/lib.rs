//! Rent or Own - Canadian mortgage amortization and rent-versus-buy projections
//!
//! This library provides:
//! - Mortgage payments and amortization schedules (monthly, bi-weekly, accelerated bi-weekly)
//! - Purchase costs of a house (CMHC insurance, land title fees, property tax)
//! - Monte-Carlo simulation of housing and investment returns
//! - Net worth projections of owning versus renting and investing the difference
//! - Batch scenario runs

pub mod error;
pub mod rates;
pub mod assumptions;
pub mod house;
pub mod investment;
pub mod mortgage;
pub mod simulation;
pub mod projection;
pub mod scenario;

// Re-export commonly used types
pub use error::{HousingError, Result};
pub use assumptions::Assumptions;
pub use house::{House, PurchaseResult};
pub use investment::{invest, InvestmentRow};
pub use mortgage::{AmortizationEngine, AmortizationSchedule, Loan, PaymentFrequency};
pub use simulation::{AssetPathSet, AssetSimulator, Grid, ReturnDistribution};
pub use projection::{RentOrOwnConfig, RentOrOwnProjector, RentOwnProjection};
pub use scenario::ScenarioRunner;
