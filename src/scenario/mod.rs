//! Scenario runner for batch projections
//!
//! Loads assumptions once, then runs many projections with different
//! configurations without re-reading CSV files.

pub mod loader;

pub use loader::{load_scenarios, load_scenarios_from_reader, ScenarioSpec};

use log::info;
use rayon::prelude::*;

use crate::assumptions::Assumptions;
use crate::error::Result;
use crate::projection::{RentOrOwnConfig, RentOrOwnProjector, RentOwnProjection};

/// Pre-loaded scenario runner for batch projections
///
/// # Example
/// ```ignore
/// let runner = ScenarioRunner::from_csv()?;
///
/// for rate in [0.04, 0.05, 0.06] {
///     let config = RentOrOwnConfig { mortgage_rate: rate, ..base.clone() };
///     let result = runner.run(config)?;
/// }
/// ```
#[derive(Debug, Clone)]
pub struct ScenarioRunner {
    base_assumptions: Assumptions,
}

impl ScenarioRunner {
    /// Create runner with default in-memory assumptions
    pub fn new() -> Self {
        Self {
            base_assumptions: Assumptions::default_alberta(),
        }
    }

    /// Create runner by loading assumptions from CSV files
    pub fn from_csv() -> std::result::Result<Self, Box<dyn std::error::Error>> {
        Ok(Self {
            base_assumptions: Assumptions::from_csv()?,
        })
    }

    /// Create runner from specific assumptions directory
    pub fn from_csv_path(path: &std::path::Path) -> std::result::Result<Self, Box<dyn std::error::Error>> {
        Ok(Self {
            base_assumptions: Assumptions::from_csv_path(path)?,
        })
    }

    pub fn with_assumptions(assumptions: Assumptions) -> Self {
        Self {
            base_assumptions: assumptions,
        }
    }

    /// Run a single projection
    pub fn run(&self, config: RentOrOwnConfig) -> Result<RentOwnProjection> {
        RentOrOwnProjector::new(self.base_assumptions.clone(), config).project()
    }

    /// Run many projections in parallel; results keep the order of `configs`
    pub fn run_batch(&self, configs: &[RentOrOwnConfig]) -> Vec<Result<RentOwnProjection>> {
        info!("Running {} scenarios", configs.len());
        configs.par_iter().map(|config| self.run(config.clone())).collect()
    }

    /// Vary the mortgage rate of `base`, keeping every other input and the seed fixed
    pub fn run_sensitivity(&self, base: &RentOrOwnConfig, mortgage_rates: &[f64]) -> Vec<Result<RentOwnProjection>> {
        let seed = base.seed.unwrap_or_else(rand::random);
        let configs: Vec<RentOrOwnConfig> = mortgage_rates
            .iter()
            .map(|&rate| RentOrOwnConfig {
                mortgage_rate: rate,
                seed: Some(seed),
                ..base.clone()
            })
            .collect();
        self.run_batch(&configs)
    }

    /// Get reference to base assumptions for inspection
    pub fn assumptions(&self) -> &Assumptions {
        &self.base_assumptions
    }

    /// Get mutable reference to base assumptions for customization
    pub fn assumptions_mut(&mut self) -> &mut Assumptions {
        &mut self.base_assumptions
    }
}

impl Default for ScenarioRunner {
    fn default() -> Self {
        Self::new()
    }
}
