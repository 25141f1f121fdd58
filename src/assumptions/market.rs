//! Market return assumptions for housing and investment assets

use crate::simulation::ReturnDistribution;

/// Default monthly mean of house price returns
pub const DEFAULT_HOUSING_MONTHLY_MEAN: f64 = 0.003;

/// Default monthly standard deviation of house price returns
pub const DEFAULT_HOUSING_MONTHLY_STD_DEV: f64 = 0.02;

/// Return distributions used when a projection does not specify its own
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MarketAssumptions {
    /// Monthly house price returns
    pub housing: ReturnDistribution,

    /// Monthly returns of the portfolio a renter invests in
    pub investment: ReturnDistribution,
}

impl MarketAssumptions {
    /// Create from loaded CSV data: asset name -> (monthly mean, monthly std dev)
    pub fn from_loaded(loaded: &super::loader::LoadedAssumptions) -> Self {
        let defaults = Self::default();
        let lookup = |asset: &str, default: ReturnDistribution| {
            loaded
                .market
                .get(asset)
                .map(|&(mean, std_dev)| ReturnDistribution::normal(mean, std_dev))
                .unwrap_or(default)
        };

        Self {
            housing: lookup("housing", defaults.housing),
            investment: lookup("investment", defaults.investment),
        }
    }
}

impl Default for MarketAssumptions {
    fn default() -> Self {
        Self {
            housing: ReturnDistribution::normal(DEFAULT_HOUSING_MONTHLY_MEAN, DEFAULT_HOUSING_MONTHLY_STD_DEV),
            investment: ReturnDistribution::default(),
        }
    }
}
