//! Purchase cost and market assumptions

mod purchase;
mod market;
pub mod loader;

pub use purchase::{CmhcPremiumSchedule, CmhcTier, PurchaseCostAssumptions, TitleFeeSchedule};
pub use market::MarketAssumptions;
pub use loader::LoadedAssumptions;

use std::path::Path;

/// Container for all projection assumptions
#[derive(Debug, Clone, Default)]
pub struct Assumptions {
    pub purchase: PurchaseCostAssumptions,
    pub market: MarketAssumptions,
}

impl Assumptions {
    /// In-memory defaults (Alberta purchase costs, default monthly return distributions)
    pub fn default_alberta() -> Self {
        Self {
            purchase: PurchaseCostAssumptions::alberta(),
            market: MarketAssumptions::default(),
        }
    }

    /// Load assumptions from CSV files in the default location (data/assumptions/)
    pub fn from_csv() -> Result<Self, Box<dyn std::error::Error>> {
        Self::from_csv_path(Path::new(loader::DEFAULT_ASSUMPTIONS_PATH))
    }

    /// Load assumptions from CSV files in a specific directory
    pub fn from_csv_path(path: &Path) -> Result<Self, Box<dyn std::error::Error>> {
        let loaded = LoadedAssumptions::load_from(path)?;

        Ok(Self {
            purchase: PurchaseCostAssumptions::from_loaded(&loaded),
            market: MarketAssumptions::from_loaded(&loaded),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::simulation::ReturnDistribution;

    #[test]
    fn test_csv_matches_defaults() {
        let loaded = Assumptions::from_csv().unwrap();
        let defaults = Assumptions::default_alberta();

        assert_eq!(loaded.purchase.cmhc.tiers(), defaults.purchase.cmhc.tiers());
        assert_eq!(loaded.purchase.title_fees, defaults.purchase.title_fees);
        assert_eq!(loaded.purchase.property_tax_rate, 0.0085);
        assert_eq!(loaded.market.housing, ReturnDistribution::normal(0.003, 0.02));
        assert_eq!(loaded.market.investment, ReturnDistribution::normal(0.006, 0.06));
        assert_eq!(loaded.market, defaults.market);
    }
}
