//! Purchase cost assumptions: CMHC insurance tiers, land title fees, closing costs

use crate::error::{HousingError, Result};

/// One tier of the CMHC premium table
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CmhcTier {
    /// Lowest down payment ratio (down payment / price) in this tier
    pub min_down_ratio: f64,
    /// Premium as a share of the loan amount
    pub premium_rate: f64,
}

/// CMHC mortgage insurance premium schedule
#[derive(Debug, Clone)]
pub struct CmhcPremiumSchedule {
    /// Tiers sorted by descending minimum down payment ratio
    tiers: Vec<CmhcTier>,
}

impl CmhcPremiumSchedule {
    /// Create from loaded CSV data: (min_down_ratio, premium_rate)
    pub fn from_loaded(tiers: &[(f64, f64)]) -> Self {
        let mut tiers: Vec<CmhcTier> = tiers
            .iter()
            .map(|&(min_down_ratio, premium_rate)| CmhcTier { min_down_ratio, premium_rate })
            .collect();
        tiers.sort_by(|a, b| b.min_down_ratio.total_cmp(&a.min_down_ratio));
        Self { tiers }
    }

    /// Standard premium tiers
    pub fn standard() -> Self {
        Self {
            tiers: vec![
                CmhcTier { min_down_ratio: 0.20, premium_rate: 0.0 },
                CmhcTier { min_down_ratio: 0.15, premium_rate: 0.028 },
                CmhcTier { min_down_ratio: 0.10, premium_rate: 0.031 },
                CmhcTier { min_down_ratio: 0.05, premium_rate: 0.04 },
            ],
        }
    }

    pub fn tiers(&self) -> &[CmhcTier] {
        &self.tiers
    }

    /// Smallest down payment ratio the schedule insures
    pub fn minimum_down_ratio(&self) -> f64 {
        self.tiers.last().map(|t| t.min_down_ratio).unwrap_or(0.0)
    }

    /// Premium rate for a down payment ratio; below the lowest tier is an error
    pub fn premium_rate(&self, down_ratio: f64) -> Result<f64> {
        self.tiers
            .iter()
            .find(|tier| down_ratio >= tier.min_down_ratio)
            .map(|tier| tier.premium_rate)
            .ok_or_else(|| {
                HousingError::invalid(format!(
                    "down payment must be at least {:.0}% of the price, got {:.2}%",
                    self.minimum_down_ratio() * 100.0,
                    down_ratio * 100.0
                ))
            })
    }
}

impl Default for CmhcPremiumSchedule {
    fn default() -> Self {
        Self::standard()
    }
}

/// Land title registration fees: base fee plus one dollar per started increment
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TitleFeeSchedule {
    pub base_fee: f64,
    pub increment: f64,
}

impl TitleFeeSchedule {
    /// Alberta: $50 plus $1 per $5,000 (or part) of value
    pub fn alberta() -> Self {
        Self {
            base_fee: 50.0,
            increment: 5_000.0,
        }
    }

    /// Fee to register one amount; the same formula covers transfer and mortgage
    pub fn fee(&self, amount: f64) -> f64 {
        self.base_fee + (amount / self.increment).ceil()
    }
}

impl Default for TitleFeeSchedule {
    fn default() -> Self {
        Self::alberta()
    }
}

/// All costs of buying and holding a house other than the mortgage itself
#[derive(Debug, Clone)]
pub struct PurchaseCostAssumptions {
    pub cmhc: CmhcPremiumSchedule,
    pub title_fees: TitleFeeSchedule,

    /// Legal fees, title insurance, inspection, appraisal, ...
    pub default_additional_costs: f64,

    /// Annual property tax as a share of value
    pub property_tax_rate: f64,
}

impl PurchaseCostAssumptions {
    /// Edmonton-area defaults
    pub fn alberta() -> Self {
        Self {
            cmhc: CmhcPremiumSchedule::standard(),
            title_fees: TitleFeeSchedule::alberta(),
            default_additional_costs: 2_300.0,
            property_tax_rate: 0.0085,
        }
    }

    /// Create from loaded CSV assumptions, falling back to defaults for missing keys
    pub fn from_loaded(loaded: &super::loader::LoadedAssumptions) -> Self {
        let defaults = Self::alberta();
        let value = |key: &str, default: f64| loaded.purchase_costs.get(key).copied().unwrap_or(default);

        Self {
            cmhc: if loaded.cmhc_tiers.is_empty() {
                defaults.cmhc
            } else {
                CmhcPremiumSchedule::from_loaded(&loaded.cmhc_tiers)
            },
            title_fees: TitleFeeSchedule {
                base_fee: value("title_base_fee", defaults.title_fees.base_fee),
                increment: value("title_fee_increment", defaults.title_fees.increment),
            },
            default_additional_costs: value("additional_costs", defaults.default_additional_costs),
            property_tax_rate: value("property_tax_rate", defaults.property_tax_rate),
        }
    }
}

impl Default for PurchaseCostAssumptions {
    fn default() -> Self {
        Self::alberta()
    }
}
