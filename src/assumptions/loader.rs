//! CSV-based assumption loader
//!
//! Loads purchase cost and market assumptions from CSV files in data/assumptions/

use std::collections::HashMap;
use std::error::Error;
use std::fs::File;
use std::path::Path;

/// Default path to assumptions directory
pub const DEFAULT_ASSUMPTIONS_PATH: &str = "data/assumptions";

/// Load CMHC premium tiers from CSV
/// Returns Vec<(min_down_ratio, premium_rate)>
pub fn load_cmhc_tiers(path: &Path) -> Result<Vec<(f64, f64)>, Box<dyn Error>> {
    let file = File::open(path.join("cmhc_premium_tiers.csv"))?;
    let mut reader = csv::Reader::from_reader(file);

    let mut tiers = Vec::new();

    for result in reader.records() {
        let record = result?;
        let min_down_ratio: f64 = record[0].trim().parse()?;
        let premium_rate: f64 = record[1].trim().parse()?;
        tiers.push((min_down_ratio, premium_rate));
    }

    Ok(tiers)
}

/// Load scalar purchase cost assumptions from CSV
/// Returns HashMap<name, value>
pub fn load_purchase_costs(path: &Path) -> Result<HashMap<String, f64>, Box<dyn Error>> {
    let file = File::open(path.join("purchase_costs.csv"))?;
    let mut reader = csv::Reader::from_reader(file);

    let mut costs = HashMap::new();

    for result in reader.records() {
        let record = result?;
        let name = record[0].trim().to_string();
        let value: f64 = record[1].trim().parse()?;
        costs.insert(name, value);
    }

    Ok(costs)
}

/// Load market return assumptions from CSV
/// Returns HashMap<asset, (monthly_mean, monthly_std_dev)>
pub fn load_market_assumptions(path: &Path) -> Result<HashMap<String, (f64, f64)>, Box<dyn Error>> {
    let file = File::open(path.join("market_assumptions.csv"))?;
    let mut reader = csv::Reader::from_reader(file);

    let mut market = HashMap::new();

    for result in reader.records() {
        let record = result?;
        let asset = record[0].trim().to_lowercase();
        let mean: f64 = record[1].trim().parse()?;
        let std_dev: f64 = record[2].trim().parse()?;
        market.insert(asset, (mean, std_dev));
    }

    Ok(market)
}

/// Load all assumptions from the given directory
pub struct LoadedAssumptions {
    pub cmhc_tiers: Vec<(f64, f64)>,
    pub purchase_costs: HashMap<String, f64>,
    pub market: HashMap<String, (f64, f64)>,
}

impl LoadedAssumptions {
    /// Load all assumptions from the default path
    pub fn load_default() -> Result<Self, Box<dyn Error>> {
        Self::load_from(Path::new(DEFAULT_ASSUMPTIONS_PATH))
    }

    /// Load all assumptions from a specific path
    pub fn load_from(path: &Path) -> Result<Self, Box<dyn Error>> {
        Ok(Self {
            cmhc_tiers: load_cmhc_tiers(path)?,
            purchase_costs: load_purchase_costs(path)?,
            market: load_market_assumptions(path)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_default_assumptions() {
        let result = LoadedAssumptions::load_default();
        assert!(result.is_ok(), "Failed to load assumptions: {:?}", result.err());

        let assumptions = result.unwrap();

        // Check CMHC tiers loaded
        assert_eq!(assumptions.cmhc_tiers.len(), 4);
        assert!(assumptions.cmhc_tiers.contains(&(0.15, 0.028)));

        // Check scalar costs loaded
        assert_eq!(assumptions.purchase_costs.get("additional_costs"), Some(&2300.0));

        // Check market assumptions loaded
        assert!(assumptions.market.contains_key("housing"));
        assert!(assumptions.market.contains_key("investment"));
    }

    #[test]
    fn test_missing_directory_is_error() {
        assert!(LoadedAssumptions::load_from(Path::new("data/does_not_exist")).is_err());
    }
}
