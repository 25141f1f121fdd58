//! Load rent-versus-own scenarios from CSV

use chrono::NaiveDate;
use csv::Reader;
use std::error::Error;
use std::path::Path;

use crate::mortgage::PaymentFrequency;
use crate::projection::RentOrOwnConfig;
use crate::simulation::{ReturnDistribution, DEFAULT_SIMULATIONS};

/// A named projection configuration
#[derive(Debug, Clone, PartialEq)]
pub struct ScenarioSpec {
    pub name: String,
    pub config: RentOrOwnConfig,
}

/// Raw CSV row; blank optional columns take the config defaults
#[derive(Debug, serde::Deserialize)]
struct CsvRow {
    #[serde(rename = "Name")]
    name: String,
    #[serde(rename = "MonthlyRent")]
    monthly_rent: f64,
    #[serde(rename = "HousePrice")]
    house_price: f64,
    #[serde(rename = "DownPayment")]
    down_payment: f64,
    #[serde(rename = "MortgageYears")]
    mortgage_years: u32,
    #[serde(rename = "MortgageRate")]
    mortgage_rate: f64,
    #[serde(rename = "PaymentFrequency", default)]
    payment_frequency: Option<String>,
    #[serde(rename = "AdditionalMortgagePayment", default)]
    additional_mortgage_payment: Option<f64>,
    #[serde(rename = "AdditionalMonthlyCosts", default)]
    additional_monthly_costs: Option<f64>,
    #[serde(rename = "AnnualInflation", default)]
    annual_inflation: Option<f64>,
    #[serde(rename = "HousingMean", default)]
    housing_mean: Option<f64>,
    #[serde(rename = "HousingStdDev", default)]
    housing_std_dev: Option<f64>,
    #[serde(rename = "InvestmentMean", default)]
    investment_mean: Option<f64>,
    #[serde(rename = "InvestmentStdDev", default)]
    investment_std_dev: Option<f64>,
    #[serde(rename = "NumSimulations", default)]
    num_simulations: Option<usize>,
    #[serde(rename = "StartDate", default)]
    start_date: Option<NaiveDate>,
    #[serde(rename = "Seed", default)]
    seed: Option<u64>,
}

impl CsvRow {
    fn to_scenario(self) -> Result<ScenarioSpec, Box<dyn Error>> {
        let mut config = RentOrOwnConfig::new(
            self.monthly_rent,
            self.house_price,
            self.down_payment,
            self.mortgage_years,
            self.mortgage_rate,
        );

        if let Some(frequency) = self.payment_frequency.as_deref().filter(|f| !f.trim().is_empty()) {
            config.payment_frequency = frequency.parse::<PaymentFrequency>()?;
        }
        config.additional_mortgage_payment = self.additional_mortgage_payment.unwrap_or(0.0);
        config.additional_monthly_costs = self.additional_monthly_costs.unwrap_or(0.0);
        config.annual_inflation = self.annual_inflation.unwrap_or(config.annual_inflation);
        config.housing_returns = normal_returns(&self.name, "Housing", self.housing_mean, self.housing_std_dev)?;
        config.investment_returns =
            normal_returns(&self.name, "Investment", self.investment_mean, self.investment_std_dev)?;
        config.num_simulations = self.num_simulations.unwrap_or(DEFAULT_SIMULATIONS);
        config.start_date = self.start_date;
        config.seed = self.seed;

        Ok(ScenarioSpec {
            name: self.name,
            config,
        })
    }
}

fn normal_returns(
    scenario: &str,
    asset: &str,
    mean: Option<f64>,
    std_dev: Option<f64>,
) -> Result<Option<ReturnDistribution>, Box<dyn Error>> {
    match (mean, std_dev) {
        (Some(mean), Some(std_dev)) => Ok(Some(ReturnDistribution::normal(mean, std_dev))),
        (None, None) => Ok(None),
        _ => Err(format!("Scenario {}: {}Mean and {}StdDev must be given together", scenario, asset, asset).into()),
    }
}

/// Load all scenarios from a CSV file
pub fn load_scenarios<P: AsRef<Path>>(path: P) -> Result<Vec<ScenarioSpec>, Box<dyn Error>> {
    let reader = Reader::from_path(path)?;
    read_scenarios(reader)
}

/// Load scenarios from any reader (e.g., string buffer)
pub fn load_scenarios_from_reader<R: std::io::Read>(reader: R) -> Result<Vec<ScenarioSpec>, Box<dyn Error>> {
    read_scenarios(Reader::from_reader(reader))
}

fn read_scenarios<R: std::io::Read>(mut reader: Reader<R>) -> Result<Vec<ScenarioSpec>, Box<dyn Error>> {
    let mut scenarios = Vec::new();

    for result in reader.deserialize() {
        let row: CsvRow = result?;
        scenarios.push(row.to_scenario()?);
    }

    Ok(scenarios)
}

#[cfg(test)]
mod tests {
    use super::*;

    const CSV: &str = "\
Name,MonthlyRent,HousePrice,DownPayment,MortgageYears,MortgageRate,PaymentFrequency,AdditionalMortgagePayment,AdditionalMonthlyCosts,AnnualInflation,HousingMean,HousingStdDev,InvestmentMean,InvestmentStdDev,NumSimulations,StartDate,Seed
base,1500,400000,80000,25,0.05,,,,,,,,,,,
biweekly,1500,400000,80000,25,0.05,bi_weekly,100,250,0.03,0.003,0.02,0.005,0.04,50,2025-01-01,9
";

    #[test]
    fn test_load_scenarios_from_reader() {
        let scenarios = load_scenarios_from_reader(CSV.as_bytes()).unwrap();
        assert_eq!(scenarios.len(), 2);

        let base = &scenarios[0];
        assert_eq!(base.name, "base");
        assert_eq!(base.config, RentOrOwnConfig::new(1500.0, 400_000.0, 80_000.0, 25, 0.05));

        let custom = &scenarios[1].config;
        assert_eq!(custom.payment_frequency, PaymentFrequency::BiWeekly);
        assert_eq!(custom.additional_mortgage_payment, 100.0);
        assert_eq!(custom.additional_monthly_costs, 250.0);
        assert_eq!(custom.annual_inflation, 0.03);
        assert_eq!(custom.housing_returns, Some(ReturnDistribution::normal(0.003, 0.02)));
        assert_eq!(custom.investment_returns, Some(ReturnDistribution::normal(0.005, 0.04)));
        assert_eq!(custom.num_simulations, 50);
        assert_eq!(custom.start_date, NaiveDate::from_ymd_opt(2025, 1, 1));
        assert_eq!(custom.seed, Some(9));
    }

    #[test]
    fn test_half_specified_returns_rejected() {
        let csv = "\
Name,MonthlyRent,HousePrice,DownPayment,MortgageYears,MortgageRate,HousingMean
bad,1500,400000,80000,25,0.05,0.003
";
        assert!(load_scenarios_from_reader(csv.as_bytes()).is_err());
    }

    #[test]
    fn test_load_sample_file() {
        let scenarios = load_scenarios("data/scenarios/edmonton.csv").unwrap();
        assert!(!scenarios.is_empty());
        assert!(scenarios.iter().all(|s| s.config.validate().is_ok()));
    }
}
