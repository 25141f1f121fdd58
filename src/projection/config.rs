//! Inputs of a rent-versus-own projection

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{HousingError, Result};
use crate::mortgage::PaymentFrequency;
use crate::simulation::{ReturnDistribution, DEFAULT_SIMULATIONS};

fn default_num_simulations() -> usize {
    DEFAULT_SIMULATIONS
}

fn default_annual_inflation() -> f64 {
    0.02
}

fn default_maintenance_rate() -> f64 {
    0.01
}

/// Configuration for one rent-versus-own comparison
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RentOrOwnConfig {
    /// Rent in the first month
    pub monthly_rent: f64,
    pub house_price: f64,
    pub down_payment: f64,
    /// Amortization period
    pub mortgage_years: u32,
    /// Posted nominal annual mortgage rate (compounded semi-annually)
    pub mortgage_rate: f64,

    /// Monthly house price returns; None uses the market assumptions
    #[serde(default)]
    pub housing_returns: Option<ReturnDistribution>,

    /// Monthly returns of the renter's portfolio; None uses the market assumptions
    #[serde(default)]
    pub investment_returns: Option<ReturnDistribution>,

    #[serde(default = "default_num_simulations")]
    pub num_simulations: usize,

    /// Closing costs beyond title fees; None uses the assumed default
    #[serde(default)]
    pub additional_purchase_costs: Option<f64>,

    /// Condo fees, insurance and other monthly costs of owning, before inflation
    #[serde(default)]
    pub additional_monthly_costs: f64,

    #[serde(default)]
    pub payment_frequency: PaymentFrequency,

    /// Extra principal paid with every mortgage payment
    #[serde(default)]
    pub additional_mortgage_payment: f64,

    #[serde(default = "default_annual_inflation")]
    pub annual_inflation: f64,

    /// Annual property tax rate; None uses the assumed rate
    #[serde(default)]
    pub property_tax_rate: Option<f64>,

    /// Annual maintenance cost as a share of the price
    #[serde(default = "default_maintenance_rate")]
    pub maintenance_rate: f64,

    /// Date of the first mortgage payment; None means the first of next month
    #[serde(default)]
    pub start_date: Option<NaiveDate>,

    /// Seed for the return simulations; None draws a fresh one
    #[serde(default)]
    pub seed: Option<u64>,
}

impl RentOrOwnConfig {
    /// Config with the required inputs and defaults for everything else
    pub fn new(monthly_rent: f64, house_price: f64, down_payment: f64, mortgage_years: u32, mortgage_rate: f64) -> Self {
        Self {
            monthly_rent,
            house_price,
            down_payment,
            mortgage_years,
            mortgage_rate,
            housing_returns: None,
            investment_returns: None,
            num_simulations: DEFAULT_SIMULATIONS,
            additional_purchase_costs: None,
            additional_monthly_costs: 0.0,
            payment_frequency: PaymentFrequency::Monthly,
            additional_mortgage_payment: 0.0,
            annual_inflation: default_annual_inflation(),
            property_tax_rate: None,
            maintenance_rate: default_maintenance_rate(),
            start_date: None,
            seed: None,
        }
    }

    pub fn with_returns(mut self, housing: ReturnDistribution, investment: ReturnDistribution) -> Self {
        self.housing_returns = Some(housing);
        self.investment_returns = Some(investment);
        self
    }

    pub fn with_simulations(mut self, num_simulations: usize) -> Self {
        self.num_simulations = num_simulations;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_start_date(mut self, start_date: NaiveDate) -> Self {
        self.start_date = Some(start_date);
        self
    }

    pub fn with_payment_frequency(mut self, frequency: PaymentFrequency) -> Self {
        self.payment_frequency = frequency;
        self
    }

    /// Check the inputs the purchase and mortgage models do not check themselves
    pub fn validate(&self) -> Result<()> {
        if !(self.monthly_rent.is_finite() && self.monthly_rent >= 0.0) {
            return Err(HousingError::invalid(format!("monthly rent must be non-negative, got {}", self.monthly_rent)));
        }
        if !(self.annual_inflation.is_finite() && self.annual_inflation > -1.0) {
            return Err(HousingError::invalid(format!(
                "annual inflation must exceed -100%, got {}",
                self.annual_inflation
            )));
        }
        non_negative("additional monthly costs", self.additional_monthly_costs)?;
        non_negative("maintenance rate", self.maintenance_rate)?;
        if let Some(rate) = self.property_tax_rate {
            non_negative("property tax rate", rate)?;
        }
        if let Some(costs) = self.additional_purchase_costs {
            non_negative("additional purchase costs", costs)?;
        }
        Ok(())
    }
}

fn non_negative(name: &str, value: f64) -> Result<()> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(HousingError::invalid(format!("{} must be non-negative, got {}", name, value)))
    }
}
