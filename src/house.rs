//! A house as a purchasable asset: closing costs, mortgage insurance, property tax

use log::debug;
use serde::{Deserialize, Serialize};

use crate::assumptions::PurchaseCostAssumptions;
use crate::error::{HousingError, Result};

/// Amounts settled when a house is bought
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PurchaseResult {
    /// Loan principal, including any CMHC premium added to the loan
    pub mortgage: f64,
    /// Cash the buyer pays up front
    pub cash: f64,
    pub down_payment: f64,
    pub cmhc_premium: f64,
    pub title_fees: f64,
    pub additional_costs: f64,
}

#[derive(Debug, Clone)]
pub struct House {
    value: f64,
    costs: PurchaseCostAssumptions,
}

impl House {
    /// House with the default Alberta purchase costs
    pub fn new(value: f64) -> Result<Self> {
        Self::with_costs(value, PurchaseCostAssumptions::alberta())
    }

    pub fn with_costs(value: f64, costs: PurchaseCostAssumptions) -> Result<Self> {
        if !(value.is_finite() && value > 0.0) {
            return Err(HousingError::invalid(format!("house value must be positive, got {}", value)));
        }
        Ok(Self { value, costs })
    }

    pub fn value(&self) -> f64 {
        self.value
    }

    pub fn costs(&self) -> &PurchaseCostAssumptions {
        &self.costs
    }

    /// Proceeds of a sale
    pub fn sell(&self) -> f64 {
        self.value
    }

    /// Monthly property tax at `rate` (annual share of value), or the assumed rate
    pub fn monthly_property_tax(&self, rate: Option<f64>) -> f64 {
        self.value * rate.unwrap_or(self.costs.property_tax_rate) / 12.0
    }

    /// CMHC insurance premium charged on the loan amount
    pub fn cmhc_premium(&self, down_payment: f64) -> Result<f64> {
        let rate = self.costs.cmhc.premium_rate(down_payment / self.value)?;
        Ok((self.value - down_payment) * rate)
    }

    /// Land title fees for transferring the property and registering the mortgage
    pub fn title_fees(&self, mortgage_amount: f64) -> f64 {
        self.costs.title_fees.fee(self.value) + self.costs.title_fees.fee(mortgage_amount)
    }

    /// Buy with `down_payment`; `additional_costs` defaults to the assumed closing costs
    pub fn buy(&self, down_payment: f64, additional_costs: Option<f64>) -> Result<PurchaseResult> {
        if !(down_payment.is_finite() && down_payment >= 0.0) {
            return Err(HousingError::invalid(format!("down payment must be non-negative, got {}", down_payment)));
        }
        if down_payment >= self.value {
            return Err(HousingError::invalid(format!(
                "down payment {} must be less than the price {}",
                down_payment, self.value
            )));
        }
        let additional_costs = additional_costs.unwrap_or(self.costs.default_additional_costs);
        if !(additional_costs.is_finite() && additional_costs >= 0.0) {
            return Err(HousingError::invalid(format!(
                "additional purchase costs must be non-negative, got {}",
                additional_costs
            )));
        }

        let cmhc_premium = self.cmhc_premium(down_payment)?;
        let mortgage = self.value - down_payment + cmhc_premium;
        let title_fees = self.title_fees(mortgage);
        let cash = down_payment + title_fees + additional_costs;

        debug!(
            "Bought {:.2} with {:.2} down: mortgage {:.2} (CMHC {:.2}), cash {:.2}",
            self.value, down_payment, mortgage, cmhc_premium, cash
        );

        Ok(PurchaseResult {
            mortgage,
            cash,
            down_payment,
            cmhc_premium,
            title_fees,
            additional_costs,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_title_fees() {
        let house = House::new(100_000.0).unwrap();
        assert_eq!(house.title_fees(80_000.0), 136.0);
    }

    #[test]
    fn test_buy_without_insurance() {
        let house = House::new(100_000.0).unwrap();
        let purchase = house.buy(20_000.0, None).unwrap();

        assert_eq!(purchase.mortgage, 80_000.0);
        assert_eq!(purchase.cmhc_premium, 0.0);
        assert_eq!(purchase.cash, 22_436.0);
    }

    #[test]
    fn test_buy_with_insurance() {
        let house = House::new(100_000.0).unwrap();
        assert_eq!(house.cmhc_premium(15_000.0).unwrap(), 2_380.0);

        let purchase = house.buy(15_000.0, Some(0.0)).unwrap();
        assert_relative_eq!(purchase.mortgage, 87_380.0, epsilon = 1e-9);
        // 70 for the price, 50 + ceil(17.476) for the mortgage
        assert_relative_eq!(purchase.cash, 15_000.0 + 70.0 + 68.0, epsilon = 1e-9);
    }

    #[test]
    fn test_cmhc_premium_by_tier() {
        let house = House::new(400_000.0).unwrap();
        assert_relative_eq!(house.cmhc_premium(40_000.0).unwrap(), 360_000.0 * 0.031, epsilon = 1e-9);
        assert_relative_eq!(house.cmhc_premium(20_000.0).unwrap(), 380_000.0 * 0.04, epsilon = 1e-9);
    }

    #[test]
    fn test_down_payment_below_minimum() {
        let house = House::new(100_000.0).unwrap();
        assert!(matches!(house.buy(4_000.0, None), Err(HousingError::InvalidInput(_))));
    }

    #[test]
    fn test_invalid_purchases() {
        assert!(House::new(0.0).is_err());
        let house = House::new(100_000.0).unwrap();
        assert!(house.buy(-1.0, None).is_err());
        assert!(house.buy(100_000.0, None).is_err());
        assert!(house.buy(20_000.0, Some(-5.0)).is_err());
    }

    #[test]
    fn test_property_tax_and_sale() {
        let house = House::new(120_000.0).unwrap();
        assert_relative_eq!(house.monthly_property_tax(None), 85.0, epsilon = 1e-9);
        assert_relative_eq!(house.monthly_property_tax(Some(0.012)), 120.0, epsilon = 1e-9);
        assert_eq!(house.sell(), 120_000.0);
    }
}
