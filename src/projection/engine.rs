//! Rent-versus-own projection engine

use log::{debug, info};
use rayon::prelude::*;

use crate::assumptions::Assumptions;
use crate::error::{HousingError, Result};
use crate::house::{House, PurchaseResult};
use crate::mortgage::{
    default_start_date, AmortizationConfig, AmortizationEngine, AmortizationSchedule, Loan, MonthlyAmortizationRow,
};
use crate::rates::annual_to_monthly_return;
use crate::simulation::{AssetPathSet, AssetSimulator, Grid, ReturnDistribution};
use super::cashflows::CashflowSeries;
use super::config::RentOrOwnConfig;
use super::result::RentOwnProjection;

/// Mixed into the seed so investment paths are independent of housing paths
const INVESTMENT_SEED_SALT: u64 = 0x9E37_79B9_7F4A_7C15;

/// Projects the net worth of owning against renting and investing the difference
#[derive(Debug, Clone)]
pub struct RentOrOwnProjector {
    assumptions: Assumptions,
    config: RentOrOwnConfig,
}

impl RentOrOwnProjector {
    pub fn new(assumptions: Assumptions, config: RentOrOwnConfig) -> Self {
        Self { assumptions, config }
    }

    pub fn config(&self) -> &RentOrOwnConfig {
        &self.config
    }

    pub fn housing_returns(&self) -> ReturnDistribution {
        self.config.housing_returns.unwrap_or(self.assumptions.market.housing)
    }

    pub fn investment_returns(&self) -> ReturnDistribution {
        self.config.investment_returns.unwrap_or(self.assumptions.market.investment)
    }

    /// Run the projection, simulating housing and investment returns
    pub fn project(&self) -> Result<RentOwnProjection> {
        let seed = self.config.seed.unwrap_or_else(rand::random);
        let plan = self.plan()?;
        let periods = plan.cashflows.len();
        let simulations = self.config.num_simulations;

        let housing = AssetSimulator::new(self.housing_returns(), periods, simulations)
            .with_seed(seed)
            .simulate()?;
        let investment = AssetSimulator::new(self.investment_returns(), periods, simulations)
            .with_seed(seed ^ INVESTMENT_SEED_SALT)
            .simulate()?;

        let mut projection = self.assemble(plan, &housing, &investment)?;
        projection.seed = Some(seed);
        Ok(projection)
    }

    /// Run the projection on pre-simulated price paths.
    ///
    /// Both path sets must have one row per month of the mortgage schedule and
    /// the configured number of simulations.
    pub fn project_with_paths(&self, housing: &AssetPathSet, investment: &AssetPathSet) -> Result<RentOwnProjection> {
        let plan = self.plan()?;
        self.assemble(plan, housing, investment)
    }

    /// Everything that does not depend on simulated returns
    fn plan(&self) -> Result<Plan> {
        let config = &self.config;
        config.validate()?;

        let house = House::with_costs(config.house_price, self.assumptions.purchase.clone())?;
        let purchase = house.buy(config.down_payment, config.additional_purchase_costs)?;

        let loan = Loan::new(
            purchase.mortgage,
            config.mortgage_years,
            config.mortgage_rate,
            config.payment_frequency,
        )?;
        let start_date = config.start_date.unwrap_or_else(default_start_date);
        let amortization = AmortizationConfig::starting(start_date)
            .with_additional_payment(config.additional_mortgage_payment);
        let schedule = AmortizationEngine::new(loan, amortization)?.amortize();
        let monthly_schedule = schedule.to_monthly();

        if config.num_simulations == 0 {
            return Err(HousingError::SimulationDegenerate {
                periods: monthly_schedule.len(),
                simulations: 0,
            });
        }

        let monthly_inflation = annual_to_monthly_return(config.annual_inflation);
        let ownership_cost = house.monthly_property_tax(config.property_tax_rate)
            + config.house_price * config.maintenance_rate / 12.0
            + config.additional_monthly_costs;
        let cashflows = CashflowSeries::build(
            &monthly_schedule,
            ownership_cost,
            config.monthly_rent,
            monthly_inflation,
            purchase.cash,
        );

        debug!(
            "Planned {} months: mortgage {:.2}, upfront cash {:.2}, ownership cost {:.2}/month",
            cashflows.len(),
            purchase.mortgage,
            purchase.cash,
            ownership_cost
        );

        Ok(Plan {
            purchase,
            schedule,
            monthly_schedule,
            cashflows,
        })
    }

    fn assemble(&self, plan: Plan, housing: &AssetPathSet, investment: &AssetPathSet) -> Result<RentOwnProjection> {
        let periods = plan.cashflows.len();
        let simulations = self.config.num_simulations;
        check_shape("housing", housing, periods, simulations)?;
        check_shape("investment", investment, periods, simulations)?;

        let price = self.config.house_price;
        let own_net_worth = Grid::from_fn(periods, simulations, |t, s| {
            housing.price(t, s) * price - plan.monthly_schedule[t].ending_balance
        });

        let invest = &plan.cashflows.invest;
        let cumulative_drawdown = plan.cashflows.cumulative_drawdown();
        let columns: Vec<Vec<f64>> = (0..simulations)
            .into_par_iter()
            .map(|s| {
                let mut units = 0.0;
                (0..periods)
                    .map(|t| {
                        let unit_price = investment.price(t, s);
                        units += invest[t] / unit_price;
                        units * unit_price + cumulative_drawdown[t]
                    })
                    .collect()
            })
            .collect();
        let rent_net_worth = Grid::from_columns(periods, &columns);

        info!(
            "Projected {} months x {} simulations for a {:.0} house against {:.0} rent",
            periods, simulations, price, self.config.monthly_rent
        );

        Ok(RentOwnProjection {
            config: self.config.clone(),
            purchase: plan.purchase,
            schedule: plan.schedule,
            monthly_schedule: plan.monthly_schedule,
            cashflows: plan.cashflows,
            own_net_worth,
            rent_net_worth,
            seed: None,
        })
    }
}

struct Plan {
    purchase: PurchaseResult,
    schedule: AmortizationSchedule,
    monthly_schedule: Vec<MonthlyAmortizationRow>,
    cashflows: CashflowSeries,
}

fn check_shape(name: &str, paths: &AssetPathSet, periods: usize, simulations: usize) -> Result<()> {
    if paths.periods() == periods && paths.simulations() == simulations {
        Ok(())
    } else {
        Err(HousingError::invalid(format!(
            "{} paths are {}x{}, expected {}x{}",
            name,
            paths.periods(),
            paths.simulations(),
            periods,
            simulations
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use chrono::NaiveDate;

    fn config() -> RentOrOwnConfig {
        RentOrOwnConfig::new(1_800.0, 400_000.0, 80_000.0, 25, 0.05)
            .with_start_date(NaiveDate::from_ymd_opt(2025, 1, 1).unwrap())
            .with_simulations(20)
            .with_seed(42)
    }

    fn flat_paths(periods: usize, simulations: usize) -> AssetPathSet {
        AssetPathSet::from_grid(Grid::filled(periods, simulations, 1.0)).unwrap()
    }

    #[test]
    fn test_project_shapes() {
        let projection = RentOrOwnProjector::new(Assumptions::default_alberta(), config()).project().unwrap();
        assert_eq!(projection.periods(), 300);
        assert_eq!(projection.simulations(), 20);
        assert_eq!(projection.own_net_worth().shape(), (300, 20));
        assert_eq!(projection.rent_net_worth().shape(), (300, 20));
        assert_eq!(projection.seed(), Some(42));
    }

    #[test]
    fn test_flat_paths_give_closed_form() {
        let projector = RentOrOwnProjector::new(Assumptions::default_alberta(), config());
        let paths = flat_paths(300, 20);
        let projection = projector.project_with_paths(&paths, &paths).unwrap();

        let cumulative_net = projection.cashflows().cumulative_net();
        for t in [0, 1, 150, 299] {
            let own = 400_000.0 - projection.monthly_schedule()[t].ending_balance;
            assert_relative_eq!(projection.own_net_worth().get(t, 3), own, epsilon = 1e-6);
            assert_relative_eq!(projection.rent_net_worth().get(t, 3), cumulative_net[t], epsilon = 1e-6);
        }
        // Fully paid off at the end
        assert_relative_eq!(projection.own_net_worth().get(299, 0), 400_000.0, epsilon = 1e-9);
    }

    #[test]
    fn test_path_shape_mismatch() {
        let projector = RentOrOwnProjector::new(Assumptions::default_alberta(), config());
        let short = flat_paths(299, 20);
        let good = flat_paths(300, 20);
        assert!(matches!(
            projector.project_with_paths(&short, &good),
            Err(HousingError::InvalidInput(_))
        ));
        let narrow = flat_paths(300, 19);
        assert!(projector.project_with_paths(&good, &narrow).is_err());
    }

    #[test]
    fn test_zero_simulations() {
        let projector = RentOrOwnProjector::new(Assumptions::default_alberta(), config().with_simulations(0));
        assert!(matches!(
            projector.project(),
            Err(HousingError::SimulationDegenerate { periods: 300, simulations: 0 })
        ));
    }

    #[test]
    fn test_returns_fall_back_to_assumptions() {
        let assumptions = Assumptions::default_alberta();
        let projector = RentOrOwnProjector::new(assumptions.clone(), config());
        assert_eq!(projector.housing_returns(), assumptions.market.housing);

        let constant = ReturnDistribution::constant(0.0);
        let projector = RentOrOwnProjector::new(assumptions, config().with_returns(constant, constant));
        assert_eq!(projector.investment_returns(), constant);
    }
}
