//! Properties of asset path simulation and rent-versus-own projections

use approx::assert_relative_eq;
use chrono::NaiveDate;
use rent_or_own::mortgage::PaymentFrequency;
use rent_or_own::simulation::{simulate, ReturnDistribution};
use rent_or_own::{Assumptions, HousingError, RentOrOwnConfig, RentOrOwnProjector};

fn config() -> RentOrOwnConfig {
    RentOrOwnConfig::new(1_900.0, 400_000.0, 80_000.0, 25, 0.05)
        .with_start_date(NaiveDate::from_ymd_opt(2025, 1, 1).unwrap())
        .with_simulations(40)
        .with_seed(2024)
}

fn project(config: RentOrOwnConfig) -> rent_or_own::Result<rent_or_own::RentOwnProjection> {
    RentOrOwnProjector::new(Assumptions::default_alberta(), config).project()
}

#[test]
fn test_paths_start_at_one() {
    let distributions = [
        ReturnDistribution::normal(0.0, 0.0),
        ReturnDistribution::normal(0.5, 3.0),
        ReturnDistribution::StudentT { mean: -0.1, scale: 0.2, degrees_of_freedom: 3.0 },
        ReturnDistribution::constant(0.01),
    ];
    for distribution in distributions {
        let paths = simulate(&distribution, 24, 17, 99).unwrap();
        assert!(paths.grid().row(0).iter().all(|&p| p == 1.0));
    }
}

#[test]
fn test_degenerate_simulation() {
    assert!(matches!(
        simulate(&ReturnDistribution::default(), 0, 10, 1),
        Err(HousingError::SimulationDegenerate { periods: 0, simulations: 10 })
    ));
    assert!(matches!(
        simulate(&ReturnDistribution::default(), 10, 0, 1),
        Err(HousingError::SimulationDegenerate { .. })
    ));
}

#[test]
fn test_grid_shapes_match_schedule() {
    let projection = project(config()).unwrap();
    let periods = projection.schedule().len();

    assert_eq!(periods, 300);
    assert_eq!(projection.own_net_worth().shape(), (periods, 40));
    assert_eq!(projection.rent_net_worth().shape(), (periods, 40));
}

#[test]
fn test_bi_weekly_grids_follow_calendar_months() {
    let projection = project(config().with_payment_frequency(PaymentFrequency::AcceleratedBiWeekly)).unwrap();
    let months = projection.monthly_schedule().len();

    assert!(months < projection.schedule().len());
    assert_eq!(projection.periods(), months);
    assert_eq!(projection.own_net_worth().shape(), (months, 40));
}

#[test]
fn test_same_seed_same_projection() {
    let first = project(config()).unwrap();
    let second = project(config()).unwrap();
    assert_eq!(first.own_net_worth(), second.own_net_worth());
    assert_eq!(first.rent_net_worth(), second.rent_net_worth());

    let other = project(config().with_seed(7)).unwrap();
    assert_ne!(first.own_net_worth(), other.own_net_worth());
}

#[test]
fn test_flat_markets_reduce_to_cash_flows() {
    let flat = ReturnDistribution::constant(0.0);
    let projection = project(config().with_returns(flat, flat)).unwrap();
    let cumulative_net = projection.cashflows().cumulative_net();

    for t in 0..projection.periods() {
        let balance = projection.monthly_schedule()[t].ending_balance;
        for s in [0, 39] {
            assert_relative_eq!(projection.own_net_worth().get(t, s), 400_000.0 - balance, epsilon = 1e-6);
            assert_relative_eq!(projection.rent_net_worth().get(t, s), cumulative_net[t], epsilon = 1e-6);
        }
    }
}

#[test]
fn test_upfront_cash_lands_in_first_month() {
    let flat = ReturnDistribution::constant(0.0);
    let projection = project(config().with_returns(flat, flat)).unwrap();
    let flows = projection.cashflows();

    // 20% down: no insurance, fees on 400k and 320k, default closing costs
    assert_eq!(projection.purchase().mortgage, 320_000.0);
    assert_relative_eq!(projection.purchase().cash, 80_000.0 + 130.0 + 114.0 + 2_300.0, epsilon = 1e-9);
    let first_month = flows.own[0] - flows.mortgage_payments[0] - flows.ownership_costs[0];
    assert_relative_eq!(first_month, projection.purchase().cash, epsilon = 1e-6);
    assert_relative_eq!(flows.own[1], flows.mortgage_payments[1] + flows.ownership_costs[1], epsilon = 1e-9);
    assert_relative_eq!(flows.rent[0], 1_900.0, epsilon = 1e-12);
}

#[test]
fn test_invalid_inputs() {
    let mut bad_price = config();
    bad_price.house_price = 0.0;
    assert!(matches!(project(bad_price), Err(HousingError::InvalidInput(_))));

    let mut small_down = config();
    small_down.down_payment = 10_000.0;
    assert!(matches!(project(small_down), Err(HousingError::InvalidInput(_))));

    let mut too_much_down = config();
    too_much_down.down_payment = 400_000.0;
    assert!(matches!(project(too_much_down), Err(HousingError::InvalidInput(_))));

    let mut negative_rent = config();
    negative_rent.monthly_rent = -1.0;
    assert!(matches!(project(negative_rent), Err(HousingError::InvalidInput(_))));

    assert!(matches!(
        project(config().with_simulations(0)),
        Err(HousingError::SimulationDegenerate { .. })
    ));
}
