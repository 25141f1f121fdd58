//! Monte-Carlo price paths for an asset class
//!
//! An asset path set is the price of a security with no income, normalised to 1 in
//! the first period. Dividing a cash flow by the price gives units bought; units held
//! times the price in any later period gives the wealth accumulated.

use log::debug;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::Distribution;
use rayon::prelude::*;

use super::distribution::ReturnDistribution;
use super::grid::Grid;
use crate::error::{HousingError, Result};

/// Default number of monthly periods simulated
pub const DEFAULT_PERIODS: usize = 300;

/// Default number of simulated paths
pub const DEFAULT_SIMULATIONS: usize = 100;

/// Cumulative multiplicative returns, periods x simulations; row 0 is all ones
#[derive(Debug, Clone, PartialEq)]
pub struct AssetPathSet {
    prices: Grid,
}

impl AssetPathSet {
    /// Wrap an existing grid of prices, checking that every path starts at 1
    pub fn from_grid(prices: Grid) -> Result<Self> {
        let (periods, simulations) = prices.shape();
        if periods == 0 || simulations == 0 {
            return Err(HousingError::SimulationDegenerate { periods, simulations });
        }
        if prices.row(0).iter().any(|&p| p != 1.0) {
            return Err(HousingError::invalid("asset paths must start at 1.0 in period 0"));
        }
        if prices.as_slice().iter().any(|p| !p.is_finite()) {
            return Err(HousingError::invalid("asset paths must be finite"));
        }
        Ok(Self { prices })
    }

    pub fn periods(&self) -> usize {
        self.prices.periods()
    }

    pub fn simulations(&self) -> usize {
        self.prices.simulations()
    }

    /// Normalised price at (period, simulation)
    pub fn price(&self, period: usize, simulation: usize) -> f64 {
        self.prices.get(period, simulation)
    }

    pub fn grid(&self) -> &Grid {
        &self.prices
    }

    /// Paths scaled to a starting value, e.g. a purchase price
    pub fn scaled(&self, initial_value: f64) -> Grid {
        self.prices.map(|p| p * initial_value)
    }
}

fn check_dimensions(periods: usize, simulations: usize) -> Result<()> {
    if periods == 0 || simulations == 0 {
        return Err(HousingError::SimulationDegenerate { periods, simulations });
    }
    Ok(())
}

/// One path: the first draw is discarded so every path starts at exactly 1
fn cumulative_path<R, D>(rng: &mut R, returns: &D, periods: usize) -> Vec<f64>
where
    R: Rng + ?Sized,
    D: Distribution<f64>,
{
    let mut path = Vec::with_capacity(periods);
    let _discarded: f64 = returns.sample(rng);
    path.push(1.0);

    let mut price = 1.0;
    for _ in 1..periods {
        price *= 1.0 + returns.sample(rng);
        path.push(price);
    }
    path
}

/// Simulate paths drawing from any distribution with a caller-controlled generator
///
/// Paths are drawn one simulation at a time, so the same generator state always
/// yields the same grid.
pub fn simulate_with_rng<R, D>(rng: &mut R, returns: &D, periods: usize, simulations: usize) -> Result<AssetPathSet>
where
    R: Rng + ?Sized,
    D: Distribution<f64>,
{
    check_dimensions(periods, simulations)?;

    let columns: Vec<Vec<f64>> = (0..simulations)
        .map(|_| cumulative_path(&mut *rng, returns, periods))
        .collect();

    Ok(AssetPathSet {
        prices: Grid::from_columns(periods, &columns),
    })
}

/// Seed for one simulation column derived from the run seed.
///
/// The run seed is mixed first so nearby run seeds do not share shifted columns.
fn column_seed(seed: u64, simulation: usize) -> u64 {
    splitmix64(splitmix64(seed).wrapping_add((simulation as u64).wrapping_mul(7_919)))
}

fn splitmix64(x: u64) -> u64 {
    let mut z = x.wrapping_add(0x9E37_79B9_7F4A_7C15);
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}

/// Seeded, parallel path simulator for one asset class
#[derive(Debug, Clone)]
pub struct AssetSimulator {
    pub distribution: ReturnDistribution,
    pub periods: usize,
    pub simulations: usize,
    pub seed: u64,
}

impl AssetSimulator {
    /// Simulator with a fresh random seed
    pub fn new(distribution: ReturnDistribution, periods: usize, simulations: usize) -> Self {
        Self {
            distribution,
            periods,
            simulations,
            seed: rand::random(),
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Draw all paths.
    ///
    /// Each simulation column gets its own generator seeded from `seed`, so columns
    /// are computed in parallel and the result does not depend on the thread count.
    pub fn simulate(&self) -> Result<AssetPathSet> {
        check_dimensions(self.periods, self.simulations)?;
        let sampler = self.distribution.sampler()?;

        let columns: Vec<Vec<f64>> = (0..self.simulations)
            .into_par_iter()
            .map(|s| {
                let mut rng = StdRng::seed_from_u64(column_seed(self.seed, s));
                cumulative_path(&mut rng, &sampler, self.periods)
            })
            .collect();

        debug!(
            "simulated {} paths x {} periods ({:?}, seed {})",
            self.simulations, self.periods, self.distribution, self.seed
        );

        Ok(AssetPathSet {
            prices: Grid::from_columns(self.periods, &columns),
        })
    }
}

impl Default for AssetSimulator {
    fn default() -> Self {
        Self::new(ReturnDistribution::default(), DEFAULT_PERIODS, DEFAULT_SIMULATIONS)
    }
}

/// Simulate seeded paths for a distribution
pub fn simulate(distribution: &ReturnDistribution, periods: usize, simulations: usize, seed: u64) -> Result<AssetPathSet> {
    AssetSimulator::new(*distribution, periods, simulations)
        .with_seed(seed)
        .simulate()
}
