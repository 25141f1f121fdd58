//! Monte-Carlo simulation of asset returns

mod grid;
mod distribution;
mod asset;

pub use grid::{Grid, mean, percentile};
pub use distribution::{ReturnDistribution, ReturnSampler, DEFAULT_MONTHLY_MEAN, DEFAULT_MONTHLY_STD_DEV};
pub use asset::{
    AssetPathSet, AssetSimulator, simulate, simulate_with_rng, DEFAULT_PERIODS, DEFAULT_SIMULATIONS,
};
