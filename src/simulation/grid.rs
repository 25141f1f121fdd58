//! Dense periods x simulations matrix

use serde::{Deserialize, Serialize};

/// Row-major matrix indexed by (period, simulation)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Grid {
    periods: usize,
    simulations: usize,
    data: Vec<f64>,
}

impl Grid {
    /// Grid filled with a constant
    pub fn filled(periods: usize, simulations: usize, value: f64) -> Self {
        Self {
            periods,
            simulations,
            data: vec![value; periods * simulations],
        }
    }

    /// Build a grid cell by cell
    pub fn from_fn<F>(periods: usize, simulations: usize, mut f: F) -> Self
    where
        F: FnMut(usize, usize) -> f64,
    {
        let mut data = Vec::with_capacity(periods * simulations);
        for p in 0..periods {
            for s in 0..simulations {
                data.push(f(p, s));
            }
        }
        Self { periods, simulations, data }
    }

    /// Build a grid from one vector per simulation, each `periods` long
    pub fn from_columns(periods: usize, columns: &[Vec<f64>]) -> Self {
        let simulations = columns.len();
        Self::from_fn(periods, simulations, |p, s| columns[s][p])
    }

    pub fn periods(&self) -> usize {
        self.periods
    }

    pub fn simulations(&self) -> usize {
        self.simulations
    }

    /// (periods, simulations)
    pub fn shape(&self) -> (usize, usize) {
        (self.periods, self.simulations)
    }

    /// Value at (period, simulation); panics when out of range like slice indexing
    pub fn get(&self, period: usize, simulation: usize) -> f64 {
        assert!(simulation < self.simulations, "simulation index out of range");
        self.data[period * self.simulations + simulation]
    }

    /// All simulations for one period
    pub fn row(&self, period: usize) -> &[f64] {
        let start = period * self.simulations;
        &self.data[start..start + self.simulations]
    }

    /// One simulation path across all periods
    pub fn column(&self, simulation: usize) -> Vec<f64> {
        (0..self.periods).map(|p| self.get(p, simulation)).collect()
    }

    pub fn rows(&self) -> impl Iterator<Item = &[f64]> {
        self.data.chunks(self.simulations.max(1)).take(self.periods)
    }

    pub fn last_row(&self) -> Option<&[f64]> {
        self.periods.checked_sub(1).map(|p| self.row(p))
    }

    /// Raw row-major values
    pub fn as_slice(&self) -> &[f64] {
        &self.data
    }

    /// Apply `f` to every cell
    pub fn map<F>(&self, f: F) -> Grid
    where
        F: Fn(f64) -> f64,
    {
        Grid {
            periods: self.periods,
            simulations: self.simulations,
            data: self.data.iter().map(|&v| f(v)).collect(),
        }
    }

    /// Percentile `q` (0-100) of each period across simulations
    pub fn percentile_by_period(&self, q: f64) -> Vec<f64> {
        self.rows().map(|row| percentile(row, q)).collect()
    }

    /// Mean of each period across simulations
    pub fn mean_by_period(&self) -> Vec<f64> {
        self.rows().map(mean).collect()
    }
}

/// Arithmetic mean; 0 for an empty slice
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Percentile with linear interpolation between closest ranks
pub fn percentile(values: &[f64], q: f64) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));

    let rank = (q.clamp(0.0, 100.0) / 100.0) * (sorted.len() - 1) as f64;
    let lower = rank.floor() as usize;
    let upper = rank.ceil() as usize;
    let weight = rank - lower as f64;
    sorted[lower] + (sorted[upper] - sorted[lower]) * weight
}
