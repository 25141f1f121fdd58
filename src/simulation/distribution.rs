//! Distributions of one-period asset returns

use rand::Rng;
use rand_distr::{Distribution, Normal, StudentT};
use serde::{Deserialize, Serialize};

use crate::error::{HousingError, Result};
use crate::rates::{annual_to_monthly_return, annual_to_monthly_stdev};

/// Default monthly mean return
pub const DEFAULT_MONTHLY_MEAN: f64 = 0.006;

/// Default monthly standard deviation of returns
pub const DEFAULT_MONTHLY_STD_DEV: f64 = 0.06;

/// Parameters of the distribution one-period returns are drawn from
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "distribution", rename_all = "snake_case")]
pub enum ReturnDistribution {
    /// Normally distributed returns
    Normal { mean: f64, std_dev: f64 },
    /// Fat-tailed returns: mean + scale * t(degrees_of_freedom)
    StudentT {
        mean: f64,
        scale: f64,
        degrees_of_freedom: f64,
    },
    /// The same return every period
    Constant { value: f64 },
}

impl Default for ReturnDistribution {
    fn default() -> Self {
        ReturnDistribution::Normal {
            mean: DEFAULT_MONTHLY_MEAN,
            std_dev: DEFAULT_MONTHLY_STD_DEV,
        }
    }
}

impl ReturnDistribution {
    pub fn normal(mean: f64, std_dev: f64) -> Self {
        ReturnDistribution::Normal { mean, std_dev }
    }

    /// Normal monthly returns from an annual mean and volatility
    pub fn normal_from_annual(annual_mean: f64, annual_std_dev: f64) -> Self {
        ReturnDistribution::Normal {
            mean: annual_to_monthly_return(annual_mean),
            std_dev: annual_to_monthly_stdev(annual_std_dev),
        }
    }

    pub fn constant(value: f64) -> Self {
        ReturnDistribution::Constant { value }
    }

    /// Mean one-period return
    pub fn mean(&self) -> f64 {
        match *self {
            ReturnDistribution::Normal { mean, .. } => mean,
            ReturnDistribution::StudentT { mean, .. } => mean,
            ReturnDistribution::Constant { value } => value,
        }
    }

    /// Validate parameters and build something that can be sampled
    pub fn sampler(&self) -> Result<ReturnSampler> {
        match *self {
            ReturnDistribution::Normal { mean, std_dev } => {
                if !mean.is_finite() {
                    return Err(HousingError::invalid(format!("mean return must be finite, got {}", mean)));
                }
                if !(std_dev.is_finite() && std_dev >= 0.0) {
                    return Err(HousingError::invalid(format!(
                        "standard deviation must be finite and non-negative, got {}",
                        std_dev
                    )));
                }
                Normal::new(mean, std_dev)
                    .map(ReturnSampler::Normal)
                    .map_err(|e| HousingError::invalid(format!("normal returns (std dev {}): {}", std_dev, e)))
            }
            ReturnDistribution::StudentT {
                mean,
                scale,
                degrees_of_freedom,
            } => {
                if !mean.is_finite() || !scale.is_finite() || scale < 0.0 {
                    return Err(HousingError::invalid(format!(
                        "student-t returns need a finite mean and non-negative scale, got {} / {}",
                        mean, scale
                    )));
                }
                StudentT::new(degrees_of_freedom)
                    .map(|t| ReturnSampler::StudentT { mean, scale, t })
                    .map_err(|e| {
                        HousingError::invalid(format!(
                            "student-t returns ({} degrees of freedom): {}",
                            degrees_of_freedom, e
                        ))
                    })
            }
            ReturnDistribution::Constant { value } => {
                if !value.is_finite() {
                    return Err(HousingError::invalid(format!("constant return must be finite, got {}", value)));
                }
                Ok(ReturnSampler::Constant(value))
            }
        }
    }
}

/// Validated distribution ready to draw returns
#[derive(Debug, Clone, Copy)]
pub enum ReturnSampler {
    Normal(Normal<f64>),
    StudentT { mean: f64, scale: f64, t: StudentT<f64> },
    Constant(f64),
}

impl Distribution<f64> for ReturnSampler {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        match self {
            ReturnSampler::Normal(normal) => normal.sample(rng),
            ReturnSampler::StudentT { mean, scale, t } => mean + scale * t.sample(rng),
            ReturnSampler::Constant(value) => *value,
        }
    }
}
