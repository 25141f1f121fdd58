//! Error types shared by the mortgage, simulation and projection modules

use thiserror::Error;

/// Errors raised by housing calculations
#[derive(Debug, Error, Clone, PartialEq)]
pub enum HousingError {
    /// An input is outside its valid domain (non-positive principal, bad frequency, ...)
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// The scheduled payment never covers the interest, so the balance never reaches zero
    #[error("Loan does not amortize: payment {payment:.2} does not exceed first-period interest {interest:.2}")]
    NonAmortizingLoan {
        /// Scheduled periodic payment
        payment: f64,
        /// Interest charged in the first period
        interest: f64,
    },

    /// A simulation was requested with no periods or no paths
    #[error("Degenerate simulation: {periods} periods x {simulations} simulations")]
    SimulationDegenerate {
        /// Requested number of periods
        periods: usize,
        /// Requested number of simulation paths
        simulations: usize,
    },
}

impl HousingError {
    pub(crate) fn invalid(msg: impl Into<String>) -> Self {
        HousingError::InvalidInput(msg.into())
    }
}

/// Result alias for housing calculations
pub type Result<T> = std::result::Result<T, HousingError>;
