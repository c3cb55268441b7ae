//! Error types for return calculations and cash-flow loading

use thiserror::Error;

/// Failure of a return calculation.
///
/// Every operation either produces a number or fails with exactly one of these.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ReturnError {
    /// Mathematically undefined input (zero initial investment, zero years)
    #[error("{0}")]
    InvalidInput(String),

    #[error("IRR calculation requires at least {required} cash flows, got {actual}")]
    InsufficientData { required: usize, actual: usize },

    #[error("IRR calculation did not converge after {iterations} iterations (last rate {last_rate})")]
    Convergence { iterations: u32, last_rate: f64 },

    /// Fractional power of a negative growth factor
    #[error("growth factor {base} cannot be raised to the fractional power {exponent}")]
    Domain { base: f64, exponent: f64 },
}

impl ReturnError {
    pub(crate) fn zero_investment() -> Self {
        Self::InvalidInput("Initial investment cannot be zero.".to_string())
    }

    pub(crate) fn zero_years() -> Self {
        Self::InvalidInput("Years cannot be zero for annualized ROI calculation.".to_string())
    }
}

/// Failure while reading cash flows from CSV.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Csv(#[from] csv::Error),

    #[error("line {line}: unrecognized date '{value}' (expected YYYY-MM-DD or RFC 3339)")]
    InvalidDate { line: u64, value: String },

    #[error("line {line}: amount must be a finite number, got {value}")]
    InvalidAmount { line: u64, value: f64 },
}
