//! Internal Rate of Return (IRR) for irregularly dated cash flows
//!
//! Each flow is discounted by `(1 + rate)^years`, where `years` is the time
//! since the earliest flow under a fixed 365.25-day year. The root of the
//! resulting NPV function is found with Newton-Raphson from a fixed guess.

use crate::cashflow::CashFlowSeries;
use crate::error::ReturnError;
use serde::{Deserialize, Serialize};
use std::env;

pub const DEFAULT_INITIAL_GUESS: f64 = 0.10;
pub const DEFAULT_MAX_ITERATIONS: u32 = 100;
pub const DEFAULT_TOLERANCE: f64 = 1e-7;
/// Day-count convention: average calendar year including leap days
pub const DEFAULT_DAYS_PER_YEAR: f64 = 365.25;

/// Minimum number of cash flows for an IRR
pub const MIN_CASH_FLOWS: usize = 2;

/// Newton-Raphson settings for IRR
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IrrConfig {
    /// Starting rate for the iteration
    pub initial_guess: f64,

    /// Iteration cap; reaching it without converging is an error
    pub max_iterations: u32,

    /// Absolute tolerance for both the step size and the derivative floor
    pub tolerance: f64,

    /// Days per year when converting date differences to years
    pub days_per_year: f64,
}

impl Default for IrrConfig {
    fn default() -> Self {
        Self {
            initial_guess: DEFAULT_INITIAL_GUESS,
            max_iterations: DEFAULT_MAX_ITERATIONS,
            tolerance: DEFAULT_TOLERANCE,
            days_per_year: DEFAULT_DAYS_PER_YEAR,
        }
    }
}

impl IrrConfig {
    /// Read overrides from `IRR_INITIAL_GUESS`, `IRR_MAX_ITERATIONS`,
    /// `IRR_TOLERANCE` and `IRR_DAYS_PER_YEAR`.
    /// Missing or unparsable values fall back to the defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        Self {
            initial_guess: lookup("IRR_INITIAL_GUESS")
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.initial_guess),
            max_iterations: lookup("IRR_MAX_ITERATIONS")
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.max_iterations),
            tolerance: lookup("IRR_TOLERANCE")
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.tolerance),
            days_per_year: lookup("IRR_DAYS_PER_YEAR")
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.days_per_year),
        }
    }
}

/// Calculate the IRR of a cash-flow series with the default settings
///
/// Input order does not matter; flows are sorted by date first.
///
/// # Returns
/// * Annual IRR as a decimal (e.g., 0.05 for 5%)
pub fn irr(series: &CashFlowSeries) -> Result<f64, ReturnError> {
    irr_with_config(series, &IrrConfig::default())
}

/// Calculate the IRR of a cash-flow series using Newton-Raphson
///
/// # Errors
/// * `InsufficientData` for fewer than two flows
/// * `Convergence` if the step never drops below tolerance within
///   `max_iterations`, the derivative falls below tolerance, or the
///   iterate leaves the real numbers
pub fn irr_with_config(series: &CashFlowSeries, config: &IrrConfig) -> Result<f64, ReturnError> {
    if series.len() < MIN_CASH_FLOWS {
        return Err(ReturnError::InsufficientData {
            required: MIN_CASH_FLOWS,
            actual: series.len(),
        });
    }

    let flows = series.year_fractions(config.days_per_year);
    let tolerance = config.tolerance;
    let mut rate = config.initial_guess;
    let mut iterations = 0;

    while iterations < config.max_iterations {
        iterations += 1;
        let (npv, dnpv) = npv_and_derivative(&flows, rate);

        if dnpv.abs() < tolerance {
            // Derivative too small to divide by
            break;
        }

        let new_rate = rate - npv / dnpv;
        log::trace!("irr iteration {}: rate={} npv={} dnpv={}", iterations, new_rate, npv, dnpv);

        if !new_rate.is_finite() {
            break;
        }

        if (new_rate - rate).abs() < tolerance {
            log::debug!("irr converged to {} after {} iterations", new_rate, iterations);
            return Ok(new_rate);
        }

        rate = new_rate;
    }

    Err(ReturnError::Convergence {
        iterations,
        last_rate: rate,
    })
}

/// Net present value of a series at an annual `rate`, discounted to its earliest date
pub fn net_present_value(series: &CashFlowSeries, rate: f64, days_per_year: f64) -> f64 {
    npv_at_rate(&series.year_fractions(days_per_year), rate)
}

/// Calculate NPV at a given rate over `(amount, years)` pairs
fn npv_at_rate(flows: &[(f64, f64)], rate: f64) -> f64 {
    flows
        .iter()
        .map(|&(amount, years)| amount / (1.0 + rate).powf(years))
        .sum()
}

/// Calculate NPV and its derivative with respect to rate
fn npv_and_derivative(flows: &[(f64, f64)], rate: f64) -> (f64, f64) {
    let mut npv = 0.0;
    let mut dnpv = 0.0;

    for &(amount, years) in flows {
        npv += amount / (1.0 + rate).powf(years);
        // Flows at the start date are not discounted
        if years != 0.0 {
            dnpv -= years * amount / (1.0 + rate).powf(years + 1.0);
        }
    }

    (npv, dnpv)
}
