//! Return calculator for single investments and account batches
//!
//! Holds the IRR settings once, then evaluates any number of cash-flow
//! series. No state is kept between calls, so one calculator can be shared
//! across threads.

use crate::cashflow::{AccountCashFlows, CashFlowSeries, InvestmentSnapshot};
use crate::error::ReturnError;
use crate::returns::{self, IrrConfig, ReturnSummary};
use rayon::prelude::*;

/// Computes ROI, annualized ROI and IRR
///
/// # Example
/// ```ignore
/// let calc = ReturnCalculator::from_env();
/// let accounts = load_cash_flows("cash_flows.csv")?;
///
/// for (account, rate) in calc.irr_by_account(&accounts) {
///     println!("{account}: {:?}", rate);
/// }
/// ```
#[derive(Debug, Clone, Default)]
pub struct ReturnCalculator {
    config: IrrConfig,
}

impl ReturnCalculator {
    /// Create calculator with the default IRR settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Create calculator with IRR settings read from the environment
    pub fn from_env() -> Self {
        Self::with_config(IrrConfig::from_env())
    }

    pub fn with_config(config: IrrConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &IrrConfig {
        &self.config
    }

    pub fn roi(&self, initial_investment: f64, final_value: f64) -> Result<f64, ReturnError> {
        returns::roi(initial_investment, final_value)
    }

    pub fn annualized_roi(
        &self,
        initial_investment: f64,
        final_value: f64,
        years: f64,
    ) -> Result<f64, ReturnError> {
        returns::annualized_roi(initial_investment, final_value, years)
    }

    /// Simple ROI of a snapshot, plus annualized ROI when it has a holding period
    pub fn evaluate_snapshot(
        &self,
        snapshot: &InvestmentSnapshot,
    ) -> Result<(f64, Option<f64>), ReturnError> {
        let simple = snapshot.roi()?;
        let annualized = match snapshot.years {
            Some(_) => Some(snapshot.annualized_roi()?),
            None => None,
        };
        Ok((simple, annualized))
    }

    pub fn irr(&self, series: &CashFlowSeries) -> Result<f64, ReturnError> {
        returns::irr_with_config(series, &self.config)
    }

    pub fn summarize(&self, series: &CashFlowSeries) -> ReturnSummary {
        returns::summarize(series, &self.config)
    }

    /// IRR for every account, evaluated in parallel, in account order
    pub fn irr_by_account(
        &self,
        accounts: &AccountCashFlows,
    ) -> Vec<(String, Result<f64, ReturnError>)> {
        let entries: Vec<_> = accounts.iter().collect();
        entries
            .par_iter()
            .map(|(account, series)| (account.to_string(), self.irr(series)))
            .collect()
    }

    /// Summary for every account, evaluated in parallel, in account order
    pub fn summarize_by_account(&self, accounts: &AccountCashFlows) -> Vec<(String, ReturnSummary)> {
        let entries: Vec<_> = accounts.iter().collect();
        entries
            .par_iter()
            .map(|(account, series)| (account.to_string(), self.summarize(series)))
            .collect()
    }
}
