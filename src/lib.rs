//! Return Calculator - investment performance metrics from dated cash flows
//!
//! This library provides:
//! - Simple return on investment (ROI)
//! - Time-annualized ROI
//! - Internal Rate of Return (IRR) for irregularly dated cash flows
//! - CSV loading of cash flows grouped by account
//! - Parallel evaluation across many accounts

pub mod error;
pub mod cashflow;
pub mod returns;
pub mod calculator;

// Re-export commonly used types
pub use error::{ReturnError, LoadError};
pub use cashflow::{CashFlow, CashFlowSeries, InvestmentSnapshot, AccountCashFlows};
pub use returns::{roi, annualized_roi, irr, irr_with_config, IrrConfig, ReturnSummary};
pub use calculator::ReturnCalculator;
