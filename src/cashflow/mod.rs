//! Cash flow data structures and CSV loading

mod data;
pub mod loader;

pub use data::{CashFlow, CashFlowSeries, InvestmentSnapshot};
pub use loader::{
    load_cash_flows, load_cash_flows_from_reader, parse_date, AccountCashFlows, DEFAULT_ACCOUNT,
};
