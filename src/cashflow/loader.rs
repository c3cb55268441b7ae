//! Load cash flows from CSV
//!
//! Expected columns: `date,amount` with an optional `account` column.
//! Rows without an account are grouped under [`DEFAULT_ACCOUNT`].

use super::{CashFlow, CashFlowSeries};
use crate::error::LoadError;
use chrono::{DateTime, NaiveDate};
use csv::{ReaderBuilder, Trim};
use std::collections::BTreeMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Account label used when the CSV has no account column (or it is blank)
pub const DEFAULT_ACCOUNT: &str = "default";

/// Cash flows grouped by account, in account-name order
pub type AccountCashFlows = BTreeMap<String, CashFlowSeries>;

/// Raw CSV row
#[derive(Debug, serde::Deserialize)]
struct CsvRow {
    date: String,
    amount: f64,
    #[serde(default)]
    account: Option<String>,
}

/// Parse a date given either as `YYYY-MM-DD` or as an RFC 3339 timestamp
///
/// For timestamps the calendar date in the timestamp's own offset is used.
pub fn parse_date(value: &str) -> Option<NaiveDate> {
    let value = value.trim();
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .or_else(|| DateTime::parse_from_rfc3339(value).ok().map(|dt| dt.date_naive()))
}

/// Load cash flows from a CSV file
pub fn load_cash_flows<P: AsRef<Path>>(path: P) -> Result<AccountCashFlows, LoadError> {
    let file = File::open(path)?;
    load_cash_flows_from_reader(file)
}

/// Load cash flows from any reader (e.g., string buffer, stdin)
pub fn load_cash_flows_from_reader<R: Read>(reader: R) -> Result<AccountCashFlows, LoadError> {
    let mut csv_reader = ReaderBuilder::new().trim(Trim::All).from_reader(reader);
    let headers = csv_reader.headers()?.clone();
    let mut accounts = AccountCashFlows::new();
    let mut rows = 0usize;

    for result in csv_reader.records() {
        let record = result?;
        let line = record.position().map_or(0, |p| p.line());
        let row: CsvRow = record.deserialize(Some(&headers))?;

        let date = parse_date(&row.date).ok_or_else(|| LoadError::InvalidDate {
            line,
            value: row.date.clone(),
        })?;

        if !row.amount.is_finite() {
            return Err(LoadError::InvalidAmount { line, value: row.amount });
        }

        let account = row
            .account
            .filter(|a| !a.is_empty())
            .unwrap_or_else(|| DEFAULT_ACCOUNT.to_string());

        accounts
            .entry(account)
            .or_default()
            .push(CashFlow::new(date, row.amount));
        rows += 1;
    }

    log::debug!("loaded {} cash flows across {} accounts", rows, accounts.len());

    Ok(accounts)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_date_formats() {
        let expected = NaiveDate::from_ymd_opt(2022, 6, 1).unwrap();
        assert_eq!(parse_date("2022-06-01"), Some(expected));
        assert_eq!(parse_date(" 2022-06-01 "), Some(expected));
        assert_eq!(parse_date("2022-06-01T15:30:00Z"), Some(expected));
        assert_eq!(parse_date("2022-06-01T23:30:00-05:00"), Some(expected));
        assert_eq!(parse_date("06/01/2022"), None);
        assert_eq!(parse_date("2022-02-30"), None);
    }

    #[test]
    fn test_load_single_account() {
        let data = "date,amount\n2022-01-01,-1000\n2023-01-01,1200\n";
        let accounts = load_cash_flows_from_reader(data.as_bytes()).unwrap();

        assert_eq!(accounts.len(), 1);
        let series = &accounts[DEFAULT_ACCOUNT];
        assert_eq!(series.len(), 2);
        assert_eq!(series.flows()[0].amount, -1000.0);
    }

    #[test]
    fn test_load_grouped_accounts() {
        let data = "\
date,amount,account
2022-01-01,-1000,brokerage
2022-01-01,-500,ira
2023-01-01,1200,brokerage
2023-01-01,550,ira
2023-06-01,10,
";
        let accounts = load_cash_flows_from_reader(data.as_bytes()).unwrap();

        let names: Vec<&str> = accounts.keys().map(String::as_str).collect();
        assert_eq!(names, vec!["brokerage", DEFAULT_ACCOUNT, "ira"]);
        assert_eq!(accounts["brokerage"].len(), 2);
        assert_eq!(accounts["ira"].total_distributions(), 550.0);
        assert_eq!(accounts[DEFAULT_ACCOUNT].len(), 1);
    }

    #[test]
    fn test_load_rejects_bad_date() {
        let data = "date,amount\n2022-01-01,-1000\nnot-a-date,1200\n";
        let err = load_cash_flows_from_reader(data.as_bytes()).unwrap_err();

        match err {
            LoadError::InvalidDate { line, value } => {
                assert_eq!(line, 3);
                assert_eq!(value, "not-a-date");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_load_rejects_bad_amount() {
        let data = "date,amount\n2022-01-01,abc\n";
        assert!(matches!(
            load_cash_flows_from_reader(data.as_bytes()),
            Err(LoadError::Csv(_))
        ));

        let data = "date,amount\n2022-01-01,inf\n";
        assert!(matches!(
            load_cash_flows_from_reader(data.as_bytes()),
            Err(LoadError::InvalidAmount { line: 2, .. })
        ));
    }

    #[test]
    fn test_load_from_file() {
        let path = std::env::temp_dir().join(format!("cash_flows_{}.csv", std::process::id()));
        std::fs::write(&path, "date,amount\n2022-01-01,-1000\n2023-01-01,900\n").unwrap();

        let accounts = load_cash_flows(&path).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(accounts[DEFAULT_ACCOUNT].len(), 2);
    }

    #[test]
    fn test_load_sample_data() {
        let accounts = load_cash_flows("data/sample_cash_flows.csv").expect("Failed to load sample");
        assert_eq!(accounts.len(), 3);
        assert_eq!(accounts["ira"].len(), 3);
        assert_eq!(accounts["ira"].total_contributions(), 1500.0);
    }

    #[test]
    fn test_load_missing_file() {
        assert!(matches!(
            load_cash_flows("/nonexistent/cash_flows.csv"),
            Err(LoadError::Io(_))
        ));
    }
}
