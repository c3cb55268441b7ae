//! Cash flow data structures

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::ReturnError;
use crate::returns::{annualized_roi, roi};

/// A single dated cash transaction
///
/// Negative amounts are outflows (deposits into the investment),
/// positive amounts are inflows (withdrawals or the final valuation).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CashFlow {
    pub date: NaiveDate,
    pub amount: f64,
}

impl CashFlow {
    pub fn new(date: NaiveDate, amount: f64) -> Self {
        Self { date, amount }
    }

    pub fn is_outflow(&self) -> bool {
        self.amount < 0.0
    }
}

/// Cash flows for one investment, in any input order
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CashFlowSeries {
    flows: Vec<CashFlow>,
}

impl CashFlowSeries {
    pub fn new(flows: Vec<CashFlow>) -> Self {
        Self { flows }
    }

    pub fn push(&mut self, flow: CashFlow) {
        self.flows.push(flow);
    }

    pub fn len(&self) -> usize {
        self.flows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.flows.is_empty()
    }

    pub fn flows(&self) -> &[CashFlow] {
        &self.flows
    }

    /// Copy of the flows sorted ascending by date.
    /// Stable: flows sharing a date keep their input order.
    pub fn sorted(&self) -> Vec<CashFlow> {
        let mut sorted = self.flows.clone();
        sorted.sort_by_key(|cf| cf.date);
        sorted
    }

    pub fn first_date(&self) -> Option<NaiveDate> {
        self.flows.iter().map(|cf| cf.date).min()
    }

    pub fn last_date(&self) -> Option<NaiveDate> {
        self.flows.iter().map(|cf| cf.date).max()
    }

    /// Convert to `(amount, years since earliest date)` pairs in date order
    ///
    /// Elapsed time uses whole calendar days divided by `days_per_year`,
    /// so the earliest flow is always at exactly 0.0 years.
    pub fn year_fractions(&self, days_per_year: f64) -> Vec<(f64, f64)> {
        let sorted = self.sorted();
        let Some(start) = sorted.first().map(|cf| cf.date) else {
            return Vec::new();
        };

        sorted
            .iter()
            .map(|cf| {
                let days = (cf.date - start).num_days() as f64;
                (cf.amount, days / days_per_year)
            })
            .collect()
    }

    /// Years between the earliest and latest flow
    pub fn span_years(&self, days_per_year: f64) -> f64 {
        match (self.first_date(), self.last_date()) {
            (Some(first), Some(last)) => (last - first).num_days() as f64 / days_per_year,
            _ => 0.0,
        }
    }

    /// Sum of deposits, as a positive number
    pub fn total_contributions(&self) -> f64 {
        self.flows
            .iter()
            .filter(|cf| cf.is_outflow())
            .map(|cf| -cf.amount)
            .sum()
    }

    /// Sum of withdrawals and final values
    pub fn total_distributions(&self) -> f64 {
        self.flows
            .iter()
            .filter(|cf| cf.amount > 0.0)
            .map(|cf| cf.amount)
            .sum()
    }
}

impl From<Vec<CashFlow>> for CashFlowSeries {
    fn from(flows: Vec<CashFlow>) -> Self {
        Self::new(flows)
    }
}

impl FromIterator<CashFlow> for CashFlowSeries {
    fn from_iter<I: IntoIterator<Item = CashFlow>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

/// Start and end values of an investment, for simple and annualized ROI
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct InvestmentSnapshot {
    pub initial_investment: f64,
    pub final_value: f64,
    /// Holding period, required only for annualized ROI
    pub years: Option<f64>,
}

impl InvestmentSnapshot {
    pub fn new(initial_investment: f64, final_value: f64) -> Self {
        Self {
            initial_investment,
            final_value,
            years: None,
        }
    }

    pub fn with_years(initial_investment: f64, final_value: f64, years: f64) -> Self {
        Self {
            initial_investment,
            final_value,
            years: Some(years),
        }
    }

    pub fn roi(&self) -> Result<f64, ReturnError> {
        roi(self.initial_investment, self.final_value)
    }

    /// Annualized ROI; a snapshot without a holding period is treated as zero years
    pub fn annualized_roi(&self) -> Result<f64, ReturnError> {
        annualized_roi(
            self.initial_investment,
            self.final_value,
            self.years.unwrap_or(0.0),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_sorted_is_stable() {
        let series = CashFlowSeries::new(vec![
            CashFlow::new(date(2023, 1, 1), 1.0),
            CashFlow::new(date(2022, 1, 1), 2.0),
            CashFlow::new(date(2023, 1, 1), 3.0),
        ]);

        let amounts: Vec<f64> = series.sorted().iter().map(|cf| cf.amount).collect();
        assert_eq!(amounts, vec![2.0, 1.0, 3.0]);
    }

    #[test]
    fn test_year_fractions() {
        let series = CashFlowSeries::new(vec![
            CashFlow::new(date(2023, 1, 1), 1200.0),
            CashFlow::new(date(2022, 1, 1), -1000.0),
        ]);

        let fractions = series.year_fractions(365.25);
        assert_eq!(fractions[0], (-1000.0, 0.0));
        assert_eq!(fractions[1].0, 1200.0);
        assert!((fractions[1].1 - 365.0 / 365.25).abs() < 1e-12);
    }

    #[test]
    fn test_year_fractions_empty() {
        assert!(CashFlowSeries::default().year_fractions(365.25).is_empty());
    }

    #[test]
    fn test_totals() {
        let series: CashFlowSeries = vec![
            CashFlow::new(date(2022, 1, 1), -1000.0),
            CashFlow::new(date(2022, 6, 1), -500.0),
            CashFlow::new(date(2023, 1, 1), 1600.0),
        ]
        .into();

        assert_eq!(series.total_contributions(), 1500.0);
        assert_eq!(series.total_distributions(), 1600.0);
        assert_eq!(series.first_date(), Some(date(2022, 1, 1)));
        assert_eq!(series.last_date(), Some(date(2023, 1, 1)));
        assert!((series.span_years(365.25) - 365.0 / 365.25).abs() < 1e-12);
    }

    #[test]
    fn test_snapshot_delegates() {
        let snapshot = InvestmentSnapshot::with_years(1000.0, 1500.0, 2.0);
        assert_eq!(snapshot.roi().unwrap(), 0.5);
        assert!((snapshot.annualized_roi().unwrap() - 0.22474487139158904).abs() < 1e-9);

        let no_years = InvestmentSnapshot::new(1000.0, 1500.0);
        assert!(matches!(no_years.annualized_roi(), Err(ReturnError::InvalidInput(_))));
    }
}
