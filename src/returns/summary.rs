//! Summary of all return metrics for one cash-flow series

use super::irr::{irr_with_config, IrrConfig};
use super::roi::{annualized_roi, roi};
use crate::cashflow::CashFlowSeries;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Return metrics for a cash-flow series
///
/// Simple and annualized ROI compare total distributions against total
/// contributions over the span from the first to the last flow. Metrics that
/// are undefined for the series (no contributions, zero span, no IRR root)
/// are `None`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReturnSummary {
    pub flow_count: usize,
    pub first_date: Option<NaiveDate>,
    pub last_date: Option<NaiveDate>,
    pub span_years: f64,
    pub total_contributions: f64,
    pub total_distributions: f64,
    pub net_gain: f64,
    pub roi: Option<f64>,
    pub annualized_roi: Option<f64>,
    pub irr: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub irr_error: Option<String>,
}

/// Build a [`ReturnSummary`] for a series
pub fn summarize(series: &CashFlowSeries, config: &IrrConfig) -> ReturnSummary {
    let contributions = series.total_contributions();
    let distributions = series.total_distributions();
    let span_years = series.span_years(config.days_per_year);

    let simple = roi(contributions, distributions).ok();
    let annualized = if span_years > 0.0 {
        annualized_roi(contributions, distributions, span_years).ok()
    } else {
        None
    };

    let (irr, irr_error) = match irr_with_config(series, config) {
        Ok(rate) => (Some(rate), None),
        Err(e) => (None, Some(e.to_string())),
    };

    ReturnSummary {
        flow_count: series.len(),
        first_date: series.first_date(),
        last_date: series.last_date(),
        span_years,
        total_contributions: contributions,
        total_distributions: distributions,
        net_gain: distributions - contributions,
        roi: simple,
        annualized_roi: annualized,
        irr,
        irr_error,
    }
}
