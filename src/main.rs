//! Return Calculator CLI
//!
//! Command-line interface for ROI, annualized ROI and IRR.
//! IRR settings come from IRR_INITIAL_GUESS, IRR_MAX_ITERATIONS,
//! IRR_TOLERANCE and IRR_DAYS_PER_YEAR, overridden by the matching flags.
//!
//! ```bash
//! return-calc roi --initial 1000 --final 1500
//! return-calc annualized --initial 1000 --final 1500 --years 2
//! return-calc irr cash_flows.csv --json
//! RUST_LOG=debug return-calc summary cash_flows.csv
//! ```

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use return_calculator::cashflow::load_cash_flows;
use return_calculator::{AccountCashFlows, IrrConfig, ReturnCalculator, ReturnSummary};
use serde::Serialize;
use std::path::{Path, PathBuf};

#[derive(Debug, Parser)]
#[command(name = "return-calc", version, about = "Investment return metrics from cash flows")]
struct Cli {
    /// Print results as JSON
    #[arg(long, global = true, default_value_t = false)]
    json: bool,

    /// Starting rate for the IRR iteration
    #[arg(long, global = true, allow_negative_numbers = true)]
    guess: Option<f64>,

    /// IRR iteration cap
    #[arg(long, global = true)]
    max_iterations: Option<u32>,

    /// IRR convergence tolerance
    #[arg(long, global = true)]
    tolerance: Option<f64>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Simple return on investment
    Roi {
        #[arg(long, allow_negative_numbers = true)]
        initial: f64,
        #[arg(long = "final", allow_negative_numbers = true)]
        final_value: f64,
    },
    /// Return on investment annualized over a holding period
    Annualized {
        #[arg(long, allow_negative_numbers = true)]
        initial: f64,
        #[arg(long = "final", allow_negative_numbers = true)]
        final_value: f64,
        #[arg(long, allow_negative_numbers = true)]
        years: f64,
    },
    /// IRR per account from a CSV of date,amount[,account]
    Irr { file: PathBuf },
    /// All metrics per account from a CSV of date,amount[,account]
    Summary { file: PathBuf },
}

#[derive(Serialize)]
struct RateOutput {
    metric: &'static str,
    value: f64,
}

#[derive(Serialize)]
struct AccountIrr {
    account: String,
    irr: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

#[derive(Serialize)]
struct AccountSummary {
    account: String,
    #[serde(flatten)]
    summary: ReturnSummary,
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let calc = calculator_from(&cli);

    match &cli.command {
        Command::Roi { initial, final_value } => {
            let value = calc
                .roi(*initial, *final_value)
                .context("could not calculate ROI")?;
            print_rate(cli.json, RateOutput { metric: "roi", value })?;
        }
        Command::Annualized { initial, final_value, years } => {
            let value = calc
                .annualized_roi(*initial, *final_value, *years)
                .context("could not calculate annualized ROI")?;
            print_rate(cli.json, RateOutput { metric: "annualized_roi", value })?;
        }
        Command::Irr { file } => {
            let accounts = load(file)?;
            let rows: Vec<AccountIrr> = calc
                .irr_by_account(&accounts)
                .into_iter()
                .map(|(account, result)| match result {
                    Ok(rate) => AccountIrr { account, irr: Some(rate), error: None },
                    Err(e) => AccountIrr { account, irr: None, error: Some(e.to_string()) },
                })
                .collect();

            if cli.json {
                println!("{}", serde_json::to_string_pretty(&rows)?);
            } else {
                println!("{:<20} {:>12}", "Account", "IRR");
                println!("{}", "-".repeat(33));
                for row in &rows {
                    match (row.irr, &row.error) {
                        (Some(rate), _) => println!("{:<20} {:>11.4}%", row.account, rate * 100.0),
                        (None, Some(e)) => println!("{:<20} {:>12}  ({})", row.account, "n/a", e),
                        (None, None) => println!("{:<20} {:>12}", row.account, "n/a"),
                    }
                }
            }
        }
        Command::Summary { file } => {
            let accounts = load(file)?;
            let rows: Vec<AccountSummary> = calc
                .summarize_by_account(&accounts)
                .into_iter()
                .map(|(account, summary)| AccountSummary { account, summary })
                .collect();

            if cli.json {
                println!("{}", serde_json::to_string_pretty(&rows)?);
            } else {
                for row in &rows {
                    print_summary(row);
                }
            }
        }
    }

    Ok(())
}

/// Environment settings first, then command-line overrides
fn calculator_from(cli: &Cli) -> ReturnCalculator {
    let mut config = IrrConfig::from_env();

    if let Some(guess) = cli.guess {
        config.initial_guess = guess;
    }
    if let Some(max_iterations) = cli.max_iterations {
        config.max_iterations = max_iterations;
    }
    if let Some(tolerance) = cli.tolerance {
        config.tolerance = tolerance;
    }

    log::debug!("irr config: {:?}", config);
    ReturnCalculator::with_config(config)
}

fn load(path: &Path) -> Result<AccountCashFlows> {
    load_cash_flows(path).with_context(|| format!("failed to load cash flows from {}", path.display()))
}

fn print_rate(json: bool, output: RateOutput) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string(&output)?);
    } else {
        println!("{}: {:.6} ({:.4}%)", output.metric, output.value, output.value * 100.0);
    }
    Ok(())
}

fn pct(value: Option<f64>) -> String {
    value.map_or_else(|| "n/a".to_string(), |v| format!("{:.4}%", v * 100.0))
}

fn print_summary(row: &AccountSummary) {
    let s = &row.summary;
    println!("\n========================================");
    println!("  ACCOUNT: {}", row.account);
    println!("========================================");
    if let (Some(first), Some(last)) = (s.first_date, s.last_date) {
        println!("  Period:          {} to {} ({:.2} years)", first, last, s.span_years);
    }
    println!("  Cash flows:      {}", s.flow_count);
    println!("  Contributions:   ${:.2}", s.total_contributions);
    println!("  Distributions:   ${:.2}", s.total_distributions);
    println!("  Net gain:        ${:.2}", s.net_gain);
    println!("  ROI:             {}", pct(s.roi));
    println!("  Annualized ROI:  {}", pct(s.annualized_roi));
    println!("  IRR:             {}", pct(s.irr));
    if let Some(e) = &s.irr_error {
        println!("  IRR error:       {}", e);
    }
}
