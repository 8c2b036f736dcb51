use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Parser, Subcommand};

/// Paid-time-off balance forecaster.
#[derive(Parser)]
#[command(name = "pto-forecast", version, about = "Project a PTO balance forward to a target date")]
pub struct Cli {
    /// Increase verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Command,
}

/// Available subcommands.
#[derive(Subcommand)]
pub enum Command {
    /// Run a forecast request and print the JSON response.
    Forecast(ForecastArgs),
    /// List federal holidays for a date window.
    Holidays(HolidaysArgs),
    /// Browse a forecast in an interactive terminal view.
    #[cfg(feature = "tui")]
    View(ForecastArgs),
}

/// Arguments shared by `forecast` and `view`.
#[derive(clap::Args)]
pub struct ForecastArgs {
    /// JSON request file; reads stdin when omitted.
    #[arg(short, long)]
    pub input: Option<PathBuf>,

    /// First day of the forecast window (defaults to the local date).
    #[arg(long, value_parser = parse_date_arg)]
    pub today: Option<NaiveDate>,

    /// Base hours credited to each federal-calendar holiday.
    #[arg(long = "holiday-hours", default_value_t = pto_forecast::holiday_policy::DEFAULT_HOLIDAY_HOURS)]
    pub holiday_hours: f64,

    /// Print a one-line summary instead of the JSON response.
    #[arg(long)]
    pub summary: bool,
}

/// Arguments for the `holidays` subcommand.
#[derive(clap::Args)]
pub struct HolidaysArgs {
    /// Window start (YYYY-MM-DD).
    #[arg(long, value_parser = parse_date_arg)]
    pub start: NaiveDate,

    /// Window end (YYYY-MM-DD), inclusive.
    #[arg(long, value_parser = parse_date_arg)]
    pub end: NaiveDate,

    /// Base hours credited to each holiday.
    #[arg(long, default_value_t = pto_forecast::holiday_policy::DEFAULT_HOLIDAY_HOURS)]
    pub hours: f64,
}

fn parse_date_arg(value: &str) -> Result<NaiveDate, String> {
    pto_forecast::parse_date(value).ok_or_else(|| format!("expected YYYY-MM-DD, got {value:?}"))
}
