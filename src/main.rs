mod cli;
// Only compile UI module when TUI feature is enabled
#[cfg(feature = "tui")]
mod ui;

use std::fs;
use std::io::{self, Read};
use std::process;

use anyhow::{Context, Result};
use chrono::{Local, NaiveDate};
use clap::Parser;
use tracing::info;

use pto_forecast::{
    federal_holiday_list, logging, ForecastEngine, ForecastRequest, ForecastResponse,
    HolidayResponse,
};

use crate::cli::{Cli, Command, ForecastArgs, HolidaysArgs};

fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    if let Err(e) = run(cli.command) {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}

fn run(command: Command) -> Result<()> {
    match command {
        Command::Forecast(args) => run_forecast(args),
        Command::Holidays(args) => run_holidays(args),
        #[cfg(feature = "tui")]
        Command::View(args) => run_view(args),
    }
}

fn read_request(args: &ForecastArgs) -> Result<ForecastRequest> {
    let content = match &args.input {
        Some(path) => fs::read_to_string(path)
            .with_context(|| format!("Failed to read request file: {:?}", path))?,
        None => {
            let mut buffer = String::new();
            io::stdin()
                .read_to_string(&mut buffer)
                .context("Failed to read request from stdin")?;
            buffer
        }
    };

    serde_json::from_str(&content).context("Failed to parse forecast request JSON")
}

fn today(args: &ForecastArgs) -> NaiveDate {
    args.today.unwrap_or_else(|| Local::now().date_naive())
}

fn run_forecast(args: ForecastArgs) -> Result<()> {
    let request = read_request(&args)?;
    let engine = ForecastEngine::with_default_holiday_hours(args.holiday_hours);
    let today = today(&args);

    let input = request.to_input().context("Invalid forecast request")?;
    let report = engine.forecast(&input, today);
    info!(today = %today, days = report.timeline.len(), "forecast computed");

    if args.summary {
        println!("{}", report.summary());
    } else {
        let response = ForecastResponse::from(&report);
        println!("{}", serde_json::to_string_pretty(&response)?);
    }

    Ok(())
}

fn run_holidays(args: HolidaysArgs) -> Result<()> {
    let holidays = federal_holiday_list(args.start, args.end, args.hours)?;
    info!(start = %args.start, end = %args.end, count = holidays.len(), "federal holidays listed");

    let response: Vec<HolidayResponse> = holidays.iter().map(HolidayResponse::from).collect();
    println!("{}", serde_json::to_string_pretty(&response)?);

    Ok(())
}

#[cfg(feature = "tui")]
fn run_view(args: ForecastArgs) -> Result<()> {
    let request = read_request(&args)?;
    let engine = ForecastEngine::with_default_holiday_hours(args.holiday_hours);
    let input = request.to_input().context("Invalid forecast request")?;
    let report = engine.forecast(&input, today(&args));

    let mut app = ui::App::new(report);
    ui::run_ui(&mut app)
}
