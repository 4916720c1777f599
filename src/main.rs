mod config;
mod fetcher;
mod filter;
mod merger;
mod model;
mod normalizer;
mod notifier;
mod pipeline;
mod schedule;
mod utils;

use chrono::{Local, NaiveDate};
use clap::{Parser, Subcommand};
use config::AppConfig;
use fetcher::NasdaqSource;
use notifier::EmailNotifier;
use pipeline::RunOutcome;
use std::process::ExitCode;
use tracing::{error, info};

/// Watches the NASDAQ IPO calendar and emails an alert when an offering
/// above the configured threshold prices on the target date.
#[derive(Parser)]
#[command(name = "ipo-monitor", version, about)]
struct Cli {
    /// Monitor this date (YYYY-MM-DD) instead of today.
    #[arg(long, value_parser = parse_cli_date)]
    date: Option<NaiveDate>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Print OS scheduler setup instructions and exit.
    Schedule,
}

fn parse_cli_date(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .map_err(|_| format!("expected YYYY-MM-DD, got {:?}", raw))
}

#[tokio::main]
async fn main() -> ExitCode {
    // A missing .env is fine; scheduled runs get their variables from the environment.
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    if let Some(Command::Schedule) = cli.command {
        schedule::print_instructions();
        return ExitCode::SUCCESS;
    }

    info!("{}", "=".repeat(60));
    info!("  IPO Monitor – {}", Local::now().format("%Y-%m-%d %H:%M:%S"));
    info!("{}", "=".repeat(60));

    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!("config error: {}", e);
            return ExitCode::from(1);
        }
    };

    let notifier = match EmailNotifier::new(&config) {
        Ok(notifier) => notifier,
        Err(e) => {
            error!("mail setup error: {}", e);
            return ExitCode::from(1);
        }
    };

    let source = NasdaqSource::new();
    let target_date = cli.date.unwrap_or_else(|| Local::now().date_naive());

    match pipeline::run(&source, &notifier, target_date, &config).await {
        Ok(RunOutcome::AlertSent(count)) => {
            info!("done, {} offering(s) alerted ✓", count);
            ExitCode::SUCCESS
        }
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            error!("alert delivery failed: {} (check SMTP credentials in .env)", e);
            ExitCode::from(2)
        }
    }
}
