mod commands;
mod crm;
mod feed;
mod logging;
mod render;
mod retry;
mod sheets;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};

use revops_core::config::Config;

#[derive(Parser)]
#[command(name = "revops")]
#[command(about = "Extract and consolidate daily sales-operations metrics")]
struct Cli {
    /// Path to the configuration file
    #[arg(long, default_value = "config/revops.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Classify calendar events and count CRM leads for one day
    Extract {
        /// Target date (YYYY-MM-DD); defaults to days_back before today
        #[arg(long)]
        date: Option<String>,
    },
    /// Read the reporting sheet and export the full historical series
    Export,
    /// Check configuration and connectivity before a run
    Verify,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    logging::init(Path::new("logs/revops.log"))?;

    match cli.command {
        Commands::Extract { date } => {
            let config = Config::load(&cli.config)?;
            let date = date.map(|s| parse_date_arg(&s)).transpose()?;
            commands::extract::run(&config, date).await
        }
        Commands::Export => {
            let config = Config::load(&cli.config)?;
            commands::export::run(&config).await
        }
        Commands::Verify => commands::verify::run(&cli.config).await,
    }
}

fn parse_date_arg(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .with_context(|| format!("Invalid date '{}'. Expected YYYY-MM-DD", s))
}
