//! Sheet export: read the reporting sheet and write the full historical
//! series to data/latest.json.

use std::path::Path;

use anyhow::{Context, Result};
use chrono::{Duration, Utc};
use owo_colors::OwoColorize;

use revops_core::config::Config;
use revops_core::report::ConsolidatedOutput;
use revops_core::sheet::series::series_until;

use super::DATA_DIR;
use crate::sheets::SheetsClient;

pub async fn run(config: &Config) -> Result<()> {
    let tz = config.extraction.timezone()?;
    let now = Utc::now().with_timezone(&tz);
    let cutoff = (now - Duration::days(config.extraction.days_back)).date_naive();

    log::info!("Exporting all sheet data up to {}", cutoff);

    let client = SheetsClient::new(&config.sheets)?;
    let grid = client.fetch_grid().await?;

    let days = series_until(&grid, cutoff).context("No sheet data up to the cutoff date")?;
    log::info!("Extracted {} days of data", days.len());

    let generated_at = now.format("%Y-%m-%d %H:%M:%S").to_string();
    let output = ConsolidatedOutput::build(days, generated_at)?;

    std::fs::create_dir_all(DATA_DIR)?;
    let path = Path::new(DATA_DIR).join("latest.json");
    std::fs::write(&path, output.to_json()?)
        .with_context(|| format!("Failed to write {}", path.display()))?;

    println!(
        "Wrote {} with {} days ({} through {})",
        path.display().to_string().bold(),
        output.day_count,
        output.days.first().map(|d| d.date.to_string()).unwrap_or_default(),
        output.last_data_date
    );

    Ok(())
}
