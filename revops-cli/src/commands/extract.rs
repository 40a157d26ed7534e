//! Same-day extraction: classify calendar events, count CRM leads,
//! consolidate into a snapshot.

use std::path::Path;

use anyhow::{Context, Result};
use chrono::{Duration, NaiveDate, Utc};

use revops_core::classify::Classifier;
use revops_core::config::Config;
use revops_core::ics::parse_feed;
use revops_core::report::ExtractSnapshot;

use super::DATA_DIR;
use crate::crm::CrmClient;
use crate::feed::FeedClient;
use crate::render;

pub async fn run(config: &Config, date_override: Option<NaiveDate>) -> Result<()> {
    let tz = config.extraction.timezone()?;
    let target = date_override.unwrap_or_else(|| {
        (Utc::now().with_timezone(&tz) - Duration::days(config.extraction.days_back)).date_naive()
    });

    log::info!("Extracting metrics for {}", target);

    // Calendar pipeline. A feed failure is fatal: without events there is
    // nothing to report.
    let feed = FeedClient::new(&config.calendar.ical_url)?;
    let content = feed.download().await?;
    let events = parse_feed(&content)?;
    log::info!("Feed contains {} events", events.len());

    let classifier = Classifier::new(&config.calendar, tz);
    let metrics = classifier.day_metrics(&events, target);

    // CRM pipeline. A failure here degrades to a zero lead count; the run
    // still produces a snapshot.
    let leads = match CrmClient::new(&config.crm)?.contacts_created(target, tz).await {
        Ok(count) => Some(count),
        Err(e) => {
            log::warn!("CRM lead count failed, continuing with zero: {:#}", e);
            None
        }
    };

    let snapshot = ExtractSnapshot::build(&metrics, leads);

    std::fs::create_dir_all(DATA_DIR)?;
    let path = Path::new(DATA_DIR).join(format!("extracted_{}.json", target.format("%Y%m%d")));
    std::fs::write(&path, snapshot.to_json()?)
        .with_context(|| format!("Failed to write {}", path.display()))?;
    log::info!("Snapshot written to {}", path.display());

    println!("{}", render::day_summary(&metrics));
    println!("\nLeads created: {}", snapshot.leads_created);

    Ok(())
}
