//! Setup verification: check configuration and connectivity before a run.

use std::path::Path;

use anyhow::Result;
use owo_colors::OwoColorize;

use revops_core::config::Config;

use crate::crm::CrmClient;
use crate::feed::FeedClient;
use crate::render::check_line;

pub async fn run(config_path: &Path) -> Result<()> {
    println!("{}", "Verifying setup".bold());
    let mut checks: Vec<(&str, bool)> = Vec::new();

    let config = match Config::load(config_path) {
        Ok(config) => {
            checks.push(("Configuration", true));
            Some(config)
        }
        Err(e) => {
            println!("   {}", e.to_string().red());
            checks.push(("Configuration", false));
            None
        }
    };

    if let Some(config) = &config {
        checks.push(("Calendar feed", check_feed(config).await));
        checks.push(("CRM API", check_crm(config).await));
    } else {
        checks.push(("Calendar feed", false));
        checks.push(("CRM API", false));
    }

    checks.push(("Directories", check_directories()));

    println!();
    for (name, ok) in &checks {
        println!("{}", check_line(name, *ok));
    }
    println!();

    if checks.iter().all(|(_, ok)| *ok) {
        println!("{}", "Ready to run: revops extract".green());
        Ok(())
    } else {
        anyhow::bail!("Verification failed; fix the items marked above");
    }
}

/// The feed must be reachable and actually be a calendar document.
async fn check_feed(config: &Config) -> bool {
    let client = match FeedClient::new(&config.calendar.ical_url) {
        Ok(client) => client,
        Err(e) => {
            println!("   {}", e.to_string().red());
            return false;
        }
    };

    match client.download().await {
        Ok(content) if content.contains("BEGIN:VCALENDAR") => true,
        Ok(_) => {
            println!("   {}", "Feed URL does not serve an ICS document".red());
            false
        }
        Err(e) => {
            println!("   {}", format!("{:#}", e).red());
            false
        }
    }
}

async fn check_crm(config: &Config) -> bool {
    let client = match CrmClient::new(&config.crm) {
        Ok(client) => client,
        Err(e) => {
            println!("   {}", e.to_string().red());
            return false;
        }
    };

    match client.probe().await {
        Ok(()) => true,
        Err(e) => {
            println!("   {}", format!("{:#}", e).red());
            false
        }
    }
}

fn check_directories() -> bool {
    for dir in ["data", "logs"] {
        if let Err(e) = std::fs::create_dir_all(dir) {
            println!("   {}", format!("Cannot create {}/: {}", dir, e).red());
            return false;
        }
    }
    true
}
