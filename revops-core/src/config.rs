//! Extraction configuration, loaded from config/revops.toml.
//!
//! The whole configuration is read once at startup into an immutable value
//! that gets passed into the classifier and the sheet reconciler. Nothing in
//! the pipeline reads ambient global state.

use std::path::Path;
use std::str::FromStr;

use chrono_tz::Tz;
use serde::Deserialize;

use crate::error::{RevopsError, RevopsResult};

/// Values that mean "the operator never filled this in". A key matching one
/// of these is rejected before any network call is attempted.
const PLACEHOLDER_KEYS: &[&str] = &[
    "YOUR_API_KEY_HERE",
    "TU_API_KEY_AQUI",
    "REPLACE_ME",
    "XXX",
];

fn default_days_back() -> i64 {
    1
}

/// Top-level configuration file.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub extraction: ExtractionConfig,
    pub calendar: CalendarConfig,
    pub crm: CrmConfig,
    pub sheets: SheetsConfig,
}

/// When and where to extract.
#[derive(Debug, Clone, Deserialize)]
pub struct ExtractionConfig {
    /// IANA timezone identifier, e.g. "America/Santiago".
    pub timezone: String,

    /// How many days back from today the target date lies (1 = yesterday).
    #[serde(default = "default_days_back")]
    pub days_back: i64,
}

impl ExtractionConfig {
    pub fn timezone(&self) -> RevopsResult<Tz> {
        Tz::from_str(&self.timezone).map_err(|_| RevopsError::Timezone(self.timezone.clone()))
    }
}

/// Calendar feed and classification heuristics.
#[derive(Debug, Clone, Deserialize)]
pub struct CalendarConfig {
    /// Public ICS feed URL.
    pub ical_url: String,

    pub colors: ColorCodes,

    /// Titles of bot-booked meetings start with this exact prefix.
    pub robot_title_prefix: String,
}

/// Color codes as they appear in the feed's COLOR property.
#[derive(Debug, Clone, Deserialize)]
pub struct ColorCodes {
    /// Black: meetings booked by Teresa.
    pub teresa: String,

    /// Green: meetings booked by Daniela.
    pub daniela: String,

    /// Blue: Matias or the bot, disambiguated by title.
    pub blue: String,

    /// Colors applied after the fact to mark a meeting as not attended.
    pub no_show: Vec<String>,
}

/// CRM API access (lead counts).
#[derive(Debug, Clone, Deserialize)]
pub struct CrmConfig {
    pub api_key: String,
    pub account_id: String,
}

/// Spreadsheet read access (system of record).
#[derive(Debug, Clone, Deserialize)]
pub struct SheetsConfig {
    pub sheet_id: String,
    pub worksheet: String,
    pub api_key: String,
}

impl Config {
    /// Load and validate the configuration file.
    pub fn load(path: &Path) -> RevopsResult<Self> {
        if !path.exists() {
            return Err(RevopsError::Config(format!(
                "Configuration file not found: {}",
                path.display()
            )));
        }

        let content = std::fs::read_to_string(path)?;
        let config: Config =
            toml::from_str(&content).map_err(|e| RevopsError::Config(e.to_string()))?;

        config.validate()?;
        Ok(config)
    }

    /// Reject placeholder credentials and malformed URLs before any network
    /// call gets a chance to fail with something less actionable.
    pub fn validate(&self) -> RevopsResult<()> {
        self.extraction.timezone()?;

        validate_url(&self.calendar.ical_url, "calendar.ical_url")?;
        validate_api_key(&self.crm.api_key, "crm.api_key")?;
        validate_api_key(&self.sheets.api_key, "sheets.api_key")?;

        if self.sheets.sheet_id.trim().is_empty() {
            return Err(RevopsError::Config("sheets.sheet_id is empty".into()));
        }
        if self.sheets.worksheet.trim().is_empty() {
            return Err(RevopsError::Config("sheets.worksheet is empty".into()));
        }

        Ok(())
    }
}

/// An API key must be non-empty and not one of the placeholder values that
/// ship in the config template.
pub fn validate_api_key(key: &str, name: &str) -> RevopsResult<()> {
    if key.trim().is_empty() {
        return Err(RevopsError::Config(format!("{} is empty", name)));
    }

    if PLACEHOLDER_KEYS.iter().any(|p| p.eq_ignore_ascii_case(key)) {
        return Err(RevopsError::Config(format!(
            "{} is still set to a placeholder value; edit config/revops.toml",
            name
        )));
    }

    Ok(())
}

pub fn validate_url(url: &str, name: &str) -> RevopsResult<()> {
    if url.trim().is_empty() {
        return Err(RevopsError::Config(format!("{} is empty", name)));
    }

    if !url.starts_with("http://") && !url.starts_with("https://") {
        return Err(RevopsError::Config(format!(
            "{} must start with http:// or https://",
            name
        )));
    }

    Ok(())
}
