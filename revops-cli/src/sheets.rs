//! Spreadsheet read access.
//!
//! The sheet is read in one shot as a 2-D grid of formatted cell text via
//! the values endpoint; blank cells come back as empty strings.

use std::time::Duration;

use anyhow::{Context, Result, anyhow};
use serde::Deserialize;
use url::Url;

use revops_core::SheetGrid;
use revops_core::config::SheetsConfig;

use crate::retry::{Backoff, FetchError, with_backoff};

const DEFAULT_BASE_URL: &str = "https://sheets.googleapis.com";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

pub struct SheetsClient {
    http: reqwest::Client,
    base_url: String,
    config: SheetsConfig,
    backoff: Backoff,
}

#[derive(Debug, Deserialize)]
struct ValueRange {
    #[serde(default)]
    values: Vec<Vec<String>>,
}

impl SheetsClient {
    pub fn new(config: &SheetsConfig) -> Result<Self> {
        Self::with_base_url(config, DEFAULT_BASE_URL)
    }

    pub fn with_base_url(config: &SheetsConfig, base_url: &str) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .context("Failed to build HTTP client")?;

        Ok(SheetsClient {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            config: config.clone(),
            backoff: Backoff::default(),
        })
    }

    pub fn with_policy(mut self, backoff: Backoff) -> Self {
        self.backoff = backoff;
        self
    }

    /// Download every cell of the worksheet as a grid.
    pub async fn fetch_grid(&self) -> Result<SheetGrid> {
        let url = self.values_url()?;
        log::info!(
            "Reading sheet {} (worksheet '{}')",
            self.config.sheet_id,
            self.config.worksheet
        );

        let http = &self.http;
        let url = &url;

        let range: ValueRange = with_backoff("Sheet read", &self.backoff, || async move {
            let response = http
                .get(url.clone())
                .send()
                .await
                .map_err(FetchError::from_request)?;

            FetchError::check_status(response.status())?;
            response.json().await.map_err(FetchError::from_request)
        })
        .await?;

        log::info!("Downloaded {} rows", range.values.len());
        Ok(SheetGrid::new(range.values))
    }

    fn values_url(&self) -> Result<Url> {
        let mut url = Url::parse(&self.base_url).context("Invalid sheets base URL")?;

        url.path_segments_mut()
            .map_err(|_| anyhow!("Sheets base URL cannot have paths"))?
            .extend([
                "v4",
                "spreadsheets",
                self.config.sheet_id.as_str(),
                "values",
                self.config.worksheet.as_str(),
            ]);

        url.query_pairs_mut()
            .append_pair("key", &self.config.api_key)
            .append_pair("majorDimension", "ROWS");

        Ok(url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> SheetsConfig {
        SheetsConfig {
            sheet_id: "sheet-123".into(),
            worksheet: "ACT comercial".into(),
            api_key: "sheets-key".into(),
        }
    }

    #[test]
    fn test_values_url_encodes_the_worksheet_name() {
        let client = SheetsClient::with_base_url(&config(), "https://sheets.googleapis.com").unwrap();
        let url = client.values_url().unwrap();

        assert_eq!(
            url.path(),
            "/v4/spreadsheets/sheet-123/values/ACT%20comercial"
        );
        assert!(url.query().unwrap().contains("key=sheets-key"));
    }

    #[tokio::test]
    async fn test_fetch_grid_parses_cell_values() {
        let mut server = mockito::Server::new_async().await;
        let body = r#"{
            "range": "'ACT comercial'!A1:Z100",
            "majorDimension": "ROWS",
            "values": [["", ""], ["15/01/2026", "16/01/2026"]]
        }"#;
        let mock = server
            .mock(
                "GET",
                mockito::Matcher::Regex(r"^/v4/spreadsheets/sheet-123/values/.*".to_string()),
            )
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(body)
            .create_async()
            .await;

        let client = SheetsClient::with_base_url(&config(), &server.url()).unwrap();
        let grid = client.fetch_grid().await.unwrap();

        assert_eq!(grid.columns(), 2);
        assert_eq!(grid.date_label(0), "15/01/2026");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_fetch_grid_retries_server_errors() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock(
                "GET",
                mockito::Matcher::Regex(r"^/v4/spreadsheets/.*".to_string()),
            )
            .with_status(500)
            .expect(2)
            .create_async()
            .await;

        let client = SheetsClient::with_base_url(&config(), &server.url())
            .unwrap()
            .with_policy(Backoff {
                attempts: 2,
                initial_delay: std::time::Duration::from_millis(1),
            });

        assert!(client.fetch_grid().await.is_err());
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_fetch_grid_with_no_values_is_an_empty_grid() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock(
                "GET",
                mockito::Matcher::Regex(r"^/v4/spreadsheets/.*".to_string()),
            )
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"range": "x", "majorDimension": "ROWS"}"#)
            .create_async()
            .await;

        let client = SheetsClient::with_base_url(&config(), &server.url()).unwrap();
        let grid = client.fetch_grid().await.unwrap();

        assert!(grid.is_empty());
    }
}
