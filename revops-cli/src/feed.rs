//! Calendar feed download.

use std::time::Duration;

use anyhow::{Context, Result};

use crate::retry::{Backoff, FetchError, with_backoff};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Downloads the public ICS feed. No authentication; the calendar is shared
/// read-only by URL.
pub struct FeedClient {
    http: reqwest::Client,
    url: String,
    backoff: Backoff,
}

impl FeedClient {
    pub fn new(url: &str) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .context("Failed to build HTTP client")?;

        Ok(FeedClient {
            http,
            url: url.to_string(),
            backoff: Backoff::default(),
        })
    }

    pub fn with_policy(mut self, backoff: Backoff) -> Self {
        self.backoff = backoff;
        self
    }

    /// Fetch the feed document as text.
    pub async fn download(&self) -> Result<String> {
        log::info!("Downloading calendar feed from {}", self.url);

        let http = &self.http;
        let url = &self.url;

        with_backoff("Calendar feed download", &self.backoff, || async move {
            let response = http
                .get(url.as_str())
                .send()
                .await
                .map_err(FetchError::from_request)?;

            FetchError::check_status(response.status())?;
            response.text().await.map_err(FetchError::from_request)
        })
        .await
    }
}
