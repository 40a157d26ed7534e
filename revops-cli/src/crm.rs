//! CRM lead counts via the contact-search API.

use std::time::Duration;

use anyhow::{Context, Result, anyhow, bail};
use chrono::{DateTime, NaiveDate, Utc};
use chrono_tz::Tz;
use serde::Deserialize;

use revops_core::config::CrmConfig;

use crate::retry::{Backoff, FetchError, with_backoff};

const DEFAULT_BASE_URL: &str = "https://api.hubapi.com";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Counts CRM records created within a local-day window.
pub struct CrmClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
    backoff: Backoff,
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    total: i64,
}

impl CrmClient {
    pub fn new(config: &CrmConfig) -> Result<Self> {
        Self::with_base_url(config, DEFAULT_BASE_URL)
    }

    pub fn with_base_url(config: &CrmConfig, base_url: &str) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .context("Failed to build HTTP client")?;

        Ok(CrmClient {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
            backoff: Backoff::default(),
        })
    }

    pub fn with_policy(mut self, backoff: Backoff) -> Self {
        self.backoff = backoff;
        self
    }

    /// Count of contacts created on `date` in timezone `tz`.
    pub async fn contacts_created(&self, date: NaiveDate, tz: Tz) -> Result<i64> {
        let (start_ms, end_ms) = local_day_window_ms(date, tz)?;

        let body = serde_json::json!({
            "filterGroups": [{
                "filters": [
                    {
                        "propertyName": "createdate",
                        "operator": "GTE",
                        "value": start_ms.to_string(),
                    },
                    {
                        "propertyName": "createdate",
                        "operator": "LT",
                        "value": end_ms.to_string(),
                    },
                ]
            }],
            "properties": ["createdate"],
            "limit": 100,
        });

        let url = format!("{}/crm/v3/objects/contacts/search", self.base_url);
        let url = url.as_str();
        let http = &self.http;
        let api_key = &self.api_key;
        let body = &body;

        let response: SearchResponse =
            with_backoff("CRM contact search", &self.backoff, || async move {
                let response = http
                    .post(url)
                    .bearer_auth(api_key)
                    .json(body)
                    .send()
                    .await
                    .map_err(FetchError::from_request)?;

                FetchError::check_status(response.status())?;
                response.json().await.map_err(FetchError::from_request)
            })
            .await?;

        log::info!("Contacts created on {}: {}", date, response.total);
        Ok(response.total)
    }

    /// Cheap authenticated request to confirm the API key works.
    pub async fn probe(&self) -> Result<()> {
        let url = format!("{}/crm/v3/objects/contacts?limit=1", self.base_url);

        let response = self
            .http
            .get(&url)
            .bearer_auth(&self.api_key)
            .send()
            .await
            .context("CRM API unreachable")?;

        let status = response.status();
        if status.is_success() {
            Ok(())
        } else if status == reqwest::StatusCode::UNAUTHORIZED {
            bail!("CRM API key is invalid")
        } else {
            bail!("CRM API returned {}", status)
        }
    }
}

/// `[local midnight, next local midnight)` of `date`, as millisecond epochs.
fn local_day_window_ms(date: NaiveDate, tz: Tz) -> Result<(i64, i64)> {
    let start = local_midnight(date, tz)?;
    let end = local_midnight(
        date.succ_opt()
            .ok_or_else(|| anyhow!("Date out of range: {}", date))?,
        tz,
    )?;

    Ok((start.timestamp_millis(), end.timestamp_millis()))
}

fn local_midnight(date: NaiveDate, tz: Tz) -> Result<DateTime<Utc>> {
    let local = revops_core::event::local_day_start(date, tz)
        .ok_or_else(|| anyhow!("Day {} has no valid start in {}", date, tz))?;

    Ok(local.with_timezone(&Utc))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono_tz::America::Santiago;

    fn config() -> CrmConfig {
        CrmConfig {
            api_key: "pat-na1-test".into(),
            account_id: "12345".into(),
        }
    }

    fn fast_policy() -> Backoff {
        Backoff {
            attempts: 3,
            initial_delay: Duration::from_millis(1),
        }
    }

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 1, 15).unwrap()
    }

    #[test]
    fn test_local_day_window_spans_24_hours() {
        let (start, end) = local_day_window_ms(date(), Santiago).unwrap();

        assert_eq!(end - start, 24 * 60 * 60 * 1000);
        // Santiago is UTC-3 in January: local midnight is 03:00 UTC.
        let start_utc = DateTime::from_timestamp_millis(start).unwrap();
        assert_eq!(start_utc.to_rfc3339(), "2026-01-15T03:00:00+00:00");
    }

    #[tokio::test]
    async fn test_contacts_created_reads_total() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/crm/v3/objects/contacts/search")
            .match_header("authorization", "Bearer pat-na1-test")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"total": 17, "results": []}"#)
            .create_async()
            .await;

        let client = CrmClient::with_base_url(&config(), &server.url()).unwrap();
        let total = client.contacts_created(date(), Santiago).await.unwrap();

        assert_eq!(total, 17);
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_contact_search_does_not_retry_auth_failures() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/crm/v3/objects/contacts/search")
            .with_status(401)
            .expect(1)
            .create_async()
            .await;

        let client = CrmClient::with_base_url(&config(), &server.url())
            .unwrap()
            .with_policy(fast_policy());

        assert!(client.contacts_created(date(), Santiago).await.is_err());
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_contact_search_retries_server_errors() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/crm/v3/objects/contacts/search")
            .with_status(502)
            .expect(3)
            .create_async()
            .await;

        let client = CrmClient::with_base_url(&config(), &server.url())
            .unwrap()
            .with_policy(fast_policy());

        assert!(client.contacts_created(date(), Santiago).await.is_err());
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_probe_distinguishes_invalid_key() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/crm/v3/objects/contacts?limit=1")
            .with_status(401)
            .create_async()
            .await;

        let client = CrmClient::with_base_url(&config(), &server.url()).unwrap();
        let err = client.probe().await.unwrap_err();

        assert!(err.to_string().contains("invalid"));
    }
}
