//! Bounded retry with exponential backoff for collaborator calls.
//!
//! Transient failures (timeouts, connection errors, server errors) are
//! retried; client errors fail immediately. Exhausted retries surface as a
//! hard failure for the calling pipeline only.

use std::future::Future;
use std::time::Duration;

use anyhow::{Result, anyhow};

/// A failure classified at the collaborator boundary.
#[derive(Debug)]
pub enum FetchError {
    /// Worth retrying: timeout, connection failure, 5xx.
    Transient(anyhow::Error),
    /// Not worth retrying: bad credentials, malformed request, 4xx.
    Permanent(anyhow::Error),
}

impl FetchError {
    /// Classify a reqwest transport error.
    pub fn from_request(err: reqwest::Error) -> Self {
        if err.is_timeout() || err.is_connect() {
            FetchError::Transient(err.into())
        } else {
            FetchError::Permanent(err.into())
        }
    }

    /// Classify a response status. `Ok` for success statuses.
    pub fn check_status(status: reqwest::StatusCode) -> Result<(), Self> {
        if status.is_server_error() {
            Err(FetchError::Transient(anyhow!("server error: {}", status)))
        } else if status.is_client_error() {
            Err(FetchError::Permanent(anyhow!("client error: {}", status)))
        } else {
            Ok(())
        }
    }
}

/// Retry policy: `attempts` total tries, delay doubling from
/// `initial_delay`.
#[derive(Debug, Clone)]
pub struct Backoff {
    pub attempts: u32,
    pub initial_delay: Duration,
}

impl Default for Backoff {
    fn default() -> Self {
        Backoff {
            attempts: 3,
            initial_delay: Duration::from_millis(500),
        }
    }
}

/// Run `op` until it succeeds, fails permanently, or exhausts the policy.
pub async fn with_backoff<T, F, Fut>(label: &str, policy: &Backoff, mut op: F) -> Result<T>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, FetchError>>,
{
    let mut delay = policy.initial_delay;

    for attempt in 1..=policy.attempts {
        match op().await {
            Ok(value) => return Ok(value),
            Err(FetchError::Permanent(err)) => {
                return Err(err.context(format!("{} failed", label)));
            }
            Err(FetchError::Transient(err)) => {
                if attempt == policy.attempts {
                    return Err(err.context(format!(
                        "{} failed after {} attempts",
                        label, policy.attempts
                    )));
                }
                log::warn!(
                    "{} failed (attempt {}/{}), retrying in {:?}: {}",
                    label,
                    attempt,
                    policy.attempts,
                    delay,
                    err
                );
                tokio::time::sleep(delay).await;
                delay *= 2;
            }
        }
    }

    Err(anyhow!("{}: retry policy allows no attempts", label))
}
