//! HTTP client for the `/lemurs` endpoint.

use std::time::Duration;

use chrono::{DateTime, Utc};
use lemurkeeper_core::Lemur;
use thiserror::Error;
use tracing::{info, warn};

use crate::RetryPolicy;

#[derive(Error, Debug)]
pub enum FetchError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("server returned {status}: {body}")]
    Server { status: u16, body: String },
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
}

/// A successfully fetched collection.
#[derive(Debug)]
pub struct Fetched {
    pub lemurs: Vec<Lemur>,
    pub fetched_at: DateTime<Utc>,
    /// Attempts used, including the successful one.
    pub attempts: u32,
}

pub struct LemurClient {
    client: reqwest::Client,
    base_url: String,
}

impl LemurClient {
    /// Create a client for the given base URL, e.g. `http://localhost:3001`,
    /// whose requests give up after `timeout`.
    pub fn with_timeout(base_url: String, timeout: Duration) -> Result<Self, FetchError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Wrap an already configured `reqwest` client.
    pub fn with_client(base_url: String, client: reqwest::Client) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn lemurs_url(&self) -> String {
        format!("{}/lemurs", self.base_url)
    }

    /// GET the full collection once.
    ///
    /// The body must be a JSON array of records; anything else is a
    /// [`FetchError::Json`].
    pub async fn fetch_lemurs(&self) -> Result<Vec<Lemur>, FetchError> {
        let url = self.lemurs_url();

        info!(url = %url, "fetching lemurs");
        let resp = self.client.get(&url).send().await?;
        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(FetchError::Server {
                status: status.as_u16(),
                body,
            });
        }

        let body = resp.text().await?;
        let lemurs: Vec<Lemur> = serde_json::from_str(&body)?;
        info!(count = lemurs.len(), "fetched lemurs");
        Ok(lemurs)
    }

    /// Fetch, retrying failures per `policy`. Returns the last error if
    /// every attempt fails.
    pub async fn fetch_with_retry(&self, policy: RetryPolicy) -> Result<Fetched, FetchError> {
        let max_attempts = policy.max_attempts();
        let mut attempt = 1;
        loop {
            match self.fetch_lemurs().await {
                Ok(lemurs) => {
                    return Ok(Fetched {
                        lemurs,
                        fetched_at: Utc::now(),
                        attempts: attempt,
                    });
                }
                Err(err) if attempt < max_attempts => {
                    warn!(attempt, max_attempts, error = %err, "fetch failed, retrying");
                    tokio::time::sleep(policy.delay).await;
                    attempt += 1;
                }
                Err(err) => return Err(err),
            }
        }
    }
}
