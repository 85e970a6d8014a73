use std::time::Duration;

use async_trait::async_trait;

use crate::domain::entities::snapshot::DetectionSnapshot;
use crate::domain::ports::source::{FetchError, StatsSource};

/// Path of the statistics endpoint on the detection backend
pub const STATS_PATH: &str = "/detection_stats";

/// Polls the detection backend over HTTP.
///
/// A non-success status is reported as [`FetchError::Status`] and a body
/// that does not decode as a snapshot as [`FetchError::Parse`], so the
/// caller can tell a down backend from a broken one.
pub struct HttpStatsSource {
    url: String,
    client: reqwest::Client,
}

impl HttpStatsSource {
    /// Creates a client for `{endpoint}/detection_stats`.
    ///
    /// # Errors
    ///
    /// Returns `FetchError::Network` if the HTTP client cannot be
    /// initialized (e.g. TLS backend failure).
    pub fn new(endpoint: &str, timeout: Duration) -> Result<Self, FetchError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| FetchError::Network(format!("failed to build HTTP client: {e}")))?;

        Ok(Self::with_client(endpoint, client))
    }

    /// Uses an already configured client
    #[must_use]
    pub fn with_client(endpoint: &str, client: reqwest::Client) -> Self {
        Self {
            url: stats_url(endpoint),
            client,
        }
    }

    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }
}

/// Join the backend base URL and the statistics path
#[must_use]
pub fn stats_url(endpoint: &str) -> String {
    let base = endpoint.trim().trim_end_matches('/');
    if base.ends_with(STATS_PATH) {
        base.to_string()
    } else {
        format!("{base}{STATS_PATH}")
    }
}

/// Decode a `/detection_stats` body
///
/// # Errors
///
/// Returns `FetchError::Parse` if the body is not a valid snapshot.
pub fn parse_snapshot(body: &str) -> Result<DetectionSnapshot, FetchError> {
    serde_json::from_str(body).map_err(|e| FetchError::Parse(e.to_string()))
}

#[async_trait]
impl StatsSource for HttpStatsSource {
    async fn fetch(&self) -> Result<DetectionSnapshot, FetchError> {
        let response = self
            .client
            .get(&self.url)
            .send()
            .await
            .map_err(|e| FetchError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status.as_u16()));
        }

        let body = response
            .text()
            .await
            .map_err(|e| FetchError::Network(e.to_string()))?;
        parse_snapshot(&body)
    }
}
