//! # REST Publisher
//!
//! Overwrites the remote record with an HTTP `PUT` of the JSON payload.

use async_trait::async_trait;
use tracing::debug;

use super::{PublishedRecord, Publisher};
use crate::config::RemoteConfig;
use crate::error::{Result, RoadRiskError};

/// Publisher that `PUT`s records to `{base_url}/{node}.json`
#[derive(Debug, Clone)]
pub struct RestPublisher {
    client: reqwest::Client,
    url: String,
}

impl RestPublisher {
    /// Create a publisher for the given remote
    ///
    /// Every request is bounded by `remote.timeout_ms`.
    ///
    /// # Errors
    ///
    /// Returns [`RoadRiskError::Http`] if the HTTP client cannot be built.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use road_risk_live::config::RemoteConfig;
    /// use road_risk_live::publish::RestPublisher;
    ///
    /// let remote = RemoteConfig::new("http://127.0.0.1:9000", "live_area", 5000);
    /// let publisher = RestPublisher::new(&remote)?;
    /// assert_eq!(publisher.url(), "http://127.0.0.1:9000/live_area.json");
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn new(remote: &RemoteConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(remote.timeout())
            .build()?;

        Ok(Self {
            client,
            url: remote.record_url(),
        })
    }

    /// Record URL this publisher writes to
    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl Publisher for RestPublisher {
    async fn publish(&self, record: &PublishedRecord) -> Result<()> {
        let response = self.client.put(&self.url).json(record).send().await?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(RoadRiskError::RemoteStatus {
                status: status.as_u16(),
                body,
            });
        }

        debug!("PUT {} -> {}", self.url, status);
        Ok(())
    }
}
