use std::time::Duration;

use async_trait::async_trait;
use chrono::SecondsFormat;
use focus_engine::{BusyEvent, EventStore, Interval, StoreError};
use reqwest::Client;
use url::Url;

use crate::config::RestStoreConfig;

/// Reads a user's events from a PostgREST `events` table.
#[derive(Debug, Clone)]
pub struct RestEventStore {
    client: Client,
    endpoint: Url,
    api_key: String,
    user_id: String,
}

impl RestEventStore {
    pub fn new(config: &RestStoreConfig) -> Result<Self, StoreError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| StoreError::Unavailable(format!("failed to build http client: {e}")))?;
        Ok(Self {
            client,
            endpoint: Self::table_endpoint(&config.base_url, &config.table)?,
            api_key: config.api_key.clone(),
            user_id: config.user_id.clone(),
        })
    }

    fn table_endpoint(base_url: &str, table: &str) -> Result<Url, StoreError> {
        let mut url = Url::parse(base_url)
            .map_err(|e| StoreError::Unavailable(format!("invalid event store url: {e}")))?;
        {
            let mut segments = url.path_segments_mut().map_err(|_| {
                StoreError::Unavailable("event store url cannot be a base".to_string())
            })?;
            segments.pop_if_empty();
            segments.push("rest");
            segments.push("v1");
            segments.push(table);
        }
        Ok(url)
    }

    /// Query for this user's events intersecting `range`, earliest first.
    pub fn events_url(&self, range: &Interval) -> Url {
        let mut url = self.endpoint.clone();
        url.query_pairs_mut()
            .append_pair("select", "start,end")
            .append_pair("user_id", &format!("eq.{}", self.user_id))
            .append_pair("start", &format!("lt.{}", timestamp(range.end())))
            .append_pair("end", &format!("gt.{}", timestamp(range.start())))
            .append_pair("order", "start.asc");
        url
    }
}

fn timestamp(instant: chrono::DateTime<chrono::Utc>) -> String {
    instant.to_rfc3339_opts(SecondsFormat::Secs, true)
}

#[async_trait]
impl EventStore for RestEventStore {
    async fn list_events(&self, range: &Interval) -> Result<Vec<BusyEvent>, StoreError> {
        let response = self
            .client
            .get(self.events_url(range))
            .header("apikey", &self.api_key)
            .bearer_auth(&self.api_key)
            .send()
            .await
            .map_err(|e| StoreError::Unavailable(format!("event store request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = if body.trim().is_empty() {
                format!("event store error: http {}", status.as_u16())
            } else {
                format!("event store error: http {}; body={body}", status.as_u16())
            };
            return Err(StoreError::Unavailable(message));
        }

        let events: Vec<BusyEvent> = response
            .json()
            .await
            .map_err(|e| StoreError::Malformed(e.to_string()))?;
        tracing::debug!(count = events.len(), "fetched events");
        Ok(events)
    }
}
