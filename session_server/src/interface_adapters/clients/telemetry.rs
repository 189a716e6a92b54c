use crate::domain::ports::TelemetrySink;
use crate::domain::{SessionSnapshot, TelemetryError};
use crate::interface_adapters::protocol::SnapshotDto;
use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use std::time::Duration;
use tracing::debug;

// Thin reqwest client that posts snapshots to the analytics endpoint.
#[derive(Clone)]
pub struct HttpTelemetrySink {
    http: reqwest::Client,
    url: String,
}

impl HttpTelemetrySink {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self, reqwest::Error> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http,
            url: url.into(),
        })
    }
}

#[async_trait]
impl TelemetrySink for HttpTelemetrySink {
    async fn deliver(&self, snapshot: SessionSnapshot) -> Result<String, TelemetryError> {
        let body = serde_json::to_string_pretty(&SnapshotDto::from(&snapshot))
            .map_err(|e| TelemetryError::Encode(e.to_string()))?;
        debug!(payload = %body, "posting snapshot");

        let response = self
            .http
            .post(&self.url)
            .header(CONTENT_TYPE, "application/json")
            .body(body)
            .send()
            .await
            .map_err(|e| TelemetryError::Unreachable(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(TelemetryError::Rejected(status.as_u16()));
        }

        response
            .text()
            .await
            .map_err(|e| TelemetryError::Unreachable(e.to_string()))
    }
}
