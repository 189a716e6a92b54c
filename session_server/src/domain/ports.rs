use async_trait::async_trait;

use crate::domain::errors::TelemetryError;
use crate::domain::snapshot::SessionSnapshot;

// Port for the external channel that receives session snapshots.
#[async_trait]
pub trait TelemetrySink: Send + Sync {
    /// Delivers one snapshot and returns the receiver's response body.
    async fn deliver(&self, snapshot: SessionSnapshot) -> Result<String, TelemetryError>;
}
