// Fire-and-forget snapshot delivery, detached from the session tick.

use crate::domain::ports::TelemetrySink;
use crate::domain::SessionSnapshot;
use std::sync::Arc;
use tracing::{info, warn};

#[derive(Clone)]
pub struct TelemetryReporter {
    sink: Arc<dyn TelemetrySink>,
}

impl TelemetryReporter {
    pub fn new(sink: Arc<dyn TelemetrySink>) -> Self {
        Self { sink }
    }

    /// Hands the snapshot to a detached task. Never blocks the caller, and the
    /// delivery outcome only ever reaches the log.
    pub fn report(&self, snapshot: SessionSnapshot) {
        let Ok(runtime) = tokio::runtime::Handle::try_current() else {
            warn!(state = ?snapshot.state, "no async runtime; snapshot dropped");
            return;
        };

        let sink = Arc::clone(&self.sink);
        runtime.spawn(async move {
            let state = snapshot.state;
            match sink.deliver(snapshot).await {
                Ok(response) => info!(?state, %response, "snapshot delivered"),
                Err(e) => warn!(?state, error = %e, "snapshot delivery failed"),
            }
        });
    }
}
