use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::mpsc;

use crate::domain::ports::TelemetrySink;
use crate::domain::{SessionLayout, SessionSnapshot, SessionState, SessionTuning, TelemetryError};
use crate::use_cases::controller::SessionController;
use crate::use_cases::telemetry::TelemetryReporter;
use crate::use_cases::types::{BodyUpdate, PhysicsFrame, SessionEvent};

pub(crate) const TICK: Duration = Duration::from_millis(100);

// Sink that forwards every delivered snapshot so tests can await it.
pub(crate) struct RecordingSink {
    tx: mpsc::UnboundedSender<SessionSnapshot>,
}

impl RecordingSink {
    pub(crate) fn new() -> (Self, mpsc::UnboundedReceiver<SessionSnapshot>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }
}

#[async_trait]
impl TelemetrySink for RecordingSink {
    async fn deliver(&self, snapshot: SessionSnapshot) -> Result<String, TelemetryError> {
        let _ = self.tx.send(snapshot);
        Ok("recorded".to_string())
    }
}

// Sink that records the attempt and then fails, to exercise the error path.
pub(crate) struct FailingSink {
    tx: mpsc::UnboundedSender<SessionState>,
}

impl FailingSink {
    pub(crate) fn new() -> (Self, mpsc::UnboundedReceiver<SessionState>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }
}

#[async_trait]
impl TelemetrySink for FailingSink {
    async fn deliver(&self, snapshot: SessionSnapshot) -> Result<String, TelemetryError> {
        let _ = self.tx.send(snapshot.state);
        Err(TelemetryError::Unreachable("connection refused".to_string()))
    }
}

pub(crate) fn recording_controller(
    layout: SessionLayout,
    tuning: SessionTuning,
) -> (SessionController, mpsc::UnboundedReceiver<SessionSnapshot>) {
    let (sink, snapshots) = RecordingSink::new();
    let controller = SessionController::new(layout, tuning, TelemetryReporter::new(Arc::new(sink)))
        .expect("test layout should be valid");
    (controller, snapshots)
}

/// Ticks with no events until `state` is reached, returning the number of ticks taken.
pub(crate) fn tick_until(
    controller: &mut SessionController,
    state: SessionState,
    max_ticks: usize,
) -> usize {
    for ticks in 1..=max_ticks {
        controller.tick(TICK, Vec::new());
        if controller.state() == state {
            return ticks;
        }
    }
    panic!(
        "state {state:?} not reached within {max_ticks} ticks; stuck in {:?}",
        controller.state()
    );
}

pub(crate) fn destroy(ids: &[u64]) -> SessionEvent {
    SessionEvent::Physics(PhysicsFrame {
        destroyed: ids.to_vec(),
        ..PhysicsFrame::default()
    })
}

pub(crate) fn moving(id: u64, velocity: glam::Vec2) -> SessionEvent {
    SessionEvent::Physics(PhysicsFrame {
        bodies: vec![BodyUpdate {
            id,
            position: glam::Vec2::ZERO,
            velocity,
        }],
        ..PhysicsFrame::default()
    })
}

/// Awaits the next `count` delivered snapshots.
pub(crate) async fn delivered(
    snapshots: &mut mpsc::UnboundedReceiver<SessionSnapshot>,
    count: usize,
) -> Vec<SessionSnapshot> {
    let mut out = Vec::with_capacity(count);
    for _ in 0..count {
        out.push(snapshots.recv().await.expect("snapshot should be delivered"));
    }
    out
}
