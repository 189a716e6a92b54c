// Domain-level errors for session workflows.

use super::entities::{EntityId, Lane};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum SessionError {
    #[error("layout has no projectiles")]
    NoProjectiles,
    #[error("entity id {0} is registered more than once")]
    DuplicateEntity(EntityId),
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum MotionError {
    /// A move is already in flight on this lane; the new request is rejected.
    #[error("{0:?} lane already has a move in flight")]
    LaneBusy(Lane),
    #[error("speed factor must be positive and finite, got {0}")]
    InvalidSpeed(f32),
    #[error("move distance must be finite, got {0}")]
    InvalidDistance(f32),
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum TelemetryError {
    #[error("telemetry endpoint unreachable: {0}")]
    Unreachable(String),
    #[error("telemetry endpoint rejected snapshot with status {0}")]
    Rejected(u16),
    #[error("failed to encode snapshot: {0}")]
    Encode(String),
}
