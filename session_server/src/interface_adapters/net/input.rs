use crate::interface_adapters::http::ErrorResponse;
use crate::interface_adapters::protocol::{PhysicsFrameDto, ReleaseRequest};
use crate::interface_adapters::state::AppState;
use crate::use_cases::SessionEvent;

use axum::{
    extract::{Json, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use std::sync::Arc;
use tracing::warn;

// Queue an event for the next session tick.
async fn enqueue(state: &AppState, event: SessionEvent) -> Response {
    match state.event_tx.send(event).await {
        Ok(()) => StatusCode::ACCEPTED.into_response(),
        Err(_) => {
            warn!("session task is gone; event dropped");
            ErrorResponse::reply(StatusCode::SERVICE_UNAVAILABLE, "session is not running")
        }
    }
}

pub async fn primary_action_handler(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    enqueue(&state, SessionEvent::PrimaryAction).await
}

pub async fn release_handler(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<ReleaseRequest>,
) -> impl IntoResponse {
    let velocity = glam::Vec2::from(payload.velocity);
    if !velocity.is_finite() {
        return ErrorResponse::reply(StatusCode::BAD_REQUEST, "velocity must be finite");
    }
    enqueue(&state, SessionEvent::ProjectileReleased { velocity }).await
}

pub async fn physics_handler(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<PhysicsFrameDto>,
) -> impl IntoResponse {
    if !payload.is_finite() {
        return ErrorResponse::reply(StatusCode::BAD_REQUEST, "physics frame must be finite");
    }
    enqueue(&state, SessionEvent::Physics(payload.into())).await
}
