use crate::interface_adapters::protocol::StatusResponse;
use crate::interface_adapters::state::AppState;
use crate::interface_adapters::status::prompt_for;

use axum::{
    extract::{Json, State},
    response::IntoResponse,
};
use std::sync::Arc;

pub async fn status_handler(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let current = *state.state_rx.borrow();
    Json(StatusResponse {
        state: current.into(),
        prompt: prompt_for(current),
    })
}
