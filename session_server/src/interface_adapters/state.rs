use crate::domain::SessionState;
use crate::use_cases::SessionEvent;
use tokio::sync::{mpsc, watch};

#[derive(Clone)]
pub struct AppState {
    // Inputs and physics frames flowing from the network into the session task.
    pub event_tx: mpsc::Sender<SessionEvent>,
    // Latest session state published by the controller.
    pub state_rx: watch::Receiver<SessionState>,
}
