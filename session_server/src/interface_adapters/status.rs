// Status display adapter: maps session state to the on-screen prompt.

use crate::domain::SessionState;
use tokio::sync::watch;
use tracing::info;

pub const START_PROMPT: &str = "Tap the screen to start";
pub const WON_PROMPT: &str = "You won! Tap the screen to restart";
pub const LOST_PROMPT: &str = "You lost! Tap the screen to restart";
pub const IN_PROGRESS_PROMPT: &str = "Pull back and release to launch";

/// Prompt for the given state; nothing is shown while an entry or exit move is playing.
pub fn prompt_for(state: SessionState) -> Option<&'static str> {
    match state {
        SessionState::AwaitingLaunch => Some(START_PROMPT),
        SessionState::Active => Some(IN_PROGRESS_PROMPT),
        SessionState::Won => Some(WON_PROMPT),
        SessionState::Lost => Some(LOST_PROMPT),
        SessionState::TransitioningEntry | SessionState::TransitioningExit => None,
    }
}

/// Logs the prompt every time the session state changes; exits with the controller.
pub async fn status_watcher(mut state_rx: watch::Receiver<SessionState>) {
    loop {
        let state = *state_rx.borrow_and_update();
        if let Some(prompt) = prompt_for(state) {
            info!(?state, prompt, "status prompt");
        }
        if state_rx.changed().await.is_err() {
            break;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transitions_show_no_prompt() {
        assert_eq!(prompt_for(SessionState::TransitioningEntry), None);
        assert_eq!(prompt_for(SessionState::TransitioningExit), None);
    }

    #[test]
    fn terminal_states_invite_a_restart() {
        assert_eq!(prompt_for(SessionState::Won), Some(WON_PROMPT));
        assert_eq!(prompt_for(SessionState::Lost), Some(LOST_PROMPT));
        assert_eq!(prompt_for(SessionState::AwaitingLaunch), Some(START_PROMPT));
    }

    #[test]
    fn loaded_launcher_shows_the_in_progress_prompt() {
        assert_eq!(prompt_for(SessionState::Active), Some(IN_PROGRESS_PROMPT));
    }
}
