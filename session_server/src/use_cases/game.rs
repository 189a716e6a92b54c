use super::controller::SessionController;
use super::types::SessionEvent;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{Notify, mpsc};
use tracing::info;

/// Drives the session controller at a fixed tick rate until shutdown.
///
/// Every event queued since the previous tick is applied in arrival order within
/// a single controller step, so the controller never sees concurrent mutation.
pub async fn session_task(
    mut controller: SessionController,
    mut event_rx: mpsc::Receiver<SessionEvent>,
    tick_interval: Duration,
    shutdown: Arc<Notify>,
) {
    let mut interval = tokio::time::interval(tick_interval);
    // A stalled runtime should not replay a burst of catch-up ticks.
    interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            _ = shutdown.notified() => {
                break;
            }
            _ = interval.tick() => {}
        }

        let mut events = Vec::new();
        while let Ok(ev) = event_rx.try_recv() {
            events.push(ev);
        }

        controller.tick(tick_interval, events);
    }

    info!(state = ?controller.state(), "session task stopped");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{SessionLayout, SessionState, SessionTuning};
    use crate::use_cases::test_support::recording_controller;

    #[tokio::test(start_paused = true)]
    async fn queued_input_is_applied_on_the_next_tick() {
        let (controller, _snapshots) =
            recording_controller(SessionLayout::demo(), SessionTuning::default());
        let mut states = controller.subscribe();
        let (event_tx, event_rx) = mpsc::channel(16);
        let shutdown = Arc::new(Notify::new());

        let task = tokio::spawn(session_task(
            controller,
            event_rx,
            Duration::from_millis(16),
            shutdown.clone(),
        ));

        event_tx
            .send(SessionEvent::PrimaryAction)
            .await
            .expect("session task is running");
        states.changed().await.expect("controller alive");
        assert_eq!(*states.borrow(), SessionState::TransitioningEntry);

        shutdown.notify_one();
        task.await.expect("session task exits cleanly");
    }
}
