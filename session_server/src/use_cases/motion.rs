// Animated moves on independent lanes, resolved by the session tick.

use crate::domain::{Lane, MotionError};
use glam::Vec2;
use std::collections::HashMap;
use std::time::Duration;
use tokio::sync::oneshot;

/// Delivered exactly once when a move reaches its destination.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Arrival {
    pub lane: Lane,
    pub position: Vec2,
    /// Sequencer time spent on the move (never below the clamped minimum).
    pub elapsed: Duration,
}

/// Outcome of polling a move between ticks.
#[derive(Debug, PartialEq)]
pub enum MovePoll {
    Pending,
    Arrived(Arrival),
    /// The sequencer was cleared before the move finished.
    Abandoned,
}

/// Completion promise for one move, resolved inside [`MotionSequencer::advance`].
#[derive(Debug)]
pub struct MoveHandle {
    lane: Lane,
    rx: oneshot::Receiver<Arrival>,
}

impl MoveHandle {
    pub fn lane(&self) -> Lane {
        self.lane
    }

    pub fn poll(&mut self) -> MovePoll {
        match self.rx.try_recv() {
            Ok(arrival) => MovePoll::Arrived(arrival),
            Err(oneshot::error::TryRecvError::Empty) => MovePoll::Pending,
            Err(oneshot::error::TryRecvError::Closed) => MovePoll::Abandoned,
        }
    }
}

struct ActiveMove {
    from: Vec2,
    to: Vec2,
    duration: Duration,
    elapsed: Duration,
    done: oneshot::Sender<Arrival>,
}

impl ActiveMove {
    fn position(&self) -> Vec2 {
        let t = self.elapsed.as_secs_f32() / self.duration.as_secs_f32();
        self.from.lerp(self.to, t.clamp(0.0, 1.0))
    }
}

/// Runs at most one move per lane. A request on a busy lane is rejected and
/// the move already in flight keeps running untouched.
pub struct MotionSequencer {
    min_duration: Duration,
    lanes: HashMap<Lane, ActiveMove>,
}

impl MotionSequencer {
    pub fn new(min_duration: Duration) -> Self {
        Self {
            min_duration,
            lanes: HashMap::new(),
        }
    }

    /// `distance / speed_factor` seconds, with a zero result raised to the floor.
    /// Durations too long to represent saturate at `Duration::MAX`.
    pub fn move_duration(
        &self,
        from: Vec2,
        to: Vec2,
        speed_factor: f32,
    ) -> Result<Duration, MotionError> {
        if !speed_factor.is_finite() || speed_factor <= 0.0 {
            return Err(MotionError::InvalidSpeed(speed_factor));
        }
        let distance = from.distance(to);
        if !distance.is_finite() {
            return Err(MotionError::InvalidDistance(distance));
        }
        // f64 keeps tenth-of-a-second moves on whole nanoseconds.
        let secs = f64::from(distance) / f64::from(speed_factor);
        let duration = Duration::try_from_secs_f64(secs).unwrap_or(Duration::MAX);
        if duration.is_zero() {
            return Ok(self.min_duration);
        }
        Ok(duration)
    }

    pub fn begin_move(
        &mut self,
        lane: Lane,
        from: Vec2,
        to: Vec2,
        speed_factor: f32,
    ) -> Result<MoveHandle, MotionError> {
        if self.lanes.contains_key(&lane) {
            return Err(MotionError::LaneBusy(lane));
        }
        let duration = self.move_duration(from, to, speed_factor)?;
        let (done, rx) = oneshot::channel();
        self.lanes.insert(
            lane,
            ActiveMove {
                from,
                to,
                duration,
                elapsed: Duration::ZERO,
                done,
            },
        );
        Ok(MoveHandle { lane, rx })
    }

    pub fn is_busy(&self, lane: Lane) -> bool {
        self.lanes.contains_key(&lane)
    }

    /// Interpolated position of the move in flight on `lane`.
    pub fn position(&self, lane: Lane) -> Option<Vec2> {
        self.lanes.get(&lane).map(ActiveMove::position)
    }

    /// Advances every lane by `dt` and resolves the moves that reached their target.
    pub fn advance(&mut self, dt: Duration) {
        for active in self.lanes.values_mut() {
            active.elapsed += dt;
        }

        let finished: Vec<Lane> = self
            .lanes
            .iter()
            .filter(|(_, active)| active.elapsed >= active.duration)
            .map(|(lane, _)| *lane)
            .collect();

        for lane in finished {
            if let Some(active) = self.lanes.remove(&lane) {
                // Receiver may already be gone after a restart; nothing to notify then.
                let _ = active.done.send(Arrival {
                    lane,
                    position: active.to,
                    elapsed: active.elapsed,
                });
            }
        }
    }

    /// Drops every move in flight; their handles report `Abandoned`.
    pub fn clear(&mut self) {
        self.lanes.clear();
    }
}
