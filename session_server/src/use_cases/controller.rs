// Session state machine: physics input, move completions, player input and
// settle detection are folded into one deterministic step per tick.

use crate::domain::{
    Lane, MechanismState, Session, SessionError, SessionLayout, SessionSnapshot, SessionState,
    SessionTuning,
};
use crate::use_cases::motion::{Arrival, MotionSequencer, MoveHandle, MovePoll};
use crate::use_cases::stillness::StillnessDetector;
use crate::use_cases::telemetry::TelemetryReporter;
use crate::use_cases::types::{PhysicsFrame, SessionEvent};
use glam::Vec2;
use std::time::Duration;
use tokio::sync::watch;
use tracing::{debug, info, warn};

pub struct SessionController {
    tuning: SessionTuning,
    // Pristine copy of the session as laid out; restarts clone it.
    initial: Session,
    session: Session,
    clock: Duration,
    motion: MotionSequencer,
    stillness: StillnessDetector,
    // Move whose arrival drives the next transition.
    pending: Option<MoveHandle>,
    reporter: TelemetryReporter,
    state_tx: watch::Sender<SessionState>,
}

impl SessionController {
    pub fn new(
        layout: SessionLayout,
        tuning: SessionTuning,
        reporter: TelemetryReporter,
    ) -> Result<Self, SessionError> {
        let initial = Session::from_layout(&layout)?;
        let (state_tx, _state_rx) = watch::channel(initial.state());

        let controller = Self {
            tuning,
            session: initial.clone(),
            initial,
            clock: Duration::ZERO,
            motion: MotionSequencer::new(tuning.min_move_duration),
            stillness: StillnessDetector::from_tuning(&tuning),
            pending: None,
            reporter,
            state_tx,
        };

        info!(
            projectiles = layout.projectiles.len(),
            targets = layout.targets.len(),
            obstacles = layout.obstacles.len(),
            "session created"
        );
        controller.reporter.report(controller.snapshot());
        Ok(controller)
    }

    pub fn state(&self) -> SessionState {
        self.session.state()
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Total simulated time across all ticks, restarts included.
    pub fn clock(&self) -> Duration {
        self.clock
    }

    /// Read-only feed of state changes for the status display.
    pub fn subscribe(&self) -> watch::Receiver<SessionState> {
        self.state_tx.subscribe()
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot::capture(&self.session, self.tuning.moving_speed_sq)
    }

    /// Runs one tick: physics frames, then move completions, then player input,
    /// then settle detection. Moves started during this tick make no progress
    /// until the next one.
    pub fn tick(&mut self, dt: Duration, events: impl IntoIterator<Item = SessionEvent>) {
        self.clock += dt;

        let mut inputs = Vec::new();
        for event in events {
            match event {
                SessionEvent::Physics(frame) => self.apply_physics(frame),
                input => inputs.push(input),
            }
        }

        self.advance_motion(dt);

        for input in inputs {
            self.handle_input(input);
        }

        self.check_settle();
    }

    fn apply_physics(&mut self, frame: PhysicsFrame) {
        let registry = &mut self.session.registry;
        for id in frame.destroyed {
            if registry.destroy(id) {
                info!(id, "entity destroyed");
            }
        }
        for body in frame.bodies {
            if !registry.update_body(body.id, body.position, body.velocity) {
                debug!(id = body.id, "update for unknown or destroyed body ignored");
            }
        }
        // The return move owns the camera once it starts.
        if let Some(position) = frame.camera {
            if registry.camera.following && !self.motion.is_busy(Lane::Camera) {
                registry.camera.position = position;
            }
        }
    }

    fn advance_motion(&mut self, dt: Duration) {
        self.motion.advance(dt);

        if let Some(position) = self.motion.position(Lane::Projectile) {
            let index = self.session.active_index;
            self.session.registry.projectiles[index].position = position;
        }
        if let Some(position) = self.motion.position(Lane::Camera) {
            self.session.registry.camera.position = position;
        }

        let Some(handle) = self.pending.as_mut() else {
            return;
        };
        match handle.poll() {
            MovePoll::Pending => {}
            MovePoll::Arrived(arrival) => {
                self.pending = None;
                self.on_arrival(arrival);
            }
            MovePoll::Abandoned => {
                warn!(lane = ?handle.lane(), "move abandoned before arrival");
                self.pending = None;
            }
        }
    }

    fn on_arrival(&mut self, arrival: Arrival) {
        match (self.session.state, arrival.lane) {
            (SessionState::TransitioningEntry, Lane::Projectile) => self.arm(arrival.position),
            (SessionState::TransitioningExit, Lane::Camera) => self.conclude_shot(arrival.position),
            (state, lane) => debug!(?state, ?lane, "arrival ignored"),
        }
    }

    fn handle_input(&mut self, event: SessionEvent) {
        match (self.session.state, event) {
            (SessionState::AwaitingLaunch, SessionEvent::PrimaryAction) => self.load_next(),
            (state, SessionEvent::PrimaryAction) if state.is_terminal() => self.restart(),
            (SessionState::Active, SessionEvent::ProjectileReleased { velocity }) => {
                self.release(velocity)
            }
            (state, event) => debug!(?state, ?event, "input ignored"),
        }
    }

    fn load_next(&mut self) {
        let snapshot = self.snapshot();
        let from = self.session.active_projectile().position;
        let to = self.session.registry.mechanism.launch_position;

        match self
            .motion
            .begin_move(Lane::Projectile, from, to, self.tuning.entry_speed)
        {
            Ok(handle) => {
                self.reporter.report(snapshot);
                self.pending = Some(handle);
                self.transition(SessionState::TransitioningEntry);
            }
            Err(e) => warn!(error = %e, "projectile move rejected"),
        }
    }

    fn arm(&mut self, at: Vec2) {
        let index = self.session.active_index;
        let projectile = &mut self.session.registry.projectiles[index];
        projectile.position = at;
        projectile.velocity = Vec2::ZERO;
        let id = projectile.id;

        let mechanism = &mut self.session.registry.mechanism;
        mechanism.enabled = true;
        mechanism.loaded = Some(id);
        mechanism.state = MechanismState::Loaded;

        self.transition(SessionState::Active);
    }

    fn release(&mut self, velocity: Vec2) {
        let mechanism = &self.session.registry.mechanism;
        if !mechanism.enabled || mechanism.state != MechanismState::Loaded {
            debug!(mechanism = ?mechanism.state, "release ignored");
            return;
        }

        let index = self.session.active_index;
        let projectile = &mut self.session.registry.projectiles[index];
        projectile.velocity = velocity;
        let id = projectile.id;

        self.session.registry.mechanism.state = MechanismState::Released;
        self.session.registry.camera.following = true;
        self.session.released_at = Some(self.clock);
        info!(projectile = id, vx = velocity.x, vy = velocity.y, "projectile released");
    }

    fn check_settle(&mut self) {
        if self.session.state != SessionState::Active {
            return;
        }
        let Some(released_at) = self.session.released_at else {
            return;
        };
        if !self
            .stillness
            .is_settled(&self.session.registry, released_at, self.clock)
        {
            return;
        }

        let snapshot = self.snapshot();
        let camera = &self.session.registry.camera;
        match self.motion.begin_move(
            Lane::Camera,
            camera.position,
            camera.rest_position,
            self.tuning.exit_speed,
        ) {
            Ok(handle) => {
                self.session.registry.mechanism.enabled = false;
                self.reporter.report(snapshot);
                self.pending = Some(handle);
                info!(
                    flight_ms = self.clock.saturating_sub(released_at).as_millis() as u64,
                    "shot settled"
                );
                self.transition(SessionState::TransitioningExit);
            }
            Err(e) => warn!(error = %e, "camera move rejected"),
        }
    }

    fn conclude_shot(&mut self, at: Vec2) {
        let camera = &mut self.session.registry.camera;
        camera.position = at;
        camera.following = false;

        // Win is checked first so a last shot that clears the board still wins.
        if self.session.registry.all_targets_destroyed() {
            self.transition(SessionState::Won);
        } else if self.session.is_last_projectile() {
            self.transition(SessionState::Lost);
        } else {
            self.session.active_index += 1;
            self.session.released_at = None;
            self.session.registry.mechanism.reset();
            self.transition(SessionState::AwaitingLaunch);
            if self.tuning.auto_advance {
                self.load_next();
            }
        }
    }

    fn restart(&mut self) {
        self.reporter.report(self.snapshot());

        self.motion.clear();
        self.pending = None;
        let previous = self.session.state;
        self.session = self.initial.clone();

        info!(from = ?previous, to = ?self.session.state, "session restarted");
        self.state_tx.send_replace(self.session.state);
        self.reporter.report(self.snapshot());
    }

    fn transition(&mut self, next: SessionState) {
        let previous = std::mem::replace(&mut self.session.state, next);
        info!(
            from = ?previous,
            to = ?next,
            projectile_index = self.session.active_index,
            "session state changed"
        );
        self.state_tx.send_replace(next);
    }
}
