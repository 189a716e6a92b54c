// Immutable point-in-time view of a session for telemetry.

use glam::Vec2;

use super::entities::{EntityId, Kinetic, MechanismState, SessionState};
use super::session::Session;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodyMotion {
    Moving,
    Idle,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetStatus {
    Alive,
    Destroyed,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BodySnapshot {
    pub position: Vec2,
    pub motion: BodyMotion,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TargetSnapshot {
    // Origin once the target is destroyed.
    pub position: Vec2,
    pub status: TargetStatus,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LaunchSnapshot {
    pub loaded: Option<EntityId>,
    pub mechanism: MechanismState,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SessionSnapshot {
    pub state: SessionState,
    pub projectiles: Vec<BodySnapshot>,
    pub targets: Vec<TargetSnapshot>,
    pub obstacles: Vec<BodySnapshot>,
    pub launch: LaunchSnapshot,
}

impl SessionSnapshot {
    /// Reads the session without touching it. Destroyed projectiles are left out;
    /// destroyed targets stay in place with an origin position.
    pub fn capture(session: &Session, moving_speed_sq: f32) -> Self {
        let registry = session.registry();

        Self {
            state: session.state(),
            projectiles: registry
                .projectiles
                .iter()
                .filter(|p| !p.destroyed)
                .map(|p| BodySnapshot {
                    position: p.position,
                    motion: motion_of(p, moving_speed_sq),
                })
                .collect(),
            targets: registry
                .targets
                .iter()
                .map(|t| {
                    if t.alive {
                        TargetSnapshot {
                            position: t.position,
                            status: TargetStatus::Alive,
                        }
                    } else {
                        TargetSnapshot {
                            position: Vec2::ZERO,
                            status: TargetStatus::Destroyed,
                        }
                    }
                })
                .collect(),
            obstacles: registry
                .obstacles
                .iter()
                .map(|o| BodySnapshot {
                    position: o.position,
                    motion: motion_of(o, moving_speed_sq),
                })
                .collect(),
            launch: LaunchSnapshot {
                loaded: registry.mechanism.loaded,
                mechanism: registry.mechanism.state,
            },
        }
    }
}

fn motion_of(body: &dyn Kinetic, moving_speed_sq: f32) -> BodyMotion {
    match body.speed_sq() {
        Some(speed_sq) if speed_sq > moving_speed_sq => BodyMotion::Moving,
        _ => BodyMotion::Idle,
    }
}
