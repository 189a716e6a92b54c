// Wire DTOs and conversions for the session server's JSON surfaces:
// telemetry snapshots, physics/input requests and the status response.

use crate::domain::snapshot::{
    BodyMotion, BodySnapshot, LaunchSnapshot, TargetSnapshot, TargetStatus,
};
use crate::domain::{
    BodySpec, EntityId, MechanismState, SessionLayout, SessionSnapshot, SessionState,
};
use crate::use_cases::{BodyUpdate, PhysicsFrame};
use glam::Vec2;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VectorDto {
    pub x: f32,
    pub y: f32,
}

impl From<Vec2> for VectorDto {
    fn from(v: Vec2) -> Self {
        Self { x: v.x, y: v.y }
    }
}

impl From<VectorDto> for Vec2 {
    fn from(v: VectorDto) -> Self {
        Vec2::new(v.x, v.y)
    }
}

/// Session lifecycle state as it appears on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionStateDto {
    AwaitingLaunch,
    TransitioningEntry,
    Active,
    TransitioningExit,
    Won,
    Lost,
}

impl From<SessionState> for SessionStateDto {
    fn from(state: SessionState) -> Self {
        match state {
            SessionState::AwaitingLaunch => SessionStateDto::AwaitingLaunch,
            SessionState::TransitioningEntry => SessionStateDto::TransitioningEntry,
            SessionState::Active => SessionStateDto::Active,
            SessionState::TransitioningExit => SessionStateDto::TransitioningExit,
            SessionState::Won => SessionStateDto::Won,
            SessionState::Lost => SessionStateDto::Lost,
        }
    }
}

impl From<SessionStateDto> for SessionState {
    fn from(state: SessionStateDto) -> Self {
        match state {
            SessionStateDto::AwaitingLaunch => SessionState::AwaitingLaunch,
            SessionStateDto::TransitioningEntry => SessionState::TransitioningEntry,
            SessionStateDto::Active => SessionState::Active,
            SessionStateDto::TransitioningExit => SessionState::TransitioningExit,
            SessionStateDto::Won => SessionState::Won,
            SessionStateDto::Lost => SessionState::Lost,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MechanismStateDto {
    Idle,
    Loaded,
    Released,
}

impl From<MechanismState> for MechanismStateDto {
    fn from(state: MechanismState) -> Self {
        match state {
            MechanismState::Idle => MechanismStateDto::Idle,
            MechanismState::Loaded => MechanismStateDto::Loaded,
            MechanismState::Released => MechanismStateDto::Released,
        }
    }
}

impl From<MechanismStateDto> for MechanismState {
    fn from(state: MechanismStateDto) -> Self {
        match state {
            MechanismStateDto::Idle => MechanismState::Idle,
            MechanismStateDto::Loaded => MechanismState::Loaded,
            MechanismStateDto::Released => MechanismState::Released,
        }
    }
}

/// Moving/Idle for bodies, Alive/Destroyed for targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BodyStateDto {
    Moving,
    Idle,
    Alive,
    Destroyed,
}

/// One entry of the projectile, target or obstacle lists in a snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BodyStateEntryDto {
    pub position: VectorDto,
    pub state: BodyStateDto,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LaunchDto {
    pub loaded_projectile: Option<EntityId>,
    pub mechanism_state: MechanismStateDto,
}

/// Telemetry payload posted for every captured snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SnapshotDto {
    pub current_state: SessionStateDto,
    pub projectiles: Vec<BodyStateEntryDto>,
    pub targets: Vec<BodyStateEntryDto>,
    pub obstacles: Vec<BodyStateEntryDto>,
    pub launch: LaunchDto,
}

/// Raised when a wire snapshot carries a state that does not fit its list.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("{list} entry has unexpected state {state:?}")]
pub struct SnapshotDecodeError {
    pub list: &'static str,
    pub state: BodyStateDto,
}

fn body_entry(body: &BodySnapshot) -> BodyStateEntryDto {
    BodyStateEntryDto {
        position: body.position.into(),
        state: match body.motion {
            BodyMotion::Moving => BodyStateDto::Moving,
            BodyMotion::Idle => BodyStateDto::Idle,
        },
    }
}

fn body_from_entry(
    list: &'static str,
    entry: &BodyStateEntryDto,
) -> Result<BodySnapshot, SnapshotDecodeError> {
    let motion = match entry.state {
        BodyStateDto::Moving => BodyMotion::Moving,
        BodyStateDto::Idle => BodyMotion::Idle,
        state => return Err(SnapshotDecodeError { list, state }),
    };
    Ok(BodySnapshot {
        position: entry.position.into(),
        motion,
    })
}

impl From<&SessionSnapshot> for SnapshotDto {
    fn from(snapshot: &SessionSnapshot) -> Self {
        Self {
            current_state: snapshot.state.into(),
            projectiles: snapshot.projectiles.iter().map(body_entry).collect(),
            targets: snapshot
                .targets
                .iter()
                .map(|target| BodyStateEntryDto {
                    position: target.position.into(),
                    state: match target.status {
                        TargetStatus::Alive => BodyStateDto::Alive,
                        TargetStatus::Destroyed => BodyStateDto::Destroyed,
                    },
                })
                .collect(),
            obstacles: snapshot.obstacles.iter().map(body_entry).collect(),
            launch: LaunchDto {
                loaded_projectile: snapshot.launch.loaded,
                mechanism_state: snapshot.launch.mechanism.into(),
            },
        }
    }
}

impl TryFrom<SnapshotDto> for SessionSnapshot {
    type Error = SnapshotDecodeError;

    fn try_from(dto: SnapshotDto) -> Result<Self, Self::Error> {
        let projectiles = dto
            .projectiles
            .iter()
            .map(|entry| body_from_entry("projectiles", entry))
            .collect::<Result<Vec<_>, _>>()?;
        let obstacles = dto
            .obstacles
            .iter()
            .map(|entry| body_from_entry("obstacles", entry))
            .collect::<Result<Vec<_>, _>>()?;
        let targets = dto
            .targets
            .iter()
            .map(|entry| {
                let status = match entry.state {
                    BodyStateDto::Alive => TargetStatus::Alive,
                    BodyStateDto::Destroyed => TargetStatus::Destroyed,
                    state => {
                        return Err(SnapshotDecodeError {
                            list: "targets",
                            state,
                        });
                    }
                };
                Ok(TargetSnapshot {
                    position: entry.position.into(),
                    status,
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(SessionSnapshot {
            state: dto.current_state.into(),
            projectiles,
            targets,
            obstacles,
            launch: LaunchSnapshot {
                loaded: dto.launch.loaded_projectile,
                mechanism: dto.launch.mechanism_state.into(),
            },
        })
    }
}

/// Body pose reported by the physics engine.
#[derive(Debug, Clone, Deserialize)]
pub struct BodyUpdateDto {
    pub id: EntityId,
    pub position: VectorDto,
    #[serde(default = "VectorDto::zero")]
    pub velocity: VectorDto,
}

impl VectorDto {
    fn zero() -> Self {
        Self { x: 0.0, y: 0.0 }
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

/// Per-tick physics frame posted by the engine.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PhysicsFrameDto {
    #[serde(default)]
    pub bodies: Vec<BodyUpdateDto>,
    #[serde(default)]
    pub destroyed: Vec<EntityId>,
    #[serde(default)]
    pub camera: Option<VectorDto>,
}

impl PhysicsFrameDto {
    /// Out-of-range JSON numbers decode to infinity; such frames are refused.
    pub fn is_finite(&self) -> bool {
        self.bodies
            .iter()
            .all(|body| body.position.is_finite() && body.velocity.is_finite())
            && self.camera.is_none_or(|camera| camera.is_finite())
    }
}

impl From<PhysicsFrameDto> for PhysicsFrame {
    fn from(frame: PhysicsFrameDto) -> Self {
        Self {
            bodies: frame
                .bodies
                .into_iter()
                .map(|body| BodyUpdate {
                    id: body.id,
                    position: body.position.into(),
                    velocity: body.velocity.into(),
                })
                .collect(),
            destroyed: frame.destroyed,
            camera: frame.camera.map(Vec2::from),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct BodySpecDto {
    pub id: EntityId,
    pub position: VectorDto,
}

/// Level file contents. Positions use the same `{x, y}` form as every other payload.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutDto {
    pub projectiles: Vec<BodySpecDto>,
    pub targets: Vec<BodySpecDto>,
    #[serde(default)]
    pub obstacles: Vec<BodySpecDto>,
    pub launch_position: VectorDto,
    pub camera_rest_position: VectorDto,
}

impl From<LayoutDto> for SessionLayout {
    fn from(dto: LayoutDto) -> Self {
        let specs = |bodies: Vec<BodySpecDto>| -> Vec<BodySpec> {
            bodies
                .into_iter()
                .map(|body| BodySpec {
                    id: body.id,
                    position: body.position.into(),
                })
                .collect()
        };
        Self {
            projectiles: specs(dto.projectiles),
            targets: specs(dto.targets),
            obstacles: specs(dto.obstacles),
            launch_position: dto.launch_position.into(),
            camera_rest_position: dto.camera_rest_position.into(),
        }
    }
}

/// Launcher release payload: the initial velocity given to the projectile.
#[derive(Debug, Clone, Deserialize)]
pub struct ReleaseRequest {
    pub velocity: VectorDto,
}

/// Current state plus the prompt the status display should show.
#[derive(Debug, Clone, Serialize)]
pub struct StatusResponse {
    pub state: SessionStateDto,
    pub prompt: Option<&'static str>,
}
