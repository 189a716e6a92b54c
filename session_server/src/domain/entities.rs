// Domain-level session entities: projectiles, targets, obstacles and the launcher.

use glam::Vec2;

pub type EntityId = u64;

/// High-level phase of a launch session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// Waiting for the primary action before loading the next projectile.
    AwaitingLaunch,
    /// Active projectile is travelling to the launch position.
    TransitioningEntry,
    /// Projectile is loaded (or in flight) and the launcher is enabled.
    Active,
    /// Camera is returning to its rest position after the shot settled.
    TransitioningExit,
    Won,
    Lost,
}

impl SessionState {
    pub fn is_terminal(self) -> bool {
        matches!(self, SessionState::Won | SessionState::Lost)
    }
}

/// Activity state of the launch mechanism.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MechanismState {
    Idle,
    Loaded,
    Released,
}

/// Independent animation lanes driven by the motion sequencer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Lane {
    Projectile,
    Camera,
}

/// Anything whose motion takes part in settle detection.
pub trait Kinetic {
    /// Squared speed, or `None` when the entity no longer exists in the world.
    fn speed_sq(&self) -> Option<f32>;
}

#[derive(Debug, Clone, PartialEq)]
pub struct Projectile {
    pub id: EntityId,
    // Position in the launch order; never changes after registration.
    pub ordinal: usize,
    pub position: Vec2,
    pub velocity: Vec2,
    pub destroyed: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Target {
    pub id: EntityId,
    pub position: Vec2,
    pub velocity: Vec2,
    pub alive: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Obstacle {
    pub id: EntityId,
    pub position: Vec2,
    pub velocity: Vec2,
}

impl Kinetic for Projectile {
    fn speed_sq(&self) -> Option<f32> {
        (!self.destroyed).then(|| self.velocity.length_squared())
    }
}

impl Kinetic for Target {
    fn speed_sq(&self) -> Option<f32> {
        self.alive.then(|| self.velocity.length_squared())
    }
}

impl Kinetic for Obstacle {
    fn speed_sq(&self) -> Option<f32> {
        Some(self.velocity.length_squared())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct LaunchMechanism {
    pub enabled: bool,
    pub loaded: Option<EntityId>,
    pub state: MechanismState,
    /// Where projectiles wait to be released.
    pub launch_position: Vec2,
}

impl LaunchMechanism {
    pub fn new(launch_position: Vec2) -> Self {
        Self {
            enabled: false,
            loaded: None,
            state: MechanismState::Idle,
            launch_position,
        }
    }

    /// Back to an empty, disabled launcher.
    pub fn reset(&mut self) {
        self.enabled = false;
        self.loaded = None;
        self.state = MechanismState::Idle;
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Camera {
    pub position: Vec2,
    pub rest_position: Vec2,
    // Set while the presentation layer tracks the projectile in flight.
    pub following: bool,
}

/// Placement of one body in a level layout.
#[derive(Debug, Clone, PartialEq)]
pub struct BodySpec {
    pub id: EntityId,
    pub position: Vec2,
}

/// Initial placement of every entity; a fresh session is built from this on restart.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionLayout {
    pub projectiles: Vec<BodySpec>,
    pub targets: Vec<BodySpec>,
    pub obstacles: Vec<BodySpec>,
    pub launch_position: Vec2,
    pub camera_rest_position: Vec2,
}

impl SessionLayout {
    /// Three projectiles queued left of the launcher, three targets in a small fort.
    pub fn demo() -> Self {
        let body = |id, x, y| BodySpec {
            id,
            position: Vec2::new(x, y),
        };
        Self {
            projectiles: vec![body(1, -9.0, -3.0), body(2, -10.0, -3.0), body(3, -11.0, -3.0)],
            targets: vec![body(10, 6.0, -3.0), body(11, 8.5, -3.0), body(12, 7.2, 0.4)],
            obstacles: vec![
                body(20, 5.0, -2.5),
                body(21, 7.2, -2.5),
                body(22, 9.5, -2.5),
                body(23, 7.2, -0.8),
            ],
            launch_position: Vec2::new(-6.0, -1.5),
            camera_rest_position: Vec2::new(0.0, 0.0),
        }
    }
}

/// Every entity handle for the current session. Pure data; no transition logic.
#[derive(Debug, Clone, PartialEq)]
pub struct EntityRegistry {
    pub projectiles: Vec<Projectile>,
    pub targets: Vec<Target>,
    pub obstacles: Vec<Obstacle>,
    pub mechanism: LaunchMechanism,
    pub camera: Camera,
}

impl EntityRegistry {
    pub fn from_layout(layout: &SessionLayout) -> Self {
        Self {
            projectiles: layout
                .projectiles
                .iter()
                .enumerate()
                .map(|(ordinal, spec)| Projectile {
                    id: spec.id,
                    ordinal,
                    position: spec.position,
                    velocity: Vec2::ZERO,
                    destroyed: false,
                })
                .collect(),
            targets: layout
                .targets
                .iter()
                .map(|spec| Target {
                    id: spec.id,
                    position: spec.position,
                    velocity: Vec2::ZERO,
                    alive: true,
                })
                .collect(),
            obstacles: layout
                .obstacles
                .iter()
                .map(|spec| Obstacle {
                    id: spec.id,
                    position: spec.position,
                    velocity: Vec2::ZERO,
                })
                .collect(),
            mechanism: LaunchMechanism::new(layout.launch_position),
            camera: Camera {
                position: layout.camera_rest_position,
                rest_position: layout.camera_rest_position,
                following: false,
            },
        }
    }

    pub fn all_targets_destroyed(&self) -> bool {
        self.targets.iter().all(|t| !t.alive)
    }

    /// Every entity whose motion counts towards settling.
    pub fn tracked(&self) -> impl Iterator<Item = &dyn Kinetic> {
        self.projectiles
            .iter()
            .map(|p| p as &dyn Kinetic)
            .chain(self.targets.iter().map(|t| t as &dyn Kinetic))
            .chain(self.obstacles.iter().map(|o| o as &dyn Kinetic))
    }

    /// Applies a physics update to the body with `id`. Returns false for unknown
    /// or destroyed bodies.
    pub fn update_body(&mut self, id: EntityId, position: Vec2, velocity: Vec2) -> bool {
        if let Some(p) = self.projectiles.iter_mut().find(|p| p.id == id) {
            if p.destroyed {
                return false;
            }
            p.position = position;
            p.velocity = velocity;
            return true;
        }
        if let Some(t) = self.targets.iter_mut().find(|t| t.id == id) {
            if !t.alive {
                return false;
            }
            t.position = position;
            t.velocity = velocity;
            return true;
        }
        if let Some(o) = self.obstacles.iter_mut().find(|o| o.id == id) {
            o.position = position;
            o.velocity = velocity;
            return true;
        }
        false
    }

    /// Marks a target or projectile destroyed. Obstacles cannot be destroyed.
    pub fn destroy(&mut self, id: EntityId) -> bool {
        if let Some(t) = self.targets.iter_mut().find(|t| t.id == id && t.alive) {
            t.alive = false;
            t.velocity = Vec2::ZERO;
            return true;
        }
        if let Some(p) = self
            .projectiles
            .iter_mut()
            .find(|p| p.id == id && !p.destroyed)
        {
            p.destroyed = true;
            p.velocity = Vec2::ZERO;
            return true;
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn destroyed_bodies_are_not_tracked_as_moving() {
        let mut registry = EntityRegistry::from_layout(&SessionLayout::demo());
        assert!(registry.update_body(10, Vec2::new(6.0, -3.0), Vec2::new(4.0, 0.0)));
        assert!(registry.destroy(10));

        let speeds: Vec<Option<f32>> = registry.tracked().map(|k| k.speed_sq()).collect();
        assert_eq!(speeds.iter().filter(|s| s.is_none()).count(), 1);
        assert!(speeds.iter().flatten().all(|s| *s == 0.0));
    }

    #[test]
    fn obstacles_cannot_be_destroyed() {
        let mut registry = EntityRegistry::from_layout(&SessionLayout::demo());
        assert!(!registry.destroy(20));
        assert_eq!(registry.obstacles.len(), 4);
    }

    #[test]
    fn updates_to_destroyed_targets_are_ignored() {
        let mut registry = EntityRegistry::from_layout(&SessionLayout::demo());
        registry.destroy(11);
        assert!(!registry.update_body(11, Vec2::ONE, Vec2::ONE));
        assert!(!registry.update_body(999, Vec2::ONE, Vec2::ONE));
    }

    #[test]
    fn projectiles_keep_layout_order() {
        let registry = EntityRegistry::from_layout(&SessionLayout::demo());
        let ordinals: Vec<usize> = registry.projectiles.iter().map(|p| p.ordinal).collect();
        assert_eq!(ordinals, vec![0, 1, 2]);
        assert!(!registry.mechanism.enabled);
    }
}
