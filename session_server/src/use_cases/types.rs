// Use-case level inputs for the session loop.

use crate::domain::EntityId;
use glam::Vec2;

#[derive(Debug, Clone, PartialEq)]
pub enum SessionEvent {
    /// The single abstract player action (tap / pointer release).
    PrimaryAction,
    /// The launcher let go of the loaded projectile with this initial velocity.
    ProjectileReleased { velocity: Vec2 },
    /// Per-tick body state reported by the physics engine.
    Physics(PhysicsFrame),
}

#[derive(Debug, Clone, PartialEq)]
pub struct BodyUpdate {
    pub id: EntityId,
    pub position: Vec2,
    pub velocity: Vec2,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PhysicsFrame {
    pub bodies: Vec<BodyUpdate>,
    /// Targets or projectiles removed from the world this frame.
    pub destroyed: Vec<EntityId>,
    /// Camera position while it follows the projectile in flight.
    pub camera: Option<Vec2>,
}
