// Session aggregate: state, active projectile and the registered entities.

use std::collections::HashSet;
use std::time::Duration;

use super::entities::{EntityRegistry, Projectile, SessionLayout, SessionState};
use super::errors::SessionError;

/// One play-through from the first launch to Won/Lost.
///
/// Only the session controller mutates a `Session`; everyone else reads it.
#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    pub(crate) state: SessionState,
    pub(crate) active_index: usize,
    pub(crate) registry: EntityRegistry,
    // Session clock reading when the active projectile left the launcher.
    pub(crate) released_at: Option<Duration>,
}

impl Session {
    pub fn from_layout(layout: &SessionLayout) -> Result<Self, SessionError> {
        if layout.projectiles.is_empty() {
            return Err(SessionError::NoProjectiles);
        }

        let mut seen = HashSet::new();
        let ids = layout
            .projectiles
            .iter()
            .chain(&layout.targets)
            .chain(&layout.obstacles)
            .map(|spec| spec.id);
        for id in ids {
            if !seen.insert(id) {
                return Err(SessionError::DuplicateEntity(id));
            }
        }

        Ok(Self {
            state: SessionState::AwaitingLaunch,
            active_index: 0,
            registry: EntityRegistry::from_layout(layout),
            released_at: None,
        })
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn active_index(&self) -> usize {
        self.active_index
    }

    pub fn registry(&self) -> &EntityRegistry {
        &self.registry
    }

    pub fn released_at(&self) -> Option<Duration> {
        self.released_at
    }

    pub fn active_projectile(&self) -> &Projectile {
        // from_layout guarantees at least one projectile and the index is clamped.
        &self.registry.projectiles[self.active_index]
    }

    pub fn last_index(&self) -> usize {
        self.registry.projectiles.len() - 1
    }

    pub fn is_last_projectile(&self) -> bool {
        self.active_index == self.last_index()
    }
}
