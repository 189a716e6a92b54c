// Settle detection: every tracked body at rest, or the release timeout elapsed.

use crate::domain::{EntityRegistry, Kinetic, SessionTuning};
use std::time::Duration;

#[derive(Debug, Clone, Copy)]
pub struct StillnessDetector {
    settle_speed_sq: f32,
    timeout: Duration,
}

impl StillnessDetector {
    pub fn new(settle_speed_sq: f32, timeout: Duration) -> Self {
        Self {
            settle_speed_sq,
            timeout,
        }
    }

    pub fn from_tuning(tuning: &SessionTuning) -> Self {
        Self::new(tuning.settle_speed_sq, tuning.settle_timeout)
    }

    /// True when every existing body is below the squared speed threshold.
    /// Destroyed bodies report no speed and are skipped.
    pub fn at_rest<'a>(&self, bodies: impl IntoIterator<Item = &'a dyn Kinetic>) -> bool {
        bodies
            .into_iter()
            .filter_map(|body| body.speed_sq())
            .all(|speed_sq| speed_sq < self.settle_speed_sq)
    }

    pub fn timed_out(&self, released_at: Duration, now: Duration) -> bool {
        now.saturating_sub(released_at) >= self.timeout
    }

    /// Evaluated fresh every tick; nothing is latched between calls.
    pub fn is_settled(
        &self,
        registry: &EntityRegistry,
        released_at: Duration,
        now: Duration,
    ) -> bool {
        self.timed_out(released_at, now) || self.at_rest(registry.tracked())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::SessionLayout;
    use glam::Vec2;

    fn detector() -> StillnessDetector {
        StillnessDetector::from_tuning(&SessionTuning::default())
    }

    #[test]
    fn fresh_layout_is_at_rest() {
        let registry = EntityRegistry::from_layout(&SessionLayout::demo());
        assert!(detector().is_settled(&registry, Duration::ZERO, Duration::ZERO));
    }

    #[test]
    fn one_moving_obstacle_blocks_settle() {
        let mut registry = EntityRegistry::from_layout(&SessionLayout::demo());
        registry.update_body(22, Vec2::ZERO, Vec2::new(0.0, 0.5));

        assert!(!detector().is_settled(&registry, Duration::ZERO, Duration::from_secs(1)));
    }

    #[test]
    fn destroyed_target_still_carrying_velocity_is_skipped() {
        let mut registry = EntityRegistry::from_layout(&SessionLayout::demo());
        registry.update_body(12, Vec2::ZERO, Vec2::new(3.0, 3.0));
        registry.destroy(12);

        assert!(detector().at_rest(registry.tracked()));
    }

    #[test]
    fn threshold_is_strict() {
        let mut registry = EntityRegistry::from_layout(&SessionLayout::demo());
        let strict = StillnessDetector::new(0.25, Duration::from_secs(5));
        registry.update_body(1, Vec2::ZERO, Vec2::new(0.5, 0.0));
        assert!(!strict.at_rest(registry.tracked()));

        registry.update_body(1, Vec2::ZERO, Vec2::new(0.4, 0.0));
        assert!(strict.at_rest(registry.tracked()));
    }

    #[test]
    fn timeout_fires_at_exactly_five_seconds() {
        let mut registry = EntityRegistry::from_layout(&SessionLayout::demo());
        registry.update_body(1, Vec2::ZERO, Vec2::new(0.0, 1.0));
        let released_at = Duration::from_millis(2_500);

        assert!(!detector().is_settled(&registry, released_at, Duration::from_millis(7_499)));
        assert!(detector().is_settled(&registry, released_at, Duration::from_millis(7_500)));
    }
}
