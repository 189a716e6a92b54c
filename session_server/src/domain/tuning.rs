use std::time::Duration;

/// Gameplay tuning for the session flow.
///
/// Keep this separate from runtime/server configuration (tick rates, buffer sizes, etc.).
#[derive(Debug, Clone, Copy)]
pub struct SessionTuning {
    /// Squared speed under which every tracked body counts as resting.
    pub settle_speed_sq: f32,

    /// Time after release at which the shot is treated as settled regardless of motion.
    pub settle_timeout: Duration,

    /// Squared speed above which snapshots report a body as moving.
    pub moving_speed_sq: f32,

    /// Floor applied to zero-length animated moves.
    pub min_move_duration: Duration,

    /// Distance units per second when bringing a projectile to the launcher.
    pub entry_speed: f32,

    /// Distance units per second when returning the camera to rest.
    pub exit_speed: f32,

    /// Load the next projectile without waiting for input after a shot.
    pub auto_advance: bool,
}

impl Default for SessionTuning {
    fn default() -> Self {
        Self {
            settle_speed_sq: 0.05,
            settle_timeout: Duration::from_secs(5),
            moving_speed_sq: 0.01,
            min_move_duration: Duration::from_millis(100),
            entry_speed: 10.0,
            exit_speed: 10.0,
            auto_advance: false,
        }
    }
}
