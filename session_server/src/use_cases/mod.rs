// Use cases layer: the session workflow and its collaborators.

pub mod controller;
pub mod game;
pub mod motion;
pub mod stillness;
pub mod telemetry;
pub mod types;

#[cfg(test)]
pub(crate) mod test_support;

pub use controller::SessionController;
pub use game::session_task;
pub use telemetry::TelemetryReporter;
pub use types::{BodyUpdate, PhysicsFrame, SessionEvent};
