// Domain layer: session entities, rules and ports.

pub mod entities;
pub mod errors;
pub mod ports;
pub mod session;
pub mod snapshot;
pub mod tuning;

pub use entities::{
    BodySpec, EntityId, EntityRegistry, Kinetic, Lane, MechanismState, SessionLayout,
    SessionState,
};
pub use errors::{MotionError, SessionError, TelemetryError};
pub use session::Session;
pub use snapshot::SessionSnapshot;
pub use tuning::SessionTuning;
