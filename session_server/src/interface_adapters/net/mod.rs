// HTTP adapters split by inbound session events vs read-only status.

pub mod input;
pub mod status;

pub use input::{physics_handler, primary_action_handler, release_handler};
pub use status::status_handler;
