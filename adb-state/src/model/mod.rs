//! State model types

mod device_state;
mod field;
mod playback_action;
mod playback_state;
mod state_change;
mod wakefulness;

pub use device_state::DeviceState;
pub use field::{Field, FieldValue};
pub use playback_action::{PlaybackAction, PlaybackActions};
pub use playback_state::PlaybackState;
pub use state_change::StateChange;
pub use wakefulness::Wakefulness;
