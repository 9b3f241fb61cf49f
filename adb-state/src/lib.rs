//! Device state for adb-mirror
//!
//! Holds the structured mirror of one Android device: identity, foreground
//! app, and now-playing information. A refresh produces a complete candidate
//! [`DeviceState`]; [`DeviceState::commit`] folds it into the current state
//! and reports one [`StateChange`] per field whose value actually differs.
//!
//! ```rust
//! use adb_state::{DeviceState, Field, FieldValue, PlaybackState};
//!
//! let mut current = DeviceState::new("0423417004213", "Living Room");
//! let mut next = current.identity();
//! next.playback_state = PlaybackState::Playing;
//!
//! let changes = current.commit(next);
//! assert_eq!(changes.len(), 1);
//! assert_eq!(changes[0].field, Field::PlaybackState);
//! assert_eq!(changes[0].value, FieldValue::State(PlaybackState::Playing));
//! ```

pub mod model;

pub use model::{
    DeviceState, Field, FieldValue, PlaybackAction, PlaybackActions, PlaybackState, StateChange,
    Wakefulness,
};
