//! Playback state enumeration

use serde::{Deserialize, Serialize};
use std::fmt;

/// Transport state of the foreground media session.
///
/// Variants follow the Android `PlaybackState.STATE_*` codes 0 through 11.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlaybackState {
    Unknown,
    Stopped,
    Paused,
    Playing,
    FastForwarding,
    Rewinding,
    Buffering,
    Error,
    Connecting,
    SkippingToPrevious,
    SkippingToNext,
    SkippingToQueueItem,
}

impl PlaybackState {
    /// Every state, indexed by its code
    pub const ALL: [PlaybackState; 12] = [
        PlaybackState::Unknown,
        PlaybackState::Stopped,
        PlaybackState::Paused,
        PlaybackState::Playing,
        PlaybackState::FastForwarding,
        PlaybackState::Rewinding,
        PlaybackState::Buffering,
        PlaybackState::Error,
        PlaybackState::Connecting,
        PlaybackState::SkippingToPrevious,
        PlaybackState::SkippingToNext,
        PlaybackState::SkippingToQueueItem,
    ];

    /// Map a `PlaybackState` code. Codes outside 0..=11 are `Unknown`.
    pub fn from_code(code: i64) -> Self {
        usize::try_from(code)
            .ok()
            .and_then(|index| Self::ALL.get(index).copied())
            .unwrap_or(PlaybackState::Unknown)
    }

    pub fn code(self) -> i64 {
        self as i64
    }

    pub fn as_str(self) -> &'static str {
        match self {
            PlaybackState::Unknown => "unknown",
            PlaybackState::Stopped => "stopped",
            PlaybackState::Paused => "paused",
            PlaybackState::Playing => "playing",
            PlaybackState::FastForwarding => "fast_forwarding",
            PlaybackState::Rewinding => "rewinding",
            PlaybackState::Buffering => "buffering",
            PlaybackState::Error => "error",
            PlaybackState::Connecting => "connecting",
            PlaybackState::SkippingToPrevious => "skipping_to_previous",
            PlaybackState::SkippingToNext => "skipping_to_next",
            PlaybackState::SkippingToQueueItem => "skipping_to_queue_item",
        }
    }
}

impl Default for PlaybackState {
    fn default() -> Self {
        PlaybackState::Unknown
    }
}

impl fmt::Display for PlaybackState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
