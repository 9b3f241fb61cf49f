//! Named observable fields and their values

use serde::Serialize;
use std::fmt;

use super::{PlaybackActions, PlaybackState, Wakefulness};

/// An observable field of [`DeviceState`](super::DeviceState).
///
/// Identity fields (serial number, device name) are fixed at connect time and
/// are not listed here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    ForegroundAppPackage,
    CurrentWindow,
    ForegroundApp,
    PlaybackDuration,
    PlaybackTitle,
    PlaybackArtist,
    PlaybackAlbum,
    PlaybackTrack,
    PlaybackTrackCount,
    PlaybackState,
    PlaybackPosition,
    PlaybackSpeed,
    PlaybackActions,
    Wakefulness,
}

impl Field {
    /// Every field, in the order changes are reported
    pub const ALL: [Field; 14] = [
        Field::ForegroundAppPackage,
        Field::CurrentWindow,
        Field::ForegroundApp,
        Field::PlaybackDuration,
        Field::PlaybackTitle,
        Field::PlaybackArtist,
        Field::PlaybackAlbum,
        Field::PlaybackTrack,
        Field::PlaybackTrackCount,
        Field::PlaybackState,
        Field::PlaybackPosition,
        Field::PlaybackSpeed,
        Field::PlaybackActions,
        Field::Wakefulness,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Field::ForegroundAppPackage => "foreground_app_package",
            Field::CurrentWindow => "current_window",
            Field::ForegroundApp => "foreground_app",
            Field::PlaybackDuration => "playback_duration",
            Field::PlaybackTitle => "playback_title",
            Field::PlaybackArtist => "playback_artist",
            Field::PlaybackAlbum => "playback_album",
            Field::PlaybackTrack => "playback_track",
            Field::PlaybackTrackCount => "playback_track_count",
            Field::PlaybackState => "playback_state",
            Field::PlaybackPosition => "playback_position",
            Field::PlaybackSpeed => "playback_speed",
            Field::PlaybackActions => "playback_actions",
            Field::Wakefulness => "wakefulness",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Value carried by a [`Field`]
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum FieldValue {
    Text(String),
    /// Seconds, absent when the session did not report them
    Seconds(Option<f64>),
    /// Playback rate, 1.0 being normal speed
    Rate(Option<f64>),
    Number(Option<u32>),
    State(PlaybackState),
    Actions(PlaybackActions),
    Wakefulness(Option<Wakefulness>),
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Text(text) => write!(f, "{:?}", text),
            FieldValue::Seconds(Some(seconds)) => write!(f, "{:.3}s", seconds),
            FieldValue::Rate(Some(rate)) => write!(f, "{}x", rate),
            FieldValue::Number(Some(number)) => write!(f, "{}", number),
            FieldValue::State(state) => write!(f, "{}", state),
            FieldValue::Actions(actions) => {
                let names: Vec<&str> = actions.iter().map(|a| a.as_str()).collect();
                write!(f, "[{}]", names.join(", "))
            }
            FieldValue::Wakefulness(Some(state)) => write!(f, "{}", state),
            FieldValue::Seconds(None)
            | FieldValue::Rate(None)
            | FieldValue::Number(None)
            | FieldValue::Wakefulness(None) => f.write_str("-"),
        }
    }
}
