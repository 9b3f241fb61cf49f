//! The structured mirror of one device

use serde::{Deserialize, Serialize};

use super::{Field, FieldValue, PlaybackActions, PlaybackState, StateChange, Wakefulness};

/// Current attribute values of a device.
///
/// `serialno` and `device_name` are identity and are never touched by
/// [`commit`](DeviceState::commit). Every other field is either the last
/// committed value or its default.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DeviceState {
    pub serialno: String,
    pub device_name: String,

    pub foreground_app_package: String,
    pub current_window: String,
    /// Human label of the foreground app, empty if unresolved
    pub foreground_app: String,

    pub playback_state: PlaybackState,
    /// Seconds, within `[0, playback_duration]` whenever a duration is known
    pub playback_position: Option<f64>,
    pub playback_duration: Option<f64>,
    pub playback_speed: Option<f64>,
    pub playback_actions: PlaybackActions,
    pub playback_title: String,
    pub playback_artist: String,
    pub playback_album: String,
    pub playback_track: Option<u32>,
    pub playback_track_count: Option<u32>,

    pub wakefulness: Option<Wakefulness>,
}

impl DeviceState {
    pub fn new(serialno: impl Into<String>, device_name: impl Into<String>) -> Self {
        Self {
            serialno: serialno.into(),
            device_name: device_name.into(),
            ..Default::default()
        }
    }

    /// A blank state carrying only this device's identity
    pub fn identity(&self) -> Self {
        Self::new(self.serialno.clone(), self.device_name.clone())
    }

    /// Current value of `field`
    pub fn value(&self, field: Field) -> FieldValue {
        match field {
            Field::ForegroundAppPackage => FieldValue::Text(self.foreground_app_package.clone()),
            Field::CurrentWindow => FieldValue::Text(self.current_window.clone()),
            Field::ForegroundApp => FieldValue::Text(self.foreground_app.clone()),
            Field::PlaybackDuration => FieldValue::Seconds(self.playback_duration),
            Field::PlaybackTitle => FieldValue::Text(self.playback_title.clone()),
            Field::PlaybackArtist => FieldValue::Text(self.playback_artist.clone()),
            Field::PlaybackAlbum => FieldValue::Text(self.playback_album.clone()),
            Field::PlaybackTrack => FieldValue::Number(self.playback_track),
            Field::PlaybackTrackCount => FieldValue::Number(self.playback_track_count),
            Field::PlaybackState => FieldValue::State(self.playback_state),
            Field::PlaybackPosition => FieldValue::Seconds(self.playback_position),
            Field::PlaybackSpeed => FieldValue::Rate(self.playback_speed),
            Field::PlaybackActions => FieldValue::Actions(self.playback_actions.clone()),
            Field::Wakefulness => FieldValue::Wakefulness(self.wakefulness),
        }
    }

    /// Fields whose value in `other` differs from `self`, in [`Field::ALL`] order
    pub fn diff(&self, other: &DeviceState) -> Vec<StateChange> {
        Field::ALL
            .into_iter()
            .filter_map(|field| {
                let next = other.value(field);
                (self.value(field) != next).then(|| StateChange::new(field, next))
            })
            .collect()
    }

    /// Adopt every observable field of `next` and return what changed.
    ///
    /// Identity is kept from `self`. All changes are applied before the
    /// list is returned, so a caller notifying per change always sees the
    /// fully committed state.
    pub fn commit(&mut self, next: DeviceState) -> Vec<StateChange> {
        let changes = self.diff(&next);
        if !changes.is_empty() {
            let serialno = std::mem::take(&mut self.serialno);
            let device_name = std::mem::take(&mut self.device_name);
            *self = DeviceState {
                serialno,
                device_name,
                ..next
            };
        }
        changes
    }

    /// True when the foreground session reports active playback
    pub fn is_playing(&self) -> bool {
        self.playback_state == PlaybackState::Playing
    }
}
