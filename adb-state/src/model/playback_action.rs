//! Transport actions advertised by a media session

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Set of actions a session currently supports
pub type PlaybackActions = BTreeSet<PlaybackAction>;

/// One `PlaybackState.ACTION_*` capability
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlaybackAction {
    Stop,
    Pause,
    Play,
    Rewind,
    SkipToPrevious,
    SkipToNext,
    FastForward,
    SetRating,
    SeekTo,
    PlayPause,
    PlayFromMediaId,
    PlayFromSearch,
    SkipToQueueItem,
    PlayFromUri,
    Prepare,
    PrepareFromMediaId,
    PrepareFromSearch,
    PrepareFromUri,
}

impl PlaybackAction {
    /// Every action in flag order
    pub const ALL: [PlaybackAction; 18] = [
        PlaybackAction::Stop,
        PlaybackAction::Pause,
        PlaybackAction::Play,
        PlaybackAction::Rewind,
        PlaybackAction::SkipToPrevious,
        PlaybackAction::SkipToNext,
        PlaybackAction::FastForward,
        PlaybackAction::SetRating,
        PlaybackAction::SeekTo,
        PlaybackAction::PlayPause,
        PlaybackAction::PlayFromMediaId,
        PlaybackAction::PlayFromSearch,
        PlaybackAction::SkipToQueueItem,
        PlaybackAction::PlayFromUri,
        PlaybackAction::Prepare,
        PlaybackAction::PrepareFromMediaId,
        PlaybackAction::PrepareFromSearch,
        PlaybackAction::PrepareFromUri,
    ];

    /// The bit for this action in an actions mask
    pub fn flag(self) -> u64 {
        1 << (self as u32)
    }

    /// Every known action whose flag is fully set in `mask`. Unknown bits are ignored.
    pub fn decode(mask: u64) -> PlaybackActions {
        Self::ALL
            .into_iter()
            .filter(|action| mask & action.flag() == action.flag())
            .collect()
    }

    /// Inverse of [`decode`](Self::decode) for known actions
    pub fn encode<'a>(actions: impl IntoIterator<Item = &'a PlaybackAction>) -> u64 {
        actions.into_iter().fold(0, |mask, action| mask | action.flag())
    }

    pub fn as_str(self) -> &'static str {
        match self {
            PlaybackAction::Stop => "stop",
            PlaybackAction::Pause => "pause",
            PlaybackAction::Play => "play",
            PlaybackAction::Rewind => "rewind",
            PlaybackAction::SkipToPrevious => "skip_to_previous",
            PlaybackAction::SkipToNext => "skip_to_next",
            PlaybackAction::FastForward => "fast_forward",
            PlaybackAction::SetRating => "set_rating",
            PlaybackAction::SeekTo => "seek_to",
            PlaybackAction::PlayPause => "play_pause",
            PlaybackAction::PlayFromMediaId => "play_from_media_id",
            PlaybackAction::PlayFromSearch => "play_from_search",
            PlaybackAction::SkipToQueueItem => "skip_to_queue_item",
            PlaybackAction::PlayFromUri => "play_from_uri",
            PlaybackAction::Prepare => "prepare",
            PlaybackAction::PrepareFromMediaId => "prepare_from_media_id",
            PlaybackAction::PrepareFromSearch => "prepare_from_search",
            PlaybackAction::PrepareFromUri => "prepare_from_uri",
        }
    }
}
