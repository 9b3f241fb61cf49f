//! Playback state and song metadata from `dumpsys media_session`
//!
//! A media session prints its transport state as
//!
//! ```text
//!       state=PlaybackState {state=3, position=81234, buffer position=0, speed=1.0, updated=918273, actions=3669, ...}
//! ```
//!
//! Song metadata, when the session publishes it, travels as a nested
//! `song=[...]` segment of space-separated `key=value` tokens inside that block.

use std::collections::HashMap;
use std::sync::LazyLock;

use regex::Regex;

use crate::key_values::scan_key_values;

static PLAYBACK_BLOCK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"state=PlaybackState \{(.+)\}").expect("valid PlaybackState regex")
});

// Quoted spans may contain `]`
static SONG_SEGMENT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"song=\[((?:"[^"]*"|[^\]"])*)\]"#).expect("valid song segment regex")
});

// Fallback for an unbalanced quote: stop at the first `]`
static SONG_SEGMENT_UNQUOTED: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"song=\[([^\]]*)\]").expect("valid song segment regex")
});

/// The field list between the braces of the first `state=PlaybackState {...}`
pub fn extract_playback_block(dump: &str) -> Option<&str> {
    PLAYBACK_BLOCK
        .captures(dump)
        .and_then(|captures| captures.get(1))
        .map(|m| m.as_str())
}

/// Fields of a playback-state block, keyed by name
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlaybackFields {
    fields: HashMap<String, String>,
}

impl PlaybackFields {
    /// Split the block on `", "`, then each piece on its first `=`.
    ///
    /// Pieces without `=` are ignored; the first occurrence of a key wins.
    pub fn parse(block: &str) -> Self {
        let mut fields = HashMap::new();
        for piece in block.split(", ") {
            if let Some((key, value)) = piece.split_once('=') {
                fields
                    .entry(key.trim().to_string())
                    .or_insert_with(|| value.to_string());
            }
        }
        Self { fields }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.fields.get(key).map(String::as_str)
    }

    /// Integer state code
    pub fn state(&self) -> Option<i64> {
        self.get("state")?.trim().parse().ok()
    }

    /// Position in milliseconds at the time of `updated`
    pub fn position_ms(&self) -> Option<f64> {
        self.get("position")?.trim().parse().ok()
    }

    /// Time of the last position update, milliseconds since boot
    pub fn updated_ms(&self) -> Option<f64> {
        self.get("updated")?.trim().parse().ok()
    }

    pub fn speed(&self) -> Option<f64> {
        self.get("speed")?.trim().parse().ok()
    }

    /// Supported transport actions as a bitmask
    pub fn actions(&self) -> Option<u64> {
        self.get("actions")?.trim().parse().ok()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// The inside of the nested `song=[...]` segment of a playback block
pub fn find_song_segment(block: &str) -> Option<&str> {
    SONG_SEGMENT
        .captures(block)
        .or_else(|| SONG_SEGMENT_UNQUOTED.captures(block))
        .and_then(|captures| captures.get(1))
        .map(|m| m.as_str())
}

/// Song metadata as published by the session, before any normalization
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SongMetadata {
    pub duration_ms: Option<u64>,
    pub title: Option<String>,
    pub artist: Option<String>,
    pub album: Option<String>,
    /// 1-based track number from `trackPosition=n/total`
    pub track: Option<u32>,
    pub track_count: Option<u32>,
}

impl SongMetadata {
    /// Locate the song segment in a playback block and parse it
    pub fn extract(block: &str) -> Option<Self> {
        find_song_segment(block).map(Self::from_fields)
    }

    /// Parse a `key=value` list such as
    /// `title="My Song" artist=Someone duration=245000 trackPosition=3/12`
    pub fn from_fields(text: &str) -> Self {
        let mut values = scan_key_values(text);

        let (track, track_count) = values
            .get("trackPosition")
            .and_then(|position| position.split_once('/'))
            .map(|(track, count)| (track.trim().parse().ok(), count.trim().parse().ok()))
            .unwrap_or((None, None));

        Self {
            duration_ms: values.get("duration").and_then(|d| d.parse().ok()),
            title: values.remove("title"),
            artist: values.remove("artist"),
            album: values.remove("album"),
            track,
            track_count,
        }
    }
}
