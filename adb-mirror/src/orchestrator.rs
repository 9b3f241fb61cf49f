//! One refresh cycle
//!
//! A refresh issues its queries strictly in order over the device's single
//! shell session and builds a complete candidate [`DeviceState`]. It never
//! mutates the committed state; the caller commits the candidate and fires
//! notifications.

use adb_parser::{
    extract_playback_block, parse_uptime, parse_window_focus, scan_key_values, PlaybackFields,
    SongMetadata,
};
use adb_shell::Shell;
use adb_state::{DeviceState, PlaybackAction, PlaybackState};
use tracing::{debug, trace, warn};

use crate::commands;
use crate::config::DeviceConfig;
use crate::error::Result;

/// Marker a session uses for unset song metadata
pub const NOT_PROVIDED: &str = "Not Provided";

/// Run one shell command, tracing the raw output
pub(crate) fn query<S: Shell + ?Sized>(shell: &mut S, command: &str) -> Result<String> {
    let output = shell.execute(command)?;
    trace!(command, output = %output, "raw dump");
    Ok(output)
}

/// Build a fresh candidate state for the device whose committed state is
/// `current`. Identity is carried over; every other field is recomputed.
pub fn refresh<S: Shell + ?Sized>(
    shell: &mut S,
    config: &DeviceConfig,
    current: &DeviceState,
) -> Result<DeviceState> {
    let mut next = current.identity();

    let focus = query(shell, commands::WINDOW_FOCUS)?;
    if let Some(focus) = parse_window_focus(&focus) {
        next.foreground_app_package = focus.package;
        next.current_window = focus.window;
    }

    let session_dump = if next.foreground_app_package.is_empty() {
        None
    } else {
        let package = next.foreground_app_package.clone();
        next.foreground_app = app_label(shell, config, &package)?;
        Some(query(shell, &commands::media_session(&package))?)
    };

    let Some(block) = session_dump.as_deref().and_then(extract_playback_block) else {
        debug!(package = %next.foreground_app_package, "no playback state this cycle");
        return Ok(next);
    };

    if let Some(song) = SongMetadata::extract(block) {
        apply_song(&mut next, song);
    }
    apply_playback(shell, &mut next, &PlaybackFields::parse(block))?;

    Ok(next)
}

fn app_label<S: Shell + ?Sized>(
    shell: &mut S,
    config: &DeviceConfig,
    package: &str,
) -> Result<String> {
    let dump = query(shell, &commands::bluetooth_apps(package))?;
    let label = scan_key_values(&dump)
        .remove("label")
        .or_else(|| {
            config
                .is_launcher(package)
                .then(|| config.home_screen_label.clone())
        })
        .unwrap_or_default();
    Ok(label)
}

fn provided(value: Option<String>) -> String {
    value.filter(|v| v != NOT_PROVIDED).unwrap_or_default()
}

fn apply_song(next: &mut DeviceState, song: SongMetadata) {
    next.playback_duration = song.duration_ms.map(|ms| ms as f64 / 1000.0);
    next.playback_title = provided(song.title);
    next.playback_artist = provided(song.artist);
    next.playback_album = provided(song.album);
    next.playback_track = song.track;
    next.playback_track_count = song.track_count;
}

fn apply_playback<S: Shell + ?Sized>(
    shell: &mut S,
    next: &mut DeviceState,
    fields: &PlaybackFields,
) -> Result<()> {
    let mut state = match fields.state() {
        Some(code) => PlaybackState::from_code(code),
        None => {
            warn!(value = ?fields.get("state"), "unparsable playback state code");
            PlaybackState::Unknown
        }
    };
    let mut position = fields.position_ms().map(|ms| ms / 1000.0);

    if state == PlaybackState::Playing {
        let uptime = query(shell, commands::UPTIME)?;
        match (parse_uptime(&uptime), fields.updated_ms(), position.as_mut()) {
            (Some(now), Some(updated_ms), Some(position)) => {
                *position += now - updated_ms / 1000.0;
            }
            (None, _, _) => warn!(output = %uptime.trim(), "unparsable uptime, position not extrapolated"),
            _ => warn!("playback block lacks position or update time, position not extrapolated"),
        }
    }

    if let Some(position) = position.as_mut() {
        *position = position.max(0.0);
        if let Some(duration) = next.playback_duration.filter(|d| *d > 0.0) {
            if *position > duration {
                debug!(position = *position, duration, "position past end of track, treating as stopped");
                state = PlaybackState::Stopped;
                *position = duration;
            }
        }
    }

    next.playback_state = state;
    next.playback_position = position;
    next.playback_speed = fields.speed();
    next.playback_actions = fields
        .actions()
        .map(PlaybackAction::decode)
        .unwrap_or_default();
    Ok(())
}
