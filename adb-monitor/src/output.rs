//! Formatting of monitor output lines

use adb_discovery::{AttachedDevice, DiscoveredDevice};
use adb_mirror::{DeviceState, KeyEvent, StateChange};
use serde_json::json;

/// One line for a state change
pub fn change_line(state: &DeviceState, change: &StateChange, as_json: bool) -> String {
    if as_json {
        json!({
            "serialno": state.serialno,
            "field": change.field,
            "value": change.value,
        })
        .to_string()
    } else {
        format!("[{}] {}", state.device_name, change)
    }
}

/// One line for a key event
pub fn key_line(serialno: &str, event: &KeyEvent, as_json: bool) -> String {
    if as_json {
        json!({
            "serialno": serialno,
            "key": event.code,
            "value": event.value,
        })
        .to_string()
    } else {
        format!("[{}] key {} {}", serialno, event.code, event.value)
    }
}

/// Full state snapshot
pub fn state_snapshot(state: &DeviceState, as_json: bool) -> String {
    if as_json {
        serde_json::to_string(state).unwrap_or_default()
    } else {
        let mut lines = vec![format!("{} ({})", state.device_name, state.serialno)];
        lines.extend(
            adb_mirror::Field::ALL
                .iter()
                .map(|field| format!("  {:<22} {}", field, state.value(*field))),
        );
        lines.join("\n")
    }
}

pub fn attached_line(device: &AttachedDevice) -> String {
    let details = device
        .properties
        .iter()
        .map(|(key, value)| format!("{}:{}", key, value))
        .collect::<Vec<_>>()
        .join(" ");
    format!("{:<24} {}", device.id, details)
}

pub fn discovered_line(device: &DiscoveredDevice) -> String {
    format!("{:<24} {}", device.serial, device.target)
}

#[cfg(test)]
mod tests {
    use super::*;
    use adb_mirror::{Field, FieldValue, PlaybackState};

    fn state() -> DeviceState {
        DeviceState::new("0423417004213", "Living Room TV")
    }

    #[test]
    fn test_change_line_text() {
        let change = StateChange::new(Field::PlaybackState, FieldValue::State(PlaybackState::Playing));
        assert_eq!(
            change_line(&state(), &change, false),
            "[Living Room TV] playback_state = playing"
        );
    }

    #[test]
    fn test_speed_change_line_is_a_rate() {
        let change = StateChange::new(Field::PlaybackSpeed, FieldValue::Rate(Some(1.0)));
        assert_eq!(
            change_line(&state(), &change, false),
            "[Living Room TV] playback_speed = 1x"
        );
    }

    #[test]
    fn test_change_line_json() {
        let change = StateChange::new(Field::PlaybackPosition, FieldValue::Seconds(Some(12.5)));
        let line: serde_json::Value =
            serde_json::from_str(&change_line(&state(), &change, true)).unwrap();
        assert_eq!(line["field"], "playback_position");
        assert_eq!(line["value"], 12.5);
        assert_eq!(line["serialno"], "0423417004213");
    }

    #[test]
    fn test_key_line() {
        let event = KeyEvent {
            code: "KEY_PLAYPAUSE".to_string(),
            value: "DOWN".to_string(),
        };
        assert_eq!(
            key_line("0423417004213", &event, false),
            "[0423417004213] key KEY_PLAYPAUSE DOWN"
        );
    }

    #[test]
    fn test_snapshot_lists_every_field() {
        let text = state_snapshot(&state(), false);
        assert_eq!(text.lines().count(), 1 + adb_mirror::Field::ALL.len());
        assert!(text.contains("wakefulness"));
    }
}
