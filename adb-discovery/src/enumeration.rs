//! Attached devices as reported by `adb devices -l`
//!
//! ```text
//! List of devices attached
//! 0423417004213          device usb:1-1 product:darcy model:SHIELD_Android_TV device:darcy transport_id:3
//! 192.168.1.20:5555      offline transport_id:4
//! ```

use std::collections::BTreeMap;

use adb_shell::AdbConfig;
use tracing::{debug, warn};

use crate::error::Result;

/// State token of a fully connected device
pub const CONNECTED_STATE: &str = "device";

/// One usable entry of the device list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttachedDevice {
    /// Serial number or `host:port`
    pub id: String,
    pub state: String,
    /// Trailing `key:value` tokens such as `product`, `model`, `transport_id`
    pub properties: BTreeMap<String, String>,
}

impl AttachedDevice {
    pub fn property(&self, key: &str) -> Option<&str> {
        self.properties.get(key).map(String::as_str)
    }

    pub fn transport_id(&self) -> Option<&str> {
        self.property("transport_id")
    }

    pub fn product(&self) -> Option<&str> {
        self.property("product")
    }
}

/// Result of running the listing command
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListOutcome {
    pub devices: Vec<AttachedDevice>,
    /// Standard error of a failed listing, empty on success
    pub diagnostics: String,
}

impl ListOutcome {
    pub fn is_success(&self) -> bool {
        self.diagnostics.is_empty()
    }
}

/// Parse `adb devices -l` output, keeping only connected devices.
///
/// The first line is a header and is skipped. Blank lines and daemon chatter
/// (`* daemon started successfully`) are ignored.
pub fn parse_device_list(output: &str) -> Vec<AttachedDevice> {
    output
        .lines()
        .skip(1)
        .filter_map(parse_device_line)
        .filter(|device| device.state == CONNECTED_STATE)
        .collect()
}

fn parse_device_line(line: &str) -> Option<AttachedDevice> {
    if line.starts_with('*') {
        return None;
    }

    let mut tokens = line.split_whitespace();
    let id = tokens.next()?.to_string();
    let state = tokens.next()?.to_string();
    let properties = tokens
        .filter_map(|token| token.split_once(':'))
        .map(|(key, value)| (key.to_string(), value.to_string()))
        .collect();

    Some(AttachedDevice {
        id,
        state,
        properties,
    })
}

/// Run `adb devices -l` and return the connected devices.
///
/// A non-zero exit yields an empty list with the command's standard error
/// as diagnostics. Only failing to start adb at all is an error.
pub fn list_devices(config: &AdbConfig) -> Result<ListOutcome> {
    let output = config.command().args(["devices", "-l"]).output()?;

    if !output.status.success() {
        let diagnostics = String::from_utf8_lossy(&output.stderr).trim().to_string();
        warn!(status = %output.status, "adb devices failed: {}", diagnostics);
        return Ok(ListOutcome {
            devices: Vec::new(),
            diagnostics: if diagnostics.is_empty() {
                format!("adb devices exited with {}", output.status)
            } else {
                diagnostics
            },
        });
    }

    let devices = parse_device_list(&String::from_utf8_lossy(&output.stdout));
    debug!(count = devices.len(), "listed attached devices");
    Ok(ListOutcome {
        devices,
        diagnostics: String::new(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    const LISTING: &str = "List of devices attached
0423417004213          device usb:1-1 product:darcy model:SHIELD_Android_TV device:darcy transport_id:3
192.168.1.20:5555      offline transport_id:4
emulator-5554          unauthorized transport_id:5
192.168.1.31:5555      device product:sabrina model:Chromecast device:sabrina transport_id:7

";

    #[test]
    fn test_keeps_only_connected() {
        let devices = parse_device_list(LISTING);
        let ids: Vec<&str> = devices.iter().map(|d| d.id.as_str()).collect();
        assert_eq!(ids, vec!["0423417004213", "192.168.1.31:5555"]);
    }

    #[test]
    fn test_properties() {
        let devices = parse_device_list(LISTING);
        let shield = &devices[0];
        assert_eq!(shield.product(), Some("darcy"));
        assert_eq!(shield.transport_id(), Some("3"));
        assert_eq!(shield.property("model"), Some("SHIELD_Android_TV"));
        assert_eq!(shield.property("usb"), Some("1-1"));
    }

    #[rstest]
    #[case("")]
    #[case("List of devices attached\n")]
    #[case("List of devices attached\n\n")]
    fn test_empty_listing(#[case] output: &str) {
        assert!(parse_device_list(output).is_empty());
    }

    #[test]
    fn test_daemon_chatter_is_ignored() {
        let output = "* daemon not running; starting now at tcp:5037\n\
                      * daemon started successfully\n\
                      List of devices attached\n\
                      ABC123 device transport_id:1\n";
        // The header line lands after the chatter and fails the state filter
        let devices = parse_device_list(output);
        assert_eq!(devices.len(), 1);
        assert_eq!(devices[0].id, "ABC123");
    }

    #[test]
    fn test_listing_without_properties() {
        let devices = parse_device_list("List of devices attached\nABC123\tdevice\n");
        assert_eq!(devices.len(), 1);
        assert!(devices[0].properties.is_empty());
    }
}
