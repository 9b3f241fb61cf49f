//! adb invocation settings and device addressing

use std::fmt;
use std::path::PathBuf;
use std::process::Command;

/// Environment variable that overrides the adb executable
pub const ADB_PATH_ENV: &str = "ADB_PATH";

/// How to invoke the adb executable
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdbConfig {
    /// Path to (or name of) the adb binary
    /// Default: "adb", resolved through PATH
    pub adb_path: PathBuf,
}

impl Default for AdbConfig {
    fn default() -> Self {
        Self {
            adb_path: PathBuf::from("adb"),
        }
    }
}

impl AdbConfig {
    pub fn new(adb_path: impl Into<PathBuf>) -> Self {
        Self {
            adb_path: adb_path.into(),
        }
    }

    /// Build a config from `ADB_PATH`, falling back to the default
    pub fn from_env() -> Self {
        match std::env::var_os(ADB_PATH_ENV) {
            Some(path) if !path.is_empty() => Self::new(path),
            _ => Self::default(),
        }
    }

    /// A bare adb command with no arguments
    pub fn command(&self) -> Command {
        Command::new(&self.adb_path)
    }

    /// An adb command already addressed to `target`
    pub fn command_for(&self, target: &DeviceTarget) -> Command {
        let mut command = self.command();
        command.args(target.selector_args());
        command
    }
}

/// Which attached device an adb invocation is addressed to
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum DeviceTarget {
    /// Serial number or `host:port`, passed as `-s`
    Serial(String),
    /// adb transport id, passed as `-t`
    TransportId(String),
}

impl DeviceTarget {
    /// The adb flag and value selecting this device
    pub fn selector_args(&self) -> [&str; 2] {
        match self {
            DeviceTarget::Serial(serial) => ["-s", serial.as_str()],
            DeviceTarget::TransportId(id) => ["-t", id.as_str()],
        }
    }
}

impl fmt::Display for DeviceTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DeviceTarget::Serial(serial) => write!(f, "{}", serial),
            DeviceTarget::TransportId(id) => write!(f, "transport:{}", id),
        }
    }
}

impl From<&str> for DeviceTarget {
    fn from(serial: &str) -> Self {
        DeviceTarget::Serial(serial.to_string())
    }
}

impl From<String> for DeviceTarget {
    fn from(serial: String) -> Self {
        DeviceTarget::Serial(serial)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_selector_args() {
        let serial = DeviceTarget::from("192.168.1.20:5555");
        assert_eq!(serial.selector_args(), ["-s", "192.168.1.20:5555"]);

        let transport = DeviceTarget::TransportId("7".to_string());
        assert_eq!(transport.selector_args(), ["-t", "7"]);
    }

    #[test]
    fn test_command_for_target() {
        let config = AdbConfig::new("/opt/platform-tools/adb");
        let command = config.command_for(&DeviceTarget::from("ABC123"));

        assert_eq!(command.get_program(), "/opt/platform-tools/adb");
        let args: Vec<_> = command.get_args().collect();
        assert_eq!(args, ["-s", "ABC123"]);
    }

    #[test]
    fn test_display() {
        assert_eq!(DeviceTarget::from("ABC123").to_string(), "ABC123");
        assert_eq!(
            DeviceTarget::TransportId("3".to_string()).to_string(),
            "transport:3"
        );
    }
}
