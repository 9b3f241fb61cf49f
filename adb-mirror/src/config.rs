//! Device configuration

use adb_shell::AdbConfig;

/// Launchers known to be the home screen on Android TV devices
pub const DEFAULT_LAUNCHER_PACKAGES: [&str; 3] = [
    "com.google.android.tvlauncher",
    "com.google.android.apps.tv.launcherx",
    "com.android.launcher3",
];

/// Label shown for a launcher with no app label of its own
pub const DEFAULT_HOME_SCREEN_LABEL: &str = "Home Screen";

/// Settings shared by every query a device issues
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceConfig {
    /// How adb is invoked
    pub adb: AdbConfig,

    /// Packages treated as the home screen
    /// Default: the Android TV launchers and the AOSP launcher
    pub launcher_packages: Vec<String>,

    /// Foreground app label used for launchers
    /// Default: "Home Screen"
    pub home_screen_label: String,
}

impl Default for DeviceConfig {
    fn default() -> Self {
        Self {
            adb: AdbConfig::default(),
            launcher_packages: DEFAULT_LAUNCHER_PACKAGES
                .iter()
                .map(|p| p.to_string())
                .collect(),
            home_screen_label: DEFAULT_HOME_SCREEN_LABEL.to_string(),
        }
    }
}

impl DeviceConfig {
    /// Defaults with the adb path taken from `ADB_PATH`
    pub fn from_env() -> Self {
        Self {
            adb: AdbConfig::from_env(),
            ..Default::default()
        }
    }

    pub fn with_adb(mut self, adb: AdbConfig) -> Self {
        self.adb = adb;
        self
    }

    pub fn is_launcher(&self, package: &str) -> bool {
        self.launcher_packages.iter().any(|p| p == package)
    }
}
