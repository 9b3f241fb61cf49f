//! Shell commands issued to the device
//!
//! Every dump is narrowed with `grep` on the device so only the relevant
//! lines cross the adb connection.

use crate::keycode::KeyCode;

pub const PRODUCT_NAME: &str = "getprop ro.product.name";
pub const SERIAL_NUMBER: &str = "getprop ro.serialno";
pub const DEVICE_NAME: &str = "dumpsys settings | grep name:device_name";

pub const WINDOW_FOCUS: &str = "dumpsys window windows | grep mCurrentFocus=";
pub const UPTIME: &str = "cat /proc/uptime";
pub const WAKEFULNESS: &str = "dumpsys power | grep mWakefulness=";

/// Press power only if the device is asleep
pub const WAKE_UP: &str =
    "dumpsys power | grep mWakefulness=Asleep > /dev/null && input keyevent KEYCODE_POWER";
/// Press power only if the device is not asleep
pub const SLEEP: &str =
    "dumpsys power | grep mWakefulness=Asleep > /dev/null || input keyevent KEYCODE_POWER";

/// Quote `word` as a single shell word
pub fn shell_quote(word: &str) -> String {
    format!("'{}'", word.replace('\'', r"'\''"))
}

/// `package` as an extended regex, quoted for the shell
pub fn package_pattern(package: &str) -> String {
    shell_quote(&regex::escape(package))
}

/// Bluetooth manager lines mentioning `package`, which carry its label
pub fn bluetooth_apps(package: &str) -> String {
    format!("dumpsys bluetooth_manager | grep -E {}", package_pattern(package))
}

/// The playback state line of `package`'s media session
pub fn media_session(package: &str) -> String {
    let pattern = shell_quote(&format!("package={}$", regex::escape(package)));
    format!(
        "dumpsys media_session | grep -A 20 -E {} | grep 'state=PlaybackState'",
        pattern
    )
}

pub fn keyevent(key: &KeyCode) -> String {
    format!("input keyevent {}", key)
}
