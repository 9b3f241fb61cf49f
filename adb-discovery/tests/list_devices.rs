//! Running the listing command against stand-in binaries

#![cfg(unix)]

use adb_discovery::list_devices;
use adb_shell::AdbConfig;

#[test]
fn test_successful_run_without_devices() {
    // `echo devices -l` prints a single line, which is taken as the header
    let outcome = list_devices(&AdbConfig::new("echo")).unwrap();

    assert!(outcome.is_success());
    assert!(outcome.devices.is_empty());
}

#[test]
fn test_non_zero_exit_is_reported_not_raised() {
    let outcome = list_devices(&AdbConfig::new("false")).unwrap();

    assert!(outcome.devices.is_empty());
    assert!(!outcome.is_success());
    assert!(outcome.diagnostics.contains("exited with"));
}

#[test]
fn test_missing_binary_is_an_error() {
    let result = list_devices(&AdbConfig::new("/nonexistent/adb-mirror/adb"));
    assert!(result.is_err());
}
