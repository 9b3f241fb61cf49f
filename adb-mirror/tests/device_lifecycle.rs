//! Handshake, variant behavior and teardown

mod helpers;

use std::io::Cursor;

use adb_mirror::{
    commands, Device, DeviceConfig, DeviceError, DeviceTarget, EventStream, KeyCode, Variant,
    Wakefulness,
};
use helpers::{connect, ShellScript, SERIAL};
use rstest::rstest;

#[test]
fn test_handshake_reads_identity() {
    let script = ShellScript::new();
    let device = connect(&script, "darcy");

    assert_eq!(device.product(), "darcy");
    assert_eq!(device.state().serialno, SERIAL);
    assert_eq!(device.state().device_name, "Living Room TV");
    assert_eq!(device.target(), &DeviceTarget::Serial(SERIAL.to_string()));
}

#[test]
fn test_handshake_end_of_stream_is_device_not_found() {
    let script = ShellScript::new();
    script.hang_up();

    let err = Device::from_shell(
        script.shell(),
        DeviceTarget::from("no-such-device"),
        DeviceConfig::default(),
    )
    .unwrap_err();

    match err {
        DeviceError::DeviceNotFound(target) => assert_eq!(target, "no-such-device"),
        other => panic!("expected DeviceNotFound, got {:?}", other),
    }
}

#[test]
fn test_end_of_stream_after_handshake_is_a_shell_error() {
    let script = ShellScript::new();
    let mut device = connect(&script, "sabrina");
    script.hang_up();

    let err = device.update().unwrap_err();
    assert!(matches!(err, DeviceError::Shell(ref e) if e.is_end_of_stream()));
}

#[rstest]
#[case("darcy", Variant::Shield)]
#[case("foster", Variant::Shield)]
#[case("sabrina", Variant::Base)]
fn test_variant_selected_from_product(#[case] product: &str, #[case] expected: Variant) {
    let script = ShellScript::new();
    assert_eq!(connect(&script, product).variant(), expected);
}

#[test]
fn test_shield_reports_wakefulness() {
    let script = ShellScript::new();
    let mut device = connect(&script, "darcy");
    script.answer("dumpsys power | grep mWakefulness=", "  mWakefulness=Dreaming\n");

    device.update().unwrap();

    assert_eq!(script.log().last().map(String::as_str), Some(commands::WAKEFULNESS));
    assert_eq!(device.wakefulness().unwrap(), Some(Wakefulness::Dreaming));
}

#[test]
fn test_shield_unknown_wakefulness_is_absent() {
    let script = ShellScript::new();
    let mut device = connect(&script, "darcy");
    script.answer("dumpsys power | grep mWakefulness=", "  mWakefulness=Dozing\n");

    device.update().unwrap();

    assert_eq!(device.wakefulness().unwrap(), None);
}

#[test]
fn test_base_does_not_query_power() {
    let script = ShellScript::new();
    let mut device = connect(&script, "sabrina");

    device.update().unwrap();

    assert!(!script.log().iter().any(|c| c.contains("dumpsys power")));
    assert!(matches!(device.wakefulness(), Err(DeviceError::Unsupported(_))));
}

#[test]
fn test_shield_power_commands() {
    let script = ShellScript::new();
    let mut device = connect(&script, "darcy");

    device.wake_up().unwrap();
    device.sleep().unwrap();

    assert_eq!(
        script.log(),
        vec![
            "dumpsys power | grep mWakefulness=Asleep > /dev/null && input keyevent KEYCODE_POWER",
            "dumpsys power | grep mWakefulness=Asleep > /dev/null || input keyevent KEYCODE_POWER",
        ]
    );
}

#[test]
fn test_base_power_commands_are_unsupported() {
    let script = ShellScript::new();
    let mut device = connect(&script, "sabrina");

    assert!(matches!(device.wake_up(), Err(DeviceError::Unsupported("wake_up"))));
    assert!(matches!(device.sleep(), Err(DeviceError::Unsupported("sleep"))));
    assert!(script.log().is_empty());
}

#[test]
fn test_keyevent_and_raw_shell() {
    let script = ShellScript::new();
    let mut device = connect(&script, "sabrina");
    script.answer("getprop ro.build.version.release", "12\n");

    device.keyevent("home").unwrap();
    device.keyevent(KeyCode::Code(85)).unwrap();
    let release = device.shell("getprop ro.build.version.release").unwrap();

    assert_eq!(release, "12\n");
    assert_eq!(
        script.log(),
        vec![
            "input keyevent KEYCODE_HOME",
            "input keyevent 85",
            "getprop ro.build.version.release",
        ]
    );
}

#[test]
fn test_close_is_idempotent_and_final() {
    let script = ShellScript::new();
    let mut device = connect(&script, "darcy");
    let events = EventStream::from_reader(Cursor::new(Vec::<u8>::new()));
    device.track_key_events(&events);

    device.close();
    device.close();

    assert!(device.is_closed());
    assert_eq!(script.close_count(), 1);
    assert!(events.handle().is_closed());
    assert!(matches!(device.update(), Err(DeviceError::Closed)));
    assert!(matches!(device.keyevent("home"), Err(DeviceError::Closed)));
    assert!(script.log().is_empty());
}

#[test]
fn test_drop_closes_session() {
    let script = ShellScript::new();
    drop(connect(&script, "sabrina"));
    assert_eq!(script.close_count(), 1);
}
