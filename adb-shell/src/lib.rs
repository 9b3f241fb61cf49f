//! Private adb shell layer for adb-mirror
//!
//! This crate owns the processes used to talk to an Android device:
//! a persistent `adb shell` session that runs one command at a time and
//! frames each command's output with a sentinel line, and an independent
//! `getevent` stream that yields raw key activity.
//!
//! # Example
//!
//! ```no_run
//! use adb_shell::{AdbConfig, DeviceTarget, Shell, ShellSession};
//!
//! let mut session = ShellSession::spawn(&AdbConfig::from_env(), &DeviceTarget::from("ABC123"))?;
//! let serial = session.execute("getprop ro.serialno")?;
//! println!("serial: {}", serial.trim());
//! session.close();
//! # Ok::<(), adb_shell::ShellError>(())
//! ```

mod config;
mod error;
mod event_stream;
mod session;

pub use config::{AdbConfig, DeviceTarget, ADB_PATH_ENV};
pub use error::{Result, ShellError};
pub use event_stream::{EventStream, EventStreamHandle, KeyEvent, RawInputEvent, KEY_EVENT_TYPE};
pub use session::{Shell, ShellSession, SENTINEL};
