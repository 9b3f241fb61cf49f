//! # adb-mirror
//!
//! Keeps a live, structured mirror of what an Android TV or media device is
//! doing (foreground app, now-playing metadata, transport state) by polling
//! its diagnostic dumps over a persistent `adb shell` session.
//!
//! ```rust,no_run
//! use adb_mirror::{Device, KeyCode};
//!
//! let mut device = Device::create("0423417004213")?
//!     .on_change(|_, change| println!("{}", change));
//!
//! loop {
//!     device.update()?;
//!     if device.state().foreground_app.is_empty() {
//!         device.keyevent(KeyCode::from("home"))?;
//!     }
//!     std::thread::sleep(std::time::Duration::from_secs(1));
//! }
//! # Ok::<(), adb_mirror::DeviceError>(())
//! ```
//!
//! ## Architecture
//!
//! ```text
//! adb-mirror (Device, refresh cycle, variants)
//!     ↓
//! adb-state (DeviceState, change diffing)   adb-parser (dump parsers)
//!     ↓
//! adb-shell (sentinel-framed session, getevent stream)
//! ```
//!
//! Each [`Device`] is independent and single-writer: it owns its session and
//! must not be shared across threads without external synchronization. Run
//! a key event stream on its own thread.

pub mod commands;
pub mod logging;

mod config;
mod device;
mod error;
mod keycode;
mod orchestrator;
mod variant;

pub use config::{DeviceConfig, DEFAULT_HOME_SCREEN_LABEL, DEFAULT_LAUNCHER_PACKAGES};
pub use device::{ChangeCallback, Device};
pub use error::{DeviceError, Result};
pub use keycode::KeyCode;
pub use orchestrator::{refresh, NOT_PROVIDED};
pub use variant::{Variant, SHIELD_PRODUCTS};

pub use adb_shell::{AdbConfig, DeviceTarget, EventStream, KeyEvent, Shell, ShellError, ShellSession};
pub use adb_state::{
    DeviceState, Field, FieldValue, PlaybackAction, PlaybackActions, PlaybackState, StateChange,
    Wakefulness,
};
