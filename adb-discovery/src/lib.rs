//! Finding Android devices for adb-mirror
//!
//! Two independent sources:
//!
//! - [`list_devices`] asks the local adb server which devices are attached
//!   (`adb devices -l`) and keeps the ones that are fully connected.
//! - [`discover`] browses the local network for `_adb._tcp` services and
//!   yields the serial and network target of each device.
//!
//! # Quick Start
//!
//! ```no_run
//! use adb_discovery::list_devices;
//! use adb_shell::AdbConfig;
//!
//! let outcome = list_devices(&AdbConfig::from_env())?;
//! for device in &outcome.devices {
//!     println!("{} ({})", device.id, device.product().unwrap_or("unknown"));
//! }
//! if !outcome.is_success() {
//!     eprintln!("adb: {}", outcome.diagnostics);
//! }
//! # Ok::<(), adb_discovery::DiscoveryError>(())
//! ```

mod enumeration;
mod error;
mod mdns;

pub use enumeration::{list_devices, parse_device_list, AttachedDevice, ListOutcome, CONNECTED_STATE};
pub use error::{DiscoveryError, Result};
pub use mdns::{
    discover, discover_each, discover_with_timeout, serial_from_fullname, DiscoveredDevice,
    ADB_SERVICE_TYPE,
};
