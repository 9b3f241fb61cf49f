//! Wireless-debugging devices advertised over mDNS
//!
//! Android advertises `_adb._tcp` services whose instance names have the form
//! `adb-<serial>`. Each resolved service becomes a [`DiscoveredDevice`] whose
//! target can be handed to `adb connect` or used directly as a serial.

use std::collections::HashSet;
use std::time::{Duration, Instant};

use mdns_sd::{ServiceDaemon, ServiceEvent};
use tracing::{debug, info};

use crate::error::Result;

/// Service type browsed for adb devices
pub const ADB_SERVICE_TYPE: &str = "_adb._tcp.local.";

/// Instance name prefix preceding the serial number
pub const INSTANCE_PREFIX: &str = "adb-";

const DEFAULT_WINDOW: Duration = Duration::from_secs(3);
const POLL_INTERVAL: Duration = Duration::from_millis(250);

/// A device found on the local network
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscoveredDevice {
    pub serial: String,
    /// `host:port` to connect to
    pub target: String,
}

/// Browse for adb services for three seconds.
///
/// # Examples
///
/// ```no_run
/// for device in adb_discovery::discover()? {
///     println!("{} at {}", device.serial, device.target);
/// }
/// # Ok::<(), adb_discovery::DiscoveryError>(())
/// ```
pub fn discover() -> Result<Vec<DiscoveredDevice>> {
    discover_with_timeout(DEFAULT_WINDOW)
}

/// Browse for adb services for `timeout` and collect what was found
pub fn discover_with_timeout(timeout: Duration) -> Result<Vec<DiscoveredDevice>> {
    let mut devices = Vec::new();
    discover_each(timeout, |device| devices.push(device))?;
    Ok(devices)
}

/// Browse for adb services for `timeout`, calling `on_found` once per serial
/// as soon as its service resolves.
pub fn discover_each<F>(timeout: Duration, mut on_found: F) -> Result<()>
where
    F: FnMut(DiscoveredDevice),
{
    let mdns = ServiceDaemon::new()?;
    let receiver = match mdns.browse(ADB_SERVICE_TYPE) {
        Ok(receiver) => receiver,
        Err(err) => {
            let _ = mdns.shutdown();
            return Err(err.into());
        }
    };

    let deadline = Instant::now() + timeout;
    let mut seen = HashSet::new();
    while Instant::now() < deadline {
        let wait = deadline
            .saturating_duration_since(Instant::now())
            .min(POLL_INTERVAL);
        let Ok(event) = receiver.recv_timeout(wait) else {
            continue;
        };
        if let ServiceEvent::ServiceResolved(service) = event {
            let Some(serial) = serial_from_fullname(service.get_fullname()) else {
                debug!(name = service.get_fullname(), "ignoring non-adb service");
                continue;
            };
            if !seen.insert(serial.to_string()) {
                continue;
            }

            let mut addresses: Vec<_> = service.get_addresses_v4().iter().copied().collect();
            addresses.sort();
            let host = addresses
                .first()
                .map(ToString::to_string)
                .unwrap_or_else(|| service.get_hostname().trim_end_matches('.').to_string());

            let device = DiscoveredDevice {
                serial: serial.to_string(),
                target: format!("{}:{}", host, service.get_port()),
            };
            info!(serial = %device.serial, target = %device.target, "discovered adb device");
            on_found(device);
        }
    }

    if let Err(err) = mdns.stop_browse(ADB_SERVICE_TYPE) {
        debug!("failed to stop mDNS browse cleanly: {}", err);
    }
    let _ = mdns.shutdown();
    Ok(())
}

/// Extract the serial from a full service name such as
/// `adb-0423417004213._adb._tcp.local.`
pub fn serial_from_fullname(fullname: &str) -> Option<&str> {
    let instance = fullname
        .strip_suffix(ADB_SERVICE_TYPE)
        .map(|name| name.trim_end_matches('.'))
        .unwrap_or(fullname);
    instance
        .strip_prefix(INSTANCE_PREFIX)
        .filter(|serial| !serial.is_empty())
}
