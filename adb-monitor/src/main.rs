use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use adb_discovery::{discover_each, list_devices};
use adb_mirror::logging::{self, LoggingMode, LOG_LEVEL_ENV};
use adb_mirror::{AdbConfig, Device, DeviceConfig, DeviceTarget};
use anyhow::{Context, Result};
use clap::Parser;
use tracing::{info, warn};

mod output;

/// Mirror an Android device's foreground app and playback state
///
/// Polls the device over a persistent adb shell and prints one line per
/// changed field. Can also list attached devices or discover wireless
/// debugging devices on the local network.
#[derive(Parser, Debug)]
#[command(name = "adb-monitor")]
#[command(version)]
pub struct Args {
    /// Serial number (or host:port) of the device to monitor
    #[arg(short, long, conflicts_with = "transport_id")]
    pub serial: Option<String>,

    /// adb transport id of the device to monitor
    #[arg(short, long)]
    pub transport_id: Option<String>,

    /// Milliseconds between updates
    #[arg(short, long, default_value = "1000")]
    pub interval_ms: u64,

    /// Stop after this many updates
    #[arg(short = 'n', long)]
    pub count: Option<u64>,

    /// Path to the adb binary
    #[arg(long, env = "ADB_PATH")]
    pub adb_path: Option<PathBuf>,

    /// List attached devices and exit
    #[arg(long)]
    pub list: bool,

    /// Discover devices over mDNS and exit
    #[arg(long)]
    pub discover: bool,

    /// Discovery window in seconds
    #[arg(long, default_value = "3")]
    pub discovery_timeout: u64,

    /// Also print raw key events
    #[arg(long)]
    pub key_events: bool,

    /// Print JSON lines instead of text
    #[arg(long)]
    pub json: bool,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, env = LOG_LEVEL_ENV, default_value = "warn")]
    pub log_level: String,
}

impl Args {
    /// Validate command line arguments
    pub fn validate(&self) -> Result<()> {
        if self.interval_ms == 0 {
            return Err(anyhow::anyhow!("Interval must be positive"));
        }

        if self.discovery_timeout == 0 {
            return Err(anyhow::anyhow!("Discovery timeout must be positive"));
        }

        if self.count == Some(0) {
            return Err(anyhow::anyhow!("Count must be at least 1"));
        }

        if self.list && self.discover {
            return Err(anyhow::anyhow!("--list and --discover are mutually exclusive"));
        }

        if logging::validate_level(&self.log_level).is_err() {
            return Err(anyhow::anyhow!(
                "Invalid log level '{}'. Valid levels: error, warn, info, debug, trace",
                self.log_level
            ));
        }

        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mode {
    List,
    Discover,
    Monitor,
}

/// Configuration derived from command line arguments and environment variables
#[derive(Debug, Clone)]
pub struct Config {
    pub mode: Mode,
    pub target: Option<DeviceTarget>,
    pub interval: Duration,
    pub count: Option<u64>,
    pub device: DeviceConfig,
    pub discovery_timeout: Duration,
    pub key_events: bool,
    pub json: bool,
    pub log_level: String,
}

impl From<Args> for Config {
    fn from(args: Args) -> Self {
        let mode = if args.list {
            Mode::List
        } else if args.discover {
            Mode::Discover
        } else {
            Mode::Monitor
        };

        let target = match (args.serial, args.transport_id) {
            (Some(serial), _) => Some(DeviceTarget::Serial(serial)),
            (None, Some(id)) => Some(DeviceTarget::TransportId(id)),
            (None, None) => None,
        };

        let adb = args.adb_path.map(AdbConfig::new).unwrap_or_default();

        Self {
            mode,
            target,
            interval: Duration::from_millis(args.interval_ms),
            count: args.count,
            device: DeviceConfig::default().with_adb(adb),
            discovery_timeout: Duration::from_secs(args.discovery_timeout),
            key_events: args.key_events,
            json: args.json,
            log_level: args.log_level.trim().to_lowercase(),
        }
    }
}

fn main() -> Result<()> {
    let args = Args::parse();
    args.validate()?;
    let config = Config::from(args);

    // Logs go to stderr so stdout stays machine-readable
    logging::init_logging_at_level(LoggingMode::Development, &config.log_level)?;

    match config.mode {
        Mode::List => run_list(&config),
        Mode::Discover => run_discover(&config),
        Mode::Monitor => run_monitor(&config),
    }
}

fn run_list(config: &Config) -> Result<()> {
    let outcome = list_devices(&config.device.adb).context("Failed to run adb devices")?;
    if !outcome.is_success() {
        return Err(anyhow::anyhow!("adb devices failed: {}", outcome.diagnostics));
    }

    for device in &outcome.devices {
        println!("{}", output::attached_line(device));
    }
    if outcome.devices.is_empty() {
        eprintln!("No devices attached");
    }
    Ok(())
}

fn run_discover(config: &Config) -> Result<()> {
    info!(
        "Browsing for adb devices for {}s...",
        config.discovery_timeout.as_secs()
    );

    let mut found = 0;
    discover_each(config.discovery_timeout, |device| {
        found += 1;
        println!("{}", output::discovered_line(&device));
    })
    .context("mDNS discovery failed")?;

    if found == 0 {
        eprintln!("No devices found. Check that wireless debugging is enabled.");
    }
    Ok(())
}

/// The configured target, or the only attached device
fn resolve_target(config: &Config) -> Result<DeviceTarget> {
    if let Some(target) = &config.target {
        return Ok(target.clone());
    }

    let outcome = list_devices(&config.device.adb).context("Failed to run adb devices")?;
    match outcome.devices.as_slice() {
        [only] => {
            info!("Using the only attached device: {}", only.id);
            Ok(DeviceTarget::Serial(only.id.clone()))
        }
        [] if !outcome.is_success() => Err(anyhow::anyhow!(
            "adb devices failed: {}",
            outcome.diagnostics
        )),
        [] => Err(anyhow::anyhow!("No devices attached")),
        many => Err(anyhow::anyhow!(
            "{} devices attached; pick one with --serial",
            many.len()
        )),
    }
}

fn run_monitor(config: &Config) -> Result<()> {
    let target = resolve_target(config)?;
    let as_json = config.json;

    let mut device = Device::with_config(target.clone(), config.device.clone())
        .with_context(|| format!("Failed to connect to {}", target))?
        .on_change(move |state, change| println!("{}", output::change_line(state, change, as_json)));

    info!(
        "Monitoring {} ({}, {} variant)",
        device.state().device_name,
        device.product(),
        device.variant().name()
    );

    let key_thread = if config.key_events {
        let stream = device
            .start_key_events()
            .context("Failed to start key event stream")?;
        let serialno = device.state().serialno.clone();
        Some(thread::spawn(move || {
            for event in stream {
                println!("{}", output::key_line(&serialno, &event, as_json));
            }
        }))
    } else {
        None
    };

    let running = Arc::new(AtomicBool::new(true));
    let r = Arc::clone(&running);
    ctrlc::set_handler(move || {
        r.store(false, Ordering::SeqCst);
    })?;

    let mut updates = 0;
    let result = loop {
        if !running.load(Ordering::SeqCst) {
            break Ok(());
        }
        if let Err(e) = device.update() {
            break Err(anyhow::Error::new(e).context("Update failed"));
        }
        updates += 1;
        if config.count.is_some_and(|count| updates >= count) {
            break Ok(());
        }
        thread::sleep(config.interval);
    };

    if config.count.is_some() {
        println!("{}", output::state_snapshot(device.state(), as_json));
    }

    device.close();
    if let Some(handle) = key_thread {
        if handle.join().is_err() {
            warn!("Key event thread panicked");
        }
    }
    result
}
