//! Device handle
//!
//! A [`Device`] owns one shell session to one Android device, the committed
//! [`DeviceState`] mirrored from it, and optionally the key event stream it
//! started. All queries go through the session one at a time; callers drive
//! the polling cadence by calling [`Device::update`].

use adb_parser::parse_device_name;
use adb_shell::{DeviceTarget, EventStream, EventStreamHandle, Shell, ShellSession};
use adb_state::{DeviceState, StateChange, Wakefulness};
use tracing::{debug, info};

use crate::commands;
use crate::config::DeviceConfig;
use crate::error::{DeviceError, Result};
use crate::keycode::KeyCode;
use crate::orchestrator::query;
use crate::variant::Variant;

/// Called once per changed field, after the whole refresh has been committed
pub type ChangeCallback = Box<dyn FnMut(&DeviceState, &StateChange) + Send>;

/// A connected Android device.
///
/// # Example
///
/// ```rust,no_run
/// use adb_mirror::Device;
///
/// let mut device = Device::create("0423417004213")?
///     .on_change(|state, change| println!("{}: {}", state.device_name, change));
///
/// device.update()?;
/// println!("now showing {}", device.state().foreground_app);
/// device.close();
/// # Ok::<(), adb_mirror::DeviceError>(())
/// ```
pub struct Device<S: Shell = ShellSession> {
    shell: S,
    target: DeviceTarget,
    config: DeviceConfig,
    product: String,
    variant: Variant,
    state: DeviceState,
    on_change: Option<ChangeCallback>,
    key_events: Option<EventStreamHandle>,
    closed: bool,
}

impl Device<ShellSession> {
    /// Open a shell to `target` using adb from `ADB_PATH` or `PATH`
    pub fn create(target: impl Into<DeviceTarget>) -> Result<Self> {
        Self::with_config(target, DeviceConfig::from_env())
    }

    pub fn with_config(target: impl Into<DeviceTarget>, config: DeviceConfig) -> Result<Self> {
        let target = target.into();
        let shell = ShellSession::spawn(&config.adb, &target)?;
        Self::from_shell(shell, target, config)
    }
}

impl<S: Shell> Device<S> {
    /// Run the identity handshake over an already open shell and select the
    /// device variant.
    ///
    /// Fails with [`DeviceError::DeviceNotFound`] if the shell ends before
    /// the handshake completes, which is what adb does for unknown serials.
    pub fn from_shell(mut shell: S, target: DeviceTarget, config: DeviceConfig) -> Result<Self> {
        let product = handshake(&mut shell, &target, commands::PRODUCT_NAME)?
            .trim()
            .to_string();
        let serialno = handshake(&mut shell, &target, commands::SERIAL_NUMBER)?
            .trim()
            .to_string();
        let device_name = parse_device_name(&handshake(&mut shell, &target, commands::DEVICE_NAME)?)
            .unwrap_or_default();

        let variant = Variant::for_product(&product);
        info!(
            target = %target,
            product = %product,
            variant = variant.name(),
            serialno = %serialno,
            "Connected to {:?}",
            device_name
        );

        Ok(Self {
            shell,
            target,
            config,
            product,
            variant,
            state: DeviceState::new(serialno, device_name),
            on_change: None,
            key_events: None,
            closed: false,
        })
    }

    /// Register the change callback, replacing any previous one
    pub fn on_change<F>(mut self, callback: F) -> Self
    where
        F: FnMut(&DeviceState, &StateChange) + Send + 'static,
    {
        self.on_change = Some(Box::new(callback));
        self
    }

    /// Refresh every field from the device and commit the result.
    ///
    /// Returns the changes in field order. The change callback runs once per
    /// change, after all of them have been committed.
    pub fn update(&mut self) -> Result<Vec<StateChange>> {
        self.ensure_open()?;

        let next = self.variant.refresh(&mut self.shell, &self.config, &self.state)?;
        let changes = self.state.commit(next);

        for change in &changes {
            debug!(serialno = %self.state.serialno, "{}", change);
            if let Some(callback) = self.on_change.as_mut() {
                callback(&self.state, change);
            }
        }
        Ok(changes)
    }

    pub fn state(&self) -> &DeviceState {
        &self.state
    }

    pub fn target(&self) -> &DeviceTarget {
        &self.target
    }

    /// `ro.product.name` as reported at connect time
    pub fn product(&self) -> &str {
        &self.product
    }

    pub fn variant(&self) -> Variant {
        self.variant
    }

    pub fn config(&self) -> &DeviceConfig {
        &self.config
    }

    /// Inject a key press
    pub fn keyevent(&mut self, key: impl Into<KeyCode>) -> Result<()> {
        self.ensure_open()?;
        query(&mut self.shell, &commands::keyevent(&key.into()))?;
        Ok(())
    }

    pub fn wake_up(&mut self) -> Result<()> {
        self.ensure_open()?;
        self.variant.wake_up(&mut self.shell)
    }

    pub fn sleep(&mut self) -> Result<()> {
        self.ensure_open()?;
        self.variant.sleep(&mut self.shell)
    }

    /// Wakefulness as of the last update
    pub fn wakefulness(&self) -> Result<Option<Wakefulness>> {
        self.variant.wakefulness(&self.state)
    }

    /// Run an arbitrary command through the device's session
    pub fn shell(&mut self, command: &str) -> Result<String> {
        self.ensure_open()?;
        query(&mut self.shell, command)
    }

    /// Start a `getevent` stream for this device.
    ///
    /// Iterate the returned stream on its own thread; it blocks between
    /// events. Closing the device also closes the stream.
    pub fn start_key_events(&mut self) -> Result<EventStream> {
        self.ensure_open()?;
        let stream = EventStream::spawn(&self.config.adb, &self.target)?;
        self.track_key_events(&stream);
        Ok(stream)
    }

    /// Tie an existing event stream's lifetime to this device
    pub fn track_key_events(&mut self, stream: &EventStream) {
        if let Some(previous) = self.key_events.replace(stream.handle()) {
            previous.close();
        }
    }

    /// Terminate the session and any key event stream. Safe to call repeatedly.
    pub fn close(&mut self) {
        if self.closed {
            return;
        }
        self.closed = true;
        self.shell.close();
        if let Some(events) = self.key_events.take() {
            events.close();
        }
        info!(target = %self.target, "Closed device");
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    fn ensure_open(&self) -> Result<()> {
        if self.closed {
            Err(DeviceError::Closed)
        } else {
            Ok(())
        }
    }
}

fn handshake<S: Shell>(shell: &mut S, target: &DeviceTarget, command: &str) -> Result<String> {
    shell.execute(command).map_err(|err| match err {
        err if err.is_end_of_stream() => DeviceError::DeviceNotFound(target.to_string()),
        err => DeviceError::Shell(err),
    })
}

impl<S: Shell> Drop for Device<S> {
    fn drop(&mut self) {
        self.close();
    }
}

impl<S: Shell> std::fmt::Debug for Device<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Device")
            .field("target", &self.target)
            .field("product", &self.product)
            .field("variant", &self.variant)
            .field("state", &self.state)
            .field("closed", &self.closed)
            .finish()
    }
}
