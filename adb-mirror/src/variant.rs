//! Device families with extra capabilities
//!
//! The variant is picked once, from `ro.product.name`, when a device is
//! created. NVIDIA SHIELD devices additionally report wakefulness and can
//! be put to sleep or woken up.

use adb_parser::parse_wakefulness;
use adb_shell::Shell;
use adb_state::{DeviceState, Wakefulness};
use tracing::debug;

use crate::commands;
use crate::config::DeviceConfig;
use crate::error::{DeviceError, Result};
use crate::orchestrator::{self, query};

/// Product names of the SHIELD family
pub const SHIELD_PRODUCTS: [&str; 4] = ["darcy", "mdarcy", "sif", "foster"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Variant {
    /// Any Android device
    #[default]
    Base,
    /// NVIDIA SHIELD
    Shield,
}

impl Variant {
    /// Select the variant for a reported product name. Unknown products are `Base`.
    pub fn for_product(product: &str) -> Self {
        if SHIELD_PRODUCTS.contains(&product.trim()) {
            Variant::Shield
        } else {
            Variant::Base
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Variant::Base => "base",
            Variant::Shield => "shield",
        }
    }

    /// Whether the variant reports wakefulness and handles sleep/wake
    pub fn has_power_control(self) -> bool {
        matches!(self, Variant::Shield)
    }

    /// Run a full refresh cycle for this variant
    pub fn refresh<S: Shell + ?Sized>(
        self,
        shell: &mut S,
        config: &DeviceConfig,
        current: &DeviceState,
    ) -> Result<DeviceState> {
        let mut next = orchestrator::refresh(shell, config, current)?;
        if let Variant::Shield = self {
            let output = query(shell, commands::WAKEFULNESS)?;
            next.wakefulness = parse_wakefulness(&output).and_then(|word| Wakefulness::parse(&word));
        }
        Ok(next)
    }

    /// Wake the device if it is asleep
    pub fn wake_up<S: Shell + ?Sized>(self, shell: &mut S) -> Result<()> {
        self.power(shell, "wake_up", commands::WAKE_UP)
    }

    /// Put the device to sleep if it is awake
    pub fn sleep<S: Shell + ?Sized>(self, shell: &mut S) -> Result<()> {
        self.power(shell, "sleep", commands::SLEEP)
    }

    fn power<S: Shell + ?Sized>(
        self,
        shell: &mut S,
        operation: &'static str,
        command: &str,
    ) -> Result<()> {
        if !self.has_power_control() {
            return Err(DeviceError::Unsupported(operation));
        }
        debug!(operation, "sending conditional power key");
        query(shell, command)?;
        Ok(())
    }

    /// Last committed wakefulness, for variants that report it
    pub fn wakefulness(self, state: &DeviceState) -> Result<Option<Wakefulness>> {
        if !self.has_power_control() {
            return Err(DeviceError::Unsupported("wakefulness"));
        }
        Ok(state.wakefulness)
    }
}
