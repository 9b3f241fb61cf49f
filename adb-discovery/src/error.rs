//! Error types for enumeration and discovery.

use thiserror::Error;

/// Error type for discovery operations.
///
/// A listing command that runs but exits non-zero is not an error; it is
/// reported through [`ListOutcome::diagnostics`](crate::ListOutcome).
#[derive(Debug, Error)]
pub enum DiscoveryError {
    /// The adb binary could not be started
    #[error("failed to run adb: {0}")]
    Command(#[from] std::io::Error),

    /// The mDNS daemon could not be started or browsed
    #[error("mDNS error: {0}")]
    Mdns(#[from] mdns_sd::Error),
}

pub type Result<T> = std::result::Result<T, DiscoveryError>;
