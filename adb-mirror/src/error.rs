use adb_shell::ShellError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DeviceError {
    /// The shell ended before the identity handshake completed
    #[error("Device not found: {0}")]
    DeviceNotFound(String),

    #[error("Shell error: {0}")]
    Shell(#[from] ShellError),

    /// The device variant does not provide this operation
    #[error("Operation not supported by this device: {0}")]
    Unsupported(&'static str),

    #[error("Device is closed")]
    Closed,
}

pub type Result<T> = std::result::Result<T, DeviceError>;
