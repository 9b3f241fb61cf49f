//! Error types for the adb shell layer

use std::io::ErrorKind;

use thiserror::Error;

/// Errors that can occur while talking to a device shell
#[derive(Debug, Error)]
pub enum ShellError {
    /// The adb process could not be started
    #[error("Failed to spawn adb: {0}")]
    Spawn(std::io::Error),

    /// Reading from or writing to the shell failed
    #[error("Shell I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The session was already closed
    #[error("Shell session is closed")]
    Closed,
}

impl ShellError {
    /// True when the remote end went away before a command completed.
    ///
    /// A process that exits before the command is written shows up as a
    /// broken pipe rather than an end of output.
    pub fn is_end_of_stream(&self) -> bool {
        matches!(
            self,
            ShellError::Io(e) if matches!(e.kind(), ErrorKind::UnexpectedEof | ErrorKind::BrokenPipe)
        )
    }
}

/// Result type alias for shell operations
pub type Result<T> = std::result::Result<T, ShellError>;
