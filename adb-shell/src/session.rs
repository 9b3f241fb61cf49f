//! Persistent shell session with sentinel-framed command output
//!
//! A single `adb shell` process is kept open for the lifetime of a session.
//! Every command is followed by `echo <SENTINEL>`; output is accumulated until
//! it ends with the sentinel line, which marks where the command's output stops.

use std::io::{ErrorKind, Read, Write};
use std::process::{Child, Stdio};

use tracing::{debug, info, trace};

use crate::config::{AdbConfig, DeviceTarget};
use crate::error::{Result, ShellError};

/// Marker echoed after every command
pub const SENTINEL: &str = "COMMAND COMPLETE";

/// The sentinel as it arrives on the wire, newline included
const SENTINEL_LINE: &[u8] = b"COMMAND COMPLETE\n";

const READ_CHUNK: usize = 4096;

/// Anything that can run a command on a device and hand back its output.
///
/// `ShellSession` is the production implementation; tests substitute
/// scripted shells.
pub trait Shell {
    /// Run `command` and block until its full output is available
    fn execute(&mut self, command: &str) -> Result<String>;

    /// Terminate the underlying session. Calling it twice is a no-op.
    fn close(&mut self);
}

/// One persistent remote shell bound to a single device
pub struct ShellSession {
    child: Option<Child>,
    input: Box<dyn Write + Send>,
    output: Box<dyn Read + Send>,
    closed: bool,
}

impl ShellSession {
    /// Start `adb <selector> shell` for `target`
    pub fn spawn(config: &AdbConfig, target: &DeviceTarget) -> Result<Self> {
        let mut child = config
            .command_for(target)
            .arg("shell")
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::null())
            .spawn()
            .map_err(ShellError::Spawn)?;

        let input = child.stdin.take().ok_or(ShellError::Closed)?;
        let output = child.stdout.take().ok_or(ShellError::Closed)?;

        info!(target = %target, pid = child.id(), "Opened adb shell session");

        Ok(Self {
            child: Some(child),
            input: Box::new(input),
            output: Box::new(output),
            closed: false,
        })
    }

    /// Build a session over arbitrary streams with no process behind them
    pub fn from_streams<R, W>(output: R, input: W) -> Self
    where
        R: Read + Send + 'static,
        W: Write + Send + 'static,
    {
        Self {
            child: None,
            input: Box::new(input),
            output: Box::new(output),
            closed: false,
        }
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    /// Read until the accumulated bytes end with the sentinel line.
    ///
    /// Reads may return any number of bytes, so the check is made on the
    /// whole buffer rather than on individual chunks.
    fn read_until_sentinel(&mut self) -> Result<Vec<u8>> {
        let mut buffer = Vec::new();
        let mut chunk = [0u8; READ_CHUNK];

        while !buffer.ends_with(SENTINEL_LINE) {
            let read = match self.output.read(&mut chunk) {
                Ok(0) => return Err(std::io::Error::from(ErrorKind::UnexpectedEof).into()),
                Ok(read) => read,
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => return Err(e.into()),
            };
            buffer.extend_from_slice(&chunk[..read]);
        }

        buffer.truncate(buffer.len() - SENTINEL_LINE.len());
        Ok(buffer)
    }
}

impl Shell for ShellSession {
    fn execute(&mut self, command: &str) -> Result<String> {
        if self.closed {
            return Err(ShellError::Closed);
        }

        debug!(command, "Executing shell command");
        writeln!(self.input, "{}; echo {}", command, SENTINEL)?;
        self.input.flush()?;

        let raw = self.read_until_sentinel()?;
        trace!(bytes = raw.len(), "Command output received");

        Ok(String::from_utf8_lossy(&raw).into_owned())
    }

    fn close(&mut self) {
        if self.closed {
            return;
        }
        self.closed = true;

        if let Some(mut child) = self.child.take() {
            // The process may already have exited on its own
            if let Err(e) = child.kill() {
                debug!(error = %e, "adb shell was not running at close");
            }
            let _ = child.wait();
            info!(pid = child.id(), "Closed adb shell session");
        }
    }
}

impl Drop for ShellSession {
    fn drop(&mut self) {
        self.close();
    }
}

impl std::fmt::Debug for ShellSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ShellSession")
            .field("pid", &self.child.as_ref().map(Child::id))
            .field("closed", &self.closed)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;
    use std::sync::{Arc, Mutex};

    /// Writer whose contents stay inspectable after the session takes it
    #[derive(Clone, Default)]
    struct SharedWriter(Arc<Mutex<Vec<u8>>>);

    impl Write for SharedWriter {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_sentinel_constants_agree() {
        assert_eq!(SENTINEL_LINE, format!("{}\n", SENTINEL).as_bytes());
    }

    #[test]
    fn test_execute_writes_framed_command() {
        let writer = SharedWriter::default();
        let output = Cursor::new(b"darcy\nCOMMAND COMPLETE\n".to_vec());
        let mut session = ShellSession::from_streams(output, writer.clone());

        let result = session.execute("getprop ro.product.name").unwrap();

        assert_eq!(result, "darcy\n");
        let written = String::from_utf8(writer.0.lock().unwrap().clone()).unwrap();
        assert_eq!(written, "getprop ro.product.name; echo COMMAND COMPLETE\n");
    }

    #[test]
    fn test_execute_with_empty_output() {
        let output = Cursor::new(b"COMMAND COMPLETE\n".to_vec());
        let mut session = ShellSession::from_streams(output, std::io::sink());

        assert_eq!(session.execute("true").unwrap(), "");
    }

    #[test]
    fn test_end_of_stream_is_reported() {
        let output = Cursor::new(b"partial output".to_vec());
        let mut session = ShellSession::from_streams(output, std::io::sink());

        let err = session.execute("dumpsys power").unwrap_err();
        assert!(err.is_end_of_stream());
    }

    /// Writer whose reader has gone away
    struct ClosedPipe;

    impl Write for ClosedPipe {
        fn write(&mut self, _: &[u8]) -> std::io::Result<usize> {
            Err(std::io::Error::from(ErrorKind::BrokenPipe))
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_broken_pipe_is_end_of_stream() {
        let mut session = ShellSession::from_streams(Cursor::new(Vec::new()), ClosedPipe);

        let err = session.execute("getprop ro.product.name").unwrap_err();
        assert!(err.is_end_of_stream());
    }

    #[test]
    fn test_close_is_idempotent() {
        let output = Cursor::new(Vec::new());
        let mut session = ShellSession::from_streams(output, std::io::sink());

        session.close();
        session.close();

        assert!(session.is_closed());
        assert!(matches!(session.execute("true"), Err(ShellError::Closed)));
    }
}
