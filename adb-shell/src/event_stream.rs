//! Raw key-event stream from `getevent`
//!
//! Runs `adb shell getevent -lt` as its own process and surfaces the key
//! events it prints. The stream blocks on the process's output, so it belongs
//! on a different thread from the device's update loop.

use std::io::{BufRead, BufReader, Lines, Read};
use std::process::{Child, Stdio};
use std::sync::Arc;

use parking_lot::Mutex;
use tracing::{debug, info, trace};

use crate::config::{AdbConfig, DeviceTarget};
use crate::error::{Result, ShellError};

/// Event type emitted by getevent for keys and buttons
pub const KEY_EVENT_TYPE: &str = "EV_KEY";

/// A single key activity line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyEvent {
    /// Key name, e.g. `KEY_HOME`
    pub code: String,
    /// Transition, e.g. `DOWN`, `UP`
    pub value: String,
}

/// One parsed `getevent -lt` line
#[derive(Debug, Clone, PartialEq)]
pub struct RawInputEvent {
    pub timestamp: Option<f64>,
    pub device: String,
    pub kind: String,
    pub code: String,
    pub value: String,
}

impl RawInputEvent {
    /// Parse `[   4012.123456] /dev/input/event3: EV_KEY KEY_HOME DOWN`.
    ///
    /// The bracketed timestamp is optional. Returns `None` for anything
    /// that does not carry all four remaining fields.
    pub fn parse(line: &str) -> Option<Self> {
        let line = line.trim();
        let (timestamp, rest) = match line.strip_prefix('[') {
            Some(stamped) => {
                let (stamp, rest) = stamped.split_once(']')?;
                (stamp.trim().parse::<f64>().ok(), rest)
            }
            None => (None, line),
        };

        let mut fields = rest.split_whitespace();
        let device = fields.next()?.trim_end_matches(':').to_string();
        let kind = fields.next()?.to_string();
        let code = fields.next()?.to_string();
        let value = fields.next()?.to_string();

        Some(Self {
            timestamp,
            device,
            kind,
            code,
            value,
        })
    }

    /// The key event carried by this line, if it is one
    pub fn into_key_event(self) -> Option<KeyEvent> {
        (self.kind == KEY_EVENT_TYPE).then_some(KeyEvent {
            code: self.code,
            value: self.value,
        })
    }
}

#[derive(Default)]
struct StreamState {
    child: Option<Child>,
    closed: bool,
}

/// Handle that can stop an `EventStream` from another thread
#[derive(Clone)]
pub struct EventStreamHandle {
    state: Arc<Mutex<StreamState>>,
}

impl EventStreamHandle {
    /// Kill and reap the getevent process. Safe to call repeatedly.
    pub fn close(&self) {
        let mut state = self.state.lock();
        if state.closed {
            return;
        }
        state.closed = true;

        if let Some(mut child) = state.child.take() {
            if let Err(e) = child.kill() {
                debug!(error = %e, "getevent was not running at close");
            }
            let _ = child.wait();
            info!(pid = child.id(), "Closed key event stream");
        }
    }

    pub fn is_closed(&self) -> bool {
        self.state.lock().closed
    }
}

impl std::fmt::Debug for EventStreamHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventStreamHandle")
            .field("closed", &self.is_closed())
            .finish()
    }
}

/// Unbounded, non-restartable sequence of key events.
///
/// Iteration ends when the process reaches end of stream or the stream is
/// closed through its handle.
pub struct EventStream {
    lines: Lines<BufReader<Box<dyn Read + Send>>>,
    handle: EventStreamHandle,
}

impl EventStream {
    /// Start `adb <selector> shell getevent -lt` for `target`
    pub fn spawn(config: &AdbConfig, target: &DeviceTarget) -> Result<Self> {
        let mut child = config
            .command_for(target)
            .args(["shell", "getevent", "-lt"])
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::null())
            .spawn()
            .map_err(ShellError::Spawn)?;

        let output = child.stdout.take().ok_or(ShellError::Closed)?;
        info!(target = %target, pid = child.id(), "Started key event stream");

        let mut stream = Self::from_reader(output);
        stream.handle.state.lock().child = Some(child);
        Ok(stream)
    }

    /// Read events from any line source, with no process to manage
    pub fn from_reader<R: Read + Send + 'static>(reader: R) -> Self {
        let reader: Box<dyn Read + Send> = Box::new(reader);
        Self {
            lines: BufReader::new(reader).lines(),
            handle: EventStreamHandle {
                state: Arc::new(Mutex::new(StreamState::default())),
            },
        }
    }

    pub fn handle(&self) -> EventStreamHandle {
        self.handle.clone()
    }

    pub fn close(&self) {
        self.handle.close();
    }
}

impl Iterator for EventStream {
    type Item = KeyEvent;

    fn next(&mut self) -> Option<KeyEvent> {
        loop {
            if self.handle.is_closed() {
                return None;
            }

            let line = match self.lines.next()? {
                Ok(line) => line,
                Err(e) => {
                    debug!(error = %e, "Key event stream read failed");
                    return None;
                }
            };
            trace!(line = %line, "getevent line");

            if let Some(event) = RawInputEvent::parse(&line).and_then(RawInputEvent::into_key_event) {
                return Some(event);
            }
        }
    }
}

impl Drop for EventStream {
    fn drop(&mut self) {
        self.handle.close();
    }
}
