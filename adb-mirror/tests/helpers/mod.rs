//! Scripted shell for driving devices without adb

#![allow(dead_code)]

use std::io;
use std::sync::{Arc, Mutex};

use adb_mirror::{Device, DeviceConfig, DeviceTarget, Shell, ShellError};

pub const SERIAL: &str = "0423417004213";

pub const SPOTIFY_FOCUS: &str =
    "  mCurrentFocus=Window{86f07c3 u0 com.spotify.tv.android/com.spotify.tv.android.SpotifyTVActivity}\n";
pub const LAUNCHER_FOCUS: &str =
    "  mCurrentFocus=Window{1a2b3c u0 com.google.android.tvlauncher/com.google.android.tvlauncher.MainActivity}\n";
pub const SPOTIFY_LABEL: &str = "    com.spotify.tv.android: label=\"Spotify\"\n";

/// A `state=PlaybackState` line as `grep` leaves it
pub fn playback_line(state: i64, position_ms: u64, updated_ms: u64, song: Option<&str>) -> String {
    let extras = match song {
        Some(song) => format!("Bundle[{{song=[{}]}}]", song),
        None => "null".to_string(),
    };
    format!(
        "      state=PlaybackState {{state={}, position={}, buffer position=0, speed=1.0, updated={}, actions=379, custom actions=[], active item id=4, error=null, extras={}}}\n",
        state, position_ms, updated_ms, extras
    )
}

#[derive(Default)]
struct Script {
    /// (command fragment, output), first match wins
    rules: Vec<(String, String)>,
    log: Vec<String>,
    eof: bool,
    closed: usize,
}

/// Shared view of a scripted shell, usable after the shell moves into a device
#[derive(Clone, Default)]
pub struct ShellScript(Arc<Mutex<Script>>);

impl ShellScript {
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer commands containing `fragment` with `output`, replacing any
    /// earlier answer for the same fragment
    pub fn answer(&self, fragment: &str, output: impl Into<String>) -> &Self {
        let mut script = self.0.lock().unwrap();
        let output = output.into();
        match script.rules.iter_mut().find(|(f, _)| f == fragment) {
            Some(rule) => rule.1 = output,
            None => script.rules.push((fragment.to_string(), output)),
        }
        self
    }

    /// Make every command fail as if the remote end hung up
    pub fn hang_up(&self) {
        self.0.lock().unwrap().eof = true;
    }

    /// Commands executed so far
    pub fn log(&self) -> Vec<String> {
        self.0.lock().unwrap().log.clone()
    }

    pub fn clear_log(&self) {
        self.0.lock().unwrap().log.clear();
    }

    pub fn close_count(&self) -> usize {
        self.0.lock().unwrap().closed
    }

    pub fn shell(&self) -> ScriptedShell {
        ScriptedShell(self.clone())
    }

    /// Identity answers for a device with the given product name
    pub fn identity(&self, product: &str) -> &Self {
        self.answer("getprop ro.product.name", format!("{}\n", product))
            .answer("getprop ro.serialno", format!("{}\n", SERIAL))
            .answer(
                "dumpsys settings",
                "_id:7 name:device_name pkg:android value:Living Room TV default:SHIELD defaultSystemSet:true\n",
            )
    }
}

pub struct ScriptedShell(ShellScript);

impl Shell for ScriptedShell {
    fn execute(&mut self, command: &str) -> Result<String, ShellError> {
        let mut script = self.0 .0.lock().unwrap();
        if script.eof {
            return Err(io::Error::from(io::ErrorKind::UnexpectedEof).into());
        }
        script.log.push(command.to_string());
        let output = script
            .rules
            .iter()
            .find(|(fragment, _)| command.contains(fragment.as_str()))
            .map(|(_, output)| output.clone())
            .unwrap_or_default();
        Ok(output)
    }

    fn close(&mut self) {
        self.0 .0.lock().unwrap().closed += 1;
    }
}

/// Connect a device over `script` after scripting its identity
pub fn connect(script: &ShellScript, product: &str) -> Device<ScriptedShell> {
    script.identity(product);
    let device = Device::from_shell(script.shell(), DeviceTarget::from(SERIAL), DeviceConfig::default())
        .expect("handshake");
    script.clear_log();
    device
}
