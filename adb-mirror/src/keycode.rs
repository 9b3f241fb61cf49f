//! Key codes for `input keyevent`

use std::fmt;

/// Prefix of Android's symbolic key names
pub const KEYCODE_PREFIX: &str = "KEYCODE_";

/// A key to inject, by number or by name.
///
/// Names are rendered uppercased with the `KEYCODE_` prefix, so `"home"`,
/// `"HOME"` and `"KEYCODE_HOME"` all send `KEYCODE_HOME`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum KeyCode {
    Code(u32),
    Name(String),
}

impl KeyCode {
    pub fn power() -> Self {
        KeyCode::Name("POWER".to_string())
    }
}

impl fmt::Display for KeyCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KeyCode::Code(code) => write!(f, "{}", code),
            KeyCode::Name(name) => {
                let name = name.to_uppercase();
                if name.starts_with(KEYCODE_PREFIX) {
                    f.write_str(&name)
                } else {
                    write!(f, "{}{}", KEYCODE_PREFIX, name)
                }
            }
        }
    }
}

impl From<u32> for KeyCode {
    fn from(code: u32) -> Self {
        KeyCode::Code(code)
    }
}

/// Digits become a numeric code, anything else a name
impl From<&str> for KeyCode {
    fn from(key: &str) -> Self {
        match key.trim().parse() {
            Ok(code) => KeyCode::Code(code),
            Err(_) => KeyCode::Name(key.trim().to_string()),
        }
    }
}

impl From<String> for KeyCode {
    fn from(key: String) -> Self {
        KeyCode::from(key.as_str())
    }
}
