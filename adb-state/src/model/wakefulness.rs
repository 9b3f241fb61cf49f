use serde::{Deserialize, Serialize};
use std::fmt;

/// Power state reported by `dumpsys power`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Wakefulness {
    Asleep,
    Awake,
    Dreaming,
}

impl Wakefulness {
    /// Parse a lowercase wakefulness word. Anything else, `dozing` included, is `None`.
    pub fn parse(word: &str) -> Option<Self> {
        match word {
            "asleep" => Some(Wakefulness::Asleep),
            "awake" => Some(Wakefulness::Awake),
            "dreaming" => Some(Wakefulness::Dreaming),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Wakefulness::Asleep => "asleep",
            Wakefulness::Awake => "awake",
            Wakefulness::Dreaming => "dreaming",
        }
    }
}

impl fmt::Display for Wakefulness {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
