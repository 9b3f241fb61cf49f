//! # adb-parser
//!
//! Pure parsing functions that turn Android diagnostic dumps (`dumpsys`,
//! `getprop`, `/proc`) into structured values.
//!
//! None of these functions fail: output that does not match the expected
//! shape yields `None` or an empty collection, and callers decide what the
//! absence means.
//!
//! ## Usage
//!
//! ```rust
//! use adb_parser::{parse_window_focus, scan_key_values};
//!
//! let focus = parse_window_focus(
//!     "  mCurrentFocus=Window{4b1d2f0 u0 com.plexapp.android/com.plexapp.plex.activities.SplashActivity}\n",
//! ).unwrap();
//! assert_eq!(focus.package, "com.plexapp.android");
//!
//! let fields = scan_key_values(r#"label="Plex" uid=10084"#);
//! assert_eq!(fields.get("label").map(String::as_str), Some("Plex"));
//! ```

pub mod key_values;
pub mod media_session;
pub mod settings;
pub mod system;
pub mod window;

pub use key_values::scan_key_values;
pub use media_session::{extract_playback_block, find_song_segment, PlaybackFields, SongMetadata};
pub use settings::parse_device_name;
pub use system::{parse_uptime, parse_wakefulness};
pub use window::{parse_window_focus, WindowFocus};
