//! Foreground window extraction from `dumpsys window windows`

use std::sync::LazyLock;

use regex::Regex;

static CURRENT_FOCUS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^\s*mCurrentFocus=Window\{[0-9a-f]+ u0 ([A-Za-z0-9._$]+)/([A-Za-z0-9._$]+)\}\s*$")
        .expect("valid mCurrentFocus regex")
});

/// The focused application package and its window class
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WindowFocus {
    pub package: String,
    pub window: String,
}

/// Find the `mCurrentFocus=Window{...}` line and split out package and window.
///
/// Returns `None` when no line has that exact shape, e.g. when focus is on a
/// system surface such as `Window{... u0 StatusBar}` or focus is `null`.
pub fn parse_window_focus(dump: &str) -> Option<WindowFocus> {
    let captures = CURRENT_FOCUS.captures(dump)?;
    Some(WindowFocus {
        package: captures[1].to_string(),
        window: captures[2].to_string(),
    })
}
