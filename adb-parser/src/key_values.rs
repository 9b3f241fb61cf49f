//! Generic `key=value` token scanner

use std::collections::HashMap;
use std::sync::LazyLock;

use regex::Regex;

/// `identifier=value`, where value is a double-quoted span or a run of
/// non-space characters. Escaped quotes are not recognised.
static KEY_VALUE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"([A-Za-z_][A-Za-z0-9_]*)=(?:"([^"]*)"|(\S+))"#).expect("valid key=value regex")
});

/// Collect every `key=value` token in `text`.
///
/// When a key appears more than once, the first occurrence in scan order wins.
pub fn scan_key_values(text: &str) -> HashMap<String, String> {
    let mut values = HashMap::new();

    for captures in KEY_VALUE.captures_iter(text) {
        let value = captures
            .get(2)
            .or_else(|| captures.get(3))
            .map_or("", |m| m.as_str());

        values
            .entry(captures[1].to_string())
            .or_insert_with(|| value.to_string());
    }

    values
}
