//! Small system readings: uptime and power wakefulness

/// Seconds since boot from `/proc/uptime` (`"3600.25 7000.50"`)
pub fn parse_uptime(output: &str) -> Option<f64> {
    output.split_whitespace().next()?.parse().ok()
}

/// Lowercased wakefulness word from `  mWakefulness=Awake`.
///
/// Returns the text after the last `=` on the trimmed line, so mapping it to
/// a known state is left to the caller.
pub fn parse_wakefulness(output: &str) -> Option<String> {
    let line = output.trim();
    if !line.contains('=') {
        return None;
    }
    let word = line.rsplit('=').next()?.trim();
    (!word.is_empty()).then(|| word.to_lowercase())
}
