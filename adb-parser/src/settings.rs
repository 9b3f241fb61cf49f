//! Device name reconstruction from `dumpsys settings`

/// Rebuild the `value` field of a settings line such as
/// `_id:12 name:device_name pkg:android value:Living Room TV default:SHIELD`.
///
/// Tokens are `key:value` pairs separated by spaces, but values are not
/// escaped. A token without a colon is taken as a continuation of the
/// previous value and re-joined with a single space. Names that themselves
/// contain a colon will be split incorrectly.
pub fn parse_device_name(line: &str) -> Option<String> {
    let mut fields: Vec<(&str, String)> = Vec::new();

    for token in line.split_whitespace() {
        match token.split_once(':') {
            Some((key, value)) => fields.push((key, value.to_string())),
            None => {
                if let Some((_, value)) = fields.last_mut() {
                    value.push(' ');
                    value.push_str(token);
                }
            }
        }
    }

    // Later fields override earlier ones with the same key
    fields
        .into_iter()
        .rev()
        .find(|(key, _)| *key == "value")
        .map(|(_, value)| value)
}
