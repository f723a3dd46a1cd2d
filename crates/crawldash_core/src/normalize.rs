use serde_json::Value;

/// Turns operator text into the ordered list of URLs to submit.
///
/// A JSON array whose elements are all non-blank strings is taken verbatim.
/// Anything else falls back to one URL per line, trimmed, blank lines
/// dropped. Malformed JSON is never an error.
pub fn normalize_urls(raw: &str) -> Vec<String> {
    match parse_json_list(raw) {
        Some(urls) => urls,
        None => parse_lines(raw),
    }
}

fn parse_json_list(raw: &str) -> Option<Vec<String>> {
    let Value::Array(items) = serde_json::from_str::<Value>(raw).ok()? else {
        return None;
    };
    items
        .into_iter()
        .map(|item| match item {
            Value::String(url) if !url.trim().is_empty() => Some(url),
            _ => None,
        })
        .collect()
}

fn parse_lines(raw: &str) -> Vec<String> {
    raw.split('\n')
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(ToOwned::to_owned)
        .collect()
}
