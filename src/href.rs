use std::borrow::Cow;

/// Joins `prefix` and `segments` with `/`, percent-encoding each segment on its own so
/// that separators survive and reserved characters inside a name do not.
///
/// The prefix may itself span several segments, split on either separator. Empty
/// segments are dropped so that `"videos/"` does not double a slash.
pub fn encode(prefix: &str, segments: &[&str]) -> String {
    let encoded: Vec<Cow<str>> = prefix
        .split(['/', '\\'])
        .chain(segments.iter().copied())
        .filter(|segment| !segment.is_empty())
        .map(urlencoding::encode)
        .collect();
    encoded.join("/")
}
