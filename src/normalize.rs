use regex::Regex;

/// Duplicate-file suffixes left behind by file managers: "foo copy.mp4", "foo 副本.mp4".
static COPY_SUFFIXES: &[&str] = &["copy", "副本"];

/// Produces comparison keys for file and kind names.
///
/// Keys are only ever compared against each other; they never turn back into a
/// display name.
pub struct KeyNormalizer {
    duplicate_marker: Regex,
    token: Regex,
}

impl KeyNormalizer {
    pub fn new() -> Self {
        Self {
            duplicate_marker: Regex::new(r"\(\s*\d+\s*\)|\[\s*\d+\s*\]").unwrap(),
            token: Regex::new(r"[^\W_]+").unwrap(),
        }
    }

    /// Folds case, drops separators and strips duplicate markers and copy suffixes.
    pub fn normalize(&self, raw: &str) -> String {
        let lower = raw.to_lowercase();
        let unmarked = self.duplicate_marker.replace_all(&lower, "");
        let mut key: String = unmarked
            .chars()
            .filter(|&u| !(u.is_whitespace() || u == '_' || u == '-'))
            .collect();

        // "clip copy (2)" leaves "clipcopy" behind; "clip copy copy" is also a thing.
        while let Some(len) = COPY_SUFFIXES
            .iter()
            .find(|&&suffix| key.len() > suffix.len() && key.ends_with(suffix))
            .map(|suffix| suffix.len())
        {
            key.truncate(key.len() - len);
        }

        key
    }

    /// Lowercase alphanumeric runs, in order of appearance.
    pub fn tokenize(&self, raw: &str) -> Vec<String> {
        let lower = raw.to_lowercase();
        self.token
            .find_iter(&lower)
            .map(|token| token.as_str().to_owned())
            .collect()
    }

    pub fn stems(&self, raw: &str) -> Vec<String> {
        self.tokenize(raw)
            .into_iter()
            .map(|token| stem(&token).to_owned())
            .collect()
    }
}

impl Default for KeyNormalizer {
    fn default() -> Self {
        Self::new()
    }
}

/// Naive singularization: a single trailing "s" goes away.
pub fn stem(token: &str) -> &str {
    match token.strip_suffix('s') {
        Some(stem) if !stem.is_empty() => stem,
        _ => token,
    }
}
