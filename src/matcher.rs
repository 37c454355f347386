use std::{fmt, path::Path};

use crate::normalize::KeyNormalizer;

/// How a file was associated with a kind. Earlier tiers are more precise.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Tier {
    Exact,
    Prefix,
    Fuzzy,
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Tier::Exact => f.write_str("exact"),
            Tier::Prefix => f.write_str("prefix"),
            Tier::Fuzzy => f.write_str("fuzzy"),
        }
    }
}

#[derive(Clone, Debug)]
pub struct KindKey {
    pub key: String,
    stems: Vec<String>,
}

/// A video file name together with the keys derived from its base name.
#[derive(Clone, Debug)]
pub struct FileKey<'a> {
    pub name: &'a str,
    key: String,
    stems: Vec<String>,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Match<'a> {
    pub file: &'a str,
    pub tier: Tier,
}

type Predicate = fn(&KindKey, &FileKey) -> bool;

static TIERS: &[(Tier, Predicate)] = &[
    (Tier::Exact, is_exact),
    (Tier::Prefix, is_prefix),
    (Tier::Fuzzy, is_fuzzy),
];

fn is_exact(kind: &KindKey, file: &FileKey) -> bool {
    file.key == kind.key
}

fn is_prefix(kind: &KindKey, file: &FileKey) -> bool {
    file.key.starts_with(&kind.key)
}

/// Every kind stem must begin some file stem. Order and extra file tokens don't matter.
fn is_fuzzy(kind: &KindKey, file: &FileKey) -> bool {
    !kind.stems.is_empty()
        && kind
            .stems
            .iter()
            .all(|stem| file.stems.iter().any(|candidate| candidate.starts_with(stem.as_str())))
}

pub struct KindMatcher {
    normalizer: KeyNormalizer,
}

impl KindMatcher {
    pub fn new() -> Self {
        Self {
            normalizer: KeyNormalizer::new(),
        }
    }

    pub fn normalize(&self, raw: &str) -> String {
        self.normalizer.normalize(raw)
    }

    pub fn kind_key(&self, kind: &str) -> KindKey {
        KindKey {
            key: self.normalizer.normalize(kind),
            stems: self.normalizer.stems(kind),
        }
    }

    /// Derives keys for each file, preserving the scanner's order.
    pub fn file_keys<'a>(&self, files: &'a [String]) -> Vec<FileKey<'a>> {
        files
            .iter()
            .map(|name| {
                let base = Path::new(name)
                    .file_stem()
                    .and_then(|stem| stem.to_str())
                    .unwrap_or(name.as_str());

                FileKey {
                    name: name.as_str(),
                    key: self.normalizer.normalize(base),
                    stems: self.normalizer.stems(base),
                }
            })
            .collect()
    }

    /// The first file satisfying the most precise tier that anything satisfies.
    pub fn match_kind<'a>(&self, kind: &KindKey, files: &[FileKey<'a>]) -> Option<Match<'a>> {
        TIERS.iter().find_map(|&(tier, predicate)| {
            files
                .iter()
                .find(|file| predicate(kind, file))
                .map(|file| Match {
                    file: file.name,
                    tier,
                })
        })
    }
}

impl Default for KindMatcher {
    fn default() -> Self {
        Self::new()
    }
}
