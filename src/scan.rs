use std::{cmp::Reverse, path::Path};

use deunicode::deunicode_char;
use walkdir::{DirEntry, WalkDir};

use crate::error::{Error, Result};

static VIDEO_EXTENSIONS: &[&str] = &["mp4", "webm", "ogg", "mov", "m4v"];

/// ASCII punctuation and symbols in the order the English collation ranks them.
static PUNCTUATION: &str = "_-,;:!?.'\"()[]{}@*/\\&#%`^+<=>|~$";

/// Video files directly inside `dir`, in collation order.
pub fn list_videos(dir: impl AsRef<Path>) -> Result<Vec<String>> {
    fn is_video(entry: &DirEntry) -> bool {
        entry.file_type().is_file()
            && Path::new(entry.file_name())
                .extension()
                .and_then(|ext| ext.to_str())
                .map(|ext| {
                    VIDEO_EXTENSIONS
                        .iter()
                        .any(|allowed| allowed.eq_ignore_ascii_case(ext))
                })
                .unwrap_or_default()
    }

    list_children(dir.as_ref(), is_video)
}

/// Subdirectories directly inside `dir`, in collation order.
pub fn list_folders(dir: impl AsRef<Path>) -> Result<Vec<String>> {
    list_children(dir.as_ref(), |entry| entry.file_type().is_dir())
}

fn list_children(dir: &Path, filter: impl Fn(&DirEntry) -> bool) -> Result<Vec<String>> {
    let mut names = Vec::new();

    for entry in WalkDir::new(dir).min_depth(1).max_depth(1) {
        let entry = match entry {
            Ok(entry) => entry,

            // Only a failure on the directory itself means we can't list it.
            Err(e) if e.depth() == 0 => {
                return Err(Error::DirectoryAccess {
                    path: dir.to_owned(),
                    source: e.into(),
                })
            }
            Err(e) => {
                log::debug!("skipping entry in {}: {e}", dir.display());
                continue;
            }
        };

        if !filter(&entry) {
            continue;
        }

        match entry.file_name().to_str() {
            Some(name) => names.push(name.to_owned()),
            None => log::debug!("skipping non-utf8 name {:?}", entry.file_name()),
        }
    }

    names.sort_by_cached_key(|name| collation_key(name));
    Ok(names)
}

/// Primary weight of one (lowercased) character. Variant order is the class order:
/// whitespace, punctuation and symbols, digits, letters, then anything else.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord)]
enum Weight {
    Space(u32),
    Punct(u32),
    Digit(u32),
    Letter(char),
    Other(char),
}

/// Sort key mirroring an English locale compare: accent- and case-blind primary
/// weights, then accents (unaccented first), then lower case before upper case.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct CollationKey {
    primary: Vec<Weight>,
    accents: String,
    case: Reverse<String>,
}

pub fn collation_key(s: &str) -> CollationKey {
    let lower = s.to_lowercase();
    let mut primary = Vec::with_capacity(lower.len());

    for u in lower.chars() {
        if u.is_whitespace() {
            primary.push(Weight::Space(u as u32));
        } else if u.is_ascii_alphabetic() {
            primary.push(Weight::Letter(u));
        } else if u.is_numeric() {
            primary.push(Weight::Digit(u.to_digit(10).unwrap_or(10 + u as u32)));
        } else if u.is_alphabetic() {
            // "é" sorts with "e", "ß" with "ss".
            match deunicode_char(u).filter(|folded| {
                !folded.is_empty()
                    && folded.len() <= 3
                    && folded.bytes().all(|b| b.is_ascii_alphabetic())
            }) {
                Some(folded) => primary.extend(
                    folded
                        .chars()
                        .map(|c| Weight::Letter(c.to_ascii_lowercase())),
                ),
                None => primary.push(Weight::Other(u)),
            }
        } else {
            let rank = PUNCTUATION
                .find(u)
                .map(|idx| idx as u32)
                .unwrap_or(PUNCTUATION.len() as u32 + u as u32);
            primary.push(Weight::Punct(rank));
        }
    }

    CollationKey {
        primary,
        accents: lower,
        case: Reverse(s.to_owned()),
    }
}
