use hashbrown::HashMap;
use serde::{Deserialize, Serialize};

use crate::{diagnostics::Diagnostics, href, matcher::KindMatcher, scan::collation_key};

pub const DEFAULT_LIMIT: usize = 8;

/// Name of the folder holding reference videos, compared case-insensitively.
pub const REFERENCE_DIR: &str = "input";

/// One folder's video for one kind.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Candidate {
    /// Always the literal name of the folder the video came from.
    pub id: String,
    pub src: String,
}

/// A folder under the video root along with its already-scanned videos.
#[derive(Clone, Debug, Default)]
pub struct SourceFolder {
    pub name: String,
    pub files: Vec<String>,
}

/// Candidates per kind, in folder order.
pub type CandidatePool = HashMap<String, Vec<Candidate>>;

/// Reference video per normalized kind key.
pub type ReferenceMap = HashMap<String, String>;

pub fn is_reference_dir(name: &str) -> bool {
    name.to_lowercase() == REFERENCE_DIR
}

pub struct PoolBuilder<'a> {
    matcher: &'a KindMatcher,
    prefix: &'a str,
    limit: usize,
}

impl<'a> PoolBuilder<'a> {
    pub fn new(matcher: &'a KindMatcher, prefix: &'a str, limit: usize) -> Self {
        Self {
            matcher,
            prefix,
            limit,
        }
    }

    fn src(&self, folder: &str, file: &str) -> String {
        href::encode(self.prefix, &[folder, file])
    }

    pub fn build_pools(
        &self,
        folders: &[SourceFolder],
        kinds: &[String],
        diagnostics: &mut Diagnostics,
    ) -> CandidatePool {
        let kind_keys: Vec<_> = kinds
            .iter()
            .map(|kind| (kind, self.matcher.kind_key(kind)))
            .collect();

        let mut folders: Vec<&SourceFolder> = folders
            .iter()
            .filter(|folder| !is_reference_dir(&folder.name))
            .collect();
        folders.sort_by_cached_key(|folder| collation_key(&folder.name));

        let mut pools: CandidatePool = kinds
            .iter()
            .map(|kind| (kind.clone(), Vec::new()))
            .collect();

        for folder in folders {
            let files = self.matcher.file_keys(&folder.files);
            let mut matched = 0;

            for (kind, key) in &kind_keys {
                let Some(found) = self.matcher.match_kind(key, &files) else {
                    continue;
                };

                log::debug!("{}/{} -> {kind} ({})", folder.name, found.file, found.tier);
                matched += 1;
                pools.entry_ref(kind.as_str()).or_default().push(Candidate {
                    id: folder.name.clone(),
                    src: self.src(&folder.name, found.file),
                });
            }

            if matched == 0 {
                diagnostics.info(format!("folder {:?} matched no kind", folder.name));
            }
        }

        for (kind, _) in &kind_keys {
            if let Some(pool) = pools.get_mut(kind.as_str()) {
                if pool.len() > self.limit {
                    diagnostics.info(format!(
                        "kind {kind:?} has {} candidates; keeping the first {}",
                        pool.len(),
                        self.limit
                    ));
                    pool.truncate(self.limit);
                }
            }
        }

        pools
    }

    /// Matches each kind against the reference folder's videos.
    pub fn build_reference_map(&self, reference: &SourceFolder, kinds: &[String]) -> ReferenceMap {
        let files = self.matcher.file_keys(&reference.files);

        kinds
            .iter()
            .filter_map(|kind| {
                let key = self.matcher.kind_key(kind);
                self.matcher
                    .match_kind(&key, &files)
                    .map(|found| (key.key, self.src(&reference.name, found.file)))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use crate::{diagnostics::Diagnostics, matcher::KindMatcher};

    use super::{is_reference_dir, Candidate, PoolBuilder, SourceFolder};

    fn folder(name: &str, files: &[&str]) -> SourceFolder {
        SourceFolder {
            name: name.into(),
            files: files.iter().map(|&file| file.into()).collect(),
        }
    }

    fn kinds(kinds: &[&str]) -> Vec<String> {
        kinds.iter().map(|&kind| kind.into()).collect()
    }

    #[test]
    fn reference_dir_is_matched_case_insensitively() {
        assert!(is_reference_dir("input"));
        assert!(is_reference_dir("Input"));
        assert!(is_reference_dir("INPUT"));
        assert!(!is_reference_dir("inputs"));
    }

    #[test]
    fn pools_keep_the_first_folders_in_sorted_order() {
        let matcher = KindMatcher::new();
        let builder = PoolBuilder::new(&matcher, "videos", 8);
        let mut folders: Vec<_> = (0..10)
            .rev()
            .map(|n| folder(&format!("model_{n:02}"), &["camera_motion.mp4"]))
            .collect();
        folders.push(folder("Input", &["camera_motion.mp4"]));

        let pools = builder.build_pools(
            &folders,
            &kinds(&["camera_motion"]),
            &mut Diagnostics::default(),
        );
        let ids: Vec<_> = pools["camera_motion"].iter().map(|x| x.id.as_str()).collect();
        assert_eq!(
            ids,
            [
                "model_00", "model_01", "model_02", "model_03", "model_04", "model_05", "model_06",
                "model_07"
            ]
        );
    }

    #[test]
    fn truncation_follows_locale_order() {
        let matcher = KindMatcher::new();
        let builder = PoolBuilder::new(&matcher, "videos", 8);
        let mut folders: Vec<_> = (1..=8)
            .map(|n| folder(&format!("m{n}"), &["camera_motion.mp4"]))
            .collect();
        folders.push(folder("m_x", &["camera_motion.mp4"]));

        let pools = builder.build_pools(
            &folders,
            &kinds(&["camera_motion"]),
            &mut Diagnostics::default(),
        );
        let ids: Vec<_> = pools["camera_motion"].iter().map(|x| x.id.as_str()).collect();
        assert_eq!(ids, ["m_x", "m1", "m2", "m3", "m4", "m5", "m6", "m7"]);
    }

    #[test]
    fn each_folder_contributes_at_most_one_candidate_per_kind() {
        let matcher = KindMatcher::new();
        let builder = PoolBuilder::new(&matcher, "videos", 8);
        let folders = [folder(
            "alpha",
            &["camera_motion.mp4", "camera_motion_v2.mp4", "camera motion take.mp4"],
        )];

        let pools = builder.build_pools(
            &folders,
            &kinds(&["camera_motion"]),
            &mut Diagnostics::default(),
        );
        assert_eq!(
            pools["camera_motion"],
            [Candidate {
                id: "alpha".into(),
                src: "videos/alpha/camera_motion.mp4".into(),
            }]
        );
    }

    #[test]
    fn folders_without_matches_are_reported() {
        let matcher = KindMatcher::new();
        let builder = PoolBuilder::new(&matcher, "videos", 8);
        let folders = [folder("misc", &["landscape.mp4"])];
        let mut diagnostics = Diagnostics::default();

        let pools = builder.build_pools(&folders, &kinds(&["camera_motion"]), &mut diagnostics);
        assert!(pools["camera_motion"].is_empty());
        assert_eq!(diagnostics.messages().len(), 1);
        assert!(diagnostics.messages()[0].message.contains("misc"));
    }

    #[test]
    fn reference_map_is_keyed_by_normalized_kind() {
        let matcher = KindMatcher::new();
        let builder = PoolBuilder::new(&matcher, "videos", 8);
        let reference = folder("INPUT", &["Camera Motion.mp4", "unrelated.mp4"]);

        let map =
            builder.build_reference_map(&reference, &kinds(&["camera_motion", "single_object"]));
        assert_eq!(map.len(), 1);
        assert_eq!(map["cameramotion"], "videos/INPUT/Camera%20Motion.mp4");
    }
}
