use std::{fs, io, path::Path};

use serde::{Deserialize, Serialize};

use crate::{
    error::{Error, Result},
    matcher::KindMatcher,
    pool::{Candidate, CandidatePool, ReferenceMap},
    survey::Attribute,
};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    pub id: String,
    pub kind: String,
    pub input: Option<String>,
    pub candidates: Vec<Candidate>,
}

/// Everything the survey client needs: what to judge, and the videos to judge.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Manifest {
    pub attributes: Vec<Attribute>,
    pub questions: Vec<Question>,
}

/// One question per kind, in kind order, skipping kinds nobody supplied a video for.
pub fn assemble(
    matcher: &KindMatcher,
    attributes: &[Attribute],
    reference: &ReferenceMap,
    mut pools: CandidatePool,
    kinds: &[String],
) -> Manifest {
    let questions = kinds
        .iter()
        .filter_map(|kind| {
            let candidates = pools.remove(kind.as_str()).unwrap_or_default();
            if candidates.is_empty() {
                return None;
            }

            Some(Question {
                id: kind.clone(),
                kind: kind.clone(),
                input: reference.get(&matcher.normalize(kind)).cloned(),
                candidates,
            })
        })
        .collect();

    Manifest {
        attributes: attributes.to_vec(),
        questions,
    }
}

impl Manifest {
    pub fn to_json(&self) -> Result<String> {
        let mut json = serde_json::to_string_pretty(self)?;
        json.push('\n');
        Ok(json)
    }

    /// Overwrites `path`, creating parent directories as needed.
    pub fn write(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let json = self.to_json()?;
        let write_error = |source: io::Error| Error::WriteManifest {
            path: path.to_owned(),
            source,
        };

        if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(write_error)?;
        }
        fs::write(path, json).map_err(write_error)
    }

    /// An empty manifest is still a valid file for the client, but it means the run
    /// produced nothing worth asking about.
    pub fn ensure_questions(&self) -> Result<()> {
        if self.questions.is_empty() {
            Err(Error::NoQuestions)
        } else {
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use crate::{
        error::Error,
        matcher::KindMatcher,
        pool::{Candidate, CandidatePool, ReferenceMap},
        survey::Survey,
    };

    use super::{assemble, Manifest};

    fn candidate(id: &str, src: &str) -> Candidate {
        Candidate {
            id: id.into(),
            src: src.into(),
        }
    }

    #[test]
    fn questions_follow_kind_order_and_skip_empty_pools() {
        let matcher = KindMatcher::new();
        let survey = Survey::default();
        let mut pools = CandidatePool::new();
        pools.insert("single_object".into(), vec![candidate("a", "videos/a/single_object.mp4")]);
        pools.insert("camera_motion".into(), vec![candidate("a", "videos/a/camera_motion.mp4")]);
        pools.insert("multiple_objects".into(), Vec::new());
        let mut reference = ReferenceMap::new();
        reference.insert("cameramotion".into(), "videos/input/camera_motion.mp4".into());

        let manifest = assemble(&matcher, &survey.attributes, &reference, pools, &survey.kinds);

        let kinds: Vec<_> = manifest.questions.iter().map(|q| q.kind.as_str()).collect();
        assert_eq!(kinds, ["camera_motion", "single_object"]);
        assert_eq!(
            manifest.questions[0].input.as_deref(),
            Some("videos/input/camera_motion.mp4")
        );
        assert_eq!(manifest.questions[1].input, None);
        assert_eq!(manifest.questions[0].id, manifest.questions[0].kind);
        assert_eq!(manifest.attributes, survey.attributes);
    }

    #[test]
    fn missing_input_serializes_as_null() {
        let manifest = Manifest {
            attributes: Vec::new(),
            questions: vec![super::Question {
                id: "k".into(),
                kind: "k".into(),
                input: None,
                candidates: vec![candidate("a", "a/k.mp4")],
            }],
        };

        let json = manifest.to_json().unwrap();
        assert!(json.contains(r#""input": null"#));
        assert!(json.ends_with("}\n"));
    }

    #[test]
    fn empty_manifest_is_written_then_reported() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("manifest.json");
        let manifest = Manifest {
            attributes: Survey::default().attributes,
            questions: Vec::new(),
        };

        manifest.write(&path).unwrap();
        let written: Manifest =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(written, manifest);
        assert!(matches!(manifest.ensure_questions(), Err(Error::NoQuestions)));
    }
}
