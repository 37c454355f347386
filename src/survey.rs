use std::{fs, path::Path};

use hashbrown::HashSet;
use serde::{Deserialize, Serialize};

use crate::{
    error::{Error, Result},
    normalize::KeyNormalizer,
};

static DEFAULT_KINDS: &[&str] = &[
    "camera_motion",
    "complex_human_motion",
    "single_object",
    "multiple_objects",
];

static DEFAULT_ATTRIBUTES: &[(&str, &str, &str)] = &[
    (
        "motion_preservation",
        "motion preservation",
        "How faithfully the motion is transferred (1 = best, N = worst)",
    ),
    (
        "text_alignment",
        "text alignment",
        "How well the video follows its text prompt (1 = best, N = worst)",
    ),
    (
        "generation_quality",
        "generation quality",
        "Overall visual quality of the generated video (1 = best, N = worst)",
    ),
];

/// A dimension the viewer scores or ranks each candidate on.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attribute {
    pub key: String,
    pub label: String,
    #[serde(rename = "desc", alias = "description")]
    pub description: String,
}

/// The fixed kinds and attributes of one deployment. Order is significant for both.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Survey {
    #[serde(default = "default_kinds")]
    pub kinds: Vec<String>,
    #[serde(default = "default_attributes")]
    pub attributes: Vec<Attribute>,
}

fn default_kinds() -> Vec<String> {
    DEFAULT_KINDS.iter().map(|&kind| kind.to_owned()).collect()
}

fn default_attributes() -> Vec<Attribute> {
    DEFAULT_ATTRIBUTES
        .iter()
        .map(|&(key, label, description)| Attribute {
            key: key.into(),
            label: label.into(),
            description: description.into(),
        })
        .collect()
}

impl Default for Survey {
    fn default() -> Self {
        Self {
            kinds: default_kinds(),
            attributes: default_attributes(),
        }
    }
}

impl Survey {
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| Error::Survey {
            path: path.to_owned(),
            source,
        })?;
        let survey: Survey =
            serde_json::from_str(&text).map_err(|source| Error::SurveyFormat {
                path: path.to_owned(),
                source,
            })?;
        survey.validate()?;
        Ok(survey)
    }

    pub fn with_kinds(mut self, kinds: impl IntoIterator<Item = String>) -> Result<Self> {
        self.kinds = kinds.into_iter().collect();
        self.validate()?;
        Ok(self)
    }

    /// Kinds must be distinct after normalization, or two questions would fight over
    /// the same files.
    pub fn validate(&self) -> Result<()> {
        if self.kinds.is_empty() {
            return Err(Error::InvalidSurvey("no kinds defined".into()));
        }

        let normalizer = KeyNormalizer::new();
        let mut seen = HashSet::new();
        for kind in &self.kinds {
            let key = normalizer.normalize(kind);
            if key.is_empty() {
                return Err(Error::InvalidSurvey(format!("{kind:?} is not a usable kind")));
            }
            if !seen.insert(key) {
                return Err(Error::InvalidSurvey(format!("duplicate kind {kind:?}")));
            }
        }

        let mut keys = HashSet::new();
        for attribute in &self.attributes {
            if !keys.insert(attribute.key.as_str()) {
                return Err(Error::InvalidSurvey(format!(
                    "duplicate attribute {:?}",
                    attribute.key
                )));
            }
        }

        Ok(())
    }
}
