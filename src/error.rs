use std::{io, path::PathBuf};

use thiserror::Error;

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("unable to read directory {}", path.display())]
    DirectoryAccess {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("no questions: no kind matched a video in any source folder")]
    NoQuestions,

    #[error("unable to load survey {}", path.display())]
    Survey {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("unable to parse survey {}", path.display())]
    SurveyFormat {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid survey: {0}")]
    InvalidSurvey(String),

    #[error("unable to write manifest {}", path.display())]
    WriteManifest {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("unable to write report")]
    Report(#[from] io::Error),

    #[error("unable to serialize manifest")]
    Serialize(#[from] serde_json::Error),
}
