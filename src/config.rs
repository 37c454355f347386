use std::{
    error::Error,
    fmt::Display,
    path::{Path, PathBuf},
    str::FromStr,
};

use clap::Parser;

use crate::{build::Options, diagnostics::Severity, error, pool, survey::Survey};

/// Build a survey manifest from a directory of per-model video folders.
#[derive(Clone, Debug, Parser)]
#[command(version)]
pub struct Args {
    /// The video root
    /// Defaults to "videos"
    path: Option<String>,

    /// Where to write the manifest (defaults to manifest.json inside the video root)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Path prefix for every video in the manifest.
    ///
    /// Defaults to the name of the video root, so that paths resolve from the
    /// directory the survey page is served from.
    #[arg(short, long)]
    prefix: Option<String>,

    /// Maximum candidates per question
    #[arg(short, long, default_value_t = Limit(pool::DEFAULT_LIMIT))]
    limit: Limit,

    /// JSON file defining kinds and attributes
    #[arg(short, long, env = "VIDPOOL_SURVEY")]
    survey: Option<PathBuf>,

    /// Kinds to build questions for, in order (overrides the survey's kinds)
    #[arg(short, long = "kind")]
    kinds: Vec<String>,

    /// Print the questions instead of writing the manifest.
    #[arg(short, long)]
    pub dry_run: bool,

    /// Only report warnings
    #[arg(short, long)]
    pub quiet: bool,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Limit(usize);

impl FromStr for Limit {
    type Err = ParseLimitError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.parse() {
            Ok(0) | Err(_) => Err(ParseLimitError(s.into())),
            Ok(n) => Ok(Limit(n)),
        }
    }
}

impl Display for Limit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Clone, Debug)]
pub struct ParseLimitError(String);

impl Display for ParseLimitError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?} is not a valid limit\nUse a whole number of at least 1", self.0)
    }
}

impl Error for ParseLimitError {}

impl Args {
    pub fn parse() -> Self {
        Parser::parse()
    }

    pub fn path(&self) -> &str {
        self.path.as_deref().unwrap_or("videos")
    }

    pub fn output(&self) -> PathBuf {
        self.output
            .clone()
            .unwrap_or_else(|| Path::new(self.path()).join("manifest.json"))
    }

    pub fn prefix(&self) -> String {
        match &self.prefix {
            Some(prefix) => prefix.clone(),
            None => Path::new(self.path())
                .file_name()
                .map(|name| name.to_string_lossy().into_owned())
                .unwrap_or_default(),
        }
    }

    pub fn threshold(&self) -> Severity {
        if self.quiet {
            Severity::Warning
        } else {
            Severity::Info
        }
    }

    pub fn options(&self) -> Options {
        Options {
            prefix: self.prefix(),
            limit: self.limit.0,
            threshold: self.threshold(),
            create_root: !self.dry_run,
        }
    }

    /// The survey file if one was given, the built-in tables otherwise, with any
    /// `--kind` flags applied on top.
    pub fn survey(&self) -> error::Result<Survey> {
        let survey = match &self.survey {
            Some(path) => Survey::load(path)?,
            None => Survey::default(),
        };

        if self.kinds.is_empty() {
            Ok(survey)
        } else {
            survey.with_kinds(self.kinds.iter().cloned())
        }
    }
}

#[cfg(test)]
mod tests {
    use clap::Parser;

    use crate::diagnostics::Severity;

    use super::{Args, Limit};

    #[test]
    fn defaults_follow_the_video_root() {
        let args = Args::try_parse_from(["vidpool"]).unwrap();
        assert_eq!(args.path(), "videos");
        assert_eq!(args.output(), std::path::Path::new("videos/manifest.json"));
        assert_eq!(args.prefix(), "videos");

        let options = args.options();
        assert_eq!(options.limit, 8);
        assert_eq!(options.threshold, Severity::Info);
        assert!(options.create_root);
    }

    #[test]
    fn dry_runs_do_not_create_the_root() {
        let args = Args::try_parse_from(["vidpool", "--dry-run"]).unwrap();
        assert!(!args.options().create_root);
    }

    #[test]
    fn prefix_is_the_last_root_segment() {
        let args = Args::try_parse_from(["vidpool", "site/media"]).unwrap();
        assert_eq!(args.prefix(), "media");

        let args = Args::try_parse_from(["vidpool", "site/media", "--prefix", ""]).unwrap();
        assert_eq!(args.prefix(), "");
    }

    #[test]
    fn kind_flags_override_the_survey() {
        let args =
            Args::try_parse_from(["vidpool", "-k", "dance", "--kind", "sports", "-q"]).unwrap();
        assert_eq!(args.survey().unwrap().kinds, ["dance", "sports"]);
        assert_eq!(args.threshold(), Severity::Warning);
    }

    #[test]
    fn zero_is_not_a_limit() {
        assert!("0".parse::<Limit>().is_err());
        assert!("many".parse::<Limit>().is_err());
        assert_eq!("3".parse::<Limit>().unwrap(), Limit(3));
        assert!(Args::try_parse_from(["vidpool", "--limit", "0"]).is_err());
    }
}
