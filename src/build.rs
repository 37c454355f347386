use std::{fs, path::Path};

use crate::{
    diagnostics::{Diagnostics, Severity},
    error::{Error, Result},
    manifest::{self, Manifest},
    matcher::KindMatcher,
    pool::{self, PoolBuilder, ReferenceMap, SourceFolder},
    scan,
    survey::Survey,
};

#[derive(Clone, Debug)]
pub struct Options {
    /// Leading segments for every path in the manifest.
    pub prefix: String,
    pub limit: usize,
    pub threshold: Severity,
    /// Create a missing video root. Without it a missing root reads as empty.
    pub create_root: bool,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            prefix: String::new(),
            limit: pool::DEFAULT_LIMIT,
            threshold: Severity::Info,
            create_root: true,
        }
    }
}

#[derive(Debug)]
pub struct Build {
    pub manifest: Manifest,
    pub diagnostics: Diagnostics,
}

/// The folders found under a video root, already scanned.
#[derive(Debug, Default)]
struct Tree {
    reference: Option<SourceFolder>,
    sources: Vec<SourceFolder>,
}

/// Rebuilds the manifest for `root` from scratch.
///
/// Only a root that can't be created or listed is fatal. Unreadable folders count as
/// empty and show up in the returned diagnostics.
pub fn build(root: impl AsRef<Path>, survey: &Survey, options: &Options) -> Result<Build> {
    build_with(root.as_ref(), survey, options, |dir| scan::list_videos(dir))
}

fn build_with(
    root: &Path,
    survey: &Survey,
    options: &Options,
    list_videos: impl Fn(&Path) -> Result<Vec<String>>,
) -> Result<Build> {
    let mut diagnostics = Diagnostics::new(options.threshold);

    let tree = if root.exists() || options.create_root {
        fs::create_dir_all(root).map_err(|source| Error::DirectoryAccess {
            path: root.to_owned(),
            source,
        })?;
        scan_tree(root, &mut diagnostics, list_videos)?
    } else {
        diagnostics.warn(format!("video root {} does not exist", root.display()));
        Tree::default()
    };

    let matcher = KindMatcher::new();
    let builder = PoolBuilder::new(&matcher, &options.prefix, options.limit);

    let reference = match &tree.reference {
        Some(folder) => builder.build_reference_map(folder, &survey.kinds),
        None => {
            diagnostics.warn(format!(
                "no {:?} folder under {}; questions will have no reference video",
                pool::REFERENCE_DIR,
                root.display()
            ));
            ReferenceMap::new()
        }
    };

    let pools = builder.build_pools(&tree.sources, &survey.kinds, &mut diagnostics);
    for kind in &survey.kinds {
        if pools.get(kind.as_str()).map_or(true, Vec::is_empty) {
            diagnostics.info(format!("kind {kind:?} has no candidates"));
        }
    }

    let manifest = manifest::assemble(
        &matcher,
        &survey.attributes,
        &reference,
        pools,
        &survey.kinds,
    );

    Ok(Build {
        manifest,
        diagnostics,
    })
}

fn scan_tree(
    root: &Path,
    diagnostics: &mut Diagnostics,
    list_videos: impl Fn(&Path) -> Result<Vec<String>>,
) -> Result<Tree> {
    let mut tree = Tree::default();

    for name in scan::list_folders(root)? {
        let files = files_or_empty(list_videos(&root.join(&name)), diagnostics);

        let folder = SourceFolder { name, files };
        if !pool::is_reference_dir(&folder.name) {
            tree.sources.push(folder);
        } else if tree.reference.is_none() {
            tree.reference = Some(folder);
        } else {
            diagnostics.warn(format!(
                "ignoring second reference folder {:?}",
                folder.name
            ));
        }
    }

    Ok(tree)
}

/// A folder we can't read holds no videos as far as the survey is concerned.
fn files_or_empty(listing: Result<Vec<String>>, diagnostics: &mut Diagnostics) -> Vec<String> {
    listing.unwrap_or_else(|e| {
        diagnostics.warn(format!("{e}; treating it as empty"));
        Vec::new()
    })
}
