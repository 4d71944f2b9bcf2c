//! Paths of a repository on disk.

use std::path::{Path, PathBuf};

/// Name of the marker directory inside a working directory.
pub const MARKER_DIR: &str = ".twig";

const OBJECTS_DIR: &str = "objects";
const BRANCHES_DIR: &str = "branches";
const CONFIG_FILE: &str = "config.toml";

/// Where a repository rooted at a working directory keeps its files.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RepoLayout {
    root: PathBuf,
}

impl RepoLayout {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Layout for a user-supplied location: either a working directory or
    /// its marker directory.
    pub fn locate(path: &Path) -> Self {
        match path.file_name() {
            Some(name) if name == MARKER_DIR => {
                Self::new(path.parent().unwrap_or(Path::new(".")))
            }
            _ => Self::new(path),
        }
    }

    /// The working directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn marker(&self) -> PathBuf {
        self.root.join(MARKER_DIR)
    }

    pub fn objects(&self) -> PathBuf {
        self.marker().join(OBJECTS_DIR)
    }

    pub fn branches(&self) -> PathBuf {
        self.marker().join(BRANCHES_DIR)
    }

    pub fn config(&self) -> PathBuf {
        self.marker().join(CONFIG_FILE)
    }

    /// Returns `true` if the marker directory exists.
    pub fn is_initialized(&self) -> bool {
        self.marker().is_dir()
    }
}
