//! Repository configuration, persisted as `config.toml`.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use twig_store::{fsutil, Layout};

use crate::error::RepoResult;

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Object directory layout, fixed when the repository is created.
    pub layout: Layout,
}

/// Contents of `config.toml`. Every field has a default, so a missing file
/// or section means defaults.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RepoConfig {
    pub store: StoreConfig,
    /// Remote name to the working directory of another repository.
    pub remotes: BTreeMap<String, PathBuf>,
}

impl RepoConfig {
    pub fn load(path: &Path) -> RepoResult<Self> {
        match fsutil::read_bytes(path)? {
            Some(bytes) => {
                let text = String::from_utf8(bytes)?;
                Ok(toml::from_str(&text)?)
            }
            None => Ok(Self::default()),
        }
    }

    pub fn save(&self, path: &Path) -> RepoResult<()> {
        let text = toml::to_string(self)?;
        fsutil::write_atomic(path, text.as_bytes())?;
        Ok(())
    }
}
