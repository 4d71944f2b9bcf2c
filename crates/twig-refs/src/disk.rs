//! Filesystem-backed pointer store.
//!
//! Layout under the repository marker directory:
//!
//! ```text
//! HEAD                    current branch name
//! STAGE                   hex id of the staging tree
//! COMMITS                 one hex commit id per line, creation order
//! branches/<name>         hex commit id of a local branch
//! remotes/<remote>/<b>    remote-tracking branch
//! ```
//!
//! Tracking branches live in their own tree so a local branch may share
//! its name with a remote.

use std::path::{Path, PathBuf};

use tracing::debug;
use twig_store::fsutil;
use twig_types::ObjectId;

use crate::error::{RefError, Result};
use crate::names::validate_branch_name;
use crate::traits::RefStore;

const HEAD_FILE: &str = "HEAD";
const STAGE_FILE: &str = "STAGE";
const COMMITS_FILE: &str = "COMMITS";
const BRANCHES_DIR: &str = "branches";
const REMOTES_DIR: &str = "remotes";

/// One file per pointer under the marker directory.
#[derive(Clone, Debug)]
pub struct FsRefStore {
    dir: PathBuf,
}

impl FsRefStore {
    /// Pointer store rooted at the repository marker directory.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn branch_path(&self, name: &str) -> PathBuf {
        match name.split_once('/') {
            Some((remote, branch)) => self.dir.join(REMOTES_DIR).join(remote).join(branch),
            None => self.dir.join(BRANCHES_DIR).join(name),
        }
    }

    fn read_id(&self, path: &Path, name: &str) -> Result<Option<ObjectId>> {
        match fsutil::read_trimmed(path)? {
            Some(text) => ObjectId::from_hex(&text)
                .map(Some)
                .map_err(|source| RefError::CorruptPointer {
                    name: name.to_string(),
                    source,
                }),
            None => Ok(None),
        }
    }
}

impl RefStore for FsRefStore {
    fn read_branch(&self, name: &str) -> Result<Option<ObjectId>> {
        if validate_branch_name(name).is_err() {
            return Ok(None);
        }
        self.read_id(&self.branch_path(name), name)
    }

    fn write_branch(&self, name: &str, id: &ObjectId) -> Result<()> {
        validate_branch_name(name)?;
        fsutil::write_atomic(&self.branch_path(name), id.to_hex().as_bytes())?;
        debug!(branch = name, id = %id.short_hex(), "wrote branch");
        Ok(())
    }

    fn delete_branch(&self, name: &str) -> Result<bool> {
        if validate_branch_name(name).is_err() {
            return Ok(false);
        }
        Ok(fsutil::delete(&self.branch_path(name))?)
    }

    fn list_branches(&self) -> Result<Vec<String>> {
        let mut names = fsutil::list_filenames(&self.dir.join(BRANCHES_DIR))?;
        let root = self.dir.join(REMOTES_DIR);
        for remote in fsutil::list_dirs(&root)? {
            for branch in fsutil::list_filenames(&root.join(&remote))? {
                names.push(format!("{remote}/{branch}"));
            }
        }
        names.sort();
        Ok(names)
    }

    fn head(&self) -> Result<Option<String>> {
        Ok(fsutil::read_trimmed(&self.dir.join(HEAD_FILE))?.filter(|name| !name.is_empty()))
    }

    fn set_head(&self, branch: &str) -> Result<()> {
        validate_branch_name(branch)?;
        fsutil::write_atomic(&self.dir.join(HEAD_FILE), branch.as_bytes())?;
        Ok(())
    }

    fn stage(&self) -> Result<Option<ObjectId>> {
        self.read_id(&self.dir.join(STAGE_FILE), STAGE_FILE)
    }

    fn set_stage(&self, id: &ObjectId) -> Result<()> {
        fsutil::write_atomic(&self.dir.join(STAGE_FILE), id.to_hex().as_bytes())?;
        Ok(())
    }

    fn commit_index(&self) -> Result<Vec<ObjectId>> {
        let Some(text) = fsutil::read_trimmed(&self.dir.join(COMMITS_FILE))? else {
            return Ok(Vec::new());
        };
        text.lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(|line| {
                ObjectId::from_hex(line).map_err(|source| RefError::CorruptPointer {
                    name: COMMITS_FILE.to_string(),
                    source,
                })
            })
            .collect()
    }

    fn write_commit_index(&self, ids: &[ObjectId]) -> Result<()> {
        let mut text = String::with_capacity(ids.len() * 65);
        for id in ids {
            text.push_str(&id.to_hex());
            text.push('\n');
        }
        fsutil::write_atomic(&self.dir.join(COMMITS_FILE), text.as_bytes())?;
        debug!(commits = ids.len(), "wrote commit index");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn oid(seed: &str) -> ObjectId {
        ObjectId::from_bytes(seed.as_bytes())
    }

    fn store() -> (tempfile::TempDir, FsRefStore) {
        let dir = tempfile::tempdir().unwrap();
        let store = FsRefStore::new(dir.path().join(".twig"));
        (dir, store)
    }

    #[test]
    fn branch_files_and_tracking_tree() {
        let (_dir, store) = store();
        store.write_branch("master", &oid("a")).unwrap();
        store.write_branch("origin/master", &oid("b")).unwrap();

        let master = store.dir().join("branches").join("master");
        let tracking = store.dir().join("remotes").join("origin").join("master");
        assert_eq!(std::fs::read_to_string(master).unwrap(), oid("a").to_hex());
        assert_eq!(std::fs::read_to_string(tracking).unwrap(), oid("b").to_hex());

        assert_eq!(store.list_branches().unwrap(), vec!["master", "origin/master"]);
        assert_eq!(store.read_branch("origin/master").unwrap(), Some(oid("b")));
    }

    #[test]
    fn local_branch_named_like_a_remote() {
        let (_dir, store) = store();
        store.write_branch("origin", &oid("local")).unwrap();
        store.write_branch("origin/master", &oid("tracking")).unwrap();
        store.write_branch("upstream/master", &oid("tracking")).unwrap();
        store.write_branch("upstream", &oid("local")).unwrap();

        assert_eq!(
            store.list_branches().unwrap(),
            vec!["origin", "origin/master", "upstream", "upstream/master"]
        );
        assert_eq!(store.read_branch("origin").unwrap(), Some(oid("local")));
        assert_eq!(store.read_branch("origin/master").unwrap(), Some(oid("tracking")));

        assert!(store.delete_branch("origin").unwrap());
        assert_eq!(store.read_branch("origin/master").unwrap(), Some(oid("tracking")));
        assert_eq!(
            store.list_branches().unwrap(),
            vec!["origin/master", "upstream", "upstream/master"]
        );
    }

    #[test]
    fn missing_pointers_read_as_none() {
        let (_dir, store) = store();
        assert_eq!(store.read_branch("master").unwrap(), None);
        assert_eq!(store.read_branch("../escape").unwrap(), None);
        assert_eq!(store.head().unwrap(), None);
        assert_eq!(store.stage().unwrap(), None);
        assert!(store.commit_index().unwrap().is_empty());
        assert!(store.list_branches().unwrap().is_empty());
    }

    #[test]
    fn head_and_stage_persist_as_text() {
        let (_dir, store) = store();
        store.set_head("master").unwrap();
        store.set_stage(&oid("s")).unwrap();
        assert_eq!(
            std::fs::read_to_string(store.dir().join("HEAD")).unwrap(),
            "master"
        );
        let reopened = FsRefStore::new(store.dir());
        assert_eq!(reopened.head().unwrap().as_deref(), Some("master"));
        assert_eq!(reopened.stage().unwrap(), Some(oid("s")));
    }

    #[test]
    fn commit_index_one_id_per_line() {
        let (_dir, store) = store();
        let ids = vec![oid("0"), oid("1"), oid("2")];
        store.write_commit_index(&ids).unwrap();
        let text = std::fs::read_to_string(store.dir().join("COMMITS")).unwrap();
        assert_eq!(text.lines().count(), 3);
        assert_eq!(store.commit_index().unwrap(), ids);
    }

    #[test]
    fn corrupt_pointer_is_an_error() {
        let (_dir, store) = store();
        fsutil::write_atomic(&store.dir().join("branches").join("master"), b"zz").unwrap();
        assert!(matches!(
            store.read_branch("master"),
            Err(RefError::CorruptPointer { .. })
        ));
    }

    #[test]
    fn delete_branch() {
        let (_dir, store) = store();
        store.write_branch("topic", &oid("t")).unwrap();
        assert!(store.delete_branch("topic").unwrap());
        assert!(!store.delete_branch("topic").unwrap());
    }
}
