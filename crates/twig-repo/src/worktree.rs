//! The working-directory view: plain files directly in the repository
//! root. Subdirectories (the marker directory included) are not part of it.

use std::path::{Path, PathBuf};

use twig_store::{fsutil, Blob};
use twig_types::ObjectId;

use crate::error::RepoResult;

#[derive(Clone, Debug)]
pub struct WorkTree {
    root: PathBuf,
}

impl WorkTree {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// A name that can live in the flat working view.
    pub fn is_valid_name(name: &str) -> bool {
        !name.is_empty()
            && name != "."
            && name != ".."
            && !name.contains(['/', '\\'])
    }

    fn path(&self, name: &str) -> PathBuf {
        self.root.join(name)
    }

    /// Names of all working files, sorted.
    pub fn files(&self) -> RepoResult<Vec<String>> {
        Ok(fsutil::list_filenames(&self.root)?)
    }

    pub fn exists(&self, name: &str) -> bool {
        Self::is_valid_name(name) && self.path(name).is_file()
    }

    pub fn read(&self, name: &str) -> RepoResult<Option<Vec<u8>>> {
        if !Self::is_valid_name(name) {
            return Ok(None);
        }
        Ok(fsutil::read_bytes(&self.path(name))?)
    }

    /// Blob id the file's current content would have. `None` if absent.
    pub fn blob_id(&self, name: &str) -> RepoResult<Option<ObjectId>> {
        Ok(self.read(name)?.map(|data| Blob::new(data).id()))
    }

    pub fn write(&self, name: &str, data: &[u8]) -> RepoResult<()> {
        fsutil::write_atomic(&self.path(name), data)?;
        Ok(())
    }

    /// Delete a working file. Returns `true` if it existed.
    pub fn delete(&self, name: &str) -> RepoResult<bool> {
        Ok(fsutil::delete(&self.path(name))?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn view_excludes_directories() {
        let dir = tempfile::tempdir().unwrap();
        let tree = WorkTree::new(dir.path());
        tree.write("b.txt", b"b").unwrap();
        tree.write("a.txt", b"a").unwrap();
        fsutil::mkdirs(&dir.path().join(".twig")).unwrap();
        fsutil::mkdirs(&dir.path().join("sub")).unwrap();
        assert_eq!(tree.files().unwrap(), vec!["a.txt", "b.txt"]);
    }

    #[test]
    fn read_write_delete() {
        let dir = tempfile::tempdir().unwrap();
        let tree = WorkTree::new(dir.path());
        assert!(!tree.exists("f"));
        tree.write("f", b"content").unwrap();
        assert!(tree.exists("f"));
        assert_eq!(tree.read("f").unwrap().unwrap(), b"content");
        assert_eq!(tree.blob_id("f").unwrap(), Some(Blob::new("content").id()));
        assert!(tree.delete("f").unwrap());
        assert_eq!(tree.blob_id("f").unwrap(), None);
    }

    #[test]
    fn names_outside_the_view_are_rejected() {
        assert!(WorkTree::is_valid_name("file.txt"));
        for bad in ["", ".", "..", "sub/file", "..\\x"] {
            assert!(!WorkTree::is_valid_name(bad), "{bad:?}");
        }
    }
}
