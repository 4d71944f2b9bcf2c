//! Filesystem-backed object store.
//!
//! One file per object under the objects directory. With [`Layout::Sharded`]
//! an object lives at `objects/<first 2 hex>/<remaining hex>`; with
//! [`Layout::Flat`] at `objects/<hex>`. The layout only affects lookup cost;
//! nothing outside this module depends on it.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;
use twig_types::ObjectId;

use crate::error::{StoreError, StoreResult};
use crate::fsutil;
use crate::object::StoredObject;
use crate::traits::ObjectStore;

const SHARD_LEN: usize = 2;

/// Directory layout of the object store.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Layout {
    /// Two-level directory keyed by the first two hex characters.
    #[default]
    Sharded,
    /// Every object directly in the objects directory.
    Flat,
}

/// Object store persisting each object as a `bincode` envelope file.
#[derive(Clone, Debug)]
pub struct FsObjectStore {
    root: PathBuf,
    layout: Layout,
}

impl FsObjectStore {
    /// Open (or lazily create) a store rooted at the objects directory `root`.
    pub fn new(root: impl Into<PathBuf>, layout: Layout) -> Self {
        Self {
            root: root.into(),
            layout,
        }
    }

    /// The objects directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn layout(&self) -> Layout {
        self.layout
    }

    /// Where the object with `id` lives on disk.
    pub fn path_for(&self, id: &ObjectId) -> PathBuf {
        let hex = id.to_hex();
        match self.layout {
            Layout::Sharded => self.root.join(&hex[..SHARD_LEN]).join(&hex[SHARD_LEN..]),
            Layout::Flat => self.root.join(hex),
        }
    }

    fn collect_matching(dir: &Path, head: &str, rest: &str, out: &mut Vec<ObjectId>) -> StoreResult<()> {
        for name in fsutil::list_filenames(dir)? {
            if !name.starts_with(rest) {
                continue;
            }
            // Temporary files and strays are not valid ids and are skipped.
            if let Ok(id) = ObjectId::from_hex(&format!("{head}{name}")) {
                out.push(id);
            }
        }
        Ok(())
    }
}

impl ObjectStore for FsObjectStore {
    fn read(&self, id: &ObjectId) -> StoreResult<Option<StoredObject>> {
        let Some(bytes) = fsutil::read_bytes(&self.path_for(id))? else {
            return Ok(None);
        };
        let object = StoredObject::from_bytes(&bytes).map_err(|e| StoreError::CorruptObject {
            id: *id,
            reason: e.to_string(),
        })?;
        let computed = object.compute_id();
        if computed != *id {
            return Err(StoreError::HashMismatch { id: *id, computed });
        }
        Ok(Some(object))
    }

    fn write(&self, object: &StoredObject) -> StoreResult<ObjectId> {
        let id = object.compute_id();
        if id.is_null() {
            return Err(StoreError::NullObjectId);
        }
        let path = self.path_for(&id);
        if fsutil::exists(&path) {
            return Ok(id);
        }
        fsutil::write_atomic(&path, &object.to_bytes()?)?;
        debug!(id = %id.short_hex(), kind = %object.kind, "wrote object");
        Ok(id)
    }

    fn exists(&self, id: &ObjectId) -> StoreResult<bool> {
        Ok(fsutil::exists(&self.path_for(id)))
    }

    fn delete(&self, id: &ObjectId) -> StoreResult<bool> {
        let existed = fsutil::delete(&self.path_for(id))?;
        if existed {
            debug!(id = %id.short_hex(), "deleted object");
        }
        Ok(existed)
    }

    fn ids_with_prefix(&self, prefix: &str) -> StoreResult<Vec<ObjectId>> {
        let mut ids = Vec::new();
        match self.layout {
            Layout::Flat => Self::collect_matching(&self.root, "", prefix, &mut ids)?,
            Layout::Sharded if prefix.len() >= SHARD_LEN => {
                let (shard, rest) = prefix.split_at(SHARD_LEN);
                Self::collect_matching(&self.root.join(shard), shard, rest, &mut ids)?;
            }
            Layout::Sharded => {
                for shard in fsutil::list_dirs(&self.root)? {
                    if shard.len() == SHARD_LEN && shard.starts_with(prefix) {
                        Self::collect_matching(&self.root.join(&shard), &shard, "", &mut ids)?;
                    }
                }
            }
        }
        ids.sort();
        Ok(ids)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::object::{Blob, Commit, Object, Tree};

    fn store(layout: Layout) -> (tempfile::TempDir, FsObjectStore) {
        let dir = tempfile::tempdir().unwrap();
        let store = FsObjectStore::new(dir.path().join("objects"), layout);
        (dir, store)
    }

    fn blob(content: &str) -> StoredObject {
        Blob::new(content).to_stored_object()
    }

    fn count_files(dir: &Path) -> usize {
        let mut n = fsutil::list_filenames(dir).unwrap().len();
        for sub in fsutil::list_dirs(dir).unwrap() {
            n += count_files(&dir.join(sub));
        }
        n
    }

    #[test]
    fn sharded_layout_splits_id() {
        let (_dir, store) = store(Layout::Sharded);
        let id = store.write(&blob("hello")).unwrap();
        let hex = id.to_hex();
        let expected = store.root().join(&hex[..2]).join(&hex[2..]);
        assert_eq!(store.path_for(&id), expected);
        assert!(expected.is_file());
    }

    #[test]
    fn flat_layout_uses_full_id() {
        let (_dir, store) = store(Layout::Flat);
        let id = store.write(&blob("hello")).unwrap();
        assert!(store.root().join(id.to_hex()).is_file());
    }

    #[test]
    fn layouts_are_interchangeable() {
        for layout in [Layout::Sharded, Layout::Flat] {
            let (_dir, store) = store(layout);
            let blob_id = store.write(&blob("content")).unwrap();
            let tree = Tree::from_files([("f.txt", blob_id)]);
            let tree_id = store.write(&tree.to_stored_object().unwrap()).unwrap();
            let commit = Commit::new("message", tree_id, ObjectId::from_bytes(b"parent"));
            let commit_id = store.write(&commit.to_stored_object().unwrap()).unwrap();

            let read = Object::from_stored_object(&store.load(&commit_id).unwrap()).unwrap();
            assert_eq!(read, Object::Commit(commit.clone()));
            let read = Object::from_stored_object(&store.load(&tree_id).unwrap()).unwrap();
            assert_eq!(read, Object::Tree(tree.clone()));
            assert_eq!(store.resolve_prefix(&commit_id.abbrev(12)).unwrap(), commit_id);
        }
    }

    #[test]
    fn write_twice_keeps_one_physical_record() {
        let (_dir, store) = store(Layout::Sharded);
        let id1 = store.write(&blob("once")).unwrap();
        let id2 = store.write(&blob("once")).unwrap();
        assert_eq!(id1, id2);
        assert_eq!(count_files(store.root()), 1);
    }

    #[test]
    fn delete_and_missing_reads() {
        let (_dir, store) = store(Layout::Sharded);
        let id = store.write(&blob("temp")).unwrap();
        assert!(store.delete(&id).unwrap());
        assert!(store.read(&id).unwrap().is_none());
        assert!(matches!(store.load(&id), Err(StoreError::NotFound(_))));
    }

    #[test]
    fn tampered_object_is_detected() {
        let (_dir, store) = store(Layout::Sharded);
        let id = store.write(&blob("genuine")).unwrap();
        let forged = blob("forged").to_bytes().unwrap();
        fsutil::write_atomic(&store.path_for(&id), &forged).unwrap();
        assert!(matches!(store.read(&id), Err(StoreError::HashMismatch { .. })));

        fsutil::write_atomic(&store.path_for(&id), b"garbage").unwrap();
        assert!(matches!(store.read(&id), Err(StoreError::CorruptObject { .. })));
    }

    #[test]
    fn short_prefix_scans_all_shards() {
        let (_dir, store) = store(Layout::Sharded);
        let id = store.write(&blob("only one")).unwrap();
        assert_eq!(store.resolve_prefix(&id.abbrev(1)).unwrap(), id);
        assert_eq!(store.ids_with_prefix(&id.abbrev(2)).unwrap(), vec![id]);
    }

    #[test]
    fn ambiguous_prefix_on_disk() {
        let (_dir, store) = store(Layout::Flat);
        let ids: Vec<ObjectId> = (0..17)
            .map(|i| store.write(&blob(&format!("{i}"))).unwrap())
            .collect();
        let shared = ids
            .iter()
            .map(|id| id.abbrev(1))
            .find(|p| ids.iter().filter(|id| id.matches_prefix(p)).count() > 1)
            .unwrap();
        assert!(matches!(
            store.resolve_prefix(&shared),
            Err(StoreError::AmbiguousPrefix { .. })
        ));
    }

    #[test]
    fn stray_files_are_not_ids() {
        let (_dir, store) = store(Layout::Flat);
        let id = store.write(&blob("real")).unwrap();
        fsutil::write_atomic(&store.root().join(format!("{}.tmp", id.abbrev(4))), b"x").unwrap();
        assert_eq!(store.ids_with_prefix(&id.abbrev(4)).unwrap(), vec![id]);
    }
}
