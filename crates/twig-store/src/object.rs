use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use twig_crypto::ContentHasher;
use twig_types::ObjectId;

use crate::error::{StoreError, StoreResult};

/// Message of the root commit created by `init`.
pub const INITIAL_COMMIT_MESSAGE: &str = "initial commit";

/// The kind of object stored.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ObjectKind {
    /// Raw file content.
    Blob,
    /// A committed snapshot: path to blob mapping.
    Tree,
    /// A commit record.
    Commit,
    /// A staging-area tree. Same payload as `Tree`, separate identity space.
    Stage,
}

impl ObjectKind {
    /// The domain-separated hasher for this kind.
    pub fn hasher(&self) -> &'static ContentHasher {
        match self {
            Self::Blob => &ContentHasher::BLOB,
            Self::Tree => &ContentHasher::TREE,
            Self::Commit => &ContentHasher::COMMIT,
            Self::Stage => &ContentHasher::STAGE,
        }
    }
}

impl std::fmt::Display for ObjectKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Blob => write!(f, "blob"),
            Self::Tree => write!(f, "tree"),
            Self::Commit => write!(f, "commit"),
            Self::Stage => write!(f, "stage"),
        }
    }
}

/// A stored object: kind tag + canonical encoding.
///
/// `StoredObject` is the unit of storage. The id of an object is the hash of
/// `data` under the hasher of `kind`; the store never interprets `data`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredObject {
    /// The type of this object.
    pub kind: ObjectKind,
    /// The canonical bytes of the object.
    pub data: Vec<u8>,
}

impl StoredObject {
    /// Create a new stored object from kind and data.
    pub fn new(kind: ObjectKind, data: Vec<u8>) -> Self {
        Self { kind, data }
    }

    /// Compute the content-addressed ID for this object.
    pub fn compute_id(&self) -> ObjectId {
        self.kind.hasher().hash(&self.data)
    }

    /// Encode the envelope for persistence.
    pub fn to_bytes(&self) -> StoreResult<Vec<u8>> {
        bincode::serialize(self).map_err(|e| StoreError::Serialization(e.to_string()))
    }

    /// Decode a persisted envelope.
    pub fn from_bytes(bytes: &[u8]) -> StoreResult<Self> {
        bincode::deserialize(bytes).map_err(|e| StoreError::Serialization(e.to_string()))
    }
}

fn kind_mismatch(obj: &StoredObject, expected: &str) -> StoreError {
    StoreError::CorruptObject {
        id: obj.compute_id(),
        reason: format!("expected {expected}, got {}", obj.kind),
    }
}

// ---------------------------------------------------------------------------
// Blob
// ---------------------------------------------------------------------------

/// Opaque file content.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Blob {
    pub data: Vec<u8>,
}

impl Blob {
    /// Create a new blob from raw bytes.
    pub fn new(data: impl Into<Vec<u8>>) -> Self {
        Self { data: data.into() }
    }

    /// The id this blob has (or will have) in the store.
    pub fn id(&self) -> ObjectId {
        ContentHasher::BLOB.hash(&self.data)
    }

    /// Convert into a `StoredObject` for storage.
    pub fn to_stored_object(&self) -> StoredObject {
        StoredObject::new(ObjectKind::Blob, self.data.clone())
    }

    /// Decode from a `StoredObject`.
    pub fn from_stored_object(obj: &StoredObject) -> StoreResult<Self> {
        if obj.kind != ObjectKind::Blob {
            return Err(kind_mismatch(obj, "blob"));
        }
        Ok(Self {
            data: obj.data.clone(),
        })
    }
}

// ---------------------------------------------------------------------------
// Tree
// ---------------------------------------------------------------------------

/// The state a tree records for one path.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TreeEntry {
    /// The file is present with the given blob.
    File(ObjectId),
    /// Tombstone: the file is staged for removal. Only staging trees carry these.
    Removed,
}

impl TreeEntry {
    /// The blob id, or `None` for a tombstone.
    pub fn blob_id(&self) -> Option<ObjectId> {
        match self {
            Self::File(id) => Some(*id),
            Self::Removed => None,
        }
    }

    /// Returns `true` for a tombstone.
    pub fn is_removed(&self) -> bool {
        matches!(self, Self::Removed)
    }
}

/// Ordered mapping from path name to [`TreeEntry`].
///
/// Backed by a `BTreeMap`, so a path appears at most once and iteration is
/// always in path order, which keeps the JSON encoding (and therefore the
/// id) deterministic.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tree {
    entries: BTreeMap<String, TreeEntry>,
}

impl Tree {
    /// Create an empty tree.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build a tree of present files.
    pub fn from_files<I, S>(files: I) -> Self
    where
        I: IntoIterator<Item = (S, ObjectId)>,
        S: Into<String>,
    {
        Self {
            entries: files
                .into_iter()
                .map(|(path, id)| (path.into(), TreeEntry::File(id)))
                .collect(),
        }
    }

    /// Look up the entry for a path.
    pub fn get(&self, path: &str) -> Option<&TreeEntry> {
        self.entries.get(path)
    }

    /// The blob id of a present file; `None` when untracked or tombstoned.
    pub fn blob_id(&self, path: &str) -> Option<ObjectId> {
        self.entries.get(path).and_then(TreeEntry::blob_id)
    }

    /// Returns `true` if the tree has any entry (file or tombstone) for `path`.
    pub fn contains(&self, path: &str) -> bool {
        self.entries.contains_key(path)
    }

    /// Record `path` as present with `id`, replacing any previous entry.
    pub fn insert_file(&mut self, path: impl Into<String>, id: ObjectId) {
        self.entries.insert(path.into(), TreeEntry::File(id));
    }

    /// Record a tombstone for `path`, replacing any previous entry.
    pub fn mark_removed(&mut self, path: impl Into<String>) {
        self.entries.insert(path.into(), TreeEntry::Removed);
    }

    /// Drop the entry for `path` entirely.
    pub fn remove(&mut self, path: &str) -> Option<TreeEntry> {
        self.entries.remove(path)
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if the tree has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// All entries in path order.
    pub fn entries(&self) -> impl Iterator<Item = (&str, &TreeEntry)> {
        self.entries.iter().map(|(path, entry)| (path.as_str(), entry))
    }

    /// Paths of present files, in path order.
    pub fn files(&self) -> impl Iterator<Item = (&str, ObjectId)> {
        self.entries
            .iter()
            .filter_map(|(path, entry)| entry.blob_id().map(|id| (path.as_str(), id)))
    }

    /// Paths carrying tombstones, in path order.
    pub fn removed(&self) -> impl Iterator<Item = &str> {
        self.entries
            .iter()
            .filter(|(_, entry)| entry.is_removed())
            .map(|(path, _)| path.as_str())
    }

    /// A new tree equal to `self` with `stage` applied on top.
    ///
    /// Present files in the stage replace or add entries; tombstones delete
    /// them. The result never contains tombstones if `self` does not.
    pub fn updated_with(&self, stage: &Tree) -> Tree {
        let mut next = self.clone();
        for (path, entry) in &stage.entries {
            match entry {
                TreeEntry::File(id) => next.insert_file(path.clone(), *id),
                TreeEntry::Removed => {
                    next.entries.remove(path);
                }
            }
        }
        next
    }

    fn encode(&self) -> StoreResult<Vec<u8>> {
        serde_json::to_vec(self).map_err(|e| StoreError::Serialization(e.to_string()))
    }

    fn decode(data: &[u8]) -> StoreResult<Self> {
        serde_json::from_slice(data).map_err(|e| StoreError::Serialization(e.to_string()))
    }

    /// Convert into a committed-tree `StoredObject`.
    pub fn to_stored_object(&self) -> StoreResult<StoredObject> {
        Ok(StoredObject::new(ObjectKind::Tree, self.encode()?))
    }

    /// Convert into a staging-area `StoredObject`.
    pub fn to_stored_stage(&self) -> StoreResult<StoredObject> {
        Ok(StoredObject::new(ObjectKind::Stage, self.encode()?))
    }

    /// Decode from a `StoredObject` of kind `Tree` or `Stage`.
    pub fn from_stored_object(obj: &StoredObject) -> StoreResult<Self> {
        match obj.kind {
            ObjectKind::Tree | ObjectKind::Stage => Self::decode(&obj.data),
            _ => Err(kind_mismatch(obj, "tree")),
        }
    }
}

// ---------------------------------------------------------------------------
// Commit
// ---------------------------------------------------------------------------

/// Immutable snapshot descriptor.
///
/// Field order is the canonical encoding order; do not reorder.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Commit {
    /// First parent; `None` only for the initial commit.
    pub parent: Option<ObjectId>,
    /// Second parent of a merge commit.
    pub merge_parent: Option<ObjectId>,
    pub message: String,
    pub tree: ObjectId,
    pub timestamp: DateTime<Utc>,
}

impl Commit {
    /// The root commit. Its timestamp is fixed at the epoch so that every
    /// fresh repository produces the identical initial commit.
    pub fn initial(tree: ObjectId) -> Self {
        Self {
            parent: None,
            merge_parent: None,
            message: INITIAL_COMMIT_MESSAGE.to_string(),
            tree,
            // `DateTime<Utc>` defaults to the Unix epoch.
            timestamp: DateTime::<Utc>::default(),
        }
    }

    /// An ordinary single-parent commit stamped with the current time.
    pub fn new(message: impl Into<String>, tree: ObjectId, parent: ObjectId) -> Self {
        Self {
            parent: Some(parent),
            merge_parent: None,
            message: message.into(),
            tree,
            timestamp: Utc::now(),
        }
    }

    /// A two-parent merge commit stamped with the current time.
    pub fn merge(
        message: impl Into<String>,
        tree: ObjectId,
        parent: ObjectId,
        merge_parent: ObjectId,
    ) -> Self {
        Self {
            parent: Some(parent),
            merge_parent: Some(merge_parent),
            message: message.into(),
            tree,
            timestamp: Utc::now(),
        }
    }

    /// Parents in order: first parent, then merge parent.
    pub fn parents(&self) -> Vec<ObjectId> {
        self.parent.into_iter().chain(self.merge_parent).collect()
    }

    /// Returns `true` for a two-parent commit.
    pub fn is_merge(&self) -> bool {
        self.merge_parent.is_some()
    }

    /// Convert into a `StoredObject` for storage.
    pub fn to_stored_object(&self) -> StoreResult<StoredObject> {
        let data =
            serde_json::to_vec(self).map_err(|e| StoreError::Serialization(e.to_string()))?;
        Ok(StoredObject::new(ObjectKind::Commit, data))
    }

    /// Decode from a `StoredObject`.
    pub fn from_stored_object(obj: &StoredObject) -> StoreResult<Self> {
        if obj.kind != ObjectKind::Commit {
            return Err(kind_mismatch(obj, "commit"));
        }
        serde_json::from_slice(&obj.data).map_err(|e| StoreError::Serialization(e.to_string()))
    }
}

// ---------------------------------------------------------------------------
// Object
// ---------------------------------------------------------------------------

/// Any record the store can hold.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Object {
    Blob(Blob),
    Tree(Tree),
    Commit(Commit),
    Stage(Tree),
}

impl Object {
    pub fn kind(&self) -> ObjectKind {
        match self {
            Self::Blob(_) => ObjectKind::Blob,
            Self::Tree(_) => ObjectKind::Tree,
            Self::Commit(_) => ObjectKind::Commit,
            Self::Stage(_) => ObjectKind::Stage,
        }
    }

    /// Encode into the storage envelope.
    pub fn to_stored_object(&self) -> StoreResult<StoredObject> {
        match self {
            Self::Blob(blob) => Ok(blob.to_stored_object()),
            Self::Tree(tree) => tree.to_stored_object(),
            Self::Commit(commit) => commit.to_stored_object(),
            Self::Stage(tree) => tree.to_stored_stage(),
        }
    }

    /// Decode from the storage envelope.
    pub fn from_stored_object(obj: &StoredObject) -> StoreResult<Self> {
        Ok(match obj.kind {
            ObjectKind::Blob => Self::Blob(Blob::from_stored_object(obj)?),
            ObjectKind::Tree => Self::Tree(Tree::from_stored_object(obj)?),
            ObjectKind::Commit => Self::Commit(Commit::from_stored_object(obj)?),
            ObjectKind::Stage => Self::Stage(Tree::from_stored_object(obj)?),
        })
    }

    /// The content-addressed id of this object.
    pub fn id(&self) -> StoreResult<ObjectId> {
        Ok(self.to_stored_object()?.compute_id())
    }
}

impl From<Blob> for Object {
    fn from(blob: Blob) -> Self {
        Self::Blob(blob)
    }
}

impl From<Commit> for Object {
    fn from(commit: Commit) -> Self {
        Self::Commit(commit)
    }
}
