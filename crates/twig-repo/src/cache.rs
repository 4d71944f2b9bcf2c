//! The unit-of-work cache.
//!
//! A [`Cache`] sits between a command and its repository's object and
//! pointer stores. Reads are loaded on first use and memoized; writes and
//! deletes are only queued. [`Cache::flush`] applies everything in a fixed
//! order:
//!
//! 1. queued object deletes
//! 2. queued object writes
//! 3. branch writes and deletes
//! 4. HEAD
//! 5. the stage pointer
//! 6. the commit index
//!
//! Deletes go before writes so an object that is superseded and then
//! recreated within one command (staging-area churn) ends up present.
//!
//! One cache serves exactly one repository. Operating on a second
//! repository (a remote) means building a second cache over its stores.

use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet};

use tracing::debug;
use twig_dag::CommitGraph;
use twig_refs::RefStore;
use twig_store::{Blob, Commit, Object, ObjectKind, ObjectStore, StoreError, Tree};
use twig_types::ObjectId;

use crate::error::{RepoError, RepoResult};

/// The commit index in creation order, with a set for membership checks.
#[derive(Debug, Default)]
struct CommitIndex {
    ids: Vec<ObjectId>,
    known: HashSet<ObjectId>,
}

impl CommitIndex {
    fn new(ids: Vec<ObjectId>) -> Self {
        let known = ids.iter().copied().collect();
        Self { ids, known }
    }

    /// Returns `true` if `id` was not already present.
    fn push(&mut self, id: ObjectId) -> bool {
        if self.known.insert(id) {
            self.ids.push(id);
            true
        } else {
            false
        }
    }
}

pub struct Cache {
    objects: Box<dyn ObjectStore>,
    refs: Box<dyn RefStore>,

    loaded: HashMap<ObjectId, Object>,
    writes: BTreeSet<ObjectId>,
    deletes: BTreeSet<ObjectId>,

    /// `None` inside the map records a branch known to be absent (or
    /// deleted in this unit of work).
    branches: BTreeMap<String, Option<ObjectId>>,
    dirty_branches: BTreeSet<String>,

    head: Option<String>,
    head_dirty: bool,

    /// Outer `None`: pointer not loaded yet.
    stage_id: Option<Option<ObjectId>>,
    stage_dirty: bool,

    commits: Option<CommitIndex>,
    commits_dirty: bool,
}

impl Cache {
    pub fn new(objects: Box<dyn ObjectStore>, refs: Box<dyn RefStore>) -> Self {
        Self {
            objects,
            refs,
            loaded: HashMap::new(),
            writes: BTreeSet::new(),
            deletes: BTreeSet::new(),
            branches: BTreeMap::new(),
            dirty_branches: BTreeSet::new(),
            head: None,
            head_dirty: false,
            stage_id: None,
            stage_dirty: false,
            commits: None,
            commits_dirty: false,
        }
    }

    // ---------------------------------------------------------------
    // Objects
    // ---------------------------------------------------------------

    /// Load an object. The null id means "not tracked" and yields `None`;
    /// any other id that cannot be found is an integrity error.
    pub fn object(&mut self, id: &ObjectId) -> RepoResult<Option<&Object>> {
        if id.is_null() {
            return Ok(None);
        }
        if !self.loaded.contains_key(id) {
            let stored = self.objects.load(id)?;
            let object = Object::from_stored_object(&stored)?;
            debug!(id = %id.short_hex(), kind = %object.kind(), "cache miss");
            self.loaded.insert(*id, object);
        }
        Ok(self.loaded.get(id))
    }

    fn require(&mut self, id: &ObjectId) -> RepoResult<&Object> {
        self.object(id)?
            .ok_or(RepoError::Store(StoreError::NullObjectId))
    }

    fn wrong_kind(id: &ObjectId, expected: ObjectKind, object: &Object) -> RepoError {
        RepoError::WrongKind {
            id: *id,
            expected,
            actual: object.kind(),
        }
    }

    pub fn commit(&mut self, id: &ObjectId) -> RepoResult<Commit> {
        match self.require(id)? {
            Object::Commit(commit) => Ok(commit.clone()),
            other => Err(Self::wrong_kind(id, ObjectKind::Commit, other)),
        }
    }

    pub fn tree(&mut self, id: &ObjectId) -> RepoResult<Tree> {
        match self.require(id)? {
            Object::Tree(tree) => Ok(tree.clone()),
            other => Err(Self::wrong_kind(id, ObjectKind::Tree, other)),
        }
    }

    /// The tree of a commit.
    pub fn commit_tree(&mut self, id: &ObjectId) -> RepoResult<Tree> {
        let commit = self.commit(id)?;
        self.tree(&commit.tree)
    }

    /// Blob content; `None` when the file is not tracked.
    pub fn blob(&mut self, id: Option<&ObjectId>) -> RepoResult<Option<Blob>> {
        let Some(id) = id else {
            return Ok(None);
        };
        match self.object(id)? {
            None => Ok(None),
            Some(Object::Blob(blob)) => Ok(Some(blob.clone())),
            Some(other) => Err(Self::wrong_kind(id, ObjectKind::Blob, other)),
        }
    }

    /// Memoize an object and queue it for writing.
    pub fn put(&mut self, object: Object) -> RepoResult<ObjectId> {
        let id = object.id()?;
        self.loaded.insert(id, object);
        self.writes.insert(id);
        Ok(id)
    }

    /// Queue an object for deletion.
    pub fn delete(&mut self, id: &ObjectId) {
        self.deletes.insert(*id);
    }

    /// Returns `true` if the object is cached, queued, or already stored.
    pub fn has_object(&self, id: &ObjectId) -> RepoResult<bool> {
        if self.writes.contains(id) || self.loaded.contains_key(id) {
            return Ok(true);
        }
        Ok(self.objects.exists(id)?)
    }

    // ---------------------------------------------------------------
    // Branches
    // ---------------------------------------------------------------

    pub fn branch(&mut self, name: &str) -> RepoResult<Option<ObjectId>> {
        if let Some(cached) = self.branches.get(name) {
            return Ok(*cached);
        }
        let id = self.refs.read_branch(name)?;
        self.branches.insert(name.to_string(), id);
        Ok(id)
    }

    pub fn set_branch(&mut self, name: &str, id: ObjectId) {
        self.branches.insert(name.to_string(), Some(id));
        self.dirty_branches.insert(name.to_string());
    }

    pub fn remove_branch(&mut self, name: &str) {
        self.branches.insert(name.to_string(), None);
        self.dirty_branches.insert(name.to_string());
    }

    /// All branch names as this unit of work sees them, sorted.
    pub fn branch_names(&mut self) -> RepoResult<Vec<String>> {
        let mut names: BTreeSet<String> = self.refs.list_branches()?.into_iter().collect();
        for (name, id) in &self.branches {
            if id.is_some() {
                names.insert(name.clone());
            } else {
                names.remove(name);
            }
        }
        Ok(names.into_iter().collect())
    }

    // ---------------------------------------------------------------
    // HEAD
    // ---------------------------------------------------------------

    /// Name of the current branch.
    pub fn head(&mut self) -> RepoResult<String> {
        if self.head.is_none() {
            self.head = Some(self.refs.head()?.ok_or(RepoError::MissingPointer("HEAD"))?);
        }
        self.head.clone().ok_or(RepoError::MissingPointer("HEAD"))
    }

    pub fn set_head(&mut self, branch: &str) {
        self.head = Some(branch.to_string());
        self.head_dirty = true;
    }

    /// Tip of the current branch.
    pub fn head_commit_id(&mut self) -> RepoResult<ObjectId> {
        let head = self.head()?;
        self.branch(&head)?.ok_or(RepoError::DanglingHead(head))
    }

    pub fn head_commit(&mut self) -> RepoResult<Commit> {
        let id = self.head_commit_id()?;
        self.commit(&id)
    }

    // ---------------------------------------------------------------
    // Staging area
    // ---------------------------------------------------------------

    fn stage_pointer(&mut self) -> RepoResult<Option<ObjectId>> {
        if self.stage_id.is_none() {
            self.stage_id = Some(self.refs.stage()?);
        }
        Ok(self.stage_id.flatten())
    }

    pub fn stage(&mut self) -> RepoResult<Tree> {
        let id = self.stage_pointer()?.ok_or(RepoError::MissingPointer("STAGE"))?;
        match self.require(&id)? {
            Object::Stage(tree) => Ok(tree.clone()),
            other => Err(Self::wrong_kind(&id, ObjectKind::Stage, other)),
        }
    }

    /// Replace the staging area. The superseded staging tree is garbage:
    /// dropped from the write queue if it was created in this unit of work,
    /// queued for deletion otherwise.
    pub fn set_stage(&mut self, stage: Tree) -> RepoResult<()> {
        let previous = self.stage_pointer()?;
        let id = self.put(Object::Stage(stage))?;
        if let Some(previous) = previous.filter(|previous| *previous != id) {
            if !self.writes.remove(&previous) {
                self.delete(&previous);
            }
        }
        self.stage_id = Some(Some(id));
        self.stage_dirty = true;
        Ok(())
    }

    pub fn clear_stage(&mut self) -> RepoResult<()> {
        self.set_stage(Tree::empty())
    }

    // ---------------------------------------------------------------
    // Commit index
    // ---------------------------------------------------------------

    fn commit_index(&mut self) -> RepoResult<&mut CommitIndex> {
        if self.commits.is_none() {
            self.commits = Some(CommitIndex::new(self.refs.commit_index()?));
        }
        Ok(self.commits.get_or_insert_with(CommitIndex::default))
    }

    /// Every commit id ever recorded, in creation order.
    pub fn commit_ids(&mut self) -> RepoResult<Vec<ObjectId>> {
        Ok(self.commit_index()?.ids.clone())
    }

    /// Recorded commits whose hex id starts with the normalized `prefix`.
    pub fn commits_with_prefix(&mut self, prefix: &str) -> RepoResult<Vec<ObjectId>> {
        Ok(self
            .commit_index()?
            .ids
            .iter()
            .filter(|id| id.matches_prefix(prefix))
            .copied()
            .collect())
    }

    /// Append a commit id to the index unless it is already there.
    pub fn record_commit(&mut self, id: ObjectId) -> RepoResult<()> {
        if self.commit_index()?.push(id) {
            self.commits_dirty = true;
        }
        Ok(())
    }

    // ---------------------------------------------------------------
    // Write-back
    // ---------------------------------------------------------------

    /// Apply all queued work to the underlying stores. The cache stays
    /// usable; its queues are empty afterwards.
    pub fn flush(&mut self) -> RepoResult<()> {
        let deletes = std::mem::take(&mut self.deletes);
        for id in &deletes {
            self.objects.delete(id)?;
        }

        let writes = std::mem::take(&mut self.writes);
        for id in &writes {
            let object = self.loaded.get(id).ok_or(StoreError::NotFound(*id))?;
            self.objects.write(&object.to_stored_object()?)?;
        }

        let dirty = std::mem::take(&mut self.dirty_branches);
        for name in &dirty {
            match self.branches.get(name).copied().flatten() {
                Some(id) => self.refs.write_branch(name, &id)?,
                None => {
                    self.refs.delete_branch(name)?;
                }
            }
        }

        if std::mem::take(&mut self.head_dirty) {
            if let Some(head) = &self.head {
                self.refs.set_head(head)?;
            }
        }
        if std::mem::take(&mut self.stage_dirty) {
            if let Some(Some(id)) = self.stage_id {
                self.refs.set_stage(&id)?;
            }
        }
        if std::mem::take(&mut self.commits_dirty) {
            if let Some(index) = &self.commits {
                self.refs.write_commit_index(&index.ids)?;
            }
        }

        debug!(
            deleted = deletes.len(),
            written = writes.len(),
            branches = dirty.len(),
            "flushed cache"
        );
        Ok(())
    }
}

impl CommitGraph for Cache {
    type Error = RepoError;

    fn parents(&mut self, id: &ObjectId) -> RepoResult<Vec<ObjectId>> {
        Ok(self.commit(id)?.parents())
    }
}

impl std::fmt::Debug for Cache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Cache")
            .field("loaded", &self.loaded.len())
            .field("writes", &self.writes.len())
            .field("deletes", &self.deletes.len())
            .field("dirty_branches", &self.dirty_branches)
            .finish()
    }
}
