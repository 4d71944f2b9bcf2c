//! [`Repository`]: one working directory, its marker directory and the
//! unit of work for the command being run.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use tracing::{debug, info};
use twig_refs::{validate_local_branch_name, validate_remote_name, FsRefStore};
use twig_store::{fsutil, Blob, Commit, FsObjectStore, Layout, Object, StoreError, Tree};
use twig_types::ObjectId;

use crate::cache::Cache;
use crate::config::RepoConfig;
use crate::error::{RepoError, RepoResult};
use crate::layout::RepoLayout;
use crate::status::{ChangeKind, RepoStatus, UnstagedChange};
use crate::worktree::WorkTree;

/// Branch created by `init`.
pub const DEFAULT_BRANCH: &str = "master";

/// One commit as shown by `log` and `global-log`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LogEntry {
    pub id: ObjectId,
    pub commit: Commit,
}

/// An open repository.
///
/// Commands mutate the in-memory unit of work only; nothing is persisted
/// until [`Repository::flush`].
#[derive(Debug)]
pub struct Repository {
    layout: RepoLayout,
    config: RepoConfig,
    config_dirty: bool,
    cache: Cache,
    worktree: WorkTree,
}

impl Repository {
    fn assemble(layout: RepoLayout, config: RepoConfig) -> Self {
        let objects = FsObjectStore::new(layout.objects(), config.store.layout);
        let refs = FsRefStore::new(layout.marker());
        Self {
            cache: Cache::new(Box::new(objects), Box::new(refs)),
            worktree: WorkTree::new(layout.root()),
            layout,
            config,
            config_dirty: false,
        }
    }

    /// Create a repository in `root`: branch `master` at the initial
    /// commit, HEAD on `master`, an empty staging area.
    pub fn init(root: impl Into<PathBuf>, layout: Layout) -> RepoResult<Self> {
        let paths = RepoLayout::new(root);
        if paths.marker().exists() {
            return Err(RepoError::AlreadyInitialized);
        }
        fsutil::mkdirs(&paths.objects())?;
        fsutil::mkdirs(&paths.branches())?;

        let mut config = RepoConfig::default();
        config.store.layout = layout;
        let mut repo = Self::assemble(paths, config);
        repo.config_dirty = true;

        let tree = repo.cache.put(Object::Tree(Tree::empty()))?;
        let initial = repo.cache.put(Object::Commit(Commit::initial(tree)))?;
        repo.cache.set_branch(DEFAULT_BRANCH, initial);
        repo.cache.set_head(DEFAULT_BRANCH);
        repo.cache.clear_stage()?;
        repo.cache.record_commit(initial)?;
        info!(root = %repo.root().display(), ?layout, "initialized repository");
        Ok(repo)
    }

    /// Open the repository whose working directory is `root`.
    pub fn open(root: impl Into<PathBuf>) -> RepoResult<Self> {
        let paths = RepoLayout::new(root);
        if !paths.is_initialized() {
            return Err(RepoError::NotInitialized);
        }
        let config = RepoConfig::load(&paths.config())?;
        debug!(root = %paths.root().display(), layout = ?config.store.layout, "opened repository");
        Ok(Self::assemble(paths, config))
    }

    /// Persist the unit of work: objects, pointers, then configuration.
    pub fn flush(&mut self) -> RepoResult<()> {
        self.cache.flush()?;
        if self.config_dirty {
            self.config.save(&self.layout.config())?;
            self.config_dirty = false;
        }
        Ok(())
    }

    pub fn root(&self) -> &Path {
        self.layout.root()
    }

    pub fn layout(&self) -> &RepoLayout {
        &self.layout
    }

    pub fn config(&self) -> &RepoConfig {
        &self.config
    }

    pub fn cache(&mut self) -> &mut Cache {
        &mut self.cache
    }

    pub fn worktree(&self) -> &WorkTree {
        &self.worktree
    }

    // ---------------------------------------------------------------
    // Lookups
    // ---------------------------------------------------------------

    /// Name of the current branch.
    pub fn current_branch(&mut self) -> RepoResult<String> {
        self.cache.head()
    }

    pub fn head_commit_id(&mut self) -> RepoResult<ObjectId> {
        self.cache.head_commit_id()
    }

    pub fn branch_tip(&mut self, name: &str) -> RepoResult<Option<ObjectId>> {
        self.cache.branch(name)
    }

    /// Resolve a full or abbreviated commit id. Only commits are candidates,
    /// so a prefix shared with a blob or tree still names its commit.
    pub fn resolve_commit(&mut self, prefix: &str) -> RepoResult<ObjectId> {
        let prefix = ObjectId::normalize_prefix(prefix).map_err(|_| RepoError::CommitNotFound)?;
        let mut candidates = self.cache.commits_with_prefix(&prefix)?;
        match candidates.len() {
            0 => Err(RepoError::CommitNotFound),
            1 => Ok(candidates.remove(0)),
            _ => Err(RepoError::AmbiguousCommitId),
        }
    }

    /// Working content of a file tracked as `id`.
    pub(crate) fn blob_data(&mut self, id: &ObjectId) -> RepoResult<Vec<u8>> {
        self.cache
            .blob(Some(id))?
            .map(|blob| blob.data)
            .ok_or(RepoError::Store(StoreError::NotFound(*id)))
    }

    pub(crate) fn head_tree(&mut self) -> RepoResult<Tree> {
        let head = self.cache.head_commit_id()?;
        self.cache.commit_tree(&head)
    }

    // ---------------------------------------------------------------
    // add / commit / rm
    // ---------------------------------------------------------------

    /// Stage the working version of `name`.
    ///
    /// If it matches the HEAD commit's version the path is instead dropped
    /// from the staging area, which also cancels a staged removal.
    pub fn add(&mut self, name: &str) -> RepoResult<()> {
        let data = self.worktree.read(name)?.ok_or(RepoError::FileNotFound)?;
        let blob = Blob::new(data);
        let blob_id = blob.id();
        let committed = self.head_tree()?.blob_id(name);

        let mut stage = self.cache.stage()?;
        if committed == Some(blob_id) {
            if stage.remove(name).is_none() {
                return Ok(());
            }
            debug!(file = name, "unstaged file identical to HEAD");
        } else {
            self.cache.put(Object::Blob(blob))?;
            stage.insert_file(name, blob_id);
            debug!(file = name, blob = %blob_id.short_hex(), "staged file");
        }
        self.cache.set_stage(stage)
    }

    /// Record the staging area as a new commit on the current branch.
    pub fn commit(&mut self, message: &str) -> RepoResult<ObjectId> {
        if message.trim().is_empty() {
            return Err(RepoError::EmptyMessage);
        }
        if self.cache.stage()?.is_empty() {
            return Err(RepoError::NothingToCommit);
        }
        self.commit_stage(message, None)
    }

    /// Commit whatever is staged (possibly nothing) on top of HEAD.
    pub(crate) fn commit_stage(
        &mut self,
        message: &str,
        merge_parent: Option<ObjectId>,
    ) -> RepoResult<ObjectId> {
        let branch = self.cache.head()?;
        let parent = self.cache.head_commit_id()?;
        let stage = self.cache.stage()?;
        let tree = self.cache.commit_tree(&parent)?.updated_with(&stage);
        let tree_id = self.cache.put(Object::Tree(tree))?;

        let commit = match merge_parent {
            Some(other) => Commit::merge(message, tree_id, parent, other),
            None => Commit::new(message, tree_id, parent),
        };
        let id = self.cache.put(Object::Commit(commit))?;
        self.cache.set_branch(&branch, id);
        self.cache.record_commit(id)?;
        self.cache.clear_stage()?;
        info!(branch = %branch, commit = %id.short_hex(), "committed");
        Ok(id)
    }

    /// Unstage `name`, or stage its removal if HEAD tracks it.
    pub fn rm(&mut self, name: &str) -> RepoResult<()> {
        let mut stage = self.cache.stage()?;
        if self.head_tree()?.contains(name) {
            stage.mark_removed(name);
            self.worktree.delete(name)?;
            debug!(file = name, "staged removal");
        } else if stage.blob_id(name).is_some() {
            stage.remove(name);
            debug!(file = name, "unstaged file");
        } else {
            return Err(RepoError::NoReasonToRemove);
        }
        self.cache.set_stage(stage)
    }

    // ---------------------------------------------------------------
    // History
    // ---------------------------------------------------------------

    /// First-parent history of the current branch, newest first.
    pub fn log(&mut self) -> RepoResult<Vec<LogEntry>> {
        let mut entries = Vec::new();
        let mut next = Some(self.cache.head_commit_id()?);
        while let Some(id) = next {
            let commit = self.cache.commit(&id)?;
            next = commit.parent;
            entries.push(LogEntry { id, commit });
        }
        Ok(entries)
    }

    /// Every commit ever made, in creation order.
    pub fn global_log(&mut self) -> RepoResult<Vec<LogEntry>> {
        self.cache
            .commit_ids()?
            .into_iter()
            .map(|id| Ok(LogEntry { id, commit: self.cache.commit(&id)? }))
            .collect()
    }

    /// Ids of every commit whose message is exactly `message`.
    pub fn find(&mut self, message: &str) -> RepoResult<Vec<ObjectId>> {
        let mut found = Vec::new();
        for id in self.cache.commit_ids()? {
            if self.cache.commit(&id)?.message == message {
                found.push(id);
            }
        }
        if found.is_empty() {
            return Err(RepoError::NoCommitWithMessage);
        }
        Ok(found)
    }

    // ---------------------------------------------------------------
    // Status
    // ---------------------------------------------------------------

    pub fn status(&mut self) -> RepoResult<RepoStatus> {
        let current_branch = self.cache.head()?;
        let branches = self.cache.branch_names()?;
        let head = self.head_tree()?;
        let stage = self.cache.stage()?;
        let working = self.worktree.files()?;

        let staged: Vec<String> = stage.files().map(|(path, _)| path.to_string()).collect();
        let removed: Vec<String> = stage.removed().map(str::to_string).collect();

        let mut unstaged = Vec::new();
        let mut untracked = Vec::new();

        let paths: BTreeSet<&str> = head
            .files()
            .chain(stage.files())
            .map(|(path, _)| path)
            .chain(working.iter().map(String::as_str))
            .collect();
        for path in paths {
            let on_disk = self.worktree.blob_id(path)?;
            let expected = match stage.get(path) {
                Some(entry) if entry.is_removed() => {
                    // Staged for removal but present again: untracked.
                    if on_disk.is_some() {
                        untracked.push(path.to_string());
                    }
                    continue;
                }
                Some(entry) => entry.blob_id(),
                None => head.blob_id(path),
            };
            match (expected, on_disk) {
                (None, Some(_)) => untracked.push(path.to_string()),
                (Some(_), None) => unstaged.push(UnstagedChange::new(path, ChangeKind::Deleted)),
                (Some(want), Some(have)) if want != have => {
                    unstaged.push(UnstagedChange::new(path, ChangeKind::Modified))
                }
                _ => {}
            }
        }

        Ok(RepoStatus {
            current_branch,
            branches,
            staged,
            removed,
            unstaged,
            untracked,
        })
    }

    /// Working files neither tracked by HEAD nor staged for addition.
    pub(crate) fn untracked_files(&mut self) -> RepoResult<Vec<String>> {
        let head = self.head_tree()?;
        let stage = self.cache.stage()?;
        Ok(self
            .worktree
            .files()?
            .into_iter()
            .filter(|path| !head.contains(path) && stage.blob_id(path).is_none())
            .collect())
    }

    // ---------------------------------------------------------------
    // Branches
    // ---------------------------------------------------------------

    /// Create a branch at the current commit. Does not switch to it.
    pub fn branch(&mut self, name: &str) -> RepoResult<()> {
        validate_local_branch_name(name)?;
        if self.cache.branch(name)?.is_some() {
            return Err(RepoError::BranchExists);
        }
        let head = self.cache.head_commit_id()?;
        self.cache.set_branch(name, head);
        info!(branch = name, at = %head.short_hex(), "created branch");
        Ok(())
    }

    /// Delete a branch pointer. Its commits are kept.
    pub fn rm_branch(&mut self, name: &str) -> RepoResult<()> {
        if self.cache.branch(name)?.is_none() {
            return Err(RepoError::BranchNotFound);
        }
        if self.cache.head()? == name {
            return Err(RepoError::RemoveCurrentBranch);
        }
        self.cache.remove_branch(name);
        info!(branch = name, "removed branch");
        Ok(())
    }

    // ---------------------------------------------------------------
    // Remotes
    // ---------------------------------------------------------------

    pub fn add_remote(&mut self, name: &str, path: impl Into<PathBuf>) -> RepoResult<()> {
        validate_remote_name(name)?;
        if self.config.remotes.contains_key(name) {
            return Err(RepoError::RemoteExists);
        }
        let path = path.into();
        info!(remote = name, path = %path.display(), "added remote");
        self.config.remotes.insert(name.to_string(), path);
        self.config_dirty = true;
        Ok(())
    }

    pub fn rm_remote(&mut self, name: &str) -> RepoResult<()> {
        if self.config.remotes.remove(name).is_none() {
            return Err(RepoError::RemoteNotFound);
        }
        self.config_dirty = true;
        info!(remote = name, "removed remote");
        Ok(())
    }

    /// Working directory of a configured remote. Relative paths are taken
    /// relative to this repository's root; a path naming the remote's
    /// marker directory is accepted too.
    pub fn remote_root(&self, name: &str) -> RepoResult<PathBuf> {
        let path = self.config.remotes.get(name).ok_or(RepoError::RemoteNotFound)?;
        let path = if path.is_absolute() {
            path.clone()
        } else {
            self.root().join(path)
        };
        Ok(RepoLayout::locate(&path).root().to_path_buf())
    }

    /// Open a configured remote as an independent repository with its own
    /// unit of work.
    pub fn open_remote(&self, name: &str) -> RepoResult<Repository> {
        let root = self.remote_root(name)?;
        match Repository::open(&root) {
            Err(RepoError::NotInitialized) => Err(RepoError::RemoteDirNotFound),
            other => other,
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    /// A freshly initialized, flushed repository in a temporary directory.
    pub(crate) fn setup() -> (tempfile::TempDir, Repository) {
        let dir = tempfile::tempdir().unwrap();
        let mut repo = Repository::init(dir.path(), Layout::Sharded).unwrap();
        repo.flush().unwrap();
        (dir, repo)
    }

    pub(crate) fn write(repo: &Repository, name: &str, content: &str) {
        repo.worktree().write(name, content.as_bytes()).unwrap();
    }

    pub(crate) fn read(repo: &Repository, name: &str) -> Option<String> {
        repo.worktree()
            .read(name)
            .unwrap()
            .map(|bytes| String::from_utf8(bytes).unwrap())
    }

    pub(crate) fn commit_files(repo: &mut Repository, files: &[(&str, &str)], message: &str) -> ObjectId {
        for (name, content) in files {
            write(repo, name, content);
            repo.add(name).unwrap();
        }
        repo.commit(message).unwrap()
    }

    #[test]
    fn init_creates_reproducible_initial_commit() {
        let (_a, mut first) = setup();
        let (_b, mut second) = setup();
        let a = first.head_commit_id().unwrap();
        let b = second.head_commit_id().unwrap();
        assert_eq!(a, b);
        assert_eq!(first.current_branch().unwrap(), DEFAULT_BRANCH);
        let log = first.log().unwrap();
        assert_eq!(log.len(), 1);
        assert_eq!(log[0].commit.message, "initial commit");
        assert_eq!(log[0].commit.timestamp.timestamp(), 0);
    }

    #[test]
    fn init_twice_fails() {
        let (dir, _repo) = setup();
        let err = Repository::init(dir.path(), Layout::Sharded).unwrap_err();
        assert!(matches!(err, RepoError::AlreadyInitialized));
        assert!(err.is_user_error());
    }

    #[test]
    fn open_requires_marker() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(Repository::open(dir.path()), Err(RepoError::NotInitialized)));
    }

    #[test]
    fn flat_layout_is_persisted_in_config() {
        let dir = tempfile::tempdir().unwrap();
        let mut repo = Repository::init(dir.path(), Layout::Flat).unwrap();
        repo.flush().unwrap();
        let reopened = Repository::open(dir.path()).unwrap();
        assert_eq!(reopened.config().store.layout, Layout::Flat);
        assert!(fsutil::list_dirs(&reopened.layout().objects()).unwrap().is_empty());
    }

    #[test]
    fn commit_persists_across_open() {
        let (dir, mut repo) = setup();
        let id = commit_files(&mut repo, &[("a.txt", "A")], "add a");
        repo.flush().unwrap();

        let mut reopened = Repository::open(dir.path()).unwrap();
        assert_eq!(reopened.head_commit_id().unwrap(), id);
        let tree = reopened.head_tree().unwrap();
        assert_eq!(tree.blob_id("a.txt"), Some(Blob::new("A").id()));
        assert!(reopened.cache().stage().unwrap().is_empty());
        assert_eq!(reopened.global_log().unwrap().len(), 2);
    }

    #[test]
    fn add_missing_file() {
        let (_dir, mut repo) = setup();
        assert!(matches!(repo.add("nope.txt"), Err(RepoError::FileNotFound)));
    }

    #[test]
    fn adding_committed_version_empties_stage() {
        let (_dir, mut repo) = setup();
        commit_files(&mut repo, &[("f", "v1")], "v1");
        write(&repo, "f", "v2");
        repo.add("f").unwrap();
        assert_eq!(repo.status().unwrap().staged, vec!["f"]);
        write(&repo, "f", "v1");
        repo.add("f").unwrap();
        assert!(repo.cache().stage().unwrap().is_empty());
        assert!(repo.status().unwrap().is_clean());
    }

    #[test]
    fn add_cancels_staged_removal() {
        let (_dir, mut repo) = setup();
        commit_files(&mut repo, &[("f", "v1")], "v1");
        repo.rm("f").unwrap();
        assert_eq!(repo.status().unwrap().removed, vec!["f"]);
        write(&repo, "f", "v1");
        repo.add("f").unwrap();
        assert!(repo.cache().stage().unwrap().is_empty());
    }

    #[test]
    fn commit_requires_message_and_changes() {
        let (_dir, mut repo) = setup();
        assert!(matches!(repo.commit("msg"), Err(RepoError::NothingToCommit)));
        write(&repo, "f", "x");
        repo.add("f").unwrap();
        assert!(matches!(repo.commit("  "), Err(RepoError::EmptyMessage)));
    }

    #[test]
    fn rm_semantics() {
        let (_dir, mut repo) = setup();
        commit_files(&mut repo, &[("tracked", "t")], "base");

        write(&repo, "staged", "s");
        repo.add("staged").unwrap();
        repo.rm("staged").unwrap();
        assert!(repo.cache().stage().unwrap().is_empty());
        assert!(repo.worktree().exists("staged"), "unstaging keeps the file");

        repo.rm("tracked").unwrap();
        assert!(!repo.worktree().exists("tracked"));
        let id = repo.commit("remove tracked").unwrap();
        assert!(!repo.cache().commit_tree(&id).unwrap().contains("tracked"));

        assert!(matches!(repo.rm("staged"), Err(RepoError::NoReasonToRemove)));
    }

    #[test]
    fn log_follows_first_parents() {
        let (_dir, mut repo) = setup();
        let c1 = commit_files(&mut repo, &[("f", "1")], "one");
        let c2 = commit_files(&mut repo, &[("f", "2")], "two");
        let ids: Vec<ObjectId> = repo.log().unwrap().into_iter().map(|e| e.id).collect();
        assert_eq!(ids.len(), 3);
        assert_eq!(&ids[..2], &[c2, c1]);
    }

    #[test]
    fn find_by_message() {
        let (_dir, mut repo) = setup();
        let a = commit_files(&mut repo, &[("f", "1")], "same");
        let b = commit_files(&mut repo, &[("f", "2")], "same");
        assert_eq!(repo.find("same").unwrap(), vec![a, b]);
        assert!(matches!(repo.find("other"), Err(RepoError::NoCommitWithMessage)));
    }

    #[test]
    fn status_sections() {
        let (_dir, mut repo) = setup();
        commit_files(&mut repo, &[("keep", "k"), ("edit", "e"), ("gone", "g"), ("rmd", "r")], "base");
        repo.branch("other").unwrap();

        write(&repo, "new", "n");
        repo.add("new").unwrap();
        repo.rm("rmd").unwrap();
        write(&repo, "edit", "changed");
        repo.worktree().delete("gone").unwrap();
        write(&repo, "stray", "s");

        let status = repo.status().unwrap();
        assert_eq!(status.current_branch, "master");
        assert_eq!(status.branches, vec!["master", "other"]);
        assert_eq!(status.staged, vec!["new"]);
        assert_eq!(status.removed, vec!["rmd"]);
        assert_eq!(
            status.unstaged,
            vec![
                UnstagedChange::new("edit", ChangeKind::Modified),
                UnstagedChange::new("gone", ChangeKind::Deleted),
            ]
        );
        assert_eq!(status.untracked, vec!["stray"]);
    }

    #[test]
    fn staged_then_edited_is_modified() {
        let (_dir, mut repo) = setup();
        write(&repo, "f", "one");
        repo.add("f").unwrap();
        write(&repo, "f", "two");
        let status = repo.status().unwrap();
        assert_eq!(status.staged, vec!["f"]);
        assert_eq!(status.unstaged, vec![UnstagedChange::new("f", ChangeKind::Modified)]);
    }

    #[test]
    fn branch_and_rm_branch() {
        let (_dir, mut repo) = setup();
        repo.branch("dev").unwrap();
        assert!(matches!(repo.branch("dev"), Err(RepoError::BranchExists)));
        assert!(repo.branch("a/b").unwrap_err().is_user_error());
        assert!(matches!(repo.rm_branch("master"), Err(RepoError::RemoveCurrentBranch)));
        assert!(matches!(repo.rm_branch("nope"), Err(RepoError::BranchNotFound)));
        repo.rm_branch("dev").unwrap();
        assert_eq!(repo.cache().branch_names().unwrap(), vec!["master"]);
    }

    #[test]
    fn remotes_are_saved_in_config() {
        let (dir, mut repo) = setup();
        repo.add_remote("origin", "../other").unwrap();
        assert!(matches!(repo.add_remote("origin", "x"), Err(RepoError::RemoteExists)));
        repo.flush().unwrap();

        let mut reopened = Repository::open(dir.path()).unwrap();
        assert_eq!(reopened.remote_root("origin").unwrap(), dir.path().join("../other"));
        assert!(matches!(reopened.open_remote("origin"), Err(RepoError::RemoteDirNotFound)));
        reopened.rm_remote("origin").unwrap();
        assert!(matches!(reopened.rm_remote("origin"), Err(RepoError::RemoteNotFound)));
    }

    #[test]
    fn resolve_commit_by_prefix() {
        let (_dir, mut repo) = setup();
        let id = commit_files(&mut repo, &[("f", "x")], "c");
        repo.flush().unwrap();
        assert_eq!(repo.resolve_commit(&id.abbrev(10)).unwrap(), id);
        assert_eq!(repo.resolve_commit(&id.to_hex().to_uppercase()).unwrap(), id);
        assert!(matches!(repo.resolve_commit("not-hex"), Err(RepoError::CommitNotFound)));
        let blob = Blob::new("x").id();
        assert!(matches!(repo.resolve_commit(&blob.to_hex()), Err(RepoError::CommitNotFound)));
    }

    #[test]
    fn prefix_shared_with_a_blob_still_names_the_commit() {
        let (_dir, mut repo) = setup();
        let id = commit_files(&mut repo, &[("f", "x")], "c");
        let others = repo.cache().commit_ids().unwrap();
        let len = (1..=id.to_hex().len())
            .find(|&len| {
                let prefix = id.abbrev(len);
                others.iter().filter(|other| other.matches_prefix(&prefix)).count() == 1
            })
            .unwrap();
        let prefix = id.abbrev(len);
        let blob = (0u32..)
            .map(|n| Blob::new(format!("blob {n}")))
            .find(|blob| blob.id().matches_prefix(&prefix))
            .unwrap();
        repo.cache().put(Object::Blob(blob)).unwrap();
        repo.flush().unwrap();

        assert_eq!(repo.resolve_commit(&prefix).unwrap(), id);
    }

    #[test]
    fn ambiguous_commit_prefix() {
        let (_dir, mut repo) = setup();
        let initial = repo.head_commit_id().unwrap();
        let mut ids = vec![initial];
        let shared = loop {
            let content = ids.len().to_string();
            let id = commit_files(&mut repo, &[("f", content.as_str())], &content);
            if let Some(other) = ids.iter().find(|other| other.to_hex()[..1] == id.to_hex()[..1]) {
                break other.to_hex()[..1].to_string();
            }
            ids.push(id);
        };
        assert!(matches!(repo.resolve_commit(&shared), Err(RepoError::AmbiguousCommitId)));
    }

    #[test]
    fn unflushed_work_is_discarded() {
        let (dir, mut repo) = setup();
        write(&repo, "f", "x");
        repo.add("f").unwrap();
        drop(repo);
        let mut reopened = Repository::open(dir.path()).unwrap();
        assert!(reopened.cache().stage().unwrap().is_empty());
    }
}
