//! The three checkout forms, reset, and branch moves that rewrite the
//! working directory.

use tracing::info;
use twig_store::Tree;
use twig_types::ObjectId;

use crate::error::{RepoError, RepoResult};
use crate::repository::Repository;

impl Repository {
    /// Restore one file from the HEAD commit. The staging area is not
    /// touched.
    pub fn checkout_file(&mut self, name: &str) -> RepoResult<()> {
        let head = self.head_commit_id()?;
        self.restore_file(&head, name)
    }

    /// Restore one file from the commit named by a full or abbreviated id.
    pub fn checkout_file_at(&mut self, commit: &str, name: &str) -> RepoResult<()> {
        let id = self.resolve_commit(commit)?;
        self.restore_file(&id, name)
    }

    fn restore_file(&mut self, commit: &ObjectId, name: &str) -> RepoResult<()> {
        let tree = self.cache().commit_tree(commit)?;
        let blob = tree.blob_id(name).ok_or(RepoError::FileNotInCommit)?;
        let data = self.blob_data(&blob)?;
        self.worktree().write(name, &data)
    }

    /// Switch to another branch, replacing the working files.
    pub fn checkout_branch(&mut self, name: &str) -> RepoResult<()> {
        let target = self.branch_tip(name)?.ok_or(RepoError::NoSuchBranch)?;
        if self.current_branch()? == name {
            return Err(RepoError::AlreadyOnBranch);
        }
        self.switch_to(&target)?;
        self.cache().set_head(name);
        info!(branch = name, "checked out branch");
        Ok(())
    }

    /// Check out an arbitrary commit and move the current branch to it.
    pub fn reset(&mut self, commit: &str) -> RepoResult<ObjectId> {
        let id = self.resolve_commit(commit)?;
        self.switch_to(&id)?;
        let branch = self.current_branch()?;
        self.cache().set_branch(&branch, id);
        info!(branch = %branch, commit = %id.short_hex(), "reset");
        Ok(id)
    }

    /// Make the working directory match `target` and clear the staging
    /// area. Fails before touching anything if an untracked file would be
    /// overwritten.
    pub(crate) fn switch_to(&mut self, target: &ObjectId) -> RepoResult<()> {
        let current = self.head_tree()?;
        let next = self.cache().commit_tree(target)?;
        if self
            .untracked_files()?
            .iter()
            .any(|path| next.contains(path))
        {
            return Err(RepoError::UntrackedFileInTheWay);
        }
        self.materialize(&current, &next)?;
        self.cache().clear_stage()
    }

    /// Write every file of `to`; delete files tracked by `from` only.
    fn materialize(&mut self, from: &Tree, to: &Tree) -> RepoResult<()> {
        for (path, id) in to.files() {
            let data = self.blob_data(&id)?;
            self.worktree().write(path, &data)?;
        }
        for (path, _) in from.files() {
            if !to.contains(path) {
                self.worktree().delete(path)?;
            }
        }
        Ok(())
    }

    /// Move `branch` to `tip` on behalf of another repository (a push).
    ///
    /// When `branch` is checked out the working directory follows it
    /// unconditionally and the staging area is cleared; otherwise only the
    /// pointer moves.
    pub fn advance_branch(&mut self, branch: &str, tip: ObjectId) -> RepoResult<()> {
        let previous = self.branch_tip(branch)?;
        self.cache().set_branch(branch, tip);
        if self.current_branch()? != branch {
            return Ok(());
        }
        let from = match previous {
            Some(id) => self.cache().commit_tree(&id)?,
            None => Tree::empty(),
        };
        let to = self.cache().commit_tree(&tip)?;
        self.materialize(&from, &to)?;
        self.cache().clear_stage()?;
        info!(branch, tip = %tip.short_hex(), "updated checked-out branch");
        Ok(())
    }
}
