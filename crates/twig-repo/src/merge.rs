//! Applying a three-way merge to the repository.
//!
//! Every precondition is checked against the complete plan before the
//! first file is written; once application starts it runs to the end.

use tracing::{info, warn};
use twig_dag::lowest_common_ancestor;
use twig_merge::{conflict_content, plan, relate, MergeAction, TipRelation};
use twig_store::{Blob, Object, Tree};
use twig_types::ObjectId;

use crate::error::{RepoError, RepoResult};
use crate::repository::Repository;

/// Result of a successful merge command.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MergeOutcome {
    /// The other branch was already part of the current history.
    AlreadyMerged,
    /// The current branch moved forward to the other tip.
    FastForwarded { to: ObjectId },
    /// A merge commit was created. Conflicted paths hold conflict markers.
    Merged {
        commit: ObjectId,
        conflicts: Vec<String>,
    },
}

impl MergeOutcome {
    pub fn has_conflicts(&self) -> bool {
        matches!(self, Self::Merged { conflicts, .. } if !conflicts.is_empty())
    }
}

impl Repository {
    /// Merge `other_branch` into the current branch.
    pub fn merge(&mut self, other_branch: &str) -> RepoResult<MergeOutcome> {
        let other = self
            .branch_tip(other_branch)?
            .ok_or(RepoError::BranchNotFound)?;
        if !self.cache().stage()?.is_empty() {
            return Err(RepoError::UncommittedChanges);
        }
        let current_branch = self.current_branch()?;
        if current_branch == other_branch {
            return Err(RepoError::MergeWithSelf);
        }
        let current = self.head_commit_id()?;
        let split = lowest_common_ancestor(self.cache(), &current, &other)?;

        match relate(&split, &current, &other) {
            TipRelation::AlreadyMerged => return Ok(MergeOutcome::AlreadyMerged),
            TipRelation::FastForward => {
                self.switch_to(&other)?;
                self.cache().set_branch(&current_branch, other);
                info!(branch = %current_branch, to = %other.short_hex(), "fast-forwarded");
                return Ok(MergeOutcome::FastForwarded { to: other });
            }
            TipRelation::Diverged => {}
        }

        let split_tree = self.cache().commit_tree(&split)?;
        let current_tree = self.cache().commit_tree(&current)?;
        let other_tree = self.cache().commit_tree(&other)?;
        let plan = plan(&split_tree, &current_tree, &other_tree);

        for path in plan.paths() {
            match (self.worktree().blob_id(path)?, current_tree.blob_id(path)) {
                (Some(_), None) => return Err(RepoError::UntrackedFileInTheWay),
                (Some(on_disk), Some(tracked)) if on_disk != tracked => {
                    return Err(RepoError::UnstagedChangeInTheWay)
                }
                (None, Some(_)) => return Err(RepoError::UnstagedChangeInTheWay),
                _ => {}
            }
        }

        let mut stage = Tree::empty();
        let mut conflicts = Vec::new();
        for (path, action) in plan.iter() {
            match *action {
                MergeAction::Take(id) => {
                    let data = self.blob_data(&id)?;
                    self.worktree().write(path, &data)?;
                    stage.insert_file(path, id);
                }
                MergeAction::Delete => {
                    self.worktree().delete(path)?;
                    stage.mark_removed(path);
                }
                MergeAction::Conflict { current, other } => {
                    let ours = self.cache().blob(current.as_ref())?;
                    let theirs = self.cache().blob(other.as_ref())?;
                    let content = conflict_content(
                        ours.as_ref().map(|blob| blob.data.as_slice()),
                        theirs.as_ref().map(|blob| blob.data.as_slice()),
                    );
                    self.worktree().write(path, &content)?;
                    let id = self.cache().put(Object::Blob(Blob::new(content)))?;
                    stage.insert_file(path, id);
                    conflicts.push(path.to_string());
                }
            }
        }
        self.cache().set_stage(stage)?;

        let message = format!("Merged {other_branch} into {current_branch}.");
        let commit = self.commit_stage(&message, Some(other))?;
        if conflicts.is_empty() {
            info!(commit = %commit.short_hex(), "merged {other_branch} into {current_branch}");
        } else {
            warn!(commit = %commit.short_hex(), ?conflicts, "merge produced conflicts");
        }
        Ok(MergeOutcome::Merged { commit, conflicts })
    }
}
