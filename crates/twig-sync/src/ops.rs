//! push, fetch and pull.
//!
//! The caller flushes the local repository after a successful call; the
//! remote side of a push is flushed here since it is opened here.

use tracing::info;
use twig_dag::{ancestors, is_ancestor};
use twig_refs::{tracking_branch, validate_local_branch_name};
use twig_repo::Repository;

use crate::error::{SyncError, SyncResult};
use crate::negotiation::missing_commits;
use crate::transfer::transfer_commits;
use crate::types::{FetchOutcome, PullOutcome, PushOutcome};

/// Send the current commit and its missing history to `branch` on
/// `remote`, creating the branch if needed.
///
/// The remote branch must not be ahead: its tip has to be in the local
/// history. If `branch` is checked out in the remote, its working files
/// follow and its staging area is cleared.
pub fn push(local: &mut Repository, remote: &str, branch: &str) -> SyncResult<PushOutcome> {
    validate_local_branch_name(branch)?;
    let mut target = local.open_remote(remote)?;
    let local_tip = local.head_commit_id()?;
    let remote_tip = target.branch_tip(branch)?;

    if let Some(remote_tip) = &remote_tip {
        if !is_ancestor(local.cache(), remote_tip, &local_tip)? {
            return Err(SyncError::PullFirst);
        }
    }

    let have = ancestors(target.cache(), remote_tip.as_ref())?;
    let commits = missing_commits(local.cache(), &local_tip, &have)?;
    let objects = transfer_commits(local.cache(), target.cache(), &commits)?;
    target.advance_branch(branch, local_tip)?;
    target.flush()?;

    info!(
        remote,
        branch,
        tip = %local_tip.short_hex(),
        commits = commits.len(),
        objects,
        "pushed"
    );
    Ok(PushOutcome {
        branch: branch.to_string(),
        tip: local_tip,
        commits_sent: commits.len(),
        objects_sent: objects,
    })
}

/// Copy `branch` from `remote` into the tracking branch `remote/branch`.
///
/// HEAD, the current branch, the staging area and the working files are
/// left alone.
pub fn fetch(local: &mut Repository, remote: &str, branch: &str) -> SyncResult<FetchOutcome> {
    validate_local_branch_name(branch)?;
    let mut source = local.open_remote(remote)?;
    let remote_tip = source
        .branch_tip(branch)?
        .ok_or(SyncError::RemoteBranchNotFound)?;

    let tracking = tracking_branch(remote, branch);
    let known = local.branch_tip(&tracking)?;
    let have = ancestors(local.cache(), known.as_ref())?;
    let commits = missing_commits(source.cache(), &remote_tip, &have)?;
    let objects = transfer_commits(source.cache(), local.cache(), &commits)?;
    local.cache().set_branch(&tracking, remote_tip);

    info!(
        remote,
        branch,
        tip = %remote_tip.short_hex(),
        commits = commits.len(),
        objects,
        "fetched"
    );
    Ok(FetchOutcome {
        tracking_branch: tracking,
        tip: remote_tip,
        commits_received: commits.len(),
        objects_received: objects,
    })
}

/// [`fetch`], then merge `remote/branch` into the current branch.
pub fn pull(local: &mut Repository, remote: &str, branch: &str) -> SyncResult<PullOutcome> {
    let fetch = fetch(local, remote, branch)?;
    let merge = local.merge(&fetch.tracking_branch)?;
    Ok(PullOutcome { fetch, merge })
}
