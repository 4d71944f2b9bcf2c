use tracing::debug;
use twig_repo::{Cache, RepoResult};
use twig_store::Object;
use twig_types::ObjectId;

/// Copy each commit with its tree and blobs from `from` into `to`, and
/// record the commits in the receiver's commit index. Objects the receiver
/// already has are skipped. Returns the number of objects copied.
pub fn transfer_commits(
    from: &mut Cache,
    to: &mut Cache,
    commits: &[ObjectId],
) -> RepoResult<usize> {
    let mut copied = 0;
    for id in commits {
        let commit = from.commit(id)?;
        let tree = from.tree(&commit.tree)?;

        let mut closure = vec![*id, commit.tree];
        closure.extend(tree.files().map(|(_, blob)| blob));
        for object_id in closure {
            if to.has_object(&object_id)? {
                continue;
            }
            let object = copy_of(from, &object_id)?;
            to.put(object)?;
            copied += 1;
        }
        to.record_commit(*id)?;
    }
    debug!(commits = commits.len(), objects = copied, "transferred objects");
    Ok(copied)
}

fn copy_of(from: &mut Cache, id: &ObjectId) -> RepoResult<Object> {
    match from.object(id)? {
        Some(object) => Ok(object.clone()),
        None => Err(twig_store::StoreError::NullObjectId.into()),
    }
}
