use std::collections::HashSet;

use twig_dag::ancestors;
use twig_repo::{Cache, RepoResult};
use twig_types::ObjectId;

/// Commits reachable from `tip` in `sender` that are not in `have`,
/// oldest first.
///
/// Order follows the sender's commit index; anything reachable but not
/// indexed comes last in id order.
pub fn missing_commits(
    sender: &mut Cache,
    tip: &ObjectId,
    have: &HashSet<ObjectId>,
) -> RepoResult<Vec<ObjectId>> {
    let mut wanted = ancestors(sender, Some(tip))?;
    wanted.retain(|id| !have.contains(id));

    let mut ordered = Vec::with_capacity(wanted.len());
    for id in sender.commit_ids()? {
        if wanted.remove(&id) {
            ordered.push(id);
        }
    }
    let mut rest: Vec<ObjectId> = wanted.into_iter().collect();
    rest.sort();
    ordered.extend(rest);
    Ok(ordered)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;
    use twig_repo::Repository;
    use twig_store::Layout;

    fn commit(repo: &mut Repository, name: &str, content: &str) -> ObjectId {
        repo.worktree().write(name, content.as_bytes()).unwrap();
        repo.add(name).unwrap();
        repo.commit(&format!("add {name}")).unwrap()
    }

    fn repo_at(path: &Path) -> Repository {
        Repository::init(path, Layout::Sharded).unwrap()
    }

    #[test]
    fn everything_when_nothing_is_known() {
        let dir = tempfile::tempdir().unwrap();
        let mut repo = repo_at(dir.path());
        let initial = repo.head_commit_id().unwrap();
        let a = commit(&mut repo, "a", "1");
        let b = commit(&mut repo, "b", "2");
        let missing = missing_commits(repo.cache(), &b, &HashSet::new()).unwrap();
        assert_eq!(missing, vec![initial, a, b]);
    }

    #[test]
    fn only_the_delta_beyond_known_history() {
        let dir = tempfile::tempdir().unwrap();
        let mut repo = repo_at(dir.path());
        let a = commit(&mut repo, "a", "1");
        let b = commit(&mut repo, "b", "2");
        let have = ancestors(repo.cache(), Some(&a)).unwrap();
        assert_eq!(missing_commits(repo.cache(), &b, &have).unwrap(), vec![b]);
        let all = ancestors(repo.cache(), Some(&b)).unwrap();
        assert!(missing_commits(repo.cache(), &b, &all).unwrap().is_empty());
    }
}
