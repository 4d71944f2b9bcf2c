//! Ancestry and merge-base search.

use std::collections::{HashMap, HashSet};

use tracing::debug;
use twig_types::ObjectId;

use crate::error::DagError;

/// Anything that can report the parents of a commit.
///
/// `parents` takes `&mut self` so implementations may load and memoize
/// commits on demand.
pub trait CommitGraph {
    type Error: From<DagError>;

    /// Parents of `id` in order: first parent, then merge parent.
    fn parents(&mut self, id: &ObjectId) -> Result<Vec<ObjectId>, Self::Error>;
}

/// Test graphs: commit id to parent list.
impl CommitGraph for HashMap<ObjectId, Vec<ObjectId>> {
    type Error = DagError;

    fn parents(&mut self, id: &ObjectId) -> Result<Vec<ObjectId>, DagError> {
        self.get(id).cloned().ok_or(DagError::CommitNotFound(*id))
    }
}

/// Every commit reachable from `tip` through parent and merge-parent edges,
/// `tip` included. `None` yields the empty set.
pub fn ancestors<G: CommitGraph>(
    graph: &mut G,
    tip: Option<&ObjectId>,
) -> Result<HashSet<ObjectId>, G::Error> {
    let mut seen = HashSet::new();
    let mut worklist: Vec<ObjectId> = tip.copied().into_iter().collect();
    while let Some(id) = worklist.pop() {
        if !seen.insert(id) {
            continue;
        }
        worklist.extend(graph.parents(&id)?);
    }
    Ok(seen)
}

/// Returns `true` if `ancestor` is reachable from `descendant` (or equal).
pub fn is_ancestor<G: CommitGraph>(
    graph: &mut G,
    ancestor: &ObjectId,
    descendant: &ObjectId,
) -> Result<bool, G::Error> {
    Ok(ancestors(graph, Some(descendant))?.contains(ancestor))
}

/// The split point of `a` and `b`.
///
/// Walks depth-first from `b`, first parents before merge parents, and
/// returns the first commit that is also an ancestor of `a`. For linear
/// histories and single merges this is the lowest common ancestor. After
/// repeated criss-cross merges it may return an older common ancestor than
/// the most recent one; a generation-number search would fix that but
/// would also change which base such merges use.
pub fn lowest_common_ancestor<G: CommitGraph>(
    graph: &mut G,
    a: &ObjectId,
    b: &ObjectId,
) -> Result<ObjectId, G::Error> {
    let of_a = ancestors(graph, Some(a))?;
    let mut visited = HashSet::new();
    let mut stack = vec![*b];
    while let Some(id) = stack.pop() {
        if of_a.contains(&id) {
            debug!(a = %a.short_hex(), b = %b.short_hex(), split = %id.short_hex(), "found split point");
            return Ok(id);
        }
        if !visited.insert(id) {
            continue;
        }
        // Pushed in reverse so the first parent is explored first.
        stack.extend(graph.parents(&id)?.into_iter().rev());
    }
    Err(DagError::NoCommonAncestor { a: *a, b: *b }.into())
}
