//! Tip relation and per-path merge classification.

use std::collections::{BTreeMap, BTreeSet};

use tracing::debug;
use twig_store::Tree;
use twig_types::ObjectId;

/// How the two tips relate through their split point.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TipRelation {
    /// The other tip is already in the current history. Nothing to do.
    AlreadyMerged,
    /// The current tip is in the other history: move to the other tip.
    FastForward,
    /// Both sides have commits of their own; a merge commit is needed.
    Diverged,
}

/// Classify a merge request from its split point.
pub fn relate(split: &ObjectId, current: &ObjectId, other: &ObjectId) -> TipRelation {
    if split == other {
        TipRelation::AlreadyMerged
    } else if split == current {
        TipRelation::FastForward
    } else {
        TipRelation::Diverged
    }
}

/// What the merge does to one path.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MergeAction {
    /// Adopt the other side's blob.
    Take(ObjectId),
    /// The other side removed the file; remove it here too.
    Delete,
    /// Both sides changed the path differently.
    Conflict {
        current: Option<ObjectId>,
        other: Option<ObjectId>,
    },
}

/// The changes a merge makes, keyed by path. Paths that keep the current
/// side are absent.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MergePlan {
    actions: BTreeMap<String, MergeAction>,
}

impl MergePlan {
    pub fn get(&self, path: &str) -> Option<&MergeAction> {
        self.actions.get(path)
    }

    /// Every path the merge changes or conflicts on, in path order.
    pub fn paths(&self) -> impl Iterator<Item = &str> {
        self.actions.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &MergeAction)> {
        self.actions.iter().map(|(path, action)| (path.as_str(), action))
    }

    pub fn len(&self) -> usize {
        self.actions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    pub fn has_conflicts(&self) -> bool {
        self.conflicts().next().is_some()
    }

    /// Conflicted paths, in path order.
    pub fn conflicts(&self) -> impl Iterator<Item = &str> {
        self.actions
            .iter()
            .filter(|(_, action)| matches!(action, MergeAction::Conflict { .. }))
            .map(|(path, _)| path.as_str())
    }
}

/// Classify every path tracked by any of the three snapshots.
///
/// With `s`, `c`, `o` the blob ids at the split point, current and other
/// side (absent when untracked):
///
/// - `s == c`: the current side did not touch the path, adopt `o`
/// - `s == o` or `c == o`: keep `c`
/// - otherwise: conflict
pub fn plan(split: &Tree, current: &Tree, other: &Tree) -> MergePlan {
    let paths: BTreeSet<&str> = split
        .files()
        .chain(current.files())
        .chain(other.files())
        .map(|(path, _)| path)
        .collect();

    let mut actions = BTreeMap::new();
    for path in paths {
        let s = split.blob_id(path);
        let c = current.blob_id(path);
        let o = other.blob_id(path);
        let action = if c == o || s == o {
            None
        } else if s == c {
            Some(match o {
                Some(id) => MergeAction::Take(id),
                None => MergeAction::Delete,
            })
        } else {
            Some(MergeAction::Conflict {
                current: c,
                other: o,
            })
        };
        if let Some(action) = action {
            actions.insert(path.to_string(), action);
        }
    }
    let plan = MergePlan { actions };
    debug!(changes = plan.len(), conflicted = plan.has_conflicts(), "planned merge");
    plan
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn oid(content: &str) -> ObjectId {
        ObjectId::from_bytes(content.as_bytes())
    }

    fn tree(files: &[(&str, &str)]) -> Tree {
        Tree::from_files(files.iter().map(|(path, content)| (*path, oid(content))))
    }

    #[test]
    fn relation_short_circuits() {
        let (a, b, c) = (oid("a"), oid("b"), oid("c"));
        assert_eq!(relate(&a, &b, &a), TipRelation::AlreadyMerged);
        assert_eq!(relate(&a, &a, &b), TipRelation::FastForward);
        assert_eq!(relate(&a, &b, &c), TipRelation::Diverged);
    }

    #[test]
    fn adopts_changes_made_only_on_the_other_side() {
        let split = tree(&[("a", "A"), ("b", "B")]);
        let current = tree(&[("a", "A"), ("b", "B"), ("f", "!F")]);
        let other = tree(&[("a", "!A"), ("b", "B")]);
        let plan = plan(&split, &current, &other);
        assert_eq!(plan.len(), 1);
        assert_eq!(plan.get("a"), Some(&MergeAction::Take(oid("!A"))));
        assert!(!plan.has_conflicts());
    }

    #[test]
    fn other_side_removal_deletes() {
        let split = tree(&[("c", "C")]);
        let current = tree(&[("c", "C")]);
        let other = tree(&[]);
        assert_eq!(plan(&split, &current, &other).get("c"), Some(&MergeAction::Delete));
    }

    #[test]
    fn file_new_on_other_side_is_taken() {
        let split = tree(&[]);
        let current = tree(&[]);
        let other = tree(&[("g", "G")]);
        assert_eq!(plan(&split, &current, &other).get("g"), Some(&MergeAction::Take(oid("G"))));
    }

    #[test]
    fn current_side_changes_are_kept() {
        let split = tree(&[("d", "D"), ("e", "E")]);
        // d removed and e modified on the current side only.
        let current = tree(&[("e", "!E")]);
        let other = tree(&[("d", "D"), ("e", "E")]);
        assert!(plan(&split, &current, &other).is_empty());
    }

    #[test]
    fn identical_changes_are_not_conflicts() {
        let split = tree(&[("x", "old")]);
        let current = tree(&[("x", "new"), ("y", "both")]);
        let other = tree(&[("x", "new"), ("y", "both")]);
        assert!(plan(&split, &current, &other).is_empty());
    }

    #[test]
    fn divergent_changes_conflict() {
        let split = tree(&[("conflict.txt", "Hi mom"), ("gone", "G")]);
        let current = tree(&[("conflict.txt", "!CONFLICT\n"), ("gone", "changed")]);
        let other = tree(&[("conflict.txt", "CONFLICT\n")]);
        let plan = plan(&split, &current, &other);
        assert_eq!(
            plan.get("conflict.txt"),
            Some(&MergeAction::Conflict {
                current: Some(oid("!CONFLICT\n")),
                other: Some(oid("CONFLICT\n")),
            })
        );
        assert_eq!(
            plan.get("gone"),
            Some(&MergeAction::Conflict {
                current: Some(oid("changed")),
                other: None,
            })
        );
        assert_eq!(plan.conflicts().collect::<Vec<_>>(), vec!["conflict.txt", "gone"]);
    }

    #[test]
    fn added_differently_on_both_sides_conflicts() {
        let plan = plan(&tree(&[]), &tree(&[("n", "1")]), &tree(&[("n", "2")]));
        assert!(plan.has_conflicts());
    }

    fn snapshot() -> impl Strategy<Value = Tree> {
        prop::collection::btree_map(
            prop::sample::select(vec!["a", "b", "c", "d"]),
            prop::sample::select(vec!["1", "2", "3"]),
            0..4,
        )
        .prop_map(|files| Tree::from_files(files.into_iter().map(|(p, c)| (p, oid(c)))))
    }

    proptest! {
        #[test]
        fn merging_with_unchanged_other_side_is_empty(split in snapshot(), current in snapshot()) {
            prop_assert!(plan(&split, &current, &split).is_empty());
        }

        #[test]
        fn merging_onto_unchanged_current_side_never_conflicts(split in snapshot(), other in snapshot()) {
            let plan = plan(&split, &split, &other);
            prop_assert!(!plan.has_conflicts());
            let merged = plan.iter().fold(split.clone(), |mut tree, (path, action)| {
                match action {
                    MergeAction::Take(id) => tree.insert_file(path, *id),
                    MergeAction::Delete => { tree.remove(path); }
                    MergeAction::Conflict { .. } => unreachable!(),
                }
                tree
            });
            prop_assert_eq!(merged, other);
        }
    }
}
