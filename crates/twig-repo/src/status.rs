//! Snapshot of a repository's state for the `status` command.

use std::fmt;

/// How a tracked file differs from what would be committed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ChangeKind {
    Modified,
    Deleted,
}

impl fmt::Display for ChangeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Modified => write!(f, "modified"),
            Self::Deleted => write!(f, "deleted"),
        }
    }
}

/// A working-file change that has not been staged.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UnstagedChange {
    pub path: String,
    pub kind: ChangeKind,
}

impl UnstagedChange {
    pub fn new(path: impl Into<String>, kind: ChangeKind) -> Self {
        Self {
            path: path.into(),
            kind,
        }
    }
}

/// Every section of `status`, each sorted by name.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RepoStatus {
    pub current_branch: String,
    /// All branches, local and remote-tracking.
    pub branches: Vec<String>,
    /// Staged for addition.
    pub staged: Vec<String>,
    /// Staged for removal.
    pub removed: Vec<String>,
    pub unstaged: Vec<UnstagedChange>,
    pub untracked: Vec<String>,
}

impl RepoStatus {
    /// Returns `true` if nothing is staged, changed, or untracked.
    pub fn is_clean(&self) -> bool {
        self.staged.is_empty()
            && self.removed.is_empty()
            && self.unstaged.is_empty()
            && self.untracked.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_status_is_clean() {
        assert!(RepoStatus::default().is_clean());
    }

    #[test]
    fn any_section_makes_it_dirty() {
        let status = RepoStatus {
            unstaged: vec![UnstagedChange::new("f", ChangeKind::Deleted)],
            ..Default::default()
        };
        assert!(!status.is_clean());
        assert_eq!(status.unstaged[0].kind.to_string(), "deleted");
    }
}
