//! Error types for repository commands.
//!
//! Variants fall in two groups. User errors carry the exact one-line
//! message shown to the user and leave the repository untouched. Everything
//! else is an integrity or environment failure and must stop the command
//! loudly. [`RepoError::is_user_error`] tells them apart.

use thiserror::Error;
use twig_refs::RefError;
use twig_store::{ObjectKind, StoreError};
use twig_types::ObjectId;

/// Errors that can occur while running a repository command.
#[derive(Debug, Error)]
pub enum RepoError {
    // ---- user errors ----
    #[error("A twig version-control system already exists in the current directory.")]
    AlreadyInitialized,

    #[error("Not in an initialized twig directory.")]
    NotInitialized,

    #[error("File does not exist.")]
    FileNotFound,

    #[error("Please enter a commit message.")]
    EmptyMessage,

    #[error("No changes added to the commit.")]
    NothingToCommit,

    #[error("No reason to remove the file.")]
    NoReasonToRemove,

    #[error("Found no commit with that message.")]
    NoCommitWithMessage,

    #[error("No commit with that id exists.")]
    CommitNotFound,

    #[error("That commit id is ambiguous; use more characters.")]
    AmbiguousCommitId,

    #[error("File does not exist in that commit.")]
    FileNotInCommit,

    #[error("No such branch exists.")]
    NoSuchBranch,

    #[error("No need to checkout the current branch.")]
    AlreadyOnBranch,

    #[error("There is an untracked file in the way; delete it, or add and commit it first.")]
    UntrackedFileInTheWay,

    #[error("There is an unstaged change in the way; add and commit it first.")]
    UnstagedChangeInTheWay,

    #[error("A branch with that name already exists.")]
    BranchExists,

    #[error("A branch with that name does not exist.")]
    BranchNotFound,

    #[error("Cannot remove the current branch.")]
    RemoveCurrentBranch,

    #[error("You have uncommitted changes.")]
    UncommittedChanges,

    #[error("Cannot merge a branch with itself.")]
    MergeWithSelf,

    #[error("A remote with that name already exists.")]
    RemoteExists,

    #[error("A remote with that name does not exist.")]
    RemoteNotFound,

    #[error("Remote directory not found.")]
    RemoteDirNotFound,

    // ---- integrity and environment errors ----
    #[error("HEAD names branch {0:?}, which does not exist")]
    DanglingHead(String),

    #[error("repository pointer {0} is missing")]
    MissingPointer(&'static str),

    #[error("object {id} is a {actual}, expected a {expected}")]
    WrongKind {
        id: ObjectId,
        expected: ObjectKind,
        actual: ObjectKind,
    },

    #[error("store error: {0}")]
    Store(#[from] StoreError),

    #[error("ref error: {0}")]
    Refs(#[from] RefError),

    #[error("graph error: {0}")]
    Dag(#[from] twig_dag::DagError),

    #[error("invalid config: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("config is not valid UTF-8: {0}")]
    ConfigEncoding(#[from] std::string::FromUtf8Error),

    #[error("cannot encode config: {0}")]
    ConfigEncode(#[from] toml::ser::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl RepoError {
    /// Returns `true` for expected, user-recoverable outcomes that are
    /// reported as a single line rather than a failure.
    pub fn is_user_error(&self) -> bool {
        match self {
            Self::DanglingHead(_)
            | Self::MissingPointer(_)
            | Self::WrongKind { .. }
            | Self::Store(_)
            | Self::Dag(_)
            | Self::ConfigParse(_)
            | Self::ConfigEncoding(_)
            | Self::ConfigEncode(_)
            | Self::Io(_) => false,
            Self::Refs(e) => matches!(
                e,
                RefError::InvalidBranchName { .. } | RefError::InvalidRemoteName { .. }
            ),
            _ => true,
        }
    }
}

/// Result alias for repository commands.
pub type RepoResult<T> = Result<T, RepoError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classification() {
        assert!(RepoError::FileNotFound.is_user_error());
        assert!(RepoError::UntrackedFileInTheWay.is_user_error());
        assert!(RepoError::RemoteDirNotFound.is_user_error());
        assert!(!RepoError::MissingPointer("HEAD").is_user_error());
        assert!(!RepoError::Store(StoreError::NotFound(ObjectId::from_bytes(b"x"))).is_user_error());
        let invalid = RefError::InvalidBranchName {
            name: "a b".into(),
            reason: "space".into(),
        };
        assert!(RepoError::Refs(invalid).is_user_error());
        assert!(!RepoError::Refs(RefError::LockPoisoned("x".into())).is_user_error());
    }

    #[test]
    fn user_messages_are_single_lines() {
        let message = RepoError::UncommittedChanges.to_string();
        assert_eq!(message, "You have uncommitted changes.");
        assert!(!RepoError::UntrackedFileInTheWay.to_string().contains('\n'));
    }
}
