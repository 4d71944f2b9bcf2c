//! Error types for commit graph traversal.

use twig_types::ObjectId;

/// Errors that can occur during graph traversal.
#[derive(Debug, thiserror::Error)]
pub enum DagError {
    /// A commit referenced by the graph could not be found.
    #[error("commit not found: {0}")]
    CommitNotFound(ObjectId),

    /// Two commits share no history.
    #[error("commits {a} and {b} have no common ancestor")]
    NoCommonAncestor { a: ObjectId, b: ObjectId },
}

/// Convenience alias for graph results.
pub type DagResult<T> = Result<T, DagError>;
