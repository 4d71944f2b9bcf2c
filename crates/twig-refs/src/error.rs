//! Error types for pointer operations.

use thiserror::Error;
use twig_types::TypeError;

/// Errors that can occur during pointer operations.
#[derive(Debug, Error)]
pub enum RefError {
    /// The branch name is invalid.
    #[error("invalid branch name: {name}: {reason}")]
    InvalidBranchName { name: String, reason: String },

    /// The remote name is invalid.
    #[error("invalid remote name: {name}: {reason}")]
    InvalidRemoteName { name: String, reason: String },

    /// A pointer file exists but does not hold a valid id.
    #[error("corrupt pointer {name}: {source}")]
    CorruptPointer {
        name: String,
        #[source]
        source: TypeError,
    },

    /// A lock guarding in-memory state was poisoned.
    #[error("lock poisoned: {0}")]
    LockPoisoned(String),

    /// I/O error during file-based pointer operations.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience type alias for pointer operations.
pub type Result<T> = std::result::Result<T, RefError>;
