use twig_types::{ObjectId, TypeError};

/// Errors from object store operations.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The requested object was not found.
    #[error("object not found: {0}")]
    NotFound(ObjectId),

    /// No stored object matches an abbreviated id.
    #[error("no object matches id prefix {0:?}")]
    PrefixNotFound(String),

    /// More than one stored object matches an abbreviated id.
    #[error("id prefix {prefix:?} is ambiguous ({candidates} matches)")]
    AmbiguousPrefix { prefix: String, candidates: usize },

    /// Content hash mismatch on read (data corruption).
    #[error("hash mismatch for {id}: content hashes to {computed}")]
    HashMismatch { id: ObjectId, computed: ObjectId },

    /// Serialization or deserialization failure.
    #[error("serialization error: {0}")]
    Serialization(String),

    /// I/O error from the underlying storage backend.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The object data is malformed or of an unexpected kind.
    #[error("corrupt object {id}: {reason}")]
    CorruptObject { id: ObjectId, reason: String },

    /// Attempted to write an object whose id is the null id.
    #[error("cannot store object with null ID")]
    NullObjectId,

    /// A malformed id or id prefix.
    #[error(transparent)]
    InvalidId(#[from] TypeError),
}

/// Result alias for store operations.
pub type StoreResult<T> = Result<T, StoreError>;
