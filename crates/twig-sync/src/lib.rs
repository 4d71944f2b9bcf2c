//! Synchronization between twig repositories.
//!
//! A remote is another repository root on the same machine. Each side is
//! opened as its own [`twig_repo::Repository`] with its own unit of work,
//! so nothing read or written for one side leaks into the other. Only the
//! commits one side is missing travel, together with their trees and
//! blobs.

pub mod error;
pub mod negotiation;
pub mod ops;
pub mod transfer;
pub mod types;

pub use error::{SyncError, SyncResult};
pub use negotiation::missing_commits;
pub use ops::{fetch, pull, push};
pub use transfer::transfer_commits;
pub use types::{FetchOutcome, PullOutcome, PushOutcome};
