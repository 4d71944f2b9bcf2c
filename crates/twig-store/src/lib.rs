//! Content-addressed object storage for twig.
//!
//! Every snapshot record -- blobs, trees, commits, staging areas -- is stored
//! as an immutable object identified by the domain-separated BLAKE3 hash of
//! its canonical encoding.
//!
//! # Object Types
//!
//! - [`Blob`] -- opaque file content
//! - [`Tree`] -- ordered path to blob mapping; also the staging area
//! - [`Commit`] -- message, timestamp, tree and zero to two parents
//!
//! # Storage Backends
//!
//! All backends implement the [`ObjectStore`] trait:
//!
//! - [`InMemoryObjectStore`] -- `HashMap`-based store for tests
//! - [`FsObjectStore`] -- one file per object, sharded or flat
//!
//! # Design Rules
//!
//! 1. Objects are immutable once written (content-addressing guarantees this).
//! 2. Writing the same content twice is a no-op and yields the same id.
//! 3. A missing non-null id is always an error to the caller, never "absent".
//! 4. An abbreviated id resolves to exactly one object or fails.

pub mod disk;
pub mod error;
pub mod fsutil;
pub mod memory;
pub mod object;
pub mod traits;

pub use disk::{FsObjectStore, Layout};
pub use error::{StoreError, StoreResult};
pub use memory::InMemoryObjectStore;
pub use object::{Blob, Commit, Object, ObjectKind, StoredObject, Tree, TreeEntry, INITIAL_COMMIT_MESSAGE};
pub use traits::ObjectStore;
