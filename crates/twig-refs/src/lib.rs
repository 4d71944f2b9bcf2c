//! Repository pointers for twig.
//!
//! Pointers are the small mutable records that give names to immutable
//! objects:
//!
//! - **Branches** map a name to a commit id. A name of the form
//!   `remote/branch` is a remote-tracking branch, only moved by fetch.
//! - **HEAD** names the current branch. It never points at a commit
//!   directly, so every commit advances some branch.
//! - **STAGE** holds the id of the staging-area tree.
//! - **COMMITS** lists every commit id ever created, in creation order,
//!   independent of branch reachability.
//!
//! # Modules
//!
//! - [`error`] -- Error types for pointer operations
//! - [`traits`] -- The [`RefStore`] trait defining the storage interface
//! - [`names`] -- Branch and remote name validation
//! - [`memory`] -- In-memory [`InMemoryRefStore`] for tests
//! - [`disk`] -- [`FsRefStore`], one file per pointer under the marker directory

pub mod disk;
pub mod error;
pub mod memory;
pub mod names;
pub mod traits;

pub use disk::FsRefStore;
pub use error::{RefError, Result};
pub use memory::InMemoryRefStore;
pub use names::{
    tracking_branch, validate_branch_name, validate_local_branch_name, validate_remote_name,
};
pub use traits::RefStore;
