//! Repository engine for twig.
//!
//! A [`Repository`] is one working directory plus its `.twig` marker
//! directory. Every command runs against a [`Cache`], a unit of work that
//! loads objects and pointers lazily, buffers every mutation, and writes
//! everything back in one ordered pass when [`Repository::flush`] is
//! called at the end of the command. A command that fails is simply not
//! flushed, so user-facing precondition failures never leave partial state
//! behind.
//!
//! # Modules
//!
//! - [`cache`] -- the unit-of-work [`Cache`]
//! - [`repository`] -- [`Repository`] and the local commands
//! - [`checkout`] -- checkout forms and reset
//! - [`merge`] -- merge application and [`MergeOutcome`]
//! - [`status`] -- [`RepoStatus`]
//! - [`worktree`] -- the flat working-directory view
//! - [`config`] -- `config.toml`
//! - [`layout`] -- paths inside the marker directory

pub mod cache;
pub mod checkout;
pub mod config;
pub mod error;
pub mod layout;
pub mod merge;
pub mod repository;
pub mod status;
pub mod worktree;

pub use cache::Cache;
pub use config::{RepoConfig, StoreConfig};
pub use error::{RepoError, RepoResult};
pub use layout::RepoLayout;
pub use merge::MergeOutcome;
pub use repository::{LogEntry, Repository, DEFAULT_BRANCH};
pub use status::{ChangeKind, RepoStatus, UnstagedChange};
pub use worktree::WorkTree;
