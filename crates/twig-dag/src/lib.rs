//! Commit graph algorithms for twig.
//!
//! The history is a DAG: every commit has zero (the initial commit), one,
//! or two (merge) parents, and a commit can only reference commits that
//! already exist, so the graph is acyclic by construction.
//!
//! The algorithms are generic over a [`CommitGraph`], which lets them run
//! against a repository's lazily-loading cache as well as a plain map in
//! tests.

pub mod error;
pub mod graph;

pub use error::{DagError, DagResult};
pub use graph::{ancestors, is_ancestor, lowest_common_ancestor, CommitGraph};
