//! Three-way merge for twig.
//!
//! Merging is split into a pure planning step and an effectful apply step.
//! This crate holds the pure part: given the split point, current and
//! other snapshots it decides, path by path, what the merged snapshot
//! should contain. Applying the plan to a working directory is the
//! repository's job, which lets every precondition be checked against the
//! complete plan before anything is touched.
//!
//! - [`relate`] -- short-circuits: already merged or fast-forward
//! - [`plan`] -- per-path classification into a [`MergePlan`]
//! - [`conflict_content`] -- the bytes written for a conflicted path

pub mod conflict;
pub mod plan;

pub use conflict::conflict_content;
pub use plan::{plan, relate, MergeAction, MergePlan, TipRelation};
