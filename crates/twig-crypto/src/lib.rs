//! Content hashing for twig.
//!
//! Object identity is `ContentHasher[kind].hash(canonical_bytes)`. Each
//! object kind hashes under its own domain tag, so a blob and a tree whose
//! canonical bytes happen to coincide still get different ids.

pub mod hasher;

pub use hasher::ContentHasher;
