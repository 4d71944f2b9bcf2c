//! Foundation types for twig.
//!
//! Every other twig crate depends on `twig-types`. The only type of note is
//! [`ObjectId`], the content-addressed identifier shared by blobs, trees,
//! commits and staging areas.

pub mod error;
pub mod object;

pub use error::TypeError;
pub use object::{ObjectId, ID_HEX_LEN};
