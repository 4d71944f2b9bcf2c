//! The [`RefStore`] trait defining the pointer storage interface.

use twig_types::ObjectId;

use crate::error::Result;

/// Storage backend for repository pointers.
///
/// Reads of pointers that were never written return `Ok(None)` (or an empty
/// index); it is up to the caller to decide whether that is an error.
pub trait RefStore: Send + Sync {
    /// Read the commit id a branch points at.
    fn read_branch(&self, name: &str) -> Result<Option<ObjectId>>;

    /// Create or move a branch.
    fn write_branch(&self, name: &str, id: &ObjectId) -> Result<()>;

    /// Delete a branch. Returns `true` if it existed.
    fn delete_branch(&self, name: &str) -> Result<bool>;

    /// All branch names, local and remote-tracking, sorted.
    fn list_branches(&self) -> Result<Vec<String>>;

    /// The name of the current branch.
    fn head(&self) -> Result<Option<String>>;

    /// Point HEAD at a branch name.
    fn set_head(&self, branch: &str) -> Result<()>;

    /// The id of the staging-area tree.
    fn stage(&self) -> Result<Option<ObjectId>>;

    /// Replace the stage pointer.
    fn set_stage(&self, id: &ObjectId) -> Result<()>;

    /// Every commit id ever recorded, in creation order.
    fn commit_index(&self) -> Result<Vec<ObjectId>>;

    /// Replace the commit index.
    fn write_commit_index(&self, ids: &[ObjectId]) -> Result<()>;
}

/// Shared handles delegate to the shared store.
impl<T: RefStore + ?Sized> RefStore for std::sync::Arc<T> {
    fn read_branch(&self, name: &str) -> Result<Option<ObjectId>> {
        (**self).read_branch(name)
    }

    fn write_branch(&self, name: &str, id: &ObjectId) -> Result<()> {
        (**self).write_branch(name, id)
    }

    fn delete_branch(&self, name: &str) -> Result<bool> {
        (**self).delete_branch(name)
    }

    fn list_branches(&self) -> Result<Vec<String>> {
        (**self).list_branches()
    }

    fn head(&self) -> Result<Option<String>> {
        (**self).head()
    }

    fn set_head(&self, branch: &str) -> Result<()> {
        (**self).set_head(branch)
    }

    fn stage(&self) -> Result<Option<ObjectId>> {
        (**self).stage()
    }

    fn set_stage(&self, id: &ObjectId) -> Result<()> {
        (**self).set_stage(id)
    }

    fn commit_index(&self) -> Result<Vec<ObjectId>> {
        (**self).commit_index()
    }

    fn write_commit_index(&self, ids: &[ObjectId]) -> Result<()> {
        (**self).write_commit_index(ids)
    }
}
