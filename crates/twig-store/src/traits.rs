use twig_types::{ObjectId, ID_HEX_LEN};

use crate::error::{StoreError, StoreResult};
use crate::object::StoredObject;

/// Content-addressed object store.
///
/// All implementations must satisfy these invariants:
/// - Objects are immutable once written. The same data always produces the
///   same ID, so writing it again is a no-op.
/// - `read` of an absent id is `Ok(None)`; callers decide whether absence is
///   an integrity failure (see [`ObjectStore::load`]).
/// - All I/O errors are propagated, never silently ignored.
pub trait ObjectStore: Send + Sync {
    /// Read an object by its content-addressed ID.
    ///
    /// Returns `Ok(None)` if the object does not exist.
    /// Returns `Err` on I/O failure or data corruption.
    fn read(&self, id: &ObjectId) -> StoreResult<Option<StoredObject>>;

    /// Write an object and return its content-addressed ID.
    ///
    /// If the object already exists, this is a no-op (idempotent).
    fn write(&self, object: &StoredObject) -> StoreResult<ObjectId>;

    /// Check whether an object exists in the store.
    fn exists(&self, id: &ObjectId) -> StoreResult<bool>;

    /// Delete an object by ID. Returns `true` if the object existed.
    fn delete(&self, id: &ObjectId) -> StoreResult<bool>;

    /// All stored ids whose hex form starts with `prefix`.
    ///
    /// `prefix` is already normalized (lowercase hex, non-empty).
    fn ids_with_prefix(&self, prefix: &str) -> StoreResult<Vec<ObjectId>>;

    /// Read an object that must exist.
    fn load(&self, id: &ObjectId) -> StoreResult<StoredObject> {
        self.read(id)?.ok_or(StoreError::NotFound(*id))
    }

    /// Resolve a full or abbreviated id to exactly one stored object.
    ///
    /// Fails with [`StoreError::PrefixNotFound`] when nothing matches and with
    /// [`StoreError::AmbiguousPrefix`] when more than one object does.
    fn resolve_prefix(&self, prefix: &str) -> StoreResult<ObjectId> {
        let prefix = ObjectId::normalize_prefix(prefix)?;
        if prefix.len() == ID_HEX_LEN {
            let id = ObjectId::from_hex(&prefix)?;
            return if self.exists(&id)? {
                Ok(id)
            } else {
                Err(StoreError::PrefixNotFound(prefix))
            };
        }
        let mut candidates = self.ids_with_prefix(&prefix)?;
        match candidates.len() {
            0 => Err(StoreError::PrefixNotFound(prefix)),
            1 => Ok(candidates.remove(0)),
            n => Err(StoreError::AmbiguousPrefix {
                prefix,
                candidates: n,
            }),
        }
    }
}

/// Shared handles delegate to the shared store.
impl<T: ObjectStore + ?Sized> ObjectStore for std::sync::Arc<T> {
    fn read(&self, id: &ObjectId) -> StoreResult<Option<StoredObject>> {
        (**self).read(id)
    }

    fn write(&self, object: &StoredObject) -> StoreResult<ObjectId> {
        (**self).write(object)
    }

    fn exists(&self, id: &ObjectId) -> StoreResult<bool> {
        (**self).exists(id)
    }

    fn delete(&self, id: &ObjectId) -> StoreResult<bool> {
        (**self).delete(id)
    }

    fn ids_with_prefix(&self, prefix: &str) -> StoreResult<Vec<ObjectId>> {
        (**self).ids_with_prefix(prefix)
    }
}
