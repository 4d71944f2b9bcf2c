//! In-memory pointer store for tests.

use std::collections::BTreeMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use twig_types::ObjectId;

use crate::error::{RefError, Result};
use crate::names::validate_branch_name;
use crate::traits::RefStore;

#[derive(Debug, Default)]
struct State {
    branches: BTreeMap<String, ObjectId>,
    head: Option<String>,
    stage: Option<ObjectId>,
    commits: Vec<ObjectId>,
}

/// An in-memory implementation of [`RefStore`]. Data is lost when the store
/// is dropped.
#[derive(Debug, Default)]
pub struct InMemoryRefStore {
    state: RwLock<State>,
}

impl InMemoryRefStore {
    /// Create a new empty pointer store.
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, State>> {
        self.state
            .read()
            .map_err(|e| RefError::LockPoisoned(e.to_string()))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, State>> {
        self.state
            .write()
            .map_err(|e| RefError::LockPoisoned(e.to_string()))
    }
}

impl RefStore for InMemoryRefStore {
    fn read_branch(&self, name: &str) -> Result<Option<ObjectId>> {
        Ok(self.read()?.branches.get(name).copied())
    }

    fn write_branch(&self, name: &str, id: &ObjectId) -> Result<()> {
        validate_branch_name(name)?;
        self.write()?.branches.insert(name.to_string(), *id);
        Ok(())
    }

    fn delete_branch(&self, name: &str) -> Result<bool> {
        Ok(self.write()?.branches.remove(name).is_some())
    }

    fn list_branches(&self) -> Result<Vec<String>> {
        Ok(self.read()?.branches.keys().cloned().collect())
    }

    fn head(&self) -> Result<Option<String>> {
        Ok(self.read()?.head.clone())
    }

    fn set_head(&self, branch: &str) -> Result<()> {
        validate_branch_name(branch)?;
        self.write()?.head = Some(branch.to_string());
        Ok(())
    }

    fn stage(&self) -> Result<Option<ObjectId>> {
        Ok(self.read()?.stage)
    }

    fn set_stage(&self, id: &ObjectId) -> Result<()> {
        self.write()?.stage = Some(*id);
        Ok(())
    }

    fn commit_index(&self) -> Result<Vec<ObjectId>> {
        Ok(self.read()?.commits.clone())
    }

    fn write_commit_index(&self, ids: &[ObjectId]) -> Result<()> {
        self.write()?.commits = ids.to_vec();
        Ok(())
    }
}
