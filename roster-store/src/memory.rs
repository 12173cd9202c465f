//! In-memory record store.
//!
//! Mirrors the SQLite backend's observable behaviour (ids start at 1, are
//! never reused, listing is ordered by id) without touching disk. Used as a
//! test double for the request handlers.

use std::{collections::BTreeMap, sync::RwLock};

use async_trait::async_trait;
use roster_core::{Student, StudentId};

use crate::{StoreError, StudentStore};

#[derive(Debug, Default)]
struct Table {
    last_id: i64,
    rows: BTreeMap<StudentId, Student>,
}

/// Thread-safe in-memory [`StudentStore`].
#[derive(Debug, Default)]
pub struct MemoryStore {
    table: RwLock<Table>,
}

impl MemoryStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of records currently held.
    ///
    /// # Panics
    /// Panics if the internal `RwLock` is poisoned.
    #[must_use]
    pub fn len(&self) -> usize {
        #[expect(clippy::expect_used, reason = "lock poisoning is unrecoverable")]
        let table = self.table.read().expect("memory store read lock poisoned");
        table.rows.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl StudentStore for MemoryStore {
    async fn create_student(
        &self,
        name: &str,
        email: &str,
        age: i64,
    ) -> Result<StudentId, StoreError> {
        let mut table = self
            .table
            .write()
            .map_err(|_| StoreError::Storage("memory store write lock poisoned".to_owned()))?;
        table.last_id += 1;
        let id = StudentId::new(table.last_id);
        table.rows.insert(id, Student::new(id, name, email, age));
        Ok(id)
    }

    async fn get_student_by_id(&self, id: StudentId) -> Result<Student, StoreError> {
        let table = self
            .table
            .read()
            .map_err(|_| StoreError::Storage("memory store read lock poisoned".to_owned()))?;
        table.rows.get(&id).cloned().ok_or(StoreError::NotFound(id))
    }

    async fn list_students(&self) -> Result<Vec<Student>, StoreError> {
        let table = self
            .table
            .read()
            .map_err(|_| StoreError::Storage("memory store read lock poisoned".to_owned()))?;
        Ok(table.rows.values().cloned().collect())
    }
}
