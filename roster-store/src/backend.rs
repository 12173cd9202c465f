//! Record store abstraction trait.
//!
//! Allows swapping between SQLite, the in-memory double, or other backends
//! without changing the request handlers.

use async_trait::async_trait;
use roster_core::{Student, StudentId};

use crate::StoreError;

/// Persistent collection of student records.
///
/// Implementations must be `Send + Sync` so a single instance can be shared
/// by every concurrent request.
///
/// # Cancel Safety
/// Each call is a single statement. Dropping the future either leaves the
/// statement fully applied or not applied at all.
#[async_trait]
pub trait StudentStore: Send + Sync {
    /// Append a record and return the id the store assigned to it.
    ///
    /// Field validation is the caller's job; the store persists what it is
    /// given.
    ///
    /// # Errors
    /// Returns [`StoreError::Storage`] if the write fails.
    async fn create_student(
        &self,
        name: &str,
        email: &str,
        age: i64,
    ) -> Result<StudentId, StoreError>;

    /// Fetch one record by id.
    ///
    /// # Errors
    /// Returns [`StoreError::NotFound`] if no record has this id.
    /// Returns [`StoreError::Storage`] on any other read failure.
    async fn get_student_by_id(&self, id: StudentId) -> Result<Student, StoreError>;

    /// Return every record, ordered by id. An empty store yields an empty
    /// vector.
    ///
    /// # Errors
    /// Returns [`StoreError::Storage`] if the read fails.
    async fn list_students(&self) -> Result<Vec<Student>, StoreError>;
}
