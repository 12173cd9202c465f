use serde::{Deserialize, Serialize};

use crate::error::ValidationErrors;
use crate::id::StudentId;
use crate::validate;

/// A persisted student record.
///
/// Records are immutable once created: the API exposes no update or delete.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[non_exhaustive]
pub struct Student {
    /// Identifier assigned by the store.
    pub id: StudentId,
    /// Full name, never empty.
    pub name: String,
    /// Contact email address.
    pub email: String,
    /// Age in years.
    pub age: i64,
}

impl Student {
    /// Assemble a record from its stored columns.
    #[must_use]
    pub fn new(id: StudentId, name: impl Into<String>, email: impl Into<String>, age: i64) -> Self {
        Self { id, name: name.into(), email: email.into(), age }
    }
}

/// A candidate student submitted for creation, before an id is assigned.
///
/// Absent JSON fields decode to their defaults so that a missing `name` is
/// reported by [`NewStudent::validate`] rather than by the decoder.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
#[non_exhaustive]
pub struct NewStudent {
    /// Full name.
    pub name: String,
    /// Contact email address.
    pub email: String,
    /// Age in years.
    pub age: i64,
}

impl NewStudent {
    /// Creates a candidate record.
    #[must_use]
    pub fn new(name: impl Into<String>, email: impl Into<String>, age: i64) -> Self {
        Self { name: name.into(), email: email.into(), age }
    }

    /// Check every field constraint and collect all failures.
    ///
    /// # Errors
    /// Returns [`ValidationErrors`] listing each failing field in declaration
    /// order when at least one constraint is violated.
    pub fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::default();
        if let Err(violation) = validate::required(&self.name) {
            errors.push("name", violation);
        }
        if let Err(violation) = validate::email(&self.email) {
            errors.push("email", violation);
        }
        errors.into_result()
    }

    /// Attach a store-assigned id, producing the persisted form.
    #[must_use]
    pub fn with_id(self, id: StudentId) -> Student {
        Student { id, name: self.name, email: self.email, age: self.age }
    }
}
