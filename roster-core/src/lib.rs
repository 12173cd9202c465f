//! Core types for the Roster student records API.
//!
//! Defines the student record, the candidate record submitted for
//! creation, and the field validation applied before anything is persisted.

#![warn(clippy::pedantic)]
#![deny(clippy::unwrap_used)]

pub mod error;
pub mod id;
pub mod student;
pub mod validate;

pub use error::{FieldError, ValidationErrors, Violation};
pub use id::StudentId;
pub use student::{NewStudent, Student};
