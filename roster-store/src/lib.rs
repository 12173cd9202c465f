//! Persistence for Roster student records.
//!
//! Exposes the [`StudentStore`] capability together with a SQLite backend
//! for production and an in-memory backend for tests.

#![warn(clippy::pedantic)]
#![deny(clippy::unwrap_used)]

pub mod backend;
pub mod config;
pub mod error;
pub mod memory;
pub mod sqlite;

pub use backend::StudentStore;
pub use config::SqliteConfig;
pub use error::StoreError;
pub use memory::MemoryStore;
pub use sqlite::SqliteStore;
