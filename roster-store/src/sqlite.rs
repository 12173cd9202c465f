//! SQLite record store.
//!
//! One connection guarded by a mutex. Every statement runs on tokio's
//! blocking pool so the async request path never blocks on disk I/O.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use roster_core::{Student, StudentId};
use rusqlite::{params, Connection, OptionalExtension, Row};

use crate::{SqliteConfig, StoreError, StudentStore};

const CREATE_TABLE: &str = "CREATE TABLE IF NOT EXISTS students (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT,
    email TEXT,
    age INTEGER
)";

const INSERT_STUDENT: &str =
    "INSERT INTO students (name, email, age) VALUES (?1, ?2, ?3) RETURNING id";

const SELECT_BY_ID: &str = "SELECT id, name, email, age FROM students WHERE id = ?1 LIMIT 1";

const SELECT_ALL: &str = "SELECT id, name, email, age FROM students ORDER BY id";

/// SQLite-backed [`StudentStore`].
///
/// Cloning is cheap and yields another handle to the same connection.
#[derive(Debug, Clone)]
pub struct SqliteStore {
    conn: Arc<Mutex<Connection>>,
}

impl SqliteStore {
    /// Open (or create) the database described by `config` and make sure the
    /// `students` table exists.
    ///
    /// # Errors
    /// Returns [`StoreError::Io`] if the parent directory cannot be created,
    /// or [`StoreError::Storage`] if the database cannot be opened or the
    /// schema cannot be initialized.
    pub fn open(config: &SqliteConfig) -> Result<Self, StoreError> {
        if let Some(parent) = config.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        let conn = Connection::open(&config.path)?;
        conn.busy_timeout(config.busy_timeout)?;
        Self::init(conn)
    }

    /// Open a private in-memory database. Contents vanish when the last
    /// handle is dropped.
    ///
    /// # Errors
    /// Returns [`StoreError::Storage`] if SQLite cannot allocate the database.
    pub fn open_in_memory() -> Result<Self, StoreError> {
        Self::init(Connection::open_in_memory()?)
    }

    fn init(conn: Connection) -> Result<Self, StoreError> {
        conn.execute_batch(CREATE_TABLE)?;
        Ok(Self { conn: Arc::new(Mutex::new(conn)) })
    }

    /// Close the connection, flushing any pending state.
    ///
    /// Returns `Ok(true)` once the connection is closed. If other handles are
    /// still alive nothing is closed and `Ok(false)` is returned; the
    /// connection then closes when the last of them is dropped.
    ///
    /// # Errors
    /// Returns [`StoreError::Storage`] if SQLite reports a failure on close.
    pub fn close(self) -> Result<bool, StoreError> {
        let Ok(mutex) = Arc::try_unwrap(self.conn) else {
            return Ok(false);
        };
        let conn = mutex.into_inner().map_err(|_| poisoned())?;
        conn.close().map_err(|(_, err)| StoreError::from(err))?;
        Ok(true)
    }

    /// Run `f` against the connection on the blocking pool.
    async fn with_conn<T, F>(&self, f: F) -> Result<T, StoreError>
    where
        T: Send + 'static,
        F: FnOnce(&Connection) -> Result<T, StoreError> + Send + 'static,
    {
        let conn = Arc::clone(&self.conn);
        tokio::task::spawn_blocking(move || {
            let guard = conn.lock().map_err(|_| poisoned())?;
            f(&guard)
        })
        .await?
    }
}

#[async_trait]
impl StudentStore for SqliteStore {
    async fn create_student(
        &self,
        name: &str,
        email: &str,
        age: i64,
    ) -> Result<StudentId, StoreError> {
        let (name, email) = (name.to_owned(), email.to_owned());
        let id = self
            .with_conn(move |conn| {
                let mut stmt = conn.prepare_cached(INSERT_STUDENT)?;
                let id: i64 = stmt.query_row(params![name, email, age], |row| row.get(0))?;
                Ok(StudentId::new(id))
            })
            .await?;
        tracing::debug!(%id, "student row inserted");
        Ok(id)
    }

    async fn get_student_by_id(&self, id: StudentId) -> Result<Student, StoreError> {
        self.with_conn(move |conn| {
            let mut stmt = conn.prepare_cached(SELECT_BY_ID)?;
            stmt.query_row(params![id.get()], student_from_row)
                .optional()?
                .ok_or(StoreError::NotFound(id))
        })
        .await
    }

    async fn list_students(&self) -> Result<Vec<Student>, StoreError> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare_cached(SELECT_ALL)?;
            let rows = stmt.query_map([], student_from_row)?;
            Ok(rows.collect::<Result<Vec<_>, _>>()?)
        })
        .await
    }
}

fn student_from_row(row: &Row<'_>) -> rusqlite::Result<Student> {
    Ok(Student::new(
        StudentId::new(row.get(0)?),
        row.get::<_, String>(1)?,
        row.get::<_, String>(2)?,
        row.get(3)?,
    ))
}

fn poisoned() -> StoreError {
    StoreError::Storage("sqlite connection mutex poisoned".to_owned())
}
