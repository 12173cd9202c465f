//! SQLite store configuration.

use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Default time a writer waits on a locked database before failing.
const DEFAULT_BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// Configuration for opening a [`SqliteStore`](crate::SqliteStore).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[non_exhaustive]
pub struct SqliteConfig {
    /// Path to the database file. Missing parent directories are created.
    pub path: PathBuf,

    /// How long a statement waits on `SQLITE_BUSY` before giving up.
    pub busy_timeout: Duration,
}

impl SqliteConfig {
    /// Create a config for the database at `path` with default timeouts.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into(), busy_timeout: DEFAULT_BUSY_TIMEOUT }
    }

    /// Override the busy timeout.
    #[must_use]
    pub fn with_busy_timeout(mut self, busy_timeout: Duration) -> Self {
        self.busy_timeout = busy_timeout;
        self
    }
}
