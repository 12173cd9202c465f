//! Integration tests for the SQLite record store on a real database file.

use std::collections::BTreeSet;
use std::sync::Arc;

use roster_core::StudentId;
use roster_store::{SqliteConfig, SqliteStore, StoreError, StudentStore};

fn temp_dir() -> tempfile::TempDir {
    tempfile::tempdir().expect("temp dir must be creatable")
}

#[tokio::test]
async fn records_survive_reopen() {
    let dir = temp_dir();
    let config = SqliteConfig::new(dir.path().join("storage.db"));

    let store = SqliteStore::open(&config).expect("first open");
    let id = store
        .create_student("Ann", "ann@example.com", 21)
        .await
        .expect("create");
    assert!(store.close().expect("close"), "sole handle must close");

    let reopened = SqliteStore::open(&config).expect("reopen must not fail on existing schema");
    let student = reopened.get_student_by_id(id).await.expect("lookup after reopen");
    assert_eq!(student.name, "Ann");
    assert_eq!(student.email, "ann@example.com");
    assert_eq!(student.age, 21);

    let next = reopened
        .create_student("Bob", "bob@example.com", 22)
        .await
        .expect("create after reopen");
    assert!(next > id, "ids must keep increasing across restarts");
}

#[tokio::test]
async fn open_creates_missing_parent_directories() {
    let dir = temp_dir();
    let path = dir.path().join("nested/deeper/storage.db");
    let store = SqliteStore::open(&SqliteConfig::new(&path)).expect("open nested path");
    assert!(path.exists(), "database file must be created");
    assert!(store.list_students().await.expect("list").is_empty());
}

#[test]
fn open_on_directory_fails_with_storage_error() {
    let dir = temp_dir();
    let result = SqliteStore::open(&SqliteConfig::new(dir.path()));
    assert!(matches!(result, Err(StoreError::Storage(_))), "got {result:?}");
}

#[tokio::test]
async fn concurrent_creates_get_distinct_ids() {
    let dir = temp_dir();
    let store = Arc::new(
        SqliteStore::open(&SqliteConfig::new(dir.path().join("storage.db"))).expect("open"),
    );

    let mut tasks = Vec::new();
    for n in 0..16 {
        let store = Arc::clone(&store);
        tasks.push(tokio::spawn(async move {
            store
                .create_student(&format!("student-{n}"), "s@example.com", n)
                .await
        }));
    }

    let mut ids = BTreeSet::new();
    for task in tasks {
        let id = task.await.expect("task join").expect("create");
        assert!(id.get() > 0, "ids must be strictly positive");
        ids.insert(id);
    }
    assert_eq!(ids.len(), 16, "every create must receive its own id");

    let listed = store.list_students().await.expect("list");
    assert_eq!(listed.len(), 16);
    assert!(listed.windows(2).all(|w| w[0].id < w[1].id), "listing is ordered by id");
}

#[tokio::test]
async fn lookup_beyond_last_id_is_not_found() {
    let dir = temp_dir();
    let store = SqliteStore::open(&SqliteConfig::new(dir.path().join("storage.db"))).expect("open");
    let id = store
        .create_student("Ann", "ann@example.com", 21)
        .await
        .expect("create");
    let missing = StudentId::new(id.get() + 1);
    let result = store.get_student_by_id(missing).await;
    assert!(
        matches!(&result, Err(StoreError::NotFound(found)) if *found == missing),
        "got {result:?}"
    );
    assert_eq!(
        result.err().map(|e| e.to_string()).as_deref(),
        Some("no student found with id 2")
    );
}

#[tokio::test]
async fn age_beyond_32_bits_round_trips() {
    let dir = temp_dir();
    let store = SqliteStore::open(&SqliteConfig::new(dir.path().join("storage.db"))).expect("open");
    let id = store
        .create_student("Ann", "ann@example.com", 3_000_000_000)
        .await
        .expect("create");
    let student = store.get_student_by_id(id).await.expect("lookup");
    assert_eq!(student.age, 3_000_000_000);
}

#[tokio::test]
async fn close_with_live_clone_reports_still_open() {
    let dir = temp_dir();
    let config = SqliteConfig::new(dir.path().join("storage.db"));
    let store = SqliteStore::open(&config).expect("open");
    let other = store.clone();

    assert!(!store.close().expect("close"), "a live clone keeps the connection open");
    other
        .create_student("Ann", "ann@example.com", 21)
        .await
        .expect("clone still usable after the first close");
    assert!(other.close().expect("close last handle"), "last handle closes the connection");
}
