//! Database connection pool management
//!
//! Uses sqlx SqlitePool with explicit connection limits.

use std::path::Path;
use std::str::FromStr;
use std::time::Duration;

use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};
use sqlx::SqlitePool;

/// Default maximum connections for the pool.
/// Kept low for single-user tooling.
const DEFAULT_MAX_CONNECTIONS: u32 = 5;

/// How long a writer waits on a locked database before failing
const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// Open (creating if missing) the SQLite database at `path`.
///
/// # Errors
///
/// Returns an error if the file cannot be opened or created, e.g. the
/// parent directory does not exist or is not writable.
///
/// # Example
///
/// ```ignore
/// let pool = create_pool(Path::new("./notes.db")).await?;
/// ```
pub async fn create_pool(path: &Path) -> Result<SqlitePool, sqlx::Error> {
    create_pool_with_options(path, DEFAULT_MAX_CONNECTIONS).await
}

/// Open the SQLite database at `path` with a custom connection limit.
pub async fn create_pool_with_options(
    path: &Path,
    max_connections: u32,
) -> Result<SqlitePool, sqlx::Error> {
    let options = SqliteConnectOptions::new()
        .filename(path)
        .create_if_missing(true)
        .journal_mode(SqliteJournalMode::Wal)
        .foreign_keys(true)
        .busy_timeout(BUSY_TIMEOUT);

    SqlitePoolOptions::new()
        .max_connections(max_connections)
        .connect_with(options)
        .await
}

/// In-memory database for tests.
///
/// Every SQLite memory connection is its own database, so the pool is
/// pinned to a single connection that never idles out.
pub async fn create_memory_pool() -> Result<SqlitePool, sqlx::Error> {
    let options = SqliteConnectOptions::from_str("sqlite::memory:")?;

    SqlitePoolOptions::new()
        .max_connections(1)
        .min_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect_with(options)
        .await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn pool_acquires_connection() {
        let dir = tempfile::tempdir().unwrap();
        let pool = create_pool(&dir.path().join("pool.db"))
            .await
            .expect("pool creation failed");

        let result: (i32,) = sqlx::query_as("SELECT 1")
            .fetch_one(&pool)
            .await
            .expect("query failed");

        assert_eq!(result.0, 1);
    }

    #[tokio::test]
    async fn creates_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("fresh.db");
        assert!(!path.exists());

        let _pool = create_pool(&path).await.unwrap();
        assert!(path.exists());
    }

    #[tokio::test]
    async fn unreachable_location_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing-dir").join("notes.db");

        assert!(create_pool(&path).await.is_err());
    }

    #[tokio::test]
    async fn concurrent_pool_access() {
        let dir = tempfile::tempdir().unwrap();
        let pool = create_pool(&dir.path().join("concurrent.db")).await.unwrap();

        let handles: Vec<_> = (0..10)
            .map(|i| {
                let pool = pool.clone();
                tokio::spawn(async move {
                    let result: (i64,) = sqlx::query_as("SELECT ?")
                        .bind(i as i64)
                        .fetch_one(&pool)
                        .await
                        .expect("concurrent query failed");
                    result.0
                })
            })
            .collect();

        for (i, handle) in handles.into_iter().enumerate() {
            let result = handle.await.expect("task panicked");
            assert_eq!(result, i as i64);
        }
    }
}
