//! Schema bootstrap for the notes table
//!
//! There is no migration history: the table is created if absent and
//! left alone otherwise. Safe to run on every startup.

use ainotes_core::{MAX_TAGS_CHARS, MAX_TITLE_CHARS};
use sqlx::SqlitePool;

use super::repos::DbError;

/// Ensure the `notes` table and its index exist.
pub async fn run(pool: &SqlitePool) -> Result<(), DbError> {
    tracing::info!("Ensuring notes schema...");

    // AUTOINCREMENT keeps ids of deleted notes from being handed out again.
    sqlx::query(&format!(
        r#"
        CREATE TABLE IF NOT EXISTS notes (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            title VARCHAR({MAX_TITLE_CHARS}) NOT NULL
                CHECK (length(title) BETWEEN 1 AND {MAX_TITLE_CHARS}),
            content TEXT NOT NULL,
            tags VARCHAR({MAX_TAGS_CHARS}) NOT NULL DEFAULT ''
                CHECK (length(tags) <= {MAX_TAGS_CHARS}),
            created_at TEXT NOT NULL,
            updated_at TEXT NOT NULL,
            CHECK (updated_at >= created_at)
        )
        "#
    ))
    .execute(pool)
    .await?;

    sqlx::query("CREATE INDEX IF NOT EXISTS idx_notes_updated_at ON notes (updated_at DESC)")
        .execute(pool)
        .await?;

    tracing::debug!("Notes schema ready");
    Ok(())
}
