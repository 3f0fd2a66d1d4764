//! Note repository
//!
//! One method per storage operation. Reads check a connection out of the
//! pool, writes open a transaction; both are returned to the pool when
//! the guard drops, whichever way the method exits.

use ainotes_core::Note;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, SqlitePool};

use super::DbError;
use crate::db::clock;
use crate::models::{NoteTags, NoteTitle};

const COLUMNS: &str = "id, title, content, tags, created_at, updated_at";

/// Note row as stored
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct NoteRecord {
    pub id: i64,
    pub title: String,
    pub content: String,
    pub tags: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<NoteRecord> for Note {
    fn from(r: NoteRecord) -> Self {
        Self {
            id: r.id,
            title: r.title,
            content: r.content,
            tags: r.tags,
            created_at: r.created_at,
            updated_at: r.updated_at,
        }
    }
}

/// Note repository
pub struct NoteRepo<'a> {
    pool: &'a SqlitePool,
}

impl<'a> NoteRepo<'a> {
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// All notes, most recently updated first.
    ///
    /// Ties on `updated_at` go to the higher id.
    pub async fn list_all(&self) -> Result<Vec<NoteRecord>, DbError> {
        let mut conn = self.pool.acquire().await?;

        let notes: Vec<NoteRecord> = sqlx::query_as(&format!(
            "SELECT {COLUMNS} FROM notes ORDER BY updated_at DESC, id DESC"
        ))
        .fetch_all(&mut *conn)
        .await?;

        Ok(notes)
    }

    /// Single note by id, `None` if absent.
    pub async fn get(&self, id: i64) -> Result<Option<NoteRecord>, DbError> {
        let mut conn = self.pool.acquire().await?;

        let note: Option<NoteRecord> =
            sqlx::query_as(&format!("SELECT {COLUMNS} FROM notes WHERE id = ?"))
                .bind(id)
                .fetch_optional(&mut *conn)
                .await?;

        Ok(note)
    }

    /// Insert a note; `created_at` and `updated_at` get the same instant.
    pub async fn insert(
        &self,
        title: &NoteTitle,
        content: &str,
        tags: &NoteTags,
    ) -> Result<NoteRecord, DbError> {
        let now = clock::to_column(clock::now());
        let mut tx = self.pool.begin().await?;

        let note: NoteRecord = sqlx::query_as(&format!(
            r#"
            INSERT INTO notes (title, content, tags, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?)
            RETURNING {COLUMNS}
            "#
        ))
        .bind(title.as_str())
        .bind(content)
        .bind(tags.as_str())
        .bind(&now)
        .bind(&now)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;
        tracing::debug!(id = note.id, "Inserted note");
        Ok(note)
    }

    /// Overwrite title, content and tags, and refresh `updated_at`.
    ///
    /// Last write wins; there is no version check. The clock is read before
    /// the write lock is taken, so racing writers can commit out of clock
    /// order; `max` keeps the stored `updated_at` from moving backwards.
    pub async fn update(
        &self,
        id: i64,
        title: &NoteTitle,
        content: &str,
        tags: &NoteTags,
    ) -> Result<NoteRecord, DbError> {
        let now = clock::to_column(clock::now());
        let mut tx = self.pool.begin().await?;

        let note: NoteRecord = sqlx::query_as(&format!(
            r#"
            UPDATE notes
            SET title = ?, content = ?, tags = ?, updated_at = max(?, updated_at)
            WHERE id = ?
            RETURNING {COLUMNS}
            "#
        ))
        .bind(title.as_str())
        .bind(content)
        .bind(tags.as_str())
        .bind(&now)
        .bind(id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| not_found(id))?;

        tx.commit().await?;
        tracing::debug!(id, "Updated note");
        Ok(note)
    }

    /// Permanently remove a note.
    pub async fn delete(&self, id: i64) -> Result<(), DbError> {
        let mut tx = self.pool.begin().await?;

        let result = sqlx::query("DELETE FROM notes WHERE id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        if result.rows_affected() == 0 {
            return Err(not_found(id));
        }

        tx.commit().await?;
        tracing::debug!(id, "Deleted note");
        Ok(())
    }
}

fn not_found(id: i64) -> DbError {
    DbError::NotFound {
        resource: "note",
        id: id.to_string(),
    }
}
