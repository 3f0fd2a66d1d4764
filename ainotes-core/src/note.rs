//! Note wire model
//!
//! `Note` is what every note-returning endpoint serializes, and what
//! clients deserialize. Tags are a single opaque string; the comma
//! separated convention is never parsed.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Title stored when the supplied title trims to nothing
pub const UNTITLED: &str = "Untitled";

/// Column limits declared by the schema (characters)
pub const MAX_TITLE_CHARS: usize = 200;
pub const MAX_TAGS_CHARS: usize = 300;

/// A persisted note
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    pub id: i64,
    pub title: String,
    pub content: String,
    pub tags: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Note {
    /// Id carried by the stand-in object returned for a missing note
    pub const PLACEHOLDER_ID: i64 = -1;

    /// Stand-in returned by `GET /notes/{id}` when the id does not exist.
    pub fn placeholder(now: DateTime<Utc>) -> Self {
        Self {
            id: Self::PLACEHOLDER_ID,
            title: "Not found".to_string(),
            content: String::new(),
            tags: String::new(),
            created_at: now,
            updated_at: now,
        }
    }

    pub fn is_placeholder(&self) -> bool {
        self.id == Self::PLACEHOLDER_ID
    }
}

/// Request body for create and update
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotePayload {
    pub title: String,
    pub content: String,
    #[serde(default)]
    pub tags: String,
}
