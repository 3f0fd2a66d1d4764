//! Note title and tags as written to storage

use ainotes_core::UNTITLED;

/// Trimmed, never-empty note title
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteTitle(String);

impl NoteTitle {
    /// Normalise a user supplied title.
    ///
    /// # Rules
    /// - Surrounding whitespace is trimmed
    /// - A title that trims to nothing becomes "Untitled"
    ///
    /// # Example
    /// ```
    /// use ainotes_server::models::NoteTitle;
    ///
    /// assert_eq!(NoteTitle::normalize("  Groceries ").as_str(), "Groceries");
    /// assert_eq!(NoteTitle::normalize("   ").as_str(), "Untitled");
    /// ```
    pub fn normalize(raw: &str) -> Self {
        let trimmed = raw.trim();

        if trimmed.is_empty() {
            Self(UNTITLED.to_owned())
        } else {
            Self(trimmed.to_owned())
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for NoteTitle {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Trimmed tag string. Stored as-is, never split.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteTags(String);

impl NoteTags {
    pub fn normalize(raw: &str) -> Self {
        Self(raw.trim().to_owned())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for NoteTags {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
