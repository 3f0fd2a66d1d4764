//! Input normalisation for note writes
//!
//! Normalisation never fails: blank titles become "Untitled" and tags
//! are only trimmed. Length limits belong to the schema.

pub mod note;
pub mod validation;

pub use note::{NoteTags, NoteTitle};
pub use validation::ValidationError;
