//! ainotes-core: shared types for the ainotes workspace
//!
//! - `note`: the wire representation of a note and its request payload
//! - `config`: `~/.ainotes/config.toml` loading with defaults
//! - `error`: structured error type for this crate

pub mod config;
pub mod error;
pub mod note;

pub use config::{ClientConfig, NotesConfig, ServeConfig};
pub use error::{NotesError, Result};
pub use note::{Note, NotePayload, MAX_TAGS_CHARS, MAX_TITLE_CHARS, UNTITLED};
