/// Structured error types for ainotes-core.
///
/// Binary crates (ainotes-cli) wrap these in `anyhow` with context;
/// library consumers get composable errors.
use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum NotesError {
    /// I/O operation failed
    #[error("I/O error: {source}")]
    Io {
        #[from]
        source: io::Error,
    },

    /// Config file exists but is not valid TOML for `NotesConfig`
    #[error("Failed to parse config file {path:?}: {source}")]
    ConfigParse {
        path: PathBuf,
        source: toml::de::Error,
    },

    /// Config could not be rendered back to TOML
    #[error("Failed to serialize config: {source}")]
    ConfigSerialize {
        #[from]
        source: toml::ser::Error,
    },

    /// Configuration value is unusable
    #[error("Configuration error: {reason}")]
    Config { reason: String },
}

/// Result type alias for ainotes-core operations
pub type Result<T> = std::result::Result<T, NotesError>;

impl NotesError {
    pub fn config_parse(path: impl Into<PathBuf>, source: toml::de::Error) -> Self {
        Self::ConfigParse {
            path: path.into(),
            source,
        }
    }

    pub fn config(reason: impl Into<String>) -> Self {
        Self::Config {
            reason: reason.into(),
        }
    }
}
