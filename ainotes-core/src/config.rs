//! Configuration for the ainotes server and client
//!
//! Lives at `~/.ainotes/config.toml`. Unlike most tools the file is
//! optional: a missing file yields the built-in defaults, which match
//! a local development setup (API on :8000, web client on :5173).

use std::fs;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{NotesError, Result};

pub const DEFAULT_BIND: &str = "127.0.0.1:8000";
pub const DEFAULT_DATABASE: &str = "./notes.db";
pub const DEFAULT_CORS_ORIGIN: &str = "http://localhost:5173";
pub const DEFAULT_ENDPOINT: &str = "http://127.0.0.1:8000";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotesConfig {
    #[serde(default)]
    pub serve: ServeConfig,
    #[serde(default)]
    pub client: ClientConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServeConfig {
    pub bind: String,
    pub database: PathBuf,
    pub cors_origin: String,
    pub timeout_secs: u64,
}

impl Default for ServeConfig {
    fn default() -> Self {
        Self {
            bind: DEFAULT_BIND.to_string(),
            database: PathBuf::from(DEFAULT_DATABASE),
            cors_origin: DEFAULT_CORS_ORIGIN.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl ServeConfig {
    pub fn bind_addr(&self) -> Result<SocketAddr> {
        self.bind
            .parse()
            .map_err(|_| NotesError::config(format!("invalid bind address '{}'", self.bind)))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    pub endpoint: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
        }
    }
}

impl NotesConfig {
    /// Config file path: ~/.ainotes/config.toml
    pub fn config_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".ainotes")
            .join("config.toml")
    }

    /// Load from the default path, falling back to defaults if absent
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path())
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "No config file, using defaults");
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)?;
        let config: Self =
            toml::from_str(&content).map_err(|e| NotesError::config_parse(path, e))?;

        Ok(config)
    }

    pub fn to_toml(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Write this config to `path`, creating parent directories
    pub fn write_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, self.to_toml()?)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = NotesConfig::load_from(&dir.path().join("nope.toml")).unwrap();

        assert_eq!(config, NotesConfig::default());
        assert_eq!(config.serve.bind, "127.0.0.1:8000");
        assert_eq!(config.serve.cors_origin, "http://localhost:5173");
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[serve]\ndatabase = \"/var/lib/ainotes/notes.db\"\n").unwrap();

        let config = NotesConfig::load_from(&path).unwrap();
        assert_eq!(config.serve.database, PathBuf::from("/var/lib/ainotes/notes.db"));
        assert_eq!(config.serve.bind, DEFAULT_BIND);
        assert_eq!(config.client.endpoint, DEFAULT_ENDPOINT);
    }

    #[test]
    fn invalid_toml_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[serve\nbind = ").unwrap();

        let err = NotesConfig::load_from(&path).unwrap_err();
        assert!(matches!(err, NotesError::ConfigParse { .. }));
    }

    #[test]
    fn write_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut config = NotesConfig::default();
        config.serve.timeout_secs = 5;
        config.write_to(&path).unwrap();

        assert_eq!(NotesConfig::load_from(&path).unwrap(), config);
    }

    #[test]
    fn bind_addr_validation() {
        let mut serve = ServeConfig::default();
        assert_eq!(serve.bind_addr().unwrap().port(), 8000);

        serve.bind = "not an address".to_string();
        assert!(serve.bind_addr().is_err());
    }
}
