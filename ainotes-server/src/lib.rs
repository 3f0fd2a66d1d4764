//! ainotes-server: note storage and JSON API
//!
//! - `db`: SQLite pool, schema bootstrap, `NoteRepo`
//! - `models`: title/tag normalisation applied before writes
//! - `http`: axum router, error mapping, graceful shutdown

pub mod db;
pub mod http;
pub mod models;

pub use http::{build_router, run_server, AppState, ServerConfig, ServerError};
