//! Storage layer - connection pool, schema, repositories
//!
//! # Design Principles
//!
//! - One SQLite file, one `notes` table
//! - Every repository call acquires its own connection and gives it back on drop
//! - Writes run in a transaction and commit explicitly; early returns roll back
//! - Rely on DB constraints for limits, no pre-validation

pub mod clock;
pub mod migrations;
pub mod pool;
pub mod repos;

pub use pool::{create_memory_pool, create_pool};
pub use repos::*;
