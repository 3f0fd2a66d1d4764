//! Command implementations for the ainotes CLI

pub mod notes;
#[cfg(feature = "server")]
pub mod serve;

// Re-export dispatcher functions for flat access from main.rs
pub use notes::run_notes;
#[cfg(feature = "server")]
pub use serve::run_serve;
