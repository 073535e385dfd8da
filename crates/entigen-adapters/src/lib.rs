//! Infrastructure adapters for entigen.
//!
//! This crate implements the ports defined in `entigen_core::application::ports`.
//! It contains all I/O operations.

pub mod filesystem;
pub mod prompter;

// Re-export commonly used adapters
pub use filesystem::{LocalFilesystem, MemoryFilesystem};
pub use prompter::ScriptedPrompter;
