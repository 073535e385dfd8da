//! Application ports (traits) for external dependencies.
//!
//! - **Driven (output) ports**: called by the application, implemented by
//!   infrastructure in `entigen-adapters` or the CLI
//!   - `Filesystem`: directory creation and file writes
//!   - `Prompter`: string and directory prompts for the interactive flow

pub mod output;

pub use output::{Filesystem, Prompter};

#[cfg(test)]
pub use output::{MockFilesystem, MockPrompter};
