//! Driven (output) ports - implemented by infrastructure.

use std::path::{Path, PathBuf};

use crate::error::EntigenResult;

/// Port for filesystem operations.
///
/// Implemented by:
/// - `entigen_adapters::filesystem::LocalFilesystem` (production)
/// - `entigen_adapters::filesystem::MemoryFilesystem` (testing, dry runs)
#[cfg_attr(test, mockall::automock)]
pub trait Filesystem: Send + Sync {
    /// Create a directory and all parent directories.
    fn create_dir_all(&self, path: &Path) -> EntigenResult<()>;

    /// Write content to a file, replacing any existing file.
    fn write_file(&self, path: &Path, content: &str) -> EntigenResult<()>;

    fn exists(&self, path: &Path) -> bool;
}

/// Port for asking the user things.
///
/// `Ok(None)` means the prompt was dismissed.
///
/// Implemented by:
/// - `entigen_cli::prompter::DialoguerPrompter` (terminal)
/// - `entigen_adapters::prompter::ScriptedPrompter` (testing)
#[cfg_attr(test, mockall::automock)]
pub trait Prompter: Send + Sync {
    fn ask_string(&self, prompt: &str, placeholder: &str) -> EntigenResult<Option<String>>;

    fn pick_directory(&self, label: &str) -> EntigenResult<Option<PathBuf>>;
}
