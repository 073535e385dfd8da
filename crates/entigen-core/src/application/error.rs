//! Application layer errors.
//!
//! These errors represent failures in orchestration, not inference.
//! Inference and emission errors are `DomainError` from `crate::domain`.

use std::path::PathBuf;
use thiserror::Error;

use crate::error::ErrorCategory;

/// Errors that occur during application orchestration.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ApplicationError {
    /// The sample text is not valid JSON.
    #[error("Invalid JSON sample: {reason}")]
    InvalidJson { reason: String },

    /// Filesystem operation failed.
    #[error("Filesystem error at {path}: {reason}")]
    FilesystemError { path: PathBuf, reason: String },

    /// The user dismissed a prompt or left a required answer empty.
    #[error("Cancelled at step: {step}")]
    Cancelled { step: &'static str },

    /// Shared adapter state is unusable (lock poisoned).
    #[error("Adapter state lock poisoned")]
    LockError,
}

impl ApplicationError {
    /// Get user-actionable suggestions.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::InvalidJson { reason } => vec![
                format!("Could not parse the sample: {reason}"),
                "Check for trailing commas and unquoted keys".into(),
            ],
            Self::FilesystemError { path, .. } => vec![
                format!("Failed to access: {}", path.display()),
                "Check that you have write permissions".into(),
            ],
            Self::Cancelled { step } => vec![format!("Nothing was written; the {step} was not provided")],
            Self::LockError => vec!["Try again in a moment".into()],
        }
    }

    /// Get error category.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::InvalidJson { .. } => ErrorCategory::Validation,
            Self::FilesystemError { .. } | Self::LockError => ErrorCategory::Internal,
            Self::Cancelled { .. } => ErrorCategory::Cancelled,
        }
    }
}
