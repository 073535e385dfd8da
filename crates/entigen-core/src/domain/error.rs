// ============================================================================
// domain/error.rs - INFERENCE AND EMISSION ERRORS
// ============================================================================

use thiserror::Error;

/// Root domain error type.
///
/// All errors are:
/// - Cloneable (the CLI logs and formats the same value)
/// - Categorizable (for CLI display)
/// - Actionable (provides suggestions)
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DomainError {
    // ========================================================================
    // Input Errors
    // ========================================================================
    #[error("sample root must be a JSON object, found {found}")]
    InvalidInputKind { found: &'static str },

    #[error("invalid class name '{name}': {reason}")]
    InvalidClassName { name: String, reason: String },

    // ========================================================================
    // Shape Errors
    // ========================================================================
    #[error("unsupported value shape for field '{field}': {shape}")]
    UnsupportedValueShape { field: String, shape: String },

    // ========================================================================
    // Registry Errors
    // ========================================================================
    #[error("root schema '{class_name}' is missing from the registry")]
    MissingRootSchema { class_name: String },
}

impl DomainError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::InvalidInputKind { found } => vec![
                format!("The sample document is a JSON {found}"),
                "Wrap the sample in an object, e.g. {\"items\": [...]}".into(),
            ],
            Self::InvalidClassName { name, reason } => vec![
                format!("'{name}' cannot be used as a class name: {reason}"),
                "Use letters and digits, e.g. User or UserEntity".into(),
            ],
            Self::UnsupportedValueShape { field, shape } => vec![
                format!("Field '{field}' has a shape that cannot be typed: {shape}"),
                "Give the first array element a concrete sample value".into(),
                "Or drop --strict to fall back to `dynamic` for such fields".into(),
            ],
            Self::MissingRootSchema { .. } => vec![
                "The root class was not produced by inference".into(),
                "This is likely a bug, please report it".into(),
            ],
        }
    }

    /// Error category for CLI display styling.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::InvalidInputKind { .. } | Self::InvalidClassName { .. } => {
                ErrorCategory::Validation
            }
            Self::UnsupportedValueShape { .. } => ErrorCategory::Unsupported,
            Self::MissingRootSchema { .. } => ErrorCategory::Internal,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    Unsupported,
    Internal,
}
