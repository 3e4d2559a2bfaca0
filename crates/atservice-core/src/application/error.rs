//! Application layer errors.
//!
//! These errors represent failures in orchestration and in the adapters
//! behind the ports, not in name resolution. Those are `DomainError`.

use std::path::PathBuf;
use thiserror::Error;

use crate::error::ErrorCategory;

/// Errors that occur during application orchestration.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ApplicationError {
    /// Filesystem operation failed.
    #[error("Failed to {operation} at {path}: {reason}")]
    FilesystemError {
        path: PathBuf,
        operation: &'static str,
        reason: String,
    },

    /// Candidate source could not be read or parsed.
    #[error("Candidate source '{source_name}' failed: {reason}")]
    CandidateSourceFailed { source_name: String, reason: String },

    /// Candidate source does not exist.
    #[error("Candidate source not found: {path}")]
    CandidateSourceNotFound { path: PathBuf },

    /// Sink state is unavailable (lock poisoned, etc.).
    #[error("Output sink lock poisoned")]
    SinkLockError,
}

impl ApplicationError {
    /// Get user-actionable suggestions.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::FilesystemError { path, .. } => vec![
                format!("Failed to access: {}", path.display()),
                "Check that you have write permissions".into(),
                "Ensure the output root is a directory".into(),
            ],
            Self::CandidateSourceFailed { source_name, .. } => vec![
                format!("Check the candidate manifest: {}", source_name),
                "Manifests must be TOML (.toml) or JSON (.json)".into(),
                "Each entry lives under [[types]] with name/interfaces/annotations".into(),
            ],
            Self::CandidateSourceNotFound { path } => vec![
                format!("No such file or directory: {}", path.display()),
                "Pass a manifest file or a directory containing *.atservice.toml".into(),
            ],
            Self::SinkLockError => vec![
                "The output sink is unavailable".into(),
                "Try again in a moment".into(),
            ],
        }
    }

    /// Get error category.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::FilesystemError { .. } | Self::SinkLockError => ErrorCategory::Internal,
            Self::CandidateSourceFailed { .. } => ErrorCategory::Validation,
            Self::CandidateSourceNotFound { .. } => ErrorCategory::NotFound,
        }
    }
}
