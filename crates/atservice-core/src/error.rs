//! Unified error handling for Atservice Core.
//!
//! This module provides a unified error type that wraps domain and application
//! errors, with rich context and user-actionable suggestions.

use thiserror::Error;

use crate::application::ApplicationError;
use crate::domain::DomainError;

/// Root error type for Atservice Core operations.
///
/// This enum wraps all possible errors that can occur when using atservice-core,
/// providing a unified interface for error handling.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum AtserviceError {
    /// Errors from the domain layer (invalid names).
    #[error("Domain error: {0}")]
    Domain(#[from] DomainError),

    /// Errors from the application layer (sources and sinks).
    #[error("Application error: {0}")]
    Application(#[from] ApplicationError),
}

impl AtserviceError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::Domain(e) => e.suggestions(),
            Self::Application(e) => e.suggestions(),
        }
    }

    /// Get error category for display/styling purposes.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Domain(e) => e.category(),
            Self::Application(e) => e.category(),
        }
    }

    /// The innermost human-readable message, without layer prefixes.
    ///
    /// Used for diagnostics that embed the underlying cause verbatim, e.g.
    /// `While writing services entry for: 'x', error: <detail>`.
    pub fn detail(&self) -> String {
        match self {
            Self::Application(ApplicationError::FilesystemError { reason, .. }) => reason.clone(),
            Self::Application(e) => e.to_string(),
            Self::Domain(e) => e.to_string(),
        }
    }
}

/// Error categories for UI display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    NotFound,
    Internal,
}

/// Convenient result type alias.
pub type AtserviceResult<T> = Result<T, AtserviceError>;

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;

    #[test]
    fn detail_unwraps_filesystem_reason() {
        let err: AtserviceError = ApplicationError::FilesystemError {
            path: PathBuf::from("out/META-INF/services/x"),
            operation: "write file",
            reason: "Permission denied (os error 13)".into(),
        }
        .into();

        assert_eq!(err.detail(), "Permission denied (os error 13)");
        assert_eq!(err.category(), ErrorCategory::Internal);
    }

    #[test]
    fn domain_errors_are_validation() {
        let err: AtserviceError = DomainError::InvalidName {
            name: "".into(),
            reason: "name is empty",
        }
        .into();
        assert_eq!(err.category(), ErrorCategory::Validation);
        assert!(!err.suggestions().is_empty());
    }
}
