//! Driven (output) ports - implemented by infrastructure.
//!
//! These traits define what the application needs from external systems.
//! The `atservice-adapters` crate provides implementations.

use crate::domain::TypeDescriptor;
use crate::error::AtserviceResult;
use std::path::Path;

/// Port for filesystem operations.
///
/// Implemented by:
/// - `atservice_adapters::filesystem::LocalFilesystem` (production)
/// - `atservice_adapters::filesystem::MemoryFilesystem` (testing)
///
/// ## Design Notes
///
/// - `write_file` creates or truncates; it never reads existing content
/// - Implementations release any handle before returning, on every path
#[cfg_attr(test, mockall::automock)]
pub trait Filesystem: Send + Sync {
    /// Create a directory and all parent directories.
    fn create_dir_all(&self, path: &Path) -> AtserviceResult<()>;

    /// Write content to a file, replacing it if present.
    fn write_file(&self, path: &Path, content: &str) -> AtserviceResult<()>;

    /// Check if path exists.
    fn exists(&self, path: &Path) -> bool;
}

/// Port for the host's candidate types.
///
/// Implemented by:
/// - `atservice_adapters::candidate_source::ManifestCandidateSource` (manifest files)
/// - `atservice_adapters::candidate_source::InMemoryCandidateSource` (programmatic hosts, tests)
#[cfg_attr(test, mockall::automock)]
pub trait CandidateSource: Send + Sync {
    /// Short description used in logs and errors.
    fn describe(&self) -> String;

    /// Every candidate type, in discovery order.
    fn candidates(&self) -> AtserviceResult<Vec<TypeDescriptor>>;
}
