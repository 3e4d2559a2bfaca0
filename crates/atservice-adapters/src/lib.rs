//! Infrastructure adapters for atservice.
//!
//! This crate implements the ports defined in `atservice-core::application::ports`.
//! It contains all external dependencies and I/O operations.

pub mod candidate_source;
pub mod filesystem;

// Re-export commonly used adapters
pub use candidate_source::{InMemoryCandidateSource, ManifestCandidateSource};
pub use filesystem::{LocalFilesystem, MemoryFilesystem};
