//! Application layer for atservice.
//!
//! This layer contains:
//! - **Services**: Use case orchestration (Registrar)
//! - **Ports**: Interface definitions (traits) for external dependencies
//! - **Errors**: Application-specific error types
//!
//! The application layer coordinates the domain layer but contains no
//! resolution rules itself. Those live in `crate::domain`.

pub mod error;
pub mod ports;
pub mod services;

// Re-export main services
pub use services::{EmitOutcome, EmitReport, EmitStatus, Registrar};

// Re-export port traits (for adapter implementation)
pub use ports::{CandidateSource, Filesystem};

pub use error::ApplicationError;
