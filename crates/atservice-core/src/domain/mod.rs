// ============================================================================
//  CLEAN MODULE BOUNDARIES
// ============================================================================

//! Core domain layer for atservice.
//!
//! This module contains pure logic with no I/O. Candidate discovery and file
//! writing are handled via ports (traits) defined in the application layer.
//!
//! ## Hexagonal Architecture Compliance
//!
//! - **No async**: Domain logic is synchronous
//! - **No I/O**: No filesystem, network, or external calls
//! - **Value types**: All domain objects are Clone + PartialEq
//! - **Rich domain model**: Name resolution lives on `TypeDescriptor`,
//!   grouping lives on `ServiceRegistry`
//!
// Public API - what the world sees
pub mod entities;
pub mod error;
pub mod value_objects;

// Re-exports for convenience
pub use entities::{
    candidate::{AnnotationInstance, AnnotationValue, DEFAULT_MARKER_ANNOTATION, TypeDescriptor},
    registry::{
        ImplementationRecord, SERVICES_DIR, ServiceRegistry, registry_file_contents,
        registry_file_path,
    },
};

pub use error::DomainError;

pub use value_objects::{QualifiedName, TYPE_REFERENCE_SUFFIX};
