//! Atservice Core - Hexagonal Architecture Implementation
//!
//! This crate provides the domain and application layers for the atservice
//! registry generator, following hexagonal (ports and adapters) architecture.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │         atservice-cli (host)            │
//! │     (Implements Driving Ports)          │
//! └──────────────────┬──────────────────────┘
//!                    │ calls
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │         Application Services            │
//! │              (Registrar)                │
//! │     collect candidates, emit files      │
//! └──────────────────┬──────────────────────┘
//!                    │ uses
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │      Application Ports (Traits)         │
//! │   (Driven: CandidateSource, Filesystem) │
//! └──────────────────┬──────────────────────┘
//!                    │ implemented by
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │    atservice-adapters (Infrastructure)  │
//! │ (ManifestCandidateSource, LocalFs, etc) │
//! └─────────────────────────────────────────┘
//!                    │
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │         Domain Layer (Pure Logic)       │
//! │ (TypeDescriptor, QualifiedName,         │
//! │  ServiceRegistry)                       │
//! └─────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use atservice_core::{
//!     application::Registrar,
//!     domain::{AnnotationInstance, TypeDescriptor},
//! };
//!
//! // 1. Describe the candidates handed over by the host
//! let candidates = vec![
//!     TypeDescriptor::named("com.example.FooImpl")
//!         .annotated(AnnotationInstance::marker().with_value("com.example.Foo.class")),
//! ];
//!
//! // 2. Collect and emit (with an injected filesystem adapter)
//! let registrar = Registrar::new(filesystem);
//! let registry = registrar.collect(&candidates);
//! let report = registrar.emit(&registry, "target/classes");
//! assert!(report.is_success());
//! ```

pub mod domain;

pub mod application;

pub mod error;

// Public API - what external crates should use
pub mod prelude {
    pub use crate::application::{
        EmitOutcome, EmitReport, EmitStatus, Registrar,
        ports::{CandidateSource, Filesystem},
    };
    pub use crate::domain::{
        AnnotationInstance, AnnotationValue, DEFAULT_MARKER_ANNOTATION, ImplementationRecord,
        QualifiedName, SERVICES_DIR, ServiceRegistry, TypeDescriptor,
    };
    pub use crate::error::{AtserviceError, AtserviceResult};
}

// Version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
