//! Application services - orchestrate use cases.
//!
//! The registrar collects candidates into a registry and emits one registry
//! file per service.

pub mod registrar;
pub mod report;

pub use registrar::Registrar;
pub use report::{EmitOutcome, EmitReport, EmitStatus};
