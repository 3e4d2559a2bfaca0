//! Per-service outcomes of an emission pass.

use std::path::{Path, PathBuf};

use crate::{domain::QualifiedName, error::AtserviceError};

/// Diagnostic line for a registry file that could not be written.
pub fn write_diagnostic(service: &QualifiedName, message: &str) -> String {
    format!("While writing services entry for: '{service}', error: {message}")
}

/// What happened to one registry file.
#[derive(Debug, Clone, PartialEq)]
pub enum EmitStatus {
    Written { implementations: usize },
    Failed { error: AtserviceError },
}

/// Outcome for one service entry.
#[derive(Debug, Clone, PartialEq)]
pub struct EmitOutcome {
    pub service: QualifiedName,
    pub path: PathBuf,
    pub status: EmitStatus,
}

impl EmitOutcome {
    pub fn is_written(&self) -> bool {
        matches!(self.status, EmitStatus::Written { .. })
    }

    pub fn error(&self) -> Option<&AtserviceError> {
        match &self.status {
            EmitStatus::Failed { error } => Some(error),
            EmitStatus::Written { .. } => None,
        }
    }

    /// Diagnostic line, present only for failures.
    pub fn diagnostic(&self) -> Option<String> {
        self.error()
            .map(|error| write_diagnostic(&self.service, &error.detail()))
    }
}

/// Result of `Registrar::emit`: one outcome per service, in registry order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EmitReport {
    root: PathBuf,
    outcomes: Vec<EmitOutcome>,
}

impl EmitReport {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            outcomes: Vec::new(),
        }
    }

    pub(crate) fn push(&mut self, outcome: EmitOutcome) {
        self.outcomes.push(outcome);
    }

    /// Output root the paths are relative to.
    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn outcomes(&self) -> &[EmitOutcome] {
        &self.outcomes
    }

    pub fn written(&self) -> impl Iterator<Item = &EmitOutcome> {
        self.outcomes.iter().filter(|o| o.is_written())
    }

    pub fn failures(&self) -> impl Iterator<Item = &EmitOutcome> {
        self.outcomes.iter().filter(|o| !o.is_written())
    }

    pub fn diagnostics(&self) -> Vec<String> {
        self.outcomes
            .iter()
            .filter_map(EmitOutcome::diagnostic)
            .collect()
    }

    pub fn written_count(&self) -> usize {
        self.written().count()
    }

    pub fn failed_count(&self) -> usize {
        self.failures().count()
    }

    /// `true` if every entry was written (vacuously true when empty).
    pub fn is_success(&self) -> bool {
        self.outcomes.iter().all(EmitOutcome::is_written)
    }

    pub fn is_empty(&self) -> bool {
        self.outcomes.is_empty()
    }
}
