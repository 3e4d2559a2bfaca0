//! Registrar - the collect-then-emit use case.
//!
//! 1. Resolve each candidate into an implementation record
//! 2. Group implementations by service name
//! 3. Write one registry file per service
//!
//! Emission is best-effort per entry: a failed file is reported and the
//! remaining entries are still written.

use std::borrow::Borrow;
use std::path::Path;

use indexmap::IndexSet;
use tracing::{debug, error, info, instrument, trace};

use crate::{
    application::{
        ports::{CandidateSource, Filesystem},
        services::report::{EmitOutcome, EmitReport, EmitStatus, write_diagnostic},
    },
    domain::{
        DEFAULT_MARKER_ANNOTATION, QualifiedName, ServiceRegistry, TypeDescriptor,
        registry_file_contents, registry_file_path,
    },
    error::AtserviceResult,
};

/// Groups annotated implementations by service and writes registry files.
pub struct Registrar {
    filesystem: Box<dyn Filesystem>,
    marker: String,
}

impl Registrar {
    /// Create a registrar writing through `filesystem`, recognising the
    /// default marker annotation.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// use atservice_core::application::{Registrar, ports::*};
    ///
    /// let registrar = Registrar::new(
    ///     filesystem, // impl Filesystem
    /// );
    /// ```
    pub fn new(filesystem: Box<dyn Filesystem>) -> Self {
        Self {
            filesystem,
            marker: DEFAULT_MARKER_ANNOTATION.to_string(),
        }
    }

    /// Recognise `marker` instead of the default marker annotation.
    pub fn with_marker(mut self, marker: QualifiedName) -> Self {
        self.marker = marker.into_string();
        self
    }

    pub fn marker(&self) -> &str {
        &self.marker
    }

    /// Group candidates into a fresh registry using this registrar's marker.
    pub fn collect<I>(&self, candidates: I) -> ServiceRegistry
    where
        I: IntoIterator,
        I::Item: Borrow<TypeDescriptor>,
    {
        Self::collect_with(&self.marker, candidates)
    }

    /// Group candidates recognising `marker`, without any filesystem.
    ///
    /// Candidates with an unresolvable name, or that declare no service
    /// and no interface, are skipped without error.
    #[instrument(skip_all, fields(marker = %marker))]
    pub fn collect_with<I>(marker: &str, candidates: I) -> ServiceRegistry
    where
        I: IntoIterator,
        I::Item: Borrow<TypeDescriptor>,
    {
        let mut registry = ServiceRegistry::new();
        let mut unresolved = 0usize;
        let mut dropped = 0usize;

        for candidate in candidates {
            let candidate: &TypeDescriptor = candidate.borrow();

            let Some(record) = candidate.to_record(marker) else {
                trace!(name = ?candidate.name(), "skipping candidate without a usable name");
                unresolved += 1;
                continue;
            };

            if record.is_empty() {
                debug!(
                    implementation = %record.implementation(),
                    "no service names derivable, dropping"
                );
                dropped += 1;
                continue;
            }

            let added = registry.add_record(&record);
            trace!(
                implementation = %record.implementation(),
                services = record.services().len(),
                added,
                "registered"
            );
        }

        info!(
            services = registry.len(),
            pairs = registry.pair_count(),
            unresolved,
            dropped,
            "Candidates collected"
        );
        registry
    }

    /// Write one registry file per service under `output_root`.
    ///
    /// Never fails as a whole: each entry gets its own outcome, and failures
    /// are logged as diagnostics.
    #[instrument(skip_all, fields(output_root = %output_root.as_ref().display()))]
    pub fn emit(&self, registry: &ServiceRegistry, output_root: impl AsRef<Path>) -> EmitReport {
        let root = output_root.as_ref();
        let mut report = EmitReport::new(root);

        for (service, implementations) in registry {
            let path = root.join(registry_file_path(service));

            let status = match self.write_entry(&path, implementations) {
                Ok(()) => {
                    debug!(
                        service = %service,
                        path = %path.display(),
                        implementations = implementations.len(),
                        "Registry file written"
                    );
                    EmitStatus::Written {
                        implementations: implementations.len(),
                    }
                }
                Err(e) => {
                    error!("{}", write_diagnostic(service, &e.detail()));
                    EmitStatus::Failed { error: e }
                }
            };

            report.push(EmitOutcome {
                service: service.clone(),
                path,
                status,
            });
        }

        info!(
            written = report.written_count(),
            failed = report.failed_count(),
            "Emission finished"
        );
        report
    }

    /// Load candidates from `source`, collect, and emit.
    ///
    /// Only a failing source is an error; emission failures are in the report.
    #[instrument(skip_all, fields(source = %source.describe()))]
    pub fn run(
        &self,
        source: &dyn CandidateSource,
        output_root: impl AsRef<Path>,
    ) -> AtserviceResult<EmitReport> {
        let candidates = source.candidates()?;
        debug!(candidates = candidates.len(), "Candidates loaded");

        let registry = self.collect(&candidates);
        Ok(self.emit(&registry, output_root))
    }

    // -------------------------------------------------------------------------
    // Internal Helpers
    // -------------------------------------------------------------------------

    fn write_entry(
        &self,
        path: &Path,
        implementations: &IndexSet<QualifiedName>,
    ) -> AtserviceResult<()> {
        if let Some(parent) = path.parent() {
            self.filesystem.create_dir_all(parent)?;
        }
        self.filesystem
            .write_file(path, &registry_file_contents(implementations))
    }
}
