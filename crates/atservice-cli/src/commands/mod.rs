//! Command handlers, one module per subcommand.

pub mod completions;
pub mod config;
pub mod generate;
pub mod init;
pub mod list;

use atservice_adapters::ManifestCandidateSource;
use atservice_core::domain::QualifiedName;

use crate::{
    cli::ScanArgs,
    config::AppConfig,
    error::{CliError, CliResult},
};

/// Marker from `--marker`, falling back to `scan.marker_annotation`.
pub(crate) fn resolve_marker(scan: &ScanArgs, config: &AppConfig) -> CliResult<QualifiedName> {
    let raw = scan
        .marker
        .as_deref()
        .unwrap_or(&config.scan.marker_annotation);

    QualifiedName::new(raw).map_err(|e| CliError::InvalidMarker {
        marker: raw.to_string(),
        reason: e.to_string(),
    })
}

pub(crate) fn candidate_source(scan: &ScanArgs) -> ManifestCandidateSource {
    ManifestCandidateSource::new(scan.inputs.iter().cloned())
}
