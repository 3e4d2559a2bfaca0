//! Implementation of the `atservice generate` command.
//!
//! Responsibility: turn CLI arguments into a candidate source and a
//! registrar, run it, and display the per-entry outcomes. No business logic
//! lives here.

use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::{debug, info, instrument};

use atservice_adapters::LocalFilesystem;
use atservice_core::{
    application::{CandidateSource, EmitOutcome, EmitReport, EmitStatus, Registrar},
    domain::{QualifiedName, ServiceRegistry, registry_file_path},
};

use crate::{
    cli::{GenerateArgs, OutputFormat},
    commands::{candidate_source, resolve_marker},
    config::AppConfig,
    error::{CliError, CliResult},
    output::OutputManager,
};

/// Execute the `atservice generate` command.
///
/// 1. Resolve marker, output root and strictness (flags over config)
/// 2. Load candidates from the manifests
/// 3. Collect, then either describe (`--dry-run`) or emit
/// 4. Fail with [`CliError::PartialEmission`] under `--strict`
#[instrument(skip_all, fields(inputs = args.scan.inputs.len()))]
pub fn execute(args: GenerateArgs, config: AppConfig, output: OutputManager) -> CliResult<()> {
    let marker = resolve_marker(&args.scan, &config)?;
    let root = args.output.clone().unwrap_or_else(|| config.output.root.clone());
    let strict = args.strict || config.generate.strict;

    debug!(marker = %marker, root = %root.display(), strict, dry_run = args.dry_run, "Generate resolved");

    let source = candidate_source(&args.scan);
    let registrar = Registrar::new(Box::new(LocalFilesystem::new())).with_marker(marker);

    if args.dry_run {
        let candidates = source.candidates()?;
        let registry = registrar.collect(&candidates);
        return show_plan(&registry, &root, &output);
    }

    info!(source = %source.describe(), "Generating registry files");
    let report = registrar.run(&source, &root)?;
    show_report(&report, &output)?;

    if strict && !report.is_success() {
        return Err(CliError::PartialEmission {
            failed: report.failed_count(),
            total: report.outcomes().len(),
        });
    }

    Ok(())
}

// ── Rendering ─────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
struct GenerateSummary<'a> {
    root: String,
    dry_run: bool,
    written: usize,
    failed: usize,
    entries: Vec<EntrySummary<'a>>,
}

#[derive(Debug, Serialize)]
struct EntrySummary<'a> {
    service: &'a str,
    path: String,
    status: &'static str,
    implementations: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

impl<'a> From<&'a EmitOutcome> for EntrySummary<'a> {
    fn from(outcome: &'a EmitOutcome) -> Self {
        let (status, implementations) = match &outcome.status {
            EmitStatus::Written { implementations } => ("written", *implementations),
            EmitStatus::Failed { .. } => ("failed", 0),
        };
        Self {
            service: outcome.service.as_str(),
            path: outcome.path.display().to_string(),
            status,
            implementations,
            error: outcome.diagnostic(),
        }
    }
}

fn show_report(report: &EmitReport, output: &OutputManager) -> CliResult<()> {
    if output.format() == OutputFormat::Json {
        let summary = GenerateSummary {
            root: report.root().display().to_string(),
            dry_run: false,
            written: report.written_count(),
            failed: report.failed_count(),
            entries: report.outcomes().iter().map(EntrySummary::from).collect(),
        };
        return print_json(&summary, output);
    }

    if report.is_empty() {
        output.info("No annotated candidates found; nothing to write")?;
        return Ok(());
    }

    for outcome in report.outcomes() {
        match &outcome.status {
            EmitStatus::Written { implementations } => output.success(&format!(
                "{} ({} {})",
                outcome.path.display(),
                implementations,
                plural(*implementations, "implementation"),
            ))?,
            EmitStatus::Failed { .. } => {
                if let Some(diagnostic) = outcome.diagnostic() {
                    output.error(&diagnostic)?;
                }
            }
        }
    }

    output.print("")?;
    output.info(&format!(
        "Wrote {} of {} registry {} under {}",
        report.written_count(),
        report.outcomes().len(),
        plural(report.outcomes().len(), "file"),
        report.root().display(),
    ))?;
    if !report.is_success() {
        output.warning(&format!(
            "{} registry {} could not be written",
            report.failed_count(),
            plural(report.failed_count(), "file"),
        ))?;
    }

    Ok(())
}

fn show_plan(registry: &ServiceRegistry, root: &Path, output: &OutputManager) -> CliResult<()> {
    if output.format() == OutputFormat::Json {
        let entries = registry
            .iter()
            .map(|(service, implementations)| EntrySummary {
                service: service.as_str(),
                path: planned_path(root, service).display().to_string(),
                status: "planned",
                implementations: implementations.len(),
                error: None,
            })
            .collect();
        let summary = GenerateSummary {
            root: root.display().to_string(),
            dry_run: true,
            written: 0,
            failed: 0,
            entries,
        };
        return print_json(&summary, output);
    }

    if registry.is_empty() {
        output.info("Dry run: no annotated candidates found; nothing would be written")?;
        return Ok(());
    }

    output.info(&format!(
        "Dry run: would write {} registry {} under {}",
        registry.len(),
        plural(registry.len(), "file"),
        root.display(),
    ))?;
    for (service, implementations) in registry {
        output.print(&format!("  {}", planned_path(root, service).display()))?;
        for implementation in implementations {
            output.detail(&format!("    {implementation}"))?;
        }
    }

    Ok(())
}

fn planned_path(root: &Path, service: &QualifiedName) -> PathBuf {
    root.join(registry_file_path(service))
}

fn print_json<T: Serialize>(value: &T, output: &OutputManager) -> CliResult<()> {
    let json = serde_json::to_string_pretty(value).map_err(|e| CliError::InvalidInput {
        message: format!("Failed to serialise summary: {e}"),
        source: Some(Box::new(e)),
    })?;
    output.data(&json)?;
    Ok(())
}

fn plural(count: usize, noun: &str) -> String {
    if count == 1 {
        noun.to_string()
    } else {
        format!("{noun}s")
    }
}
