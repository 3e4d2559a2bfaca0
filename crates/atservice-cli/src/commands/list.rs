//! Implementation of the `atservice list` command.

use tracing::instrument;

use atservice_core::{
    application::{CandidateSource, Registrar},
    domain::ServiceRegistry,
};

use crate::{
    cli::{ListArgs, ListFormat},
    commands::{candidate_source, resolve_marker},
    config::AppConfig,
    error::{CliError, CliResult},
    output::OutputManager,
};

/// Collect the registry and print it; nothing is written.
#[instrument(skip_all, fields(inputs = args.scan.inputs.len()))]
pub fn execute(args: ListArgs, config: AppConfig, output: OutputManager) -> CliResult<()> {
    let marker = resolve_marker(&args.scan, &config)?;
    let candidates = candidate_source(&args.scan).candidates()?;

    let registry = Registrar::collect_with(marker.as_str(), &candidates);

    match args.format {
        ListFormat::Table => {
            if registry.is_empty() {
                output.info("No services found")?;
                return Ok(());
            }
            output.header(&format!(
                "Service registry ({} services, {} entries):",
                registry.len(),
                registry.pair_count()
            ))?;
            for (service, implementations) in &registry {
                output.print(&format!("  {service}"))?;
                for implementation in implementations {
                    output.detail(&format!("    - {implementation}"))?;
                }
            }
        }

        ListFormat::List => {
            for service in registry.services() {
                output.data(service.as_str())?;
            }
        }

        // Bypasses quiet mode so the output stays parseable in pipes.
        ListFormat::Json => {
            output.data(&to_json(&registry)?)?;
        }

        ListFormat::Csv => {
            output.data("service,implementation")?;
            for (service, implementations) in &registry {
                for implementation in implementations {
                    output.data(&format!("{service},{implementation}"))?;
                }
            }
        }
    }

    Ok(())
}

fn to_json(registry: &ServiceRegistry) -> CliResult<String> {
    serde_json::to_string_pretty(registry).map_err(|e| CliError::InvalidInput {
        message: format!("Failed to serialise registry: {e}"),
        source: Some(Box::new(e)),
    })
}
