//! CLI argument definitions using the clap derive API.
//!
//! This module is the *only* place that knows about argument names, aliases,
//! help text, and value enums.  No business logic lives here.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

pub mod global;
pub use global::{GlobalArgs, OutputFormat};

// ── Top-level CLI ─────────────────────────────────────────────────────────────

/// Main CLI entry-point.
#[derive(Debug, Parser)]
#[command(
    name    = "atservice",
    bin_name = "atservice",
    version  = env!("CARGO_PKG_VERSION"),
    author   = env!("CARGO_PKG_AUTHORS"),
    about    = "Generate META-INF/services registry files",
    long_about = "atservice groups annotated implementation types by the service \
                  they provide and writes one META-INF/services/<service> file \
                  per service.",
    after_help = "EXAMPLES:\n\
        \x20 atservice generate build/types.atservice.toml -o build/classes\n\
        \x20 atservice generate build/manifests --strict\n\
        \x20 atservice list build/manifests --format json\n\
        \x20 atservice completions bash > /usr/share/bash-completion/completions/atservice",
    arg_required_else_help = true,
    subcommand_required    = true,
)]
pub struct Cli {
    /// Flags available on every subcommand.
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

// ── Subcommands ───────────────────────────────────────────────────────────────

/// All available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Collect candidates and write registry files.
    #[command(
        visible_alias = "gen",
        about = "Write registry files",
        after_help = "EXAMPLES:\n\
            \x20 atservice generate types.atservice.toml\n\
            \x20 atservice generate manifests/ -o target/classes\n\
            \x20 atservice generate manifests/ --marker com.acme.Provides --dry-run"
    )]
    Generate(GenerateArgs),

    /// Show the registry that would be written.
    #[command(
        visible_alias = "ls",
        about = "Show the service registry without writing",
        after_help = "EXAMPLES:\n\
            \x20 atservice list manifests/\n\
            \x20 atservice list types.atservice.json --format json"
    )]
    List(ListArgs),

    /// Initialise an atservice configuration file.
    #[command(
        about = "Initialise configuration",
        after_help = "EXAMPLES:\n\
            \x20 atservice init           # default location\n\
            \x20 atservice init --local   # .atservice.toml in CWD"
    )]
    Init(InitArgs),

    /// Generate shell completion scripts.
    #[command(
        about = "Generate shell completions",
        after_help = "EXAMPLES:\n\
            \x20 atservice completions bash > ~/.local/share/bash-completion/completions/atservice\n\
            \x20 atservice completions zsh  > ~/.zfunc/_atservice\n\
            \x20 atservice completions fish > ~/.config/fish/completions/atservice.fish"
    )]
    Completions(CompletionsArgs),

    /// Inspect the atservice configuration.
    #[command(
        about = "Configuration inspection",
        subcommand,
        after_help = "EXAMPLES:\n\
            \x20 atservice config get scan.marker_annotation\n\
            \x20 atservice config list\n\
            \x20 atservice config path"
    )]
    Config(ConfigCommands),
}

// ── shared input ──────────────────────────────────────────────────────────────

/// Where candidates come from, shared by `generate` and `list`.
#[derive(Debug, Args)]
pub struct ScanArgs {
    /// Candidate manifests or directories containing them.
    #[arg(
        value_name = "INPUT",
        required = true,
        num_args = 1..,
        help = "Manifest files (.toml/.json) or directories of *.atservice.* manifests"
    )]
    pub inputs: Vec<PathBuf>,

    /// Marker annotation to look for.
    #[arg(
        short = 'm',
        long = "marker",
        value_name = "ANNOTATION",
        help = "Qualified name of the marker annotation"
    )]
    pub marker: Option<String>,
}

// ── generate ──────────────────────────────────────────────────────────────────

/// Arguments for `atservice generate`.
#[derive(Debug, Args)]
pub struct GenerateArgs {
    #[command(flatten)]
    pub scan: ScanArgs,

    /// Output root; registry files land in `<DIR>/META-INF/services/`.
    #[arg(
        short = 'o',
        long = "output",
        value_name = "DIR",
        help = "Output root directory (default from config: output.root)"
    )]
    pub output: Option<PathBuf>,

    /// Exit non-zero when any registry file could not be written.
    #[arg(long = "strict", help = "Fail if any registry file could not be written")]
    pub strict: bool,

    /// Preview what would be written without writing any files.
    #[arg(long = "dry-run", help = "Show what would be written without writing")]
    pub dry_run: bool,
}

// ── list ──────────────────────────────────────────────────────────────────────

/// Arguments for `atservice list`.
#[derive(Debug, Args)]
pub struct ListArgs {
    #[command(flatten)]
    pub scan: ScanArgs,

    /// Output format.
    #[arg(
        long = "format",
        value_enum,
        default_value = "table",
        help = "Output format"
    )]
    pub format: ListFormat,
}

/// Output format for the `list` command.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ListFormat {
    /// Human-readable table.
    Table,
    /// One service name per line.
    List,
    /// JSON object of service -> implementations.
    Json,
    /// CSV rows.
    Csv,
}

// ── init ──────────────────────────────────────────────────────────────────────

/// Arguments for `atservice init`.
#[derive(Debug, Args)]
pub struct InitArgs {
    /// Write to `.atservice.toml` in the current directory.
    #[arg(
        long = "local",
        help = "Create local configuration in current directory"
    )]
    pub local: bool,

    /// Overwrite an existing config file.
    #[arg(short = 'f', long = "force", help = "Overwrite existing configuration")]
    pub force: bool,
}

// ── completions ───────────────────────────────────────────────────────────────

/// Arguments for `atservice completions`.
#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Target shell.
    #[arg(value_enum, help = "Shell to generate completions for")]
    pub shell: Shell,
}

/// Supported shells for completion generation.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    #[value(name = "powershell")]
    PowerShell,
    Elvish,
}

// ── config subcommands ────────────────────────────────────────────────────────

/// Subcommands for `atservice config`.
#[derive(Debug, Subcommand)]
pub enum ConfigCommands {
    /// Print the value of a configuration key.
    Get {
        /// Dotted key path, e.g. `output.root`.
        key: String,
    },
    /// Print all configuration values.
    List,
    /// Print the path to the default configuration file.
    Path,
}

// ── tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use clap::{CommandFactory, Parser};

    #[test]
    fn verify_cli_structure() {
        // clap internal consistency check: conflicts, missing values
        Cli::command().debug_assert();
    }

    #[test]
    fn parse_generate_command() {
        let cli = Cli::parse_from([
            "atservice",
            "generate",
            "a.atservice.toml",
            "manifests",
            "-o",
            "out",
            "--strict",
        ]);
        let Commands::Generate(args) = cli.command else {
            panic!("expected Generate command");
        };
        assert_eq!(
            args.scan.inputs,
            [PathBuf::from("a.atservice.toml"), PathBuf::from("manifests")]
        );
        assert_eq!(args.output, Some(PathBuf::from("out")));
        assert!(args.strict);
        assert!(!args.dry_run);
    }

    #[test]
    fn gen_alias_and_marker() {
        let cli = Cli::parse_from(["atservice", "gen", "in.toml", "--marker", "com.acme.Provides"]);
        let Commands::Generate(args) = cli.command else {
            panic!("expected Generate command");
        };
        assert_eq!(args.scan.marker.as_deref(), Some("com.acme.Provides"));
    }

    #[test]
    fn generate_requires_an_input() {
        assert!(Cli::try_parse_from(["atservice", "generate"]).is_err());
    }

    #[test]
    fn list_defaults_to_table() {
        let cli = Cli::parse_from(["atservice", "ls", "in.json"]);
        assert!(matches!(
            cli.command,
            Commands::List(ListArgs {
                format: ListFormat::Table,
                ..
            })
        ));
    }

    #[test]
    fn quiet_and_verbose_conflict() {
        // clap should reject --quiet --verbose together
        let result = Cli::try_parse_from(["atservice", "--quiet", "--verbose", "list", "x.toml"]);
        assert!(result.is_err());
    }
}
