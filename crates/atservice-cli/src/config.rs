//! Application configuration.
//!
//! [`AppConfig`] is loaded once at startup and passed down by value.  The
//! CLI layer owns config; the core crate never sees it.
//!
//! # Resolution order (highest priority first)
//!
//! 1. CLI flags (handled at the call-site, not here)
//! 2. Environment variables `ATSERVICE__<SECTION>__<KEY>`
//! 3. `./.atservice.toml` in the working directory
//! 4. The `--config` file, or the platform config file
//! 5. Built-in defaults (always present)

use std::path::{Path, PathBuf};

use anyhow::Context;
use config::{Config, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};

use atservice_core::domain::DEFAULT_MARKER_ANNOTATION;

/// File name of the per-directory configuration.
pub const LOCAL_CONFIG_FILE: &str = ".atservice.toml";

/// Prefix for environment overrides.
const ENV_PREFIX: &str = "ATSERVICE";

/// Application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Candidate scanning.
    pub scan: ScanConfig,
    /// Output settings.
    pub output: OutputConfig,
    /// `generate` behaviour.
    pub generate: GenerateConfig,
    /// Log sinks.
    pub log: LogConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScanConfig {
    pub marker_annotation: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Directory under which `META-INF/services` is created.
    pub root: PathBuf,
    pub no_color: bool,
    /// `auto`, `human`, `plain` or `json`.
    pub format: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerateConfig {
    pub strict: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<PathBuf>,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            marker_annotation: DEFAULT_MARKER_ANNOTATION.into(),
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from("."),
            no_color: false,
            format: "auto".into(),
        }
    }
}

impl AppConfig {
    /// Load configuration from defaults, files and the environment.
    ///
    /// `config_file` is the path the user passed via `--config`; when given it
    /// must exist.  Otherwise the platform config file is used if present.
    pub fn load(config_file: Option<&PathBuf>) -> anyhow::Result<Self> {
        let local = PathBuf::from(LOCAL_CONFIG_FILE);
        Self::load_from(config_file.map(PathBuf::as_path), &local)
    }

    fn load_from(config_file: Option<&Path>, local: &Path) -> anyhow::Result<Self> {
        let defaults =
            Config::try_from(&Self::default()).context("Failed to encode built-in defaults")?;

        let mut builder = Config::builder().add_source(defaults);

        builder = match config_file {
            Some(path) => {
                if !path.is_file() {
                    anyhow::bail!("config file '{}' does not exist", path.display());
                }
                builder.add_source(File::from(path).format(FileFormat::Toml))
            }
            None => builder.add_source(
                File::from(Self::config_path())
                    .format(FileFormat::Toml)
                    .required(false),
            ),
        };

        let settings = builder
            .add_source(File::from(local).format(FileFormat::Toml).required(false))
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .context("Failed to read configuration")?;

        settings
            .try_deserialize()
            .context("Failed to parse configuration")
    }

    /// Path to the default configuration file.
    ///
    /// Uses `directories::ProjectDirs` for cross-platform correctness,
    /// falling back to `.atservice.toml` in the current directory.
    pub fn config_path() -> PathBuf {
        directories::ProjectDirs::from("com", "atservice", "atservice")
            .map(|d| d.config_dir().join("config.toml"))
            .unwrap_or_else(|| PathBuf::from(LOCAL_CONFIG_FILE))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn default_marker_is_service_annotation() {
        let cfg = AppConfig::default();
        assert_eq!(
            cfg.scan.marker_annotation,
            "org.commonjava.atservice.annotation.Service"
        );
        assert_eq!(cfg.output.root, PathBuf::from("."));
        assert!(!cfg.generate.strict);
    }

    #[test]
    fn missing_local_file_yields_defaults() {
        let temp = TempDir::new().unwrap();
        let explicit = temp.path().join("config.toml");
        fs::write(&explicit, "").unwrap();

        let cfg = AppConfig::load_from(Some(&explicit), &temp.path().join("absent.toml")).unwrap();
        assert_eq!(cfg.output.format, "auto");
        assert!(cfg.log.file.is_none());
    }

    #[test]
    fn local_file_overrides_explicit_file() {
        let temp = TempDir::new().unwrap();
        let explicit = temp.path().join("config.toml");
        let local = temp.path().join(LOCAL_CONFIG_FILE);
        fs::write(
            &explicit,
            "[output]\nroot = \"build/classes\"\n[generate]\nstrict = true\n",
        )
        .unwrap();
        fs::write(&local, "[output]\nroot = \"target/classes\"\n").unwrap();

        let cfg = AppConfig::load_from(Some(&explicit), &local).unwrap();
        assert_eq!(cfg.output.root, PathBuf::from("target/classes"));
        assert!(cfg.generate.strict);
        assert_eq!(cfg.scan.marker_annotation, DEFAULT_MARKER_ANNOTATION);
    }

    #[test]
    fn explicit_missing_file_is_error() {
        let temp = TempDir::new().unwrap();
        let result = AppConfig::load_from(
            Some(&temp.path().join("nope.toml")),
            &temp.path().join("absent.toml"),
        );
        assert!(result.is_err());
    }

    #[test]
    fn malformed_file_is_error() {
        let temp = TempDir::new().unwrap();
        let explicit = temp.path().join("config.toml");
        fs::write(&explicit, "[output\nroot = ").unwrap();

        assert!(AppConfig::load_from(Some(&explicit), &temp.path().join("absent.toml")).is_err());
    }

    #[test]
    fn config_round_trips_through_toml() {
        let raw = toml::to_string_pretty(&AppConfig::default()).unwrap();
        assert!(raw.contains("marker_annotation"));
        let back: AppConfig = toml::from_str(&raw).unwrap();
        assert_eq!(back.output.format, "auto");
    }

    #[test]
    fn config_path_is_not_empty() {
        let p = AppConfig::config_path();
        assert!(!p.as_os_str().is_empty());
    }
}
