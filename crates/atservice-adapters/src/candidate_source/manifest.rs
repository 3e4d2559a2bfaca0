//! Manifest-based candidate source.
//!
//! A host build tool describes the types it discovered in a manifest file,
//! TOML or JSON, chosen by file extension.
//!
//! # Manifest format
//!
//! ```toml
//! [[types]]
//! name       = "com.example.BarImpl"     # omitted when unresolvable
//! interfaces = ["com.example.Foo"]       # directly-declared only
//!
//! [[types.annotations]]
//! type  = "org.commonjava.atservice.annotation.Service"
//! value = ["com.example.Foo.class", "com.example.Baz.class"]   # or a single string
//! ```
//!
//! The JSON form mirrors it: `{"types": [{"name": ..., "annotations": [...]}]}`.
//!
//! # Inputs
//!
//! Each input is a manifest file or a directory. Directories are walked for
//! files ending in `.atservice.toml` / `.atservice.json`, in sorted path
//! order; an unreadable directory entry, or a manifest inside a directory
//! that fails to load, is skipped with a `WARN`. An explicitly named file that fails to load is an error.

use std::{
    fs,
    path::{Path, PathBuf},
};

use serde::Deserialize;
use tracing::{debug, instrument, warn};
use walkdir::WalkDir;

use atservice_core::{
    application::{ApplicationError, ports::CandidateSource},
    domain::{AnnotationInstance, AnnotationValue, TypeDescriptor},
    error::{AtserviceError, AtserviceResult},
};

/// File-name suffixes recognised when walking a directory.
pub const MANIFEST_SUFFIXES: [&str; 2] = [".atservice.toml", ".atservice.json"];

// ── Manifest types ────────────────────────────────────────────────────────────

/// Deserialised candidate manifest.
#[derive(Debug, Deserialize, Clone, Default)]
pub struct CandidateManifest {
    #[serde(default)]
    pub types: Vec<TypeEntry>,
}

/// One `[[types]]` entry.
#[derive(Debug, Deserialize, Clone)]
pub struct TypeEntry {
    /// Fully-qualified name; absent when the host could not resolve it.
    pub name: Option<String>,
    /// Interfaces the type directly declares.
    #[serde(default)]
    pub interfaces: Vec<String>,
    #[serde(default)]
    pub annotations: Vec<AnnotationEntry>,
}

/// One annotation attached to a type.
#[derive(Debug, Deserialize, Clone)]
pub struct AnnotationEntry {
    /// Qualified annotation type name.
    #[serde(rename = "type")]
    pub annotation_type: String,
    /// A single value or an array of values.
    pub value: Option<AnnotationValue>,
}

impl From<TypeEntry> for TypeDescriptor {
    fn from(entry: TypeEntry) -> Self {
        let base = match entry.name {
            Some(name) => TypeDescriptor::named(name),
            None => TypeDescriptor::unnamed(),
        };

        let base = entry
            .annotations
            .into_iter()
            .map(|a| AnnotationInstance::new(a.annotation_type).with_annotation_value(a.value))
            .fold(base, TypeDescriptor::annotated);

        entry
            .interfaces
            .into_iter()
            .fold(base, TypeDescriptor::implementing)
    }
}

/// Manifest serialisation format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ManifestFormat {
    Toml,
    Json,
}

impl ManifestFormat {
    /// Detect the format from the file extension.
    pub fn from_path(path: &Path) -> Option<Self> {
        match path.extension()?.to_str()?.to_ascii_lowercase().as_str() {
            "toml" => Some(Self::Toml),
            "json" => Some(Self::Json),
            _ => None,
        }
    }
}

/// Parse manifest text into candidates, in declaration order.
///
/// `source_name` only labels errors.
pub fn parse_manifest(
    raw: &str,
    format: ManifestFormat,
    source_name: &str,
) -> AtserviceResult<Vec<TypeDescriptor>> {
    let failed = |reason: String| -> AtserviceError {
        ApplicationError::CandidateSourceFailed {
            source_name: source_name.to_string(),
            reason,
        }
        .into()
    };

    let manifest: CandidateManifest = match format {
        ManifestFormat::Toml => toml::from_str(raw).map_err(|e| failed(e.to_string()))?,
        ManifestFormat::Json => serde_json::from_str(raw).map_err(|e| failed(e.to_string()))?,
    };

    Ok(manifest.types.into_iter().map(TypeDescriptor::from).collect())
}

// ── Source ────────────────────────────────────────────────────────────────────

/// Candidate source backed by manifest files and directories.
#[derive(Debug, Clone)]
pub struct ManifestCandidateSource {
    inputs: Vec<PathBuf>,
}

impl ManifestCandidateSource {
    pub fn new<I, P>(inputs: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        Self {
            inputs: inputs.into_iter().map(Into::into).collect(),
        }
    }

    pub fn inputs(&self) -> &[PathBuf] {
        &self.inputs
    }

    /// Load one manifest file.
    #[instrument(skip_all, fields(path = %path.display()))]
    pub fn load_file(path: &Path) -> AtserviceResult<Vec<TypeDescriptor>> {
        let source_name = path.display().to_string();

        let format = ManifestFormat::from_path(path).ok_or_else(|| {
            ApplicationError::CandidateSourceFailed {
                source_name: source_name.clone(),
                reason: "unsupported manifest extension (expected .toml or .json)".into(),
            }
        })?;

        let raw = fs::read_to_string(path).map_err(|e| ApplicationError::CandidateSourceFailed {
            source_name: source_name.clone(),
            reason: format!("failed to read: {e}"),
        })?;

        let candidates = parse_manifest(&raw, format, &source_name)?;
        debug!(count = candidates.len(), "loaded manifest");
        Ok(candidates)
    }

    /// Load every manifest found below `dir`.
    #[instrument(skip_all, fields(dir = %dir.display()))]
    fn load_dir(dir: &Path) -> Vec<TypeDescriptor> {
        let mut candidates = Vec::new();

        for path in manifest_paths(dir) {
            match Self::load_file(&path) {
                Ok(found) => candidates.extend(found),
                Err(e) => {
                    // One bad manifest must not hide the others.
                    warn!(
                        path  = %path.display(),
                        error = %e,
                        "skipping manifest due to load error"
                    );
                }
            }
        }

        candidates
    }
}

/// Manifest files under `dir`, sorted by file name at each level.
///
/// Unreadable entries are logged and skipped.
fn manifest_paths(dir: &Path) -> Vec<PathBuf> {
    let mut paths = Vec::new();

    for entry in WalkDir::new(dir).sort_by_file_name() {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                warn!(
                    path  = %e.path().unwrap_or(dir).display(),
                    error = %e,
                    "skipping unreadable directory entry"
                );
                continue;
            }
        };

        if entry.file_type().is_file() && is_manifest_name(entry.path()) {
            paths.push(entry.into_path());
        }
    }

    paths
}

impl CandidateSource for ManifestCandidateSource {
    fn describe(&self) -> String {
        self.inputs
            .iter()
            .map(|p| p.display().to_string())
            .collect::<Vec<_>>()
            .join(", ")
    }

    fn candidates(&self) -> AtserviceResult<Vec<TypeDescriptor>> {
        let mut candidates = Vec::new();

        for input in &self.inputs {
            if input.is_dir() {
                candidates.extend(Self::load_dir(input));
            } else if input.is_file() {
                candidates.extend(Self::load_file(input)?);
            } else {
                return Err(ApplicationError::CandidateSourceNotFound {
                    path: input.clone(),
                }
                .into());
            }
        }

        debug!(count = candidates.len(), "finished loading candidates");
        Ok(candidates)
    }
}

fn is_manifest_name(path: &Path) -> bool {
    path.file_name()
        .and_then(|n| n.to_str())
        .is_some_and(|name| MANIFEST_SUFFIXES.iter().any(|s| name.ends_with(s)))
}

// ── Tests ─────────────────────────────────────────────────────────────────────
