//! Candidate source adapters.

mod manifest;
mod memory;

pub use manifest::{
    AnnotationEntry, CandidateManifest, MANIFEST_SUFFIXES, ManifestCandidateSource,
    ManifestFormat, TypeEntry, parse_manifest,
};
pub use memory::InMemoryCandidateSource;
