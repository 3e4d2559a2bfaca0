//! Domain value objects: qualified type names.
//!
//! # Design
//!
//! Names are opaque UTF-8 strings. The only normalisation applied is
//! trimming surrounding whitespace and, for type references, stripping a
//! trailing `.class` suffix. A name must fit on one line of a registry file
//! and in one path component, so whitespace, path separators and the
//! relative components `.` and `..` are rejected.

use crate::domain::error::DomainError;
use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::fmt;
use std::str::FromStr;

/// Suffix a host appends when rendering a type reference (`Foo.class`).
pub const TYPE_REFERENCE_SUFFIX: &str = ".class";

// ── QualifiedName ────────────────────────────────────────────────────────────

/// Fully-qualified name of a type, e.g. `com.example.FooImpl`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct QualifiedName(String);

impl QualifiedName {
    /// Validate and wrap a qualified name.
    pub fn new(raw: impl AsRef<str>) -> Result<Self, DomainError> {
        let raw = raw.as_ref();
        let name = raw.trim();

        let invalid = |reason| DomainError::InvalidName {
            name: raw.to_string(),
            reason,
        };

        if name.is_empty() {
            return Err(invalid("name is empty"));
        }
        if name.chars().any(|c| c.is_whitespace() || c.is_control()) {
            return Err(invalid("name contains whitespace or control characters"));
        }
        if name.contains(['/', '\\']) {
            return Err(invalid("name contains a path separator"));
        }
        if name == "." || name == ".." {
            return Err(invalid("name is a relative path component"));
        }

        Ok(Self(name.to_string()))
    }

    /// Parse a type reference as rendered by a host, stripping a trailing
    /// `.class` suffix (`com.example.Foo.class` -> `com.example.Foo`).
    pub fn from_type_reference(raw: impl AsRef<str>) -> Result<Self, DomainError> {
        let trimmed = raw.as_ref().trim();
        let name = trimmed
            .strip_suffix(TYPE_REFERENCE_SUFFIX)
            .unwrap_or(trimmed);
        Self::new(name)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Last dotted segment (`com.example.FooImpl` -> `FooImpl`).
    pub fn simple_name(&self) -> &str {
        self.0.rsplit('.').next().unwrap_or(&self.0)
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for QualifiedName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for QualifiedName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

// Registry lookups by `&str`; hashing matches the inner `String`.
impl Borrow<str> for QualifiedName {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl FromStr for QualifiedName {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for QualifiedName {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<QualifiedName> for String {
    fn from(value: QualifiedName) -> Self {
        value.0
    }
}
