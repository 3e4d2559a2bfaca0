use std::path::{Path, PathBuf};

use indexmap::{IndexMap, IndexSet, map::Entry};
use serde::Serialize;

use crate::domain::value_objects::QualifiedName;

/// Conventional directory, relative to the output root, holding registry files.
pub const SERVICES_DIR: &str = "META-INF/services";

/// Line terminator used in registry files.
const LINE_TERMINATOR: &str = "\n";

/// An implementation together with the services it declares.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImplementationRecord {
    implementation: QualifiedName,
    services: Vec<QualifiedName>,
}

impl ImplementationRecord {
    pub fn new(implementation: QualifiedName, services: Vec<QualifiedName>) -> Self {
        Self {
            implementation,
            services,
        }
    }

    pub fn implementation(&self) -> &QualifiedName {
        &self.implementation
    }

    pub fn services(&self) -> &[QualifiedName] {
        &self.services
    }

    /// `true` if the record contributes to no service.
    pub fn is_empty(&self) -> bool {
        self.services.is_empty()
    }
}

/// Service name -> implementations, both in first-seen order.
///
/// An implementation appears at most once per service. Built fresh for each
/// scan and consumed by emission; nothing here is shared between scans.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ServiceRegistry {
    entries: IndexMap<QualifiedName, IndexSet<QualifiedName>>,
}

impl ServiceRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `implementation` under `service`.
    ///
    /// Returns `false` if it was already registered for that service.
    pub fn register(&mut self, service: QualifiedName, implementation: QualifiedName) -> bool {
        match self.entries.entry(service) {
            Entry::Occupied(mut entry) => entry.get_mut().insert(implementation),
            Entry::Vacant(entry) => {
                entry.insert(IndexSet::new()).insert(implementation);
                true
            }
        }
    }

    /// Register a record under each of its services.
    ///
    /// Returns the number of new (service, implementation) pairs.
    pub fn add_record(&mut self, record: &ImplementationRecord) -> usize {
        record
            .services()
            .iter()
            .filter(|service| {
                self.register((*service).clone(), record.implementation().clone())
            })
            .count()
    }

    pub fn implementations(&self, service: &str) -> Option<impl Iterator<Item = &QualifiedName>> {
        self.entries.get(service).map(|set| set.iter())
    }

    pub fn services(&self) -> impl Iterator<Item = &QualifiedName> {
        self.entries.keys()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&QualifiedName, &IndexSet<QualifiedName>)> {
        self.entries.iter()
    }

    /// Number of distinct services.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Total (service, implementation) pairs.
    pub fn pair_count(&self) -> usize {
        self.entries.values().map(IndexSet::len).sum()
    }
}

impl<'a> IntoIterator for &'a ServiceRegistry {
    type Item = (&'a QualifiedName, &'a IndexSet<QualifiedName>);
    type IntoIter = indexmap::map::Iter<'a, QualifiedName, IndexSet<QualifiedName>>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

/// Path of the registry file for `service`, relative to the output root.
pub fn registry_file_path(service: &QualifiedName) -> PathBuf {
    Path::new(SERVICES_DIR).join(service.as_str())
}

/// Registry file body: one name per line, each line terminated.
pub fn registry_file_contents<'a, I>(implementations: I) -> String
where
    I: IntoIterator<Item = &'a QualifiedName>,
{
    implementations.into_iter().fold(String::new(), |mut out, name| {
        out.push_str(name.as_str());
        out.push_str(LINE_TERMINATOR);
        out
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn qn(s: &str) -> QualifiedName {
        QualifiedName::new(s).unwrap()
    }

    #[test]
    fn preserves_first_insertion_and_suppresses_duplicates() {
        let mut registry = ServiceRegistry::new();
        let svc = qn("com.example.Svc");

        assert!(registry.register(svc.clone(), qn("A")));
        assert!(registry.register(svc.clone(), qn("B")));
        assert!(!registry.register(svc.clone(), qn("A")));
        assert!(registry.register(svc.clone(), qn("C")));

        let impls: Vec<_> = registry
            .implementations("com.example.Svc")
            .unwrap()
            .map(QualifiedName::as_str)
            .collect();
        assert_eq!(impls, ["A", "B", "C"]);
        assert_eq!(registry.pair_count(), 3);
    }

    #[test]
    fn services_keep_first_seen_order() {
        let mut registry = ServiceRegistry::new();
        registry.register(qn("z.Last"), qn("x.Impl"));
        registry.register(qn("a.First"), qn("x.Impl"));

        let services: Vec<_> = registry.services().map(QualifiedName::as_str).collect();
        assert_eq!(services, ["z.Last", "a.First"]);
    }

    #[test]
    fn record_with_repeated_service_registers_once() {
        let mut registry = ServiceRegistry::new();
        let record = ImplementationRecord::new(qn("x.Impl"), vec![qn("x.Svc"), qn("x.Svc")]);

        assert_eq!(registry.add_record(&record), 1);
        assert_eq!(registry.len(), 1);
        assert_eq!(registry.pair_count(), 1);
    }

    #[test]
    fn empty_record_creates_no_entry() {
        let mut registry = ServiceRegistry::new();
        let record = ImplementationRecord::new(qn("x.Impl"), Vec::new());

        assert_eq!(registry.add_record(&record), 0);
        assert!(registry.is_empty());
    }

    #[test]
    fn file_contents_are_newline_terminated() {
        let names = [qn("A"), qn("B"), qn("C")];
        assert_eq!(registry_file_contents(&names), "A\nB\nC\n");
        assert_eq!(registry_file_contents(&[] as &[QualifiedName]), "");
    }

    #[test]
    fn file_path_uses_services_dir() {
        assert_eq!(
            registry_file_path(&qn("com.example.Foo")),
            Path::new("META-INF").join("services").join("com.example.Foo")
        );
    }

    #[test]
    fn serializes_as_ordered_map() {
        let mut registry = ServiceRegistry::new();
        registry.register(qn("b.Svc"), qn("b.Impl"));
        registry.register(qn("a.Svc"), qn("a.Impl"));

        let json = serde_json::to_string(&registry).unwrap();
        assert_eq!(json, r#"{"b.Svc":["b.Impl"],"a.Svc":["a.Impl"]}"#);
    }
}
