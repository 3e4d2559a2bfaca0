use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::domain::{entities::registry::ImplementationRecord, value_objects::QualifiedName};

/// Qualified name of the marker annotation recognised by default.
pub const DEFAULT_MARKER_ANNOTATION: &str = "org.commonjava.atservice.annotation.Service";

/// Value carried by an annotation instance.
///
/// Hosts render annotation members either as one value or as an array; both
/// shapes are accepted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AnnotationValue {
    Single(String),
    List(Vec<String>),
}

impl AnnotationValue {
    pub fn values(&self) -> impl Iterator<Item = &str> {
        let slice: &[String] = match self {
            Self::Single(value) => std::slice::from_ref(value),
            Self::List(values) => values,
        };
        slice.iter().map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        match self {
            Self::Single(_) => false,
            Self::List(values) => values.is_empty(),
        }
    }
}

/// One annotation attached to a type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnnotationInstance {
    annotation_type: String,
    value: Option<AnnotationValue>,
}

impl AnnotationInstance {
    pub fn new(annotation_type: impl Into<String>) -> Self {
        Self {
            annotation_type: annotation_type.into(),
            value: None,
        }
    }

    /// An instance of the default marker annotation with no value.
    pub fn marker() -> Self {
        Self::new(DEFAULT_MARKER_ANNOTATION)
    }

    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.value = Some(AnnotationValue::Single(value.into()));
        self
    }

    pub fn with_values<I, S>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.value = Some(AnnotationValue::List(
            values.into_iter().map(Into::into).collect(),
        ));
        self
    }

    pub fn with_annotation_value(mut self, value: Option<AnnotationValue>) -> Self {
        self.value = value;
        self
    }

    pub fn annotation_type(&self) -> &str {
        &self.annotation_type
    }

    pub fn value(&self) -> Option<&AnnotationValue> {
        self.value.as_ref()
    }

    pub fn is(&self, annotation_type: &str) -> bool {
        self.annotation_type.trim() == annotation_type
    }
}

/// A type handed over by the host for inspection.
///
/// The name is optional because a host may be unable to resolve it; such
/// descriptors are skipped.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TypeDescriptor {
    name: Option<String>,
    annotations: Vec<AnnotationInstance>,
    interfaces: Vec<String>,
}

impl TypeDescriptor {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::default()
        }
    }

    /// A descriptor whose qualified name could not be resolved.
    pub fn unnamed() -> Self {
        Self::default()
    }

    pub fn annotated(mut self, annotation: AnnotationInstance) -> Self {
        self.annotations.push(annotation);
        self
    }

    pub fn implementing(mut self, interface: impl Into<String>) -> Self {
        self.interfaces.push(interface.into());
        self
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn annotations(&self) -> &[AnnotationInstance] {
        &self.annotations
    }

    pub fn interfaces(&self) -> &[String] {
        &self.interfaces
    }

    /// Resolved qualified name, `None` when absent or unusable.
    pub fn qualified_name(&self) -> Option<QualifiedName> {
        let raw = self.name.as_deref()?;
        match QualifiedName::new(raw) {
            Ok(name) => Some(name),
            Err(e) => {
                debug!(name = raw, error = %e, "unresolvable type name");
                None
            }
        }
    }

    /// Service names explicitly listed on the marker annotation.
    ///
    /// Values that do not form a usable name are dropped.
    pub fn explicit_services(&self, marker: &str) -> Vec<QualifiedName> {
        self.annotations
            .iter()
            .filter(|a| a.is(marker))
            .filter_map(AnnotationInstance::value)
            .flat_map(AnnotationValue::values)
            .filter_map(|raw| match QualifiedName::from_type_reference(raw) {
                Ok(name) => Some(name),
                Err(e) => {
                    debug!(value = raw, error = %e, "ignoring unusable service reference");
                    None
                }
            })
            .collect()
    }

    /// Whether the marker annotation carries at least one raw value, usable
    /// or not.
    pub fn has_explicit_value(&self, marker: &str) -> bool {
        self.annotations
            .iter()
            .filter(|a| a.is(marker))
            .filter_map(AnnotationInstance::value)
            .any(|value| !value.is_empty())
    }

    /// Directly-declared interfaces as service names.
    pub fn declared_interfaces(&self) -> Vec<QualifiedName> {
        self.interfaces
            .iter()
            .filter_map(|raw| QualifiedName::new(raw).ok())
            .collect()
    }

    /// Resolve this descriptor into an implementation record.
    ///
    /// Explicit marker values take priority; otherwise the directly-declared
    /// interfaces are used. The choice follows the raw value, so a marker
    /// whose values are all unusable yields no services rather than the
    /// interfaces. Returns `None` when the name is unresolvable.
    /// The record may declare zero services.
    pub fn to_record(&self, marker: &str) -> Option<ImplementationRecord> {
        let implementation = self.qualified_name()?;

        let services = if self.has_explicit_value(marker) {
            self.explicit_services(marker)
        } else {
            trace!(implementation = %implementation, "no explicit services, using interfaces");
            self.declared_interfaces()
        };

        Some(ImplementationRecord::new(implementation, services))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(record: &ImplementationRecord) -> Vec<&str> {
        record.services().iter().map(QualifiedName::as_str).collect()
    }

    #[test]
    fn single_explicit_value_wins_over_interfaces() {
        let ty = TypeDescriptor::named("com.example.FooImpl")
            .annotated(AnnotationInstance::marker().with_value("com.example.Foo.class"))
            .implementing("com.example.Other");

        let record = ty.to_record(DEFAULT_MARKER_ANNOTATION).unwrap();
        assert_eq!(record.implementation().as_str(), "com.example.FooImpl");
        assert_eq!(names(&record), ["com.example.Foo"]);
    }

    #[test]
    fn list_value_yields_every_service() {
        let ty = TypeDescriptor::named("com.example.BarImpl").annotated(
            AnnotationInstance::marker().with_values(["com.example.Foo", "com.example.Baz.class"]),
        );

        let record = ty.to_record(DEFAULT_MARKER_ANNOTATION).unwrap();
        assert_eq!(names(&record), ["com.example.Foo", "com.example.Baz"]);
    }

    #[test]
    fn empty_list_falls_back_to_interfaces() {
        let ty = TypeDescriptor::named("com.example.Impl")
            .annotated(AnnotationInstance::marker().with_values(Vec::<String>::new()))
            .implementing("com.example.Svc1")
            .implementing("com.example.Svc2");

        let record = ty.to_record(DEFAULT_MARKER_ANNOTATION).unwrap();
        assert_eq!(names(&record), ["com.example.Svc1", "com.example.Svc2"]);
    }

    #[test]
    fn other_annotations_are_ignored() {
        let ty = TypeDescriptor::named("com.example.Impl")
            .annotated(AnnotationInstance::new("javax.inject.Named").with_value("com.example.Nope"))
            .annotated(AnnotationInstance::marker())
            .implementing("com.example.Svc");

        let record = ty.to_record(DEFAULT_MARKER_ANNOTATION).unwrap();
        assert_eq!(names(&record), ["com.example.Svc"]);
    }

    #[test]
    fn custom_marker_is_honoured() {
        let ty = TypeDescriptor::named("com.example.Impl")
            .annotated(AnnotationInstance::new("com.acme.Provides").with_value("com.acme.Api"));

        assert!(ty.to_record(DEFAULT_MARKER_ANNOTATION).unwrap().is_empty());
        let record = ty.to_record("com.acme.Provides").unwrap();
        assert_eq!(names(&record), ["com.acme.Api"]);
    }

    #[test]
    fn unnamed_descriptor_has_no_record() {
        let ty = TypeDescriptor::unnamed()
            .annotated(AnnotationInstance::marker().with_value("com.example.Foo"));
        assert!(ty.to_record(DEFAULT_MARKER_ANNOTATION).is_none());

        let blank = TypeDescriptor::named("   ");
        assert!(blank.to_record(DEFAULT_MARKER_ANNOTATION).is_none());
    }

    #[test]
    fn unusable_values_are_dropped() {
        let ty = TypeDescriptor::named("com.example.Impl").annotated(
            AnnotationInstance::marker().with_values(["", "com.example.Ok", "bad name"]),
        );

        let record = ty.to_record(DEFAULT_MARKER_ANNOTATION).unwrap();
        assert_eq!(names(&record), ["com.example.Ok"]);
    }

    #[test]
    fn unusable_explicit_values_do_not_fall_back_to_interfaces() {
        let ty = TypeDescriptor::named("com.example.Impl")
            .annotated(AnnotationInstance::marker().with_value("bad name"))
            .implementing("com.example.Unrelated");

        assert!(ty.has_explicit_value(DEFAULT_MARKER_ANNOTATION));
        let record = ty.to_record(DEFAULT_MARKER_ANNOTATION).unwrap();
        assert!(record.is_empty());

        let blank = TypeDescriptor::named("com.example.Impl")
            .annotated(AnnotationInstance::marker().with_values([""]))
            .implementing("com.example.Unrelated");
        assert!(blank.to_record(DEFAULT_MARKER_ANNOTATION).unwrap().is_empty());
    }

    #[test]
    fn annotation_value_deserializes_both_shapes() {
        let single: AnnotationValue = serde_json::from_str("\"a.B\"").unwrap();
        assert_eq!(single, AnnotationValue::Single("a.B".into()));

        let list: AnnotationValue = serde_json::from_str("[\"a.B\", \"c.D\"]").unwrap();
        assert_eq!(list.values().collect::<Vec<_>>(), ["a.B", "c.D"]);
    }
}
