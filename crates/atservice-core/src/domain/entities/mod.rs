pub mod candidate;
pub mod registry;

pub use candidate::{AnnotationInstance, AnnotationValue, DEFAULT_MARKER_ANNOTATION, TypeDescriptor};
pub use registry::{
    ImplementationRecord, SERVICES_DIR, ServiceRegistry, registry_file_contents, registry_file_path,
};
