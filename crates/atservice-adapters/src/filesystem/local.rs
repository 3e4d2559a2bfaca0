//! Local filesystem adapter using std::fs.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use atservice_core::{application::ports::Filesystem, error::AtserviceResult};

/// Production filesystem implementation using `std::fs`.
#[derive(Debug, Clone, Copy)]
pub struct LocalFilesystem;

impl LocalFilesystem {
    /// Create a new local filesystem adapter.
    pub fn new() -> Self {
        Self
    }
}

impl Default for LocalFilesystem {
    fn default() -> Self {
        Self::new()
    }
}

impl Filesystem for LocalFilesystem {
    fn create_dir_all(&self, path: &Path) -> AtserviceResult<()> {
        std::fs::create_dir_all(path).map_err(|e| map_io_error(path, e, "create directory"))
    }

    fn write_file(&self, path: &Path, content: &str) -> AtserviceResult<()> {
        // The handle is dropped (closed) when this scope ends, on both paths.
        let file = File::create(path).map_err(|e| map_io_error(path, e, "open file"))?;
        let mut writer = BufWriter::new(file);
        writer
            .write_all(content.as_bytes())
            .and_then(|()| writer.flush())
            .map_err(|e| map_io_error(path, e, "write file"))
    }

    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }
}

fn map_io_error(
    path: &Path,
    e: io::Error,
    operation: &'static str,
) -> atservice_core::error::AtserviceError {
    use atservice_core::application::ApplicationError;

    ApplicationError::FilesystemError {
        path: path.to_path_buf(),
        operation,
        reason: e.to_string(),
    }
    .into()
}
