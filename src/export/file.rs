//! Saving exported text as a file.

use super::ExportError;
use std::ffi::OsStr;
use std::fs;
use std::path::{Component, Path, PathBuf};
use tracing::info;

/// Host save mechanism: receives a byte payload and a suggested filename.
pub trait FileSaver: Send + Sync {
    /// Persist the payload, returning where it ended up.
    fn save(&self, filename: &str, payload: &[u8]) -> Result<PathBuf, ExportError>;
}

/// Writes exported files into a fixed directory.
#[derive(Debug, Clone)]
pub struct DirectorySaver {
    dir: PathBuf,
}

impl DirectorySaver {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }
}

/// The single file name in `filename`, or `None` if it names a path
/// (separators, `.`, `..`, roots) instead of a plain file.
pub fn bare_filename(filename: &str) -> Option<&OsStr> {
    let mut components = Path::new(filename).components();
    match (components.next(), components.next()) {
        (Some(Component::Normal(name)), None) => Some(name),
        _ => None,
    }
}

impl FileSaver for DirectorySaver {
    fn save(&self, filename: &str, payload: &[u8]) -> Result<PathBuf, ExportError> {
        // Only a bare file name is accepted; the directory is ours to pick.
        let name = bare_filename(filename)
            .ok_or_else(|| ExportError::InvalidFilename(filename.to_string()))?;

        fs::create_dir_all(&self.dir).map_err(|e| ExportError::SaveFailed(e.to_string()))?;

        let path = self.dir.join(name);
        fs::write(&path, payload).map_err(|e| ExportError::SaveFailed(e.to_string()))?;

        info!("Saved {} bytes to {}", payload.len(), path.display());
        Ok(path)
    }
}
