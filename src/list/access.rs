//! Accessibility gate run before any traversal

use std::path::Path;
use tracing::debug;

use crate::error::ListError;
use crate::fs::FileSystem;

/// Fails unless `path` exists and the current process can read it
pub async fn check_access(fs: &dyn FileSystem, path: &Path) -> Result<(), ListError> {
    fs.metadata(path)
        .await
        .map_err(|source| ListError::NotAccessible {
            path: path.to_path_buf(),
            source,
        })?;

    fs.probe_readable(path)
        .await
        .map_err(|source| ListError::NotReadable {
            path: path.to_path_buf(),
            source,
        })?;

    debug!(path = %path.display(), "Directory is accessible and readable");
    Ok(())
}
