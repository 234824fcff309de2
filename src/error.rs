//! Error types for directory listing

use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors returned by [`crate::list`] and [`crate::DirectoryLister::list`]
#[derive(Debug, Error)]
pub enum ListError {
    /// The directory does not exist or cannot be stat'd
    #[error("unable to list contents of the non-accessible directory: {}", path.display())]
    NotAccessible {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The directory exists but the current process cannot read it
    #[error("unable to list contents of the non-readable directory: {}", path.display())]
    NotReadable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// An I/O operation failed while walking the tree
    #[error("unable to list contents of the directory: {}", path.display())]
    Traversal {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl ListError {
    /// The directory that was being listed
    pub fn path(&self) -> &Path {
        match self {
            ListError::NotAccessible { path, .. }
            | ListError::NotReadable { path, .. }
            | ListError::Traversal { path, .. } => path,
        }
    }

    /// The underlying I/O failure
    pub fn io_error(&self) -> &io::Error {
        match self {
            ListError::NotAccessible { source, .. }
            | ListError::NotReadable { source, .. }
            | ListError::Traversal { source, .. } => source,
        }
    }

    pub fn is_not_accessible(&self) -> bool {
        matches!(self, ListError::NotAccessible { .. })
    }

    pub fn is_not_readable(&self) -> bool {
        matches!(self, ListError::NotReadable { .. })
    }

    pub fn is_traversal(&self) -> bool {
        matches!(self, ListError::Traversal { .. })
    }
}

/// A single failed filesystem operation, naming what was attempted and where
#[derive(Debug, Error)]
#[error("failed to {operation} {}", path.display())]
pub struct IoContextError {
    pub operation: &'static str,
    pub path: PathBuf,
    #[source]
    pub source: io::Error,
}

/// Wraps an I/O error with the operation and path, keeping its kind and cause
pub(crate) fn io_context(operation: &'static str, path: &Path, source: io::Error) -> io::Error {
    let kind = source.kind();
    io::Error::new(
        kind,
        IoContextError {
            operation,
            path: path.to_path_buf(),
            source,
        },
    )
}
