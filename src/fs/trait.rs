//! FileSystem trait definition

use async_trait::async_trait;
use std::ffi::{OsStr, OsString};
use std::io;
use std::path::{Path, PathBuf};

use crate::list::strategy::Capabilities;

/// Metadata about a file
#[derive(Debug, Clone)]
pub struct FileMetadata {
    pub file_type: FileType,
}

/// Type of file system entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileType {
    File,
    Directory,
    Symlink,
    Other,
}

impl From<std::fs::FileType> for FileType {
    fn from(file_type: std::fs::FileType) -> Self {
        if file_type.is_symlink() {
            FileType::Symlink
        } else if file_type.is_dir() {
            FileType::Directory
        } else if file_type.is_file() {
            FileType::File
        } else {
            FileType::Other
        }
    }
}

impl FileMetadata {
    pub fn is_dir(&self) -> bool {
        self.file_type == FileType::Directory
    }
}

/// A directory entry returned by read_dir
///
/// The name is kept as the platform returned it; names that are not valid
/// UTF-8 only become lossy when rendered.
#[derive(Debug, Clone)]
pub struct DirEntry {
    pub path: PathBuf,
    pub name: OsString,
    pub file_type: FileType,
}

impl DirEntry {
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn file_name(&self) -> &OsStr {
        &self.name
    }

    pub fn is_dir(&self) -> bool {
        self.file_type == FileType::Directory
    }
}

/// Abstraction over the filesystem probes a traversal needs
///
/// Errors carry the failing path and operation; callers add the root-level
/// context.
#[async_trait]
pub trait FileSystem: Send + Sync {
    /// Which listing primitives this backend offers
    fn capabilities(&self) -> Capabilities;

    /// Metadata for `path`, following symlinks
    async fn metadata(&self, path: &Path) -> io::Result<FileMetadata>;

    /// Metadata for `path` itself, without following a final symlink
    async fn symlink_metadata(&self, path: &Path) -> io::Result<FileMetadata>;

    /// Confirms the current process may read `path`
    async fn probe_readable(&self, path: &Path) -> io::Result<()>;

    /// Immediate children of a directory, with their entry types
    async fn read_dir(&self, path: &Path) -> io::Result<Vec<DirEntry>>;

    /// Immediate child names of a directory, without entry types
    async fn read_dir_names(&self, path: &Path) -> io::Result<Vec<OsString>>;

    /// Every entry beneath `root` at any depth, relative to `root`, in no
    /// particular order. Symlinks below the root are not followed.
    async fn walk(&self, root: &Path) -> io::Result<Vec<PathBuf>>;
}
