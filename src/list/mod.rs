//! Recursive directory listing
//!
//! [`DirectoryLister::list`] checks that the root is accessible and
//! readable, walks it with the selected [`Strategy`], and returns every
//! entry beneath it as a `/`-separated path relative to the root, sorted
//! byte-wise ascending. The root itself is never included.
//!
//! ```no_run
//! # async fn example() -> Result<(), fslist::ListError> {
//! let entries = fslist::list(".github").await?;
//! for entry in entries {
//!     println!("{}", entry);
//! }
//! # Ok(())
//! # }
//! ```

pub mod access;
pub mod relative;
pub mod strategy;

mod recursive;
mod stat;
mod typed;

use std::io;
use std::path::Path;
use std::sync::Arc;
use tracing::debug;

use crate::config::FslistConfig;
use crate::error::ListError;
use crate::fs::{FileSystem, RealFileSystem};
use strategy::{select_strategy, Capabilities, Strategy, Traversal};

pub use recursive::RecursiveTraversal;
pub use stat::StatTraversal;
pub use typed::TypedTraversal;

/// Sorted relative paths of every entry beneath a directory
pub type Paths = Vec<String>;

/// Sorts byte-wise on the UTF-8 encoding, so `FUNDING.yml` precedes `dependabot.yml`
pub(crate) fn finalize(mut paths: Paths) -> Paths {
    paths.sort_unstable();
    paths
}

/// Lists directory trees through a fixed strategy and filesystem backend
pub struct DirectoryLister {
    fs: Arc<dyn FileSystem>,
    strategy: Strategy,
}

impl DirectoryLister {
    /// Lister over the host filesystem using the detected strategy
    pub fn new() -> Self {
        Self::with_file_system(Arc::new(RealFileSystem::new()))
    }

    /// Lister over `fs`, choosing the strategy from its capabilities
    pub fn with_file_system(fs: Arc<dyn FileSystem>) -> Self {
        let strategy = select_strategy(&fs.capabilities());
        Self { fs, strategy }
    }

    /// Lister over the host filesystem using the configured strategy
    pub fn from_config(config: &FslistConfig) -> Self {
        let fs: Arc<dyn FileSystem> = Arc::new(RealFileSystem::new());
        let strategy = config.strategy.resolve(&fs.capabilities());
        Self { fs, strategy }
    }

    /// Forces a strategy regardless of capabilities
    pub fn with_strategy(mut self, strategy: Strategy) -> Self {
        let capabilities = self.fs.capabilities();
        if select_strategy(&capabilities) != strategy {
            debug!(%strategy, ?capabilities, "Strategy overridden");
        }
        self.strategy = strategy;
        self
    }

    pub fn strategy(&self) -> Strategy {
        self.strategy
    }

    /// Lists every file and directory beneath `directory`
    ///
    /// # Errors
    ///
    /// - [`ListError::NotAccessible`] if `directory` does not exist
    /// - [`ListError::NotReadable`] if it cannot be read
    /// - [`ListError::Traversal`] if any listing or probe fails during the walk;
    ///   no partial result is returned
    pub async fn list(&self, directory: impl AsRef<Path>) -> Result<Paths, ListError> {
        let directory = directory.as_ref();
        access::check_access(self.fs.as_ref(), directory).await?;

        let traversal = self.strategy.traversal();
        debug!(
            directory = %directory.display(),
            strategy = %traversal.strategy(),
            "Listing directory"
        );

        traversal
            .traverse(self.fs.as_ref(), directory)
            .await
            .map_err(|source| {
                debug!(directory = %directory.display(), error = %source, "Traversal failed");
                ListError::Traversal {
                    path: directory.to_path_buf(),
                    source,
                }
            })
    }
}

impl Default for DirectoryLister {
    fn default() -> Self {
        Self::new()
    }
}

/// Lists every file and directory beneath `directory` with the fastest available strategy
pub async fn list(directory: impl AsRef<Path>) -> Result<Paths, ListError> {
    DirectoryLister::new().list(directory).await
}

/// Walks `directory` with the single-call recursive walk, skipping the accessibility gate
pub async fn read_dir_recursive(directory: impl AsRef<Path>) -> io::Result<Paths> {
    RecursiveTraversal
        .traverse(&RealFileSystem, directory.as_ref())
        .await
}

/// Walks `directory` breadth-first using typed directory entries, skipping the accessibility gate
pub async fn read_dir_file_types(directory: impl AsRef<Path>) -> io::Result<Paths> {
    TypedTraversal
        .traverse(&RealFileSystem, directory.as_ref())
        .await
}

/// Walks `directory` breadth-first with a metadata probe per entry, skipping the accessibility gate
pub async fn read_dir_stat(directory: impl AsRef<Path>) -> io::Result<Paths> {
    StatTraversal
        .traverse(&RealFileSystem, directory.as_ref())
        .await
}
