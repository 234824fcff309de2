//! fslist - recursive directory listing as sorted relative paths
//!
//! Given a directory, [`list`] returns every file and directory nested
//! beneath it at any depth, as `/`-separated paths relative to that
//! directory, sorted byte-wise ascending. The directory itself is never
//! included.
//!
//! # Core Concepts
//!
//! - **Accessibility gate**: the root must exist and be readable before any
//!   traversal starts ([`ListError::NotAccessible`], [`ListError::NotReadable`])
//! - **Strategies**: three interchangeable traversals ([`Strategy`]) chosen
//!   from the filesystem backend's [`Capabilities`]; all produce the same
//!   result
//! - **FileSystem**: the probes a traversal needs, implemented for the host
//!   filesystem ([`RealFileSystem`]) and in memory ([`MockFileSystem`])
//!
//! # Example Usage
//!
//! ```no_run
//! use fslist::{DirectoryLister, Strategy};
//!
//! # async fn example() -> Result<(), fslist::ListError> {
//! let entries = fslist::list(".github").await?;
//! assert!(entries.windows(2).all(|pair| pair[0] < pair[1]));
//!
//! let lister = DirectoryLister::new().with_strategy(Strategy::StatTraversal);
//! assert_eq!(lister.list(".github").await?, entries);
//! # Ok(())
//! # }
//! ```

pub mod cli;
pub mod config;
pub mod error;
pub mod fs;
pub mod list;
pub mod util;

pub use config::{ConfigError, FslistConfig, StrategyChoice};
pub use error::ListError;
pub use fs::{FileSystem, MockFileSystem, RealFileSystem};
pub use list::strategy::{select_strategy, Capabilities, Strategy, Traversal};
pub use list::{
    list, read_dir_file_types, read_dir_recursive, read_dir_stat, DirectoryLister, Paths,
};
pub use util::{init_logging, LoggingConfig};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");
