use async_trait::async_trait;
use std::io;
use std::path::Path;
use tracing::debug;

use super::relative::to_slash;
use super::strategy::{Strategy, Traversal};
use super::{finalize, Paths};
use crate::fs::FileSystem;

/// Lists the whole subtree with the backend's single-call walk
pub struct RecursiveTraversal;

#[async_trait]
impl Traversal for RecursiveTraversal {
    fn strategy(&self) -> Strategy {
        Strategy::RecursiveNative
    }

    async fn traverse(&self, fs: &dyn FileSystem, root: &Path) -> io::Result<Paths> {
        let walked = fs.walk(root).await?;
        debug!(root = %root.display(), entries = walked.len(), "Walked directory tree");

        let paths = walked.iter().map(|path| to_slash(path)).collect();
        Ok(finalize(paths))
    }
}
