use async_trait::async_trait;
use futures_util::future::try_join_all;
use std::io;
use std::path::Path;
use tracing::{debug, trace};

use super::relative::relative_entry;
use super::strategy::{Strategy, Traversal};
use super::{finalize, Paths};
use crate::fs::FileSystem;

/// Breadth-first walk over listings that report each entry's type
///
/// Every directory discovered in one round is listed concurrently in the
/// next; rounds run one after another.
pub struct TypedTraversal;

#[async_trait]
impl Traversal for TypedTraversal {
    fn strategy(&self) -> Strategy {
        Strategy::TypedTraversal
    }

    async fn traverse(&self, fs: &dyn FileSystem, root: &Path) -> io::Result<Paths> {
        let mut pending = vec![root.to_path_buf()];
        let mut results = Vec::new();
        let mut rounds = 0usize;

        while !pending.is_empty() {
            let batch = std::mem::take(&mut pending);
            rounds += 1;
            trace!(round = rounds, directories = batch.len(), "Listing batch");

            let listings =
                try_join_all(batch.iter().map(|subdirectory| fs.read_dir(subdirectory))).await?;

            for (subdirectory, entries) in batch.iter().zip(listings) {
                for entry in entries {
                    results.push(relative_entry(root, subdirectory, entry.file_name()));
                    if entry.is_dir() {
                        pending.push(subdirectory.join(entry.file_name()));
                    }
                }
            }
        }

        debug!(root = %root.display(), entries = results.len(), rounds, "Typed traversal complete");
        Ok(finalize(results))
    }
}
