use async_trait::async_trait;
use futures_util::future::try_join_all;
use std::io;
use std::path::Path;
use tracing::{debug, trace};

use super::relative::relative_entry;
use super::strategy::{Strategy, Traversal};
use super::{finalize, Paths};
use crate::fs::FileSystem;

/// Breadth-first walk over plain name listings plus one metadata probe per entry
///
/// The probes for one directory run concurrently. They use `symlink_metadata`
/// so a symlinked directory is listed but not descended into, matching the
/// other strategies.
pub struct StatTraversal;

#[async_trait]
impl Traversal for StatTraversal {
    fn strategy(&self) -> Strategy {
        Strategy::StatTraversal
    }

    async fn traverse(&self, fs: &dyn FileSystem, root: &Path) -> io::Result<Paths> {
        let mut pending = vec![root.to_path_buf()];
        let mut results = Vec::new();
        let mut rounds = 0usize;

        while !pending.is_empty() {
            let batch = std::mem::take(&mut pending);
            rounds += 1;
            trace!(round = rounds, directories = batch.len(), "Listing batch");

            let listings = try_join_all(batch.iter().map(|subdirectory| async move {
                let names = fs.read_dir_names(subdirectory).await?;
                try_join_all(names.into_iter().map(|name| async move {
                    let metadata = fs.symlink_metadata(&subdirectory.join(&name)).await?;
                    Ok::<_, io::Error>((name, metadata.is_dir()))
                }))
                .await
            }))
            .await?;

            for (subdirectory, children) in batch.iter().zip(listings) {
                for (name, is_dir) in children {
                    results.push(relative_entry(root, subdirectory, &name));
                    if is_dir {
                        pending.push(subdirectory.join(&name));
                    }
                }
            }
        }

        debug!(root = %root.display(), entries = results.len(), rounds, "Stat traversal complete");
        Ok(finalize(results))
    }
}
