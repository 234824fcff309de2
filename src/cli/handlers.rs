use anyhow::{Context, Result};
use std::io::Write;
use std::path::Path;
use tracing::{debug, error, info};

use super::commands::CliArgs;
use super::output::OutputFormatter;
use crate::config::FslistConfig;
use crate::list::DirectoryLister;

/// Lists every requested path in order and returns the process exit code
///
/// A failure on one path does not stop the others; any failure yields 1.
pub async fn handle_list(args: &CliArgs, config: FslistConfig) -> i32 {
    let config = FslistConfig {
        strategy: args.strategy.map(Into::into).unwrap_or(config.strategy),
        ..config
    };
    let lister = DirectoryLister::from_config(&config);
    let formatter = OutputFormatter::new(args.format.into());
    debug!(strategy = %lister.strategy(), paths = args.paths.len(), "Starting listing");

    let mut failures = 0usize;
    for path in &args.paths {
        if let Err(e) = list_one(&lister, &formatter, path).await {
            error!(path = %path.display(), "Listing failed");
            eprintln!("Error: {:#}", e);
            failures += 1;
        }
    }

    if failures > 0 {
        info!(failures, "Finished with failures");
        1
    } else {
        0
    }
}

async fn list_one(
    lister: &DirectoryLister,
    formatter: &OutputFormatter,
    path: &Path,
) -> Result<()> {
    let entries = lister.list(path).await?;
    debug!(path = %path.display(), entries = entries.len(), "Listed directory");

    let output = formatter.format(path, &entries)?;
    if !output.is_empty() {
        let mut stdout = std::io::stdout().lock();
        stdout
            .write_all(output.as_bytes())
            .and_then(|_| stdout.flush())
            .context("Failed to write listing to stdout")?;
    }
    Ok(())
}
