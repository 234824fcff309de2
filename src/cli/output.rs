//! Output formatting for listings
//!
//! Plain output is the newline-joined listing followed by a newline, or
//! nothing for an empty directory. JSON output is one object per directory
//! per line.

use anyhow::{Context, Result};
use serde::Serialize;
use std::path::Path;

/// Output format enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// One relative path per line
    Plain,
    /// JSON lines, machine-readable
    Json,
}

#[derive(Serialize)]
struct ListingOutput<'a> {
    directory: String,
    entries: &'a [String],
}

/// Output formatter for directory listings
pub struct OutputFormatter {
    format: OutputFormat,
}

impl OutputFormatter {
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    /// Formats the listing of `directory`; the result is empty when there is nothing to print
    pub fn format(&self, directory: &Path, entries: &[String]) -> Result<String> {
        match self.format {
            OutputFormat::Plain => Ok(self.format_plain(entries)),
            OutputFormat::Json => self.format_json(directory, entries),
        }
    }

    fn format_plain(&self, entries: &[String]) -> String {
        if entries.is_empty() {
            return String::new();
        }
        let mut output = entries.join("\n");
        output.push('\n');
        output
    }

    fn format_json(&self, directory: &Path, entries: &[String]) -> Result<String> {
        let listing = ListingOutput {
            directory: directory.display().to_string(),
            entries,
        };
        let mut output =
            serde_json::to_string(&listing).context("Failed to serialize listing to JSON")?;
        output.push('\n');
        Ok(output)
    }
}
