//! Delimited output artifacts.
//!
//! Both flat outputs (grouped tasks, project list) are comma-delimited
//! text written row by row as summaries are emitted. Field values in this
//! pipeline (project slugs, commit ids, URLs, repo paths) never contain
//! the delimiter, so rows are written verbatim without quoting.

use anyhow::{Context, Result};
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;

/// Create an output artifact, creating parent directories as needed.
pub fn create_output(path: &Path) -> Result<BufWriter<File>> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .with_context(|| format!("failed to create output directory: {}", parent.display()))?;
        }
    }
    let file = File::create(path)
        .with_context(|| format!("failed to create output file: {}", path.display()))?;
    Ok(BufWriter::new(file))
}

/// Append one delimited row.
pub fn write_row<W: Write>(writer: &mut W, fields: &[&str]) -> Result<()> {
    writeln!(writer, "{}", fields.join(",")).context("failed to write output row")
}
