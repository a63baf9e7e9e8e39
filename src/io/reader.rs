//! Flat task-list reader.
//!
//! Parses the comma-delimited task input into [`TaskRecord`]s lazily, in
//! file order. There is no header row; fields are addressed by the
//! positional indices in [`FieldLayout`]. Rows with fewer columns than the
//! layout requires are reported and skipped; the run continues.

use anyhow::{Context, Result};
use log::warn;
use std::fs::File;
use std::io::{BufRead, BufReader, Lines};
use std::path::Path;

use crate::config::FieldLayout;
use crate::core::TaskRecord;

/// Lazy record sequence over any buffered reader.
///
/// Yields `Err` only for underlying I/O failures, which are fatal to the
/// run. Malformed rows never surface as items; they are logged, counted,
/// and skipped.
pub struct RecordReader<R: BufRead> {
    lines: Lines<R>,
    layout: FieldLayout,
    line_no: usize,
    valid: usize,
    skipped: usize,
}

impl<R: BufRead> RecordReader<R> {
    pub fn new(reader: R, layout: FieldLayout) -> Self {
        Self {
            lines: reader.lines(),
            layout,
            line_no: 0,
            valid: 0,
            skipped: 0,
        }
    }

    /// Valid records yielded so far.
    pub fn valid_count(&self) -> usize {
        self.valid
    }

    /// Malformed rows skipped so far.
    pub fn skipped_count(&self) -> usize {
        self.skipped
    }

    fn parse_line(&mut self, line: &str) -> Option<TaskRecord> {
        // Blank lines are tolerated silently; they are separators, not rows.
        if line.trim().is_empty() {
            return None;
        }

        let fields: Vec<&str> = line.split(',').map(str::trim).collect();
        if fields.len() < self.layout.min_columns() {
            warn!(
                "skipping malformed row at line {}: expected at least {} columns, got {}: {:?}",
                self.line_no,
                self.layout.min_columns(),
                fields.len(),
                line
            );
            self.skipped += 1;
            return None;
        }

        Some(TaskRecord {
            project: fields[self.layout.project].to_string(),
            commit: fields[self.layout.commit].to_string(),
            repository_url: fields[self.layout.repository_url].to_string(),
            reference_repo_path: fields[self.layout.reference_repo_path].to_string(),
        })
    }
}

impl<R: BufRead> Iterator for RecordReader<R> {
    type Item = Result<TaskRecord>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let line = match self.lines.next()? {
                Ok(line) => line,
                Err(e) => {
                    return Some(
                        Err(e).with_context(|| format!("read failed at line {}", self.line_no + 1)),
                    )
                }
            };
            self.line_no += 1;

            if let Some(record) = self.parse_line(&line) {
                self.valid += 1;
                return Some(Ok(record));
            }
        }
    }
}

/// Open the flat task input for a single sequential pass.
///
/// A missing or unreadable file is fatal; callers must not have created any
/// output artifact before calling this.
pub fn open_records(path: &Path, layout: FieldLayout) -> Result<RecordReader<BufReader<File>>> {
    let file = File::open(path)
        .with_context(|| format!("failed to open task input: {}", path.display()))?;
    Ok(RecordReader::new(BufReader::new(file), layout))
}
