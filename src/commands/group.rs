//! The task-grouping pass.
//!
//! Streams the flat task list through the grouping engine and appends one
//! row per emitted group to the grouped-output artifact. The full input is
//! never buffered.

use anyhow::{bail, Context, Result};
use log::info;
use std::collections::HashSet;
use std::fs;
use std::io::{BufRead, Write};
use std::path::PathBuf;

use crate::config::FieldLayout;
use crate::core::TaskGroup;
use crate::grouping::GroupRuns;
use crate::io::reader::{open_records, RecordReader};
use crate::io::writer::{create_output, write_row};

pub struct GroupConfig {
    pub input: PathBuf,
    pub output: PathBuf,
    pub layout: FieldLayout,
    /// Abort when a (project, commit) key reappears non-contiguously.
    /// Off by default: unsorted input then fragments into separate groups.
    pub strict: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GroupSummary {
    pub groups: usize,
    pub records: usize,
    pub skipped: usize,
}

pub fn handle_group(config: &GroupConfig) -> Result<GroupSummary> {
    // The input must open before the output artifact exists, so a missing
    // input aborts the run with nothing on disk.
    let mut reader = open_records(&config.input, config.layout)?;
    let mut writer = create_output(&config.output)?;

    let streamed = stream_groups(&mut reader, &mut writer, config.strict).and_then(|groups| {
        writer
            .flush()
            .context("failed to flush grouped output")
            .map(|_| groups)
    });

    let groups = match streamed {
        Ok(groups) => groups,
        Err(e) => {
            // A fatal mid-run error must not leave a partial artifact.
            drop(writer);
            let _ = fs::remove_file(&config.output);
            return Err(e);
        }
    };

    let summary = GroupSummary {
        groups,
        records: reader.valid_count(),
        skipped: reader.skipped_count(),
    };
    info!(
        "grouped {} records from {}",
        summary.records,
        config.input.display()
    );
    println!(
        "grouped task list written to {}: {} groups from {} records ({} malformed rows skipped)",
        config.output.display(),
        summary.groups,
        summary.records,
        summary.skipped
    );
    Ok(summary)
}

fn stream_groups<R, W>(reader: &mut RecordReader<R>, writer: &mut W, strict: bool) -> Result<usize>
where
    R: BufRead,
    W: Write,
{
    let mut runs = GroupRuns::new();
    let mut seen_keys: HashSet<(String, String)> = HashSet::new();
    let mut emitted = 0;

    for record in reader.by_ref() {
        let record = record?;
        if let Some(group) = runs.observe(record) {
            emit_group(writer, &group, strict, &mut seen_keys)?;
            emitted += 1;
        }
    }
    if let Some(group) = runs.finish() {
        emit_group(writer, &group, strict, &mut seen_keys)?;
        emitted += 1;
    }
    Ok(emitted)
}

fn emit_group<W: Write>(
    writer: &mut W,
    group: &TaskGroup,
    strict: bool,
    seen_keys: &mut HashSet<(String, String)>,
) -> Result<()> {
    if strict && !seen_keys.insert((group.project.clone(), group.commit.clone())) {
        bail!(
            "input is not pre-sorted: key ({}, {}) reappeared non-contiguously at line {}",
            group.project,
            group.commit,
            group.start_line
        );
    }

    let start_line = group.start_line.to_string();
    let line_count = group.line_count.to_string();
    write_row(
        writer,
        &[
            &group.project,
            &group.commit,
            &group.repository_url,
            &group.reference_repo_path,
            &start_line,
            &line_count,
        ],
    )
}
