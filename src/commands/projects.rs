//! The project-deduplication pass.
//!
//! Builds the first-write-wins project registry from the flat task list
//! and writes one row per distinct project, in first-seen order.

use anyhow::{Context, Result};
use log::info;
use std::fs;
use std::io::Write;
use std::path::PathBuf;

use crate::config::FieldLayout;
use crate::core::ProjectEntry;
use crate::io::reader::open_records;
use crate::io::writer::{create_output, write_row};
use crate::registry::ProjectRegistry;

pub struct ProjectsConfig {
    pub input: PathBuf,
    pub output: PathBuf,
    pub layout: FieldLayout,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ProjectsSummary {
    pub projects: usize,
    pub records: usize,
    pub skipped: usize,
}

pub fn handle_projects(config: &ProjectsConfig) -> Result<ProjectsSummary> {
    let mut reader = open_records(&config.input, config.layout)?;

    // The registry is built in full before the output is created, so a
    // read failure aborts with no artifact on disk.
    let mut registry = ProjectRegistry::new();
    for record in reader.by_ref() {
        let record = record?;
        registry.observe(&record);
    }
    let summary = ProjectsSummary {
        projects: registry.len(),
        records: reader.valid_count(),
        skipped: reader.skipped_count(),
    };

    let mut writer = create_output(&config.output)?;
    let written = write_entries(&mut writer, registry.entries()).and_then(|_| {
        writer
            .flush()
            .context("failed to flush project list output")
    });
    if let Err(e) = written {
        drop(writer);
        let _ = fs::remove_file(&config.output);
        return Err(e);
    }

    info!(
        "registered {} projects from {}",
        summary.projects,
        config.input.display()
    );
    println!(
        "project list written to {}: {} unique projects from {} records ({} malformed rows skipped)",
        config.output.display(),
        summary.projects,
        summary.records,
        summary.skipped
    );
    Ok(summary)
}

fn write_entries<W: Write>(writer: &mut W, entries: &[ProjectEntry]) -> Result<()> {
    for entry in entries {
        write_row(
            writer,
            &[
                &entry.project,
                &entry.repository_url,
                &entry.reference_repo_path,
            ],
        )?;
    }
    Ok(())
}
