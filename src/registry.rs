//! Project registry: one entry per distinct project name, in first-seen
//! order.
//!
//! The registry is intentionally non-overwriting (first-write-wins): the
//! repository URL and reference path are frozen at the project's first
//! occurrence, and later rows that disagree are discarded rather than
//! merged or validated.

use std::collections::HashSet;

use crate::core::{ProjectEntry, TaskRecord};

#[derive(Debug, Default)]
pub struct ProjectRegistry {
    seen: HashSet<String>,
    entries: Vec<ProjectEntry>,
}

impl ProjectRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one task row. Returns `true` if this is the project's first
    /// occurrence and a new entry was created.
    pub fn observe(&mut self, record: &TaskRecord) -> bool {
        if !self.seen.insert(record.project.clone()) {
            return false;
        }
        self.entries.push(ProjectEntry {
            project: record.project.clone(),
            repository_url: record.repository_url.clone(),
            reference_repo_path: record.reference_repo_path.clone(),
        });
        true
    }

    /// Entries in first-seen order.
    pub fn entries(&self) -> &[ProjectEntry] {
        &self.entries
    }

    /// Number of distinct projects observed.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn into_entries(self) -> Vec<ProjectEntry> {
        self.entries
    }
}
