//! Grouping engine: collapses the pre-sorted task sequence into maximal
//! runs of records sharing a (project, commit) key.
//!
//! The scanner is incremental: callers feed records one at a time and
//! receive a completed [`TaskGroup`] whenever a run closes, so the full
//! input is never buffered. Partitioning is adjacency-only — the engine
//! trusts that input is pre-sorted and treats a non-contiguous
//! reappearance of a key as a wholly separate group.

use crate::core::{TaskGroup, TaskRecord};

/// State of the current (still-open) run.
struct OpenRun {
    first: TaskRecord,
    start_line: usize,
    line_count: usize,
}

impl OpenRun {
    fn close(self) -> TaskGroup {
        TaskGroup {
            project: self.first.project,
            commit: self.first.commit,
            repository_url: self.first.repository_url,
            reference_repo_path: self.first.reference_repo_path,
            start_line: self.start_line,
            line_count: self.line_count,
        }
    }
}

/// Incremental run scanner over a record sequence in original order.
///
/// The cursor counts records consumed so far; each emitted group's
/// `start_line` is the cursor value before the run plus one, so for any
/// consecutive groups `start_line[i+1] == start_line[i] + line_count[i]`
/// and the first group starts at line 1.
pub struct GroupRuns {
    open: Option<OpenRun>,
    cursor: usize,
}

impl Default for GroupRuns {
    fn default() -> Self {
        Self::new()
    }
}

impl GroupRuns {
    pub fn new() -> Self {
        Self {
            open: None,
            cursor: 0,
        }
    }

    /// Records consumed so far.
    pub fn records_seen(&self) -> usize {
        self.cursor + self.open.as_ref().map_or(0, |run| run.line_count)
    }

    /// Feed the next record. Returns the completed group when `record`
    /// opens a new run, closing the previous one.
    pub fn observe(&mut self, record: TaskRecord) -> Option<TaskGroup> {
        if let Some(run) = self.open.as_mut() {
            if run.first.same_key(&record) {
                run.line_count += 1;
                return None;
            }
        }

        let closed = self.take_open();
        self.open = Some(OpenRun {
            first: record,
            start_line: self.cursor + 1,
            line_count: 1,
        });
        closed
    }

    /// Close the final run, if any. A run is never empty by construction,
    /// so `None` means the input had no records at all.
    pub fn finish(mut self) -> Option<TaskGroup> {
        self.take_open()
    }

    fn take_open(&mut self) -> Option<TaskGroup> {
        let run = self.open.take()?;
        self.cursor += run.line_count;
        Some(run.close())
    }
}

/// Group an in-memory record sequence. Convenience wrapper over
/// [`GroupRuns`] for callers (and tests) that do not need streaming.
pub fn group_records<I>(records: I) -> Vec<TaskGroup>
where
    I: IntoIterator<Item = TaskRecord>,
{
    let mut runs = GroupRuns::new();
    let mut groups = Vec::new();
    for record in records {
        groups.extend(runs.observe(record));
    }
    groups.extend(runs.finish());
    groups
}
