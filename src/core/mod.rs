use serde::{Deserialize, Serialize};

/// One row of the flat task input: a single code-edit evaluation unit
/// tied to a project and commit.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TaskRecord {
    pub project: String,
    pub commit: String,
    pub repository_url: String,
    pub reference_repo_path: String,
}

impl TaskRecord {
    /// Grouping key. Records sharing this key are assumed contiguous in
    /// pre-sorted input.
    pub fn key(&self) -> (&str, &str) {
        (&self.project, &self.commit)
    }

    pub fn same_key(&self, other: &TaskRecord) -> bool {
        self.key() == other.key()
    }
}

/// Summary of one maximal run of contiguous records sharing a
/// (project, commit) key.
///
/// `start_line` is the 1-based position of the run's first record in the
/// original input; `line_count` is the run's length. Repository fields are
/// copied from the run's first record.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct TaskGroup {
    pub project: String,
    pub commit: String,
    pub repository_url: String,
    pub reference_repo_path: String,
    pub start_line: usize,
    pub line_count: usize,
}

/// One row of the project registry, frozen at the project's first
/// occurrence in the input (first-write-wins).
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ProjectEntry {
    pub project: String,
    pub repository_url: String,
    pub reference_repo_path: String,
}

/// One evaluated code location with its naturalness scores.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ScoreRecord {
    pub file_path: String,
    pub line: u32,
    pub score_min: f64,
    pub score_mean: f64,
}
