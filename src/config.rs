//! Positional column layout of the flat task input.
//!
//! The upstream task list carries no header row; fields are addressed by
//! fixed column index. The indices vary slightly between task-list
//! generations, so they are plumbed through as configuration rather than
//! hard-coded at the parse sites.

/// Column indices of the fields the pipelines consume.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FieldLayout {
    pub project: usize,
    pub commit: usize,
    pub repository_url: usize,
    pub reference_repo_path: usize,
}

impl Default for FieldLayout {
    fn default() -> Self {
        Self {
            project: 0,
            commit: 1,
            repository_url: 4,
            reference_repo_path: 5,
        }
    }
}

impl FieldLayout {
    /// Highest column index any field requires.
    pub fn max_index(&self) -> usize {
        self.project
            .max(self.commit)
            .max(self.repository_url)
            .max(self.reference_repo_path)
    }

    /// Minimum number of columns a row must have to be valid.
    pub fn min_columns(&self) -> usize {
        self.max_index() + 1
    }
}
