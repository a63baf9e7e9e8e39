use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use crate::config::FieldLayout;
use crate::io::output::ReportFormat;
use crate::ranking::ScoreMetric;

#[derive(Parser, Debug)]
#[command(name = "natmap")]
#[command(about = "Task aggregation and ranking reporter for code naturalness pipelines", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

/// Positional column indices of the flat task input. Defaults match the
/// upstream sorted task list.
#[derive(Args, Clone, Copy, Debug)]
pub struct LayoutArgs {
    /// Column index of the project name
    #[arg(long = "project-col", default_value_t = 0)]
    pub project_col: usize,

    /// Column index of the commit id
    #[arg(long = "commit-col", default_value_t = 1)]
    pub commit_col: usize,

    /// Column index of the repository URL
    #[arg(long = "repo-url-col", default_value_t = 4)]
    pub repo_url_col: usize,

    /// Column index of the reference repo path
    #[arg(long = "ref-path-col", default_value_t = 5)]
    pub ref_path_col: usize,
}

impl LayoutArgs {
    pub fn to_layout(self) -> FieldLayout {
        FieldLayout {
            project: self.project_col,
            commit: self.commit_col,
            repository_url: self.repo_url_col,
            reference_repo_path: self.ref_path_col,
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Collapse a pre-sorted task list into contiguous (project, commit) groups
    Group {
        /// Sorted flat task list
        input: PathBuf,

        /// Grouped task list to write
        output: PathBuf,

        #[command(flatten)]
        layout: LayoutArgs,

        /// Abort if a (project, commit) key reappears non-contiguously
        /// instead of silently emitting fragmented groups
        #[arg(long)]
        strict: bool,
    },

    /// Derive the unique project list from a flat task list
    Projects {
        /// Flat task list
        input: PathBuf,

        /// Project list to write
        output: PathBuf,

        #[command(flatten)]
        layout: LayoutArgs,
    },

    /// Rank a serialized score artifact and print the report
    Rank {
        /// Serialized score artifact
        artifact: PathBuf,

        /// Score metric to rank by
        #[arg(short, long, value_enum, default_value = "min")]
        metric: ScoreMetric,

        /// Output format
        #[arg(short, long, value_enum, default_value = "terminal")]
        format: ReportFormat,

        /// Output file (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}
