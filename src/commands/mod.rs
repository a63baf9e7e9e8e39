//! CLI command implementations.
//!
//! Each submodule handles one subcommand with a plain config struct and a
//! `handle_*` entrypoint:
//! - **group**: collapse the pre-sorted task list into contiguous
//!   (project, commit) groups with position metadata
//! - **projects**: derive the unique project registry from the task list
//! - **rank**: load a score artifact and print the ranked report

pub mod group;
pub mod projects;
pub mod rank;

pub use group::{handle_group, GroupConfig, GroupSummary};
pub use projects::{handle_projects, ProjectsConfig, ProjectsSummary};
pub use rank::{handle_rank, RankConfig};
