// Export modules for library usage
pub mod cli;
pub mod commands;
pub mod config;
pub mod core;
pub mod grouping;
pub mod io;
pub mod ranking;
pub mod registry;

// Re-export commonly used types
pub use crate::config::FieldLayout;
pub use crate::core::{ProjectEntry, ScoreRecord, TaskGroup, TaskRecord};
pub use crate::grouping::{group_records, GroupRuns};
pub use crate::io::output::{create_writer, ReportFormat, ReportWriter};
pub use crate::io::reader::{open_records, RecordReader};
pub use crate::ranking::{
    read_score_artifact, write_score_artifact, RankReport, RankingTable, ScoreMetric, ScoreStats,
};
pub use crate::registry::ProjectRegistry;
