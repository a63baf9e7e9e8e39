//! The ranking-report pass.
//!
//! Loads a serialized score artifact, ranks it descending by the chosen
//! naturalness metric, and renders the full table plus descriptive
//! statistics. Any decode failure aborts before output is produced.

use anyhow::Result;
use log::info;
use std::path::PathBuf;

use crate::io::output::{create_writer, ReportFormat};
use crate::ranking::{read_score_artifact, RankReport, RankingTable, ScoreMetric};

pub struct RankConfig {
    pub artifact: PathBuf,
    pub metric: ScoreMetric,
    pub format: ReportFormat,
    pub output: Option<PathBuf>,
}

pub fn handle_rank(config: &RankConfig) -> Result<()> {
    let records = read_score_artifact(&config.artifact)?;
    info!(
        "loaded {} score records from {}",
        records.len(),
        config.artifact.display()
    );

    let mut table = RankingTable::new(records);
    table.sort_descending_by(config.metric);
    let report = RankReport::from_table(&table, config.metric);

    let mut writer = create_writer(config.format, config.output.as_deref())?;
    writer.write_report(&report)
}
