//! Report rendering for the ranking pipeline.
//!
//! Follows the writer-per-format pattern: each format implements
//! [`ReportWriter`] over a generic sink, and [`create_writer`] picks the
//! implementation and the sink (stdout or `--output` file).

use anyhow::Result;
use colored::Colorize;
use comfy_table::{presets, Cell, CellAlignment, ContentArrangement, Table};
use std::io::Write;
use std::path::Path;

use crate::io::writer::create_output;
use crate::ranking::RankReport;

#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum ReportFormat {
    Terminal,
    Json,
}

pub trait ReportWriter {
    fn write_report(&mut self, report: &RankReport) -> Result<()>;
}

/// Human-readable report: the full ranked table (no row or width
/// truncation) followed by the descriptive-statistics block.
pub struct TerminalWriter<W: Write> {
    writer: W,
    color: bool,
}

impl<W: Write> TerminalWriter<W> {
    pub fn new(writer: W, color: bool) -> Self {
        Self { writer, color }
    }

    fn heading(&mut self, text: &str) -> Result<()> {
        if self.color {
            writeln!(self.writer, "{}", text.bold().cyan())?;
        } else {
            writeln!(self.writer, "{text}")?;
        }
        Ok(())
    }
}

impl<W: Write> ReportWriter for TerminalWriter<W> {
    fn write_report(&mut self, report: &RankReport) -> Result<()> {
        self.heading("=== Code Naturalness Ranking ===")?;
        writeln!(self.writer)?;

        let mut table = Table::new();
        table
            .load_preset(presets::NOTHING)
            .set_content_arrangement(ContentArrangement::Disabled)
            .set_header(vec!["file_path", "line", report.metric.column_name()]);
        for row in &report.rows {
            table.add_row(vec![
                Cell::new(&row.file_path),
                Cell::new(row.line),
                Cell::new(format!("{:.6}", row.score)),
            ]);
        }
        for column in [1, 2] {
            if let Some(column) = table.column_mut(column) {
                column.set_cell_alignment(CellAlignment::Right);
            }
        }
        writeln!(self.writer, "{table}")?;
        writeln!(self.writer)?;

        self.heading("=== Descriptive Statistics ===")?;
        match &report.stats {
            Some(stats) => {
                writeln!(self.writer, "count    {}", stats.count)?;
                writeln!(self.writer, "mean     {:.6}", stats.mean)?;
                writeln!(self.writer, "std      {:.6}", stats.std_dev)?;
                writeln!(self.writer, "min      {:.6}", stats.min)?;
                writeln!(self.writer, "25%      {:.6}", stats.q25)?;
                writeln!(self.writer, "50%      {:.6}", stats.median)?;
                writeln!(self.writer, "75%      {:.6}", stats.q75)?;
                writeln!(self.writer, "max      {:.6}", stats.max)?;
            }
            None => writeln!(self.writer, "no scores to summarize")?,
        }
        Ok(())
    }
}

/// Machine-readable report: full rows plus the statistics object.
pub struct JsonWriter<W: Write> {
    writer: W,
}

impl<W: Write> JsonWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }
}

impl<W: Write> ReportWriter for JsonWriter<W> {
    fn write_report(&mut self, report: &RankReport) -> Result<()> {
        serde_json::to_writer_pretty(&mut self.writer, report)?;
        writeln!(self.writer)?;
        Ok(())
    }
}

/// Pick the writer for the requested format and destination. Color is
/// only used for terminal reports going to stdout.
pub fn create_writer(format: ReportFormat, output: Option<&Path>) -> Result<Box<dyn ReportWriter>> {
    let to_file = output.is_some();
    let sink: Box<dyn Write> = match output {
        Some(path) => Box::new(create_output(path)?),
        None => Box::new(std::io::stdout()),
    };

    Ok(match format {
        ReportFormat::Terminal => Box::new(TerminalWriter::new(sink, !to_file)),
        ReportFormat::Json => Box::new(JsonWriter::new(sink)),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ranking::{RankReport, RankingTable, ScoreMetric};
    use crate::ScoreRecord;

    fn report() -> RankReport {
        let mut table = RankingTable::new(vec![
            ScoreRecord {
                file_path: "f2.py".to_string(),
                line: 2,
                score_min: 0.3,
                score_mean: 0.4,
            },
            ScoreRecord {
                file_path: "f1.py".to_string(),
                line: 1,
                score_min: 0.9,
                score_mean: 0.8,
            },
        ]);
        table.sort_descending_by(ScoreMetric::Min);
        RankReport::from_table(&table, ScoreMetric::Min)
    }

    #[test]
    fn terminal_report_lists_every_row_and_the_stats_block() {
        let mut buf = Vec::new();
        TerminalWriter::new(&mut buf, false)
            .write_report(&report())
            .unwrap();

        let text = String::from_utf8(buf).unwrap();
        assert!(text.contains("f1.py"));
        assert!(text.contains("f2.py"));
        assert!(text.contains("score_min"));
        assert!(text.contains("count    2"));
        assert!(text.contains("mean     0.600000"));
        // Ranked order: the higher score renders first.
        assert!(text.find("f1.py").unwrap() < text.find("f2.py").unwrap());
    }

    #[test]
    fn json_report_round_trips_rows_and_stats() {
        let mut buf = Vec::new();
        JsonWriter::new(&mut buf).write_report(&report()).unwrap();

        let value: serde_json::Value = serde_json::from_slice(&buf).unwrap();
        assert_eq!(value["metric"], "min");
        assert_eq!(value["rows"][0]["file_path"], "f1.py");
        assert_eq!(value["rows"][1]["score"], 0.3);
        assert_eq!(value["stats"]["count"], 2);
    }
}
