//! Ranking reporter: materializes a score artifact as a sortable table,
//! ranks it by a chosen naturalness metric, and summarizes the metric with
//! descriptive statistics.

pub mod artifact;

pub use artifact::{read_score_artifact, write_score_artifact, ArtifactError};

use clap::ValueEnum;
use serde::Serialize;

use crate::core::ScoreRecord;

/// Which naturalness-score field a report ranks by.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ScoreMetric {
    /// Minimum per-line score
    Min,
    /// Mean per-line score
    Mean,
}

impl ScoreMetric {
    pub fn value(&self, record: &ScoreRecord) -> f64 {
        match self {
            ScoreMetric::Min => record.score_min,
            ScoreMetric::Mean => record.score_mean,
        }
    }

    pub fn column_name(&self) -> &'static str {
        match self {
            ScoreMetric::Min => "score_min",
            ScoreMetric::Mean => "score_mean",
        }
    }
}

/// The score records organized as a sortable table.
#[derive(Clone, Debug, Default)]
pub struct RankingTable {
    records: Vec<ScoreRecord>,
}

impl RankingTable {
    pub fn new(records: Vec<ScoreRecord>) -> Self {
        Self { records }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn records(&self) -> &[ScoreRecord] {
        &self.records
    }

    /// Sort descending by the given metric. The sort is stable: rows with
    /// equal scores keep the table's prior relative order. NaN scores
    /// order first under `total_cmp`'s descending ordering.
    pub fn sort_descending_by(&mut self, metric: ScoreMetric) {
        self.records
            .sort_by(|a, b| metric.value(b).total_cmp(&metric.value(a)));
    }
}

/// One row of the rendered report: the table restricted to the
/// `{file_path, line, score}` columns.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct RankedRow {
    pub file_path: String,
    pub line: u32,
    pub score: f64,
}

/// Descriptive statistics over the ranked score column.
#[derive(Clone, Copy, Debug, Serialize)]
pub struct ScoreStats {
    pub count: usize,
    pub mean: f64,
    pub std_dev: f64,
    pub min: f64,
    pub q25: f64,
    pub median: f64,
    pub q75: f64,
    pub max: f64,
}

impl ScoreStats {
    /// Summarize a score column: count, mean, sample standard deviation,
    /// minimum, quartiles, maximum. NaN scores are excluded. Returns
    /// `None` when no finite scores remain.
    pub fn describe(values: &[f64]) -> Option<Self> {
        let mut sorted: Vec<f64> = values.iter().copied().filter(|v| !v.is_nan()).collect();
        if sorted.is_empty() {
            return None;
        }
        sorted.sort_by(f64::total_cmp);

        let n = sorted.len();
        let mean = sorted.iter().sum::<f64>() / n as f64;
        // Sample standard deviation (n - 1); undefined for a single value.
        let std_dev = if n > 1 {
            (sorted.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (n - 1) as f64).sqrt()
        } else {
            f64::NAN
        };

        Some(Self {
            count: n,
            mean,
            std_dev,
            min: sorted[0],
            q25: quantile(&sorted, 0.25),
            median: quantile(&sorted, 0.5),
            q75: quantile(&sorted, 0.75),
            max: sorted[n - 1],
        })
    }
}

/// Linear-interpolation quantile over an ascending-sorted, non-empty slice.
fn quantile(sorted: &[f64], q: f64) -> f64 {
    let pos = q * (sorted.len() - 1) as f64;
    let lo = pos.floor() as usize;
    let hi = pos.ceil() as usize;
    if lo == hi {
        sorted[lo]
    } else {
        sorted[lo] + (sorted[hi] - sorted[lo]) * (pos - lo as f64)
    }
}

/// A fully prepared report: the ranked rows plus the statistics block.
#[derive(Clone, Debug, Serialize)]
pub struct RankReport {
    pub metric: ScoreMetric,
    pub rows: Vec<RankedRow>,
    pub stats: Option<ScoreStats>,
}

impl RankReport {
    /// Project the table onto the report columns and summarize the ranked
    /// metric. The table should already be sorted.
    pub fn from_table(table: &RankingTable, metric: ScoreMetric) -> Self {
        let rows: Vec<RankedRow> = table
            .records()
            .iter()
            .map(|record| RankedRow {
                file_path: record.file_path.clone(),
                line: record.line,
                score: metric.value(record),
            })
            .collect();
        let scores: Vec<f64> = rows.iter().map(|row| row.score).collect();
        let stats = ScoreStats::describe(&scores);

        Self { metric, rows, stats }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn record(file_path: &str, line: u32, score_min: f64, score_mean: f64) -> ScoreRecord {
        ScoreRecord {
            file_path: file_path.to_string(),
            line,
            score_min,
            score_mean,
        }
    }

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < 1e-9,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn sorts_descending_by_selected_metric() {
        let mut table = RankingTable::new(vec![
            record("low.py", 1, 0.1, 0.9),
            record("high.py", 2, 0.8, 0.2),
            record("mid.py", 3, 0.5, 0.5),
        ]);

        table.sort_descending_by(ScoreMetric::Min);
        let by_min: Vec<&str> = table.records().iter().map(|r| r.file_path.as_str()).collect();
        assert_eq!(by_min, vec!["high.py", "mid.py", "low.py"]);

        table.sort_descending_by(ScoreMetric::Mean);
        let by_mean: Vec<&str> = table.records().iter().map(|r| r.file_path.as_str()).collect();
        assert_eq!(by_mean, vec!["low.py", "mid.py", "high.py"]);
    }

    #[test]
    fn equal_scores_preserve_prior_order() {
        let mut table = RankingTable::new(vec![
            record("f1.py", 1, 0.9, 0.0),
            record("f2.py", 2, 0.3, 0.0),
            record("f3.py", 3, 0.9, 0.0),
        ]);
        table.sort_descending_by(ScoreMetric::Min);

        let order: Vec<&str> = table.records().iter().map(|r| r.file_path.as_str()).collect();
        assert_eq!(order, vec!["f1.py", "f3.py", "f2.py"]);
    }

    #[test]
    fn describe_matches_hand_computed_summary() {
        let stats = ScoreStats::describe(&[1.0, 2.0, 3.0, 4.0]).unwrap();

        assert_eq!(stats.count, 4);
        assert_close(stats.mean, 2.5);
        assert_close(stats.std_dev, (5.0f64 / 3.0).sqrt());
        assert_close(stats.min, 1.0);
        assert_close(stats.q25, 1.75);
        assert_close(stats.median, 2.5);
        assert_close(stats.q75, 3.25);
        assert_close(stats.max, 4.0);
    }

    #[test]
    fn describe_of_single_value_has_undefined_spread() {
        let stats = ScoreStats::describe(&[0.7]).unwrap();
        assert_eq!(stats.count, 1);
        assert_close(stats.mean, 0.7);
        assert!(stats.std_dev.is_nan());
        assert_close(stats.median, 0.7);
    }

    #[test]
    fn describe_skips_nan_and_empty_is_none() {
        let stats = ScoreStats::describe(&[f64::NAN, 2.0, 4.0]).unwrap();
        assert_eq!(stats.count, 2);
        assert_close(stats.mean, 3.0);

        assert!(ScoreStats::describe(&[]).is_none());
        assert!(ScoreStats::describe(&[f64::NAN]).is_none());
    }

    #[test]
    fn report_projects_ranked_columns() {
        let mut table = RankingTable::new(vec![
            record("f1.py", 1, 0.9, 0.0),
            record("f2.py", 2, 0.3, 0.0),
        ]);
        table.sort_descending_by(ScoreMetric::Min);
        let report = RankReport::from_table(&table, ScoreMetric::Min);

        assert_eq!(
            report.rows,
            vec![
                RankedRow {
                    file_path: "f1.py".to_string(),
                    line: 1,
                    score: 0.9
                },
                RankedRow {
                    file_path: "f2.py".to_string(),
                    line: 2,
                    score: 0.3
                },
            ]
        );
        assert_eq!(report.stats.unwrap().count, 2);
    }
}
