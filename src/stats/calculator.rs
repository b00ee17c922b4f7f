//! Statistics Calculator Module
//! Descriptive statistics for the numeric columns of a dataset.

use crate::data::Dataset;
use polars::prelude::PolarsResult;
use rayon::prelude::*;
use serde::Serialize;
use statrs::statistics::Statistics;
use std::fmt;

/// Shown in place of the table when a dataset has no numeric columns.
pub const NO_NUMERIC_DATA: &str = "No numeric data found for statistics.";

const ROW_LABELS: [&str; 8] = ["count", "mean", "std", "min", "25%", "50%", "75%", "max"];

/// Descriptive statistics for one numeric column.
#[derive(Debug, Clone, Serialize)]
pub struct ColumnStats {
    pub column: String,
    pub count: usize,
    pub mean: f64,
    pub std: f64,
    pub min: f64,
    #[serde(rename = "25%")]
    pub p25: f64,
    #[serde(rename = "50%")]
    pub p50: f64,
    #[serde(rename = "75%")]
    pub p75: f64,
    pub max: f64,
}

impl ColumnStats {
    fn row_values(&self) -> [f64; 8] {
        [
            self.count as f64,
            self.mean,
            self.std,
            self.min,
            self.p25,
            self.p50,
            self.p75,
            self.max,
        ]
    }
}

/// Result of summarizing a dataset.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StatsReport {
    NoNumericColumns,
    Table(Vec<ColumnStats>),
}

impl StatsReport {
    pub fn is_empty(&self) -> bool {
        matches!(self, StatsReport::NoNumericColumns)
    }

    /// Pretty JSON; NaN statistics become `null`.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

impl fmt::Display for StatsReport {
    /// Summary table with one column per numeric column.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let columns = match self {
            StatsReport::NoNumericColumns => return f.write_str(NO_NUMERIC_DATA),
            StatsReport::Table(columns) => columns,
        };

        let label_width = ROW_LABELS.iter().map(|l| l.len()).max().unwrap_or(0);

        let cells: Vec<[String; 8]> = columns
            .iter()
            .map(|c| c.row_values().map(format_value))
            .collect();

        let widths: Vec<usize> = columns
            .iter()
            .zip(&cells)
            .map(|(c, values)| {
                values
                    .iter()
                    .map(|v| v.len())
                    .chain(std::iter::once(c.column.len()))
                    .max()
                    .unwrap_or(0)
            })
            .collect();

        write!(f, "{:label_width$}", "")?;
        for (c, width) in columns.iter().zip(widths.iter().copied()) {
            write!(f, "  {:>width$}", c.column)?;
        }

        for (row, label) in ROW_LABELS.iter().enumerate() {
            writeln!(f)?;
            write!(f, "{:<label_width$}", label)?;
            for (values, width) in cells.iter().zip(widths.iter().copied()) {
                write!(f, "  {:>width$}", values[row])?;
            }
        }

        Ok(())
    }
}

fn format_value(v: f64) -> String {
    if v.is_nan() {
        "NaN".to_string()
    } else {
        format!("{:.6}", v)
    }
}

/// Computes descriptive statistics.
pub struct StatsCalculator;

impl StatsCalculator {
    /// Summarize every numeric column of the dataset; text columns are skipped.
    pub fn summarize(dataset: &Dataset) -> PolarsResult<StatsReport> {
        let numeric: Vec<String> = dataset
            .numeric_columns()
            .into_iter()
            .map(|c| c.name.clone())
            .collect();

        if numeric.is_empty() {
            return Ok(StatsReport::NoNumericColumns);
        }

        let columns = numeric
            .par_iter()
            .map(|name| -> PolarsResult<ColumnStats> {
                let values: Vec<f64> = dataset
                    .numeric_values(name)?
                    .into_iter()
                    .flatten()
                    .filter(|v| !v.is_nan())
                    .collect();
                let mut stats = Self::compute_descriptive_stats(&values);
                stats.column = name.clone();
                Ok(stats)
            })
            .collect::<PolarsResult<Vec<ColumnStats>>>()?;

        Ok(StatsReport::Table(columns))
    }

    /// Compute descriptive statistics for an array of values.
    pub fn compute_descriptive_stats(values: &[f64]) -> ColumnStats {
        let n = values.len();

        let mut sorted = values.to_vec();
        sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

        let (mean, std) = match n {
            0 => (f64::NAN, f64::NAN),
            1 => (values[0], f64::NAN),
            _ => (values.iter().mean(), values.iter().std_dev()),
        };

        ColumnStats {
            column: String::new(),
            count: n,
            mean,
            std,
            min: sorted.first().copied().unwrap_or(f64::NAN),
            p25: Self::percentile(&sorted, 25.0),
            p50: Self::percentile(&sorted, 50.0),
            p75: Self::percentile(&sorted, 75.0),
            max: sorted.last().copied().unwrap_or(f64::NAN),
        }
    }

    /// Calculate percentile using linear interpolation (NumPy compatible).
    fn percentile(sorted_values: &[f64], p: f64) -> f64 {
        let n = sorted_values.len();
        if n == 0 {
            return f64::NAN;
        }
        if n == 1 {
            return sorted_values[0];
        }

        let rank = (p / 100.0) * (n - 1) as f64;
        let lower = rank.floor() as usize;
        let upper = (rank.ceil() as usize).min(n - 1);
        let frac = rank - lower as f64;

        if lower == upper {
            sorted_values[lower]
        } else {
            sorted_values[lower] * (1.0 - frac) + sorted_values[upper] * frac
        }
    }
}
