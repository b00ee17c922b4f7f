//! Plot Builder
//! Turns a validated chart selection and the dataset into a renderable [`PlotObject`].

use super::config::{ChartKind, ValidatedChart};
use crate::data::{numeric_values_of, text_values_of, Dataset};
use polars::prelude::*;
use thiserror::Error;

/// Fixed number of histogram bins.
pub const HISTOGRAM_BINS: usize = 30;

#[derive(Error, Debug)]
pub enum PlotError {
    #[error("data error: {0}")]
    Data(#[from] PolarsError),
    #[error("{0}")]
    NothingToPlot(String),
}

/// Equal-width frequency bins; `edges.len() == counts.len() + 1`.
#[derive(Debug, Clone, PartialEq)]
pub struct Histogram {
    pub edges: Vec<f64>,
    pub counts: Vec<u64>,
}

impl Histogram {
    /// Bin the finite values over [min, max]; the last bin is closed.
    /// Returns `None` when there is nothing finite to bin.
    pub fn from_values(values: &[f64], bins: usize) -> Option<Self> {
        let finite: Vec<f64> = values.iter().copied().filter(|v| v.is_finite()).collect();
        if finite.is_empty() || bins == 0 {
            return None;
        }

        let mut lo = finite.iter().copied().fold(f64::INFINITY, f64::min);
        let mut hi = finite.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        if lo == hi {
            lo -= 0.5;
            hi += 0.5;
        }

        // Divide before subtracting so ranges near f64::MAX stay finite.
        let n = bins as f64;
        let width = hi / n - lo / n;
        let edges: Vec<f64> = (0..=bins)
            .map(|i| {
                let t = i as f64 / n;
                lo * (1.0 - t) + hi * t
            })
            .collect();

        let mut counts = vec![0u64; bins];
        for v in finite {
            let idx = ((v / width - lo / width).floor().max(0.0) as usize).min(bins - 1);
            counts[idx] += 1;
        }

        Some(Self { edges, counts })
    }

    pub fn total(&self) -> u64 {
        self.counts.iter().sum()
    }
}

/// Prepared series for one chart kind.
#[derive(Debug, Clone, PartialEq)]
pub enum PlotData {
    /// One bar per row, labelled by the x value. Missing heights are NaN.
    Bars {
        labels: Vec<String>,
        heights: Vec<f64>,
    },
    /// Connected points. `categories` is set when x is text and points sit at row positions.
    Line {
        points: Vec<(f64, f64)>,
        categories: Option<Vec<String>>,
    },
    Scatter {
        points: Vec<(f64, f64)>,
    },
    Histogram(Histogram),
}

/// A chart ready for display or export.
#[derive(Debug, Clone)]
pub struct PlotObject {
    pub chart: ValidatedChart,
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    /// Legend entry for bar and line charts.
    pub series_name: Option<String>,
    pub data: PlotData,
}

impl PlotObject {
    pub fn kind(&self) -> ChartKind {
        self.chart.kind()
    }

    /// Tick labels for categorical x axes.
    pub fn categories(&self) -> Option<&[String]> {
        match &self.data {
            PlotData::Bars { labels, .. } => Some(labels.as_slice()),
            PlotData::Line {
                categories: Some(c),
                ..
            } => Some(c.as_slice()),
            _ => None,
        }
    }
}

/// Builds plot objects from validated selections.
pub struct PlotBuilder;

impl PlotBuilder {
    pub fn build(dataset: &Dataset, chart: &ValidatedChart) -> Result<PlotObject, PlotError> {
        let x = chart.x_column();
        let y = chart.y_column().unwrap_or_default();

        let frame = if chart.sort_by_x() {
            dataset.sorted_by(x)?
        } else {
            dataset.frame().clone()
        };

        let (title, y_label, series_name, data) = match chart.kind() {
            ChartKind::Bar => (
                format!("Bar Chart: {} vs {}", y, x),
                y.to_string(),
                Some(y.to_string()),
                Self::bars(&frame, x, y)?,
            ),
            ChartKind::Line => (
                format!("Line Chart: {} vs {}", y, x),
                y.to_string(),
                Some(y.to_string()),
                Self::line(&frame, x, y, dataset.is_numeric(x))?,
            ),
            ChartKind::Scatter => (
                format!("Scatter Plot: {} vs {}", y, x),
                y.to_string(),
                None,
                Self::scatter(&frame, x, y)?,
            ),
            ChartKind::Histogram => (
                format!("Histogram of {}", x),
                "Frequency".to_string(),
                None,
                Self::histogram(&frame, x)?,
            ),
        };

        log::debug!("Built {} for '{}'", chart.kind(), title);

        Ok(PlotObject {
            chart: chart.clone(),
            title,
            x_label: x.to_string(),
            y_label,
            series_name,
            data,
        })
    }

    fn bars(frame: &DataFrame, x: &str, y: &str) -> Result<PlotData, PlotError> {
        let labels = text_values_of(frame, x)?;
        let heights: Vec<f64> = numeric_values_of(frame, y)?
            .into_iter()
            .map(|v| v.unwrap_or(f64::NAN))
            .collect();

        if !heights.iter().any(|h| h.is_finite()) {
            return Err(Self::nothing(y));
        }
        Ok(PlotData::Bars { labels, heights })
    }

    fn line(frame: &DataFrame, x: &str, y: &str, x_numeric: bool) -> Result<PlotData, PlotError> {
        let ys = numeric_values_of(frame, y)?;

        let (xs, categories) = if x_numeric {
            (numeric_values_of(frame, x)?, None)
        } else {
            let labels = text_values_of(frame, x)?;
            let positions = (0..labels.len()).map(|i| Some(i as f64)).collect();
            (positions, Some(labels))
        };

        let points = Self::pairs(&xs, &ys);
        if points.is_empty() {
            return Err(Self::nothing(y));
        }
        Ok(PlotData::Line { points, categories })
    }

    fn scatter(frame: &DataFrame, x: &str, y: &str) -> Result<PlotData, PlotError> {
        let points = Self::pairs(&numeric_values_of(frame, x)?, &numeric_values_of(frame, y)?);
        if points.is_empty() {
            return Err(PlotError::NothingToPlot(format!(
                "no rows with values in both '{}' and '{}'",
                x, y
            )));
        }
        Ok(PlotData::Scatter { points })
    }

    fn histogram(frame: &DataFrame, x: &str) -> Result<PlotData, PlotError> {
        let values: Vec<f64> = numeric_values_of(frame, x)?.into_iter().flatten().collect();
        Histogram::from_values(&values, HISTOGRAM_BINS)
            .map(PlotData::Histogram)
            .ok_or_else(|| Self::nothing(x))
    }

    /// Rows where both coordinates are present and finite.
    fn pairs(xs: &[Option<f64>], ys: &[Option<f64>]) -> Vec<(f64, f64)> {
        xs.iter()
            .zip(ys)
            .filter_map(|(x, y)| match (x, y) {
                (Some(x), Some(y)) if x.is_finite() && y.is_finite() => Some((*x, *y)),
                _ => None,
            })
            .collect()
    }

    fn nothing(column: &str) -> PlotError {
        PlotError::NothingToPlot(format!("column '{}' has no numeric values to plot", column))
    }
}
