//! Chart Configuration
//! The user's chart selection and the rules that decide whether it can be plotted.

use crate::data::Dataset;
use std::fmt;
use thiserror::Error;

/// Supported chart kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChartKind {
    Bar,
    Line,
    Scatter,
    Histogram,
}

impl ChartKind {
    pub const ALL: [ChartKind; 4] = [
        ChartKind::Bar,
        ChartKind::Line,
        ChartKind::Scatter,
        ChartKind::Histogram,
    ];

    /// Label shown in the chart type selector.
    pub fn label(self) -> &'static str {
        match self {
            ChartKind::Bar => "Bar Chart",
            ChartKind::Line => "Line Chart",
            ChartKind::Scatter => "Scatter Plot",
            ChartKind::Histogram => "Histogram",
        }
    }

    pub fn uses_y_axis(self) -> bool {
        self != ChartKind::Histogram
    }
}

impl fmt::Display for ChartKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Chart Type must be selected.")]
    MissingChartType,
    #[error("X-Axis must be selected.")]
    MissingXAxis,
    #[error("Y-Axis must be selected for this chart type.")]
    MissingYAxis,
    #[error("Column not found: '{0}'")]
    ColumnNotFound(String),
    #[error("{0}")]
    IncompatibleType(String),
}

/// A configuration that passed [`ChartConfiguration::validate`].
///
/// The plot builder only accepts this type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedChart {
    kind: ChartKind,
    x_column: String,
    y_column: Option<String>,
    sort_by_x: bool,
}

impl ValidatedChart {
    pub fn kind(&self) -> ChartKind {
        self.kind
    }

    pub fn x_column(&self) -> &str {
        &self.x_column
    }

    /// Always `Some` except for histograms.
    pub fn y_column(&self) -> Option<&str> {
        self.y_column.as_deref()
    }

    /// Line charts over a numeric x are drawn from a copy sorted by x.
    pub fn sort_by_x(&self) -> bool {
        self.sort_by_x
    }
}

/// Current chart kind and axis selections.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChartConfiguration {
    kind: Option<ChartKind>,
    x_column: Option<String>,
    // Kept while a histogram is selected so it comes back afterwards.
    y_column: Option<String>,
}

impl ChartConfiguration {
    pub fn new() -> Self {
        Self::default()
    }

    /// Clear every selection. Called whenever the dataset is replaced.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn select_kind(&mut self, kind: ChartKind) {
        self.kind = Some(kind);
    }

    pub fn select_x(&mut self, column: impl Into<String>) {
        self.x_column = Some(column.into());
    }

    /// Returns false (and changes nothing) while the y selector is disabled.
    pub fn select_y(&mut self, column: impl Into<String>) -> bool {
        if !self.y_enabled() {
            return false;
        }
        self.y_column = Some(column.into());
        true
    }

    pub fn kind(&self) -> Option<ChartKind> {
        self.kind
    }

    pub fn x_column(&self) -> Option<&str> {
        self.x_column.as_deref()
    }

    /// The y selection; absent whenever the kind is a histogram.
    pub fn y_column(&self) -> Option<&str> {
        match self.kind {
            Some(ChartKind::Histogram) => None,
            _ => self.y_column.as_deref(),
        }
    }

    /// Y can be chosen once a chart kind other than histogram is selected.
    pub fn y_enabled(&self) -> bool {
        self.kind.is_some_and(ChartKind::uses_y_axis)
    }

    pub fn is_empty(&self) -> bool {
        self.kind.is_none() && self.x_column.is_none() && self.y_column.is_none()
    }

    /// Check the selection against `dataset`. The first failing rule wins.
    pub fn validate(&self, dataset: &Dataset) -> Result<ValidatedChart, ValidationError> {
        let kind = self.kind.ok_or(ValidationError::MissingChartType)?;
        let x = self.x_column().ok_or(ValidationError::MissingXAxis)?;
        let y = if kind.uses_y_axis() {
            Some(self.y_column().ok_or(ValidationError::MissingYAxis)?)
        } else {
            None
        };

        for column in std::iter::once(x).chain(y) {
            if !dataset.has_column(column) {
                return Err(ValidationError::ColumnNotFound(column.to_string()));
            }
        }

        let x_numeric = dataset.is_numeric(x);
        let y_numeric = y.is_some_and(|y| dataset.is_numeric(y));

        let incompatible = |rule: &str| Err(ValidationError::IncompatibleType(rule.to_string()));
        match kind {
            ChartKind::Bar if !y_numeric => {
                return incompatible("Bar charts require a numeric Y-axis.")
            }
            ChartKind::Line if !y_numeric => {
                return incompatible("Line charts require a numeric Y-axis.")
            }
            ChartKind::Scatter if !(x_numeric && y_numeric) => {
                return incompatible("Scatter plots require numeric X and Y axes.")
            }
            ChartKind::Histogram if !x_numeric => {
                return incompatible("Histograms require a numeric X-axis.")
            }
            _ => {}
        }

        Ok(ValidatedChart {
            kind,
            x_column: x.to_string(),
            y_column: y.map(str::to_string),
            sort_by_x: kind == ChartKind::Line && x_numeric,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use polars::prelude::*;

    fn cities() -> Dataset {
        let df = df!(
            "city" => &["Oslo", "Lima", "Pune", "Kyiv", "Doha"],
            "population" => &[709.0, 10_000.0, 3_100.0, 2_900.0, 1_200.0]
        )
        .unwrap();
        Dataset::from_dataframe(df, "cities.csv")
    }

    fn config(kind: ChartKind, x: &str, y: Option<&str>) -> ChartConfiguration {
        let mut c = ChartConfiguration::new();
        c.select_kind(kind);
        c.select_x(x);
        if let Some(y) = y {
            c.select_y(y);
        }
        c
    }

    #[test]
    fn histogram_never_requires_y() {
        let ds = cities();
        let mut c = ChartConfiguration::new();
        c.select_kind(ChartKind::Bar);
        c.select_y("city");
        c.select_x("population");
        c.select_kind(ChartKind::Histogram);

        assert_eq!(c.y_column(), None);
        assert!(!c.y_enabled());
        let valid = c.validate(&ds).unwrap();
        assert_eq!(valid.y_column(), None);
        assert_eq!(valid.kind(), ChartKind::Histogram);
    }

    #[test]
    fn leaving_histogram_restores_y() {
        let mut c = config(ChartKind::Bar, "city", Some("population"));
        c.select_kind(ChartKind::Histogram);
        assert_eq!(c.y_column(), None);
        assert!(!c.select_y("city"));

        c.select_kind(ChartKind::Bar);
        assert!(c.y_enabled());
        assert_eq!(c.y_column(), Some("population"));
    }

    #[test]
    fn y_disabled_until_kind_chosen() {
        let mut c = ChartConfiguration::new();
        assert!(!c.y_enabled());
        assert!(!c.select_y("population"));
        assert_eq!(c.y_column(), None);
    }

    #[test]
    fn reset_clears_everything() {
        let mut c = config(ChartKind::Scatter, "population", Some("population"));
        c.reset();
        assert!(c.is_empty());
        assert_eq!(c.kind(), None);
        assert_eq!(c.x_column(), None);
        assert_eq!(c.y_column(), None);
        assert_eq!(c, ChartConfiguration::default());
    }

    #[test]
    fn validation_order_short_circuits() {
        let ds = cities();
        assert_eq!(
            ChartConfiguration::new().validate(&ds),
            Err(ValidationError::MissingChartType)
        );

        let mut c = ChartConfiguration::new();
        c.select_kind(ChartKind::Bar);
        c.select_y("ghost");
        assert_eq!(c.validate(&ds), Err(ValidationError::MissingXAxis));

        let c = config(ChartKind::Bar, "city", None);
        assert_eq!(c.validate(&ds), Err(ValidationError::MissingYAxis));

        let c = config(ChartKind::Bar, "ghost", Some("phantom"));
        assert_eq!(
            c.validate(&ds),
            Err(ValidationError::ColumnNotFound("ghost".to_string()))
        );

        let c = config(ChartKind::Bar, "city", Some("phantom"));
        let err = c.validate(&ds).unwrap_err();
        assert!(err.to_string().contains("phantom"));
    }

    #[test]
    fn per_kind_type_rules() {
        let ds = cities();

        let bar = config(ChartKind::Bar, "city", Some("population"));
        assert!(bar.validate(&ds).is_ok());

        let bar = config(ChartKind::Bar, "population", Some("city"));
        assert_eq!(
            bar.validate(&ds),
            Err(ValidationError::IncompatibleType(
                "Bar charts require a numeric Y-axis.".to_string()
            ))
        );

        let scatter = config(ChartKind::Scatter, "city", Some("population"));
        assert_eq!(
            scatter.validate(&ds).unwrap_err().to_string(),
            "Scatter plots require numeric X and Y axes."
        );

        let hist = config(ChartKind::Histogram, "city", None);
        assert_eq!(
            hist.validate(&ds).unwrap_err().to_string(),
            "Histograms require a numeric X-axis."
        );

        let line = config(ChartKind::Line, "population", Some("city"));
        assert_eq!(
            line.validate(&ds).unwrap_err().to_string(),
            "Line charts require a numeric Y-axis."
        );
    }

    #[test]
    fn line_sorts_only_over_numeric_x() {
        let ds = cities();
        let numeric_x = config(ChartKind::Line, "population", Some("population"));
        assert!(numeric_x.validate(&ds).unwrap().sort_by_x());

        let text_x = config(ChartKind::Line, "city", Some("population"));
        assert!(!text_x.validate(&ds).unwrap().sort_by_x());

        let bar = config(ChartKind::Bar, "population", Some("population"));
        assert!(!bar.validate(&ds).unwrap().sort_by_x());
    }
}
