//! Application State
//! Owns the loaded dataset, the chart selection and the current plot, and turns
//! every user action into a state change plus a status message.

use crate::charts::{ChartConfiguration, ChartKind, PlotBuilder, PlotObject, ValidationError};
use crate::data::{Dataset, DatasetLoader, TablePreview, PREVIEW_ROW_LIMIT};
use crate::export::{self, resolve_path};
use crate::stats::StatsCalculator;
use anyhow::Context;
use std::fs;
use std::path::Path;

pub const READY_STATUS: &str = "Ready. Please load a CSV file.";

/// Severity of a user alert.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlertLevel {
    Warning,
    Error,
}

/// A message the user must acknowledge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alert {
    pub title: String,
    pub message: String,
    pub level: AlertLevel,
}

impl Alert {
    fn error(title: &str, message: impl Into<String>) -> Self {
        Self {
            title: title.to_string(),
            message: message.into(),
            level: AlertLevel::Error,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tab {
    #[default]
    Data,
    Statistics,
    Plot,
}

/// Everything the UI shows, in one place.
pub struct AppState {
    pub dataset: Option<Dataset>,
    pub preview: TablePreview,
    pub stats_text: String,
    pub config: ChartConfiguration,
    pub plot: Option<PlotObject>,
    /// Text shown in the plot tab after a failed build.
    pub plot_failure: Option<String>,
    /// Bumped on every successful build.
    pub plot_generation: u64,
    pub status: String,
    pub alert: Option<Alert>,
    pub active_tab: Tab,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

impl AppState {
    pub fn new() -> Self {
        Self {
            dataset: None,
            preview: TablePreview::default(),
            stats_text: String::new(),
            config: ChartConfiguration::new(),
            plot: None,
            plot_failure: None,
            plot_generation: 0,
            status: READY_STATUS.to_string(),
            alert: None,
            active_tab: Tab::Data,
        }
    }

    pub fn has_data(&self) -> bool {
        self.dataset.is_some()
    }

    pub fn has_plot(&self) -> bool {
        self.plot.is_some()
    }

    /// Replace the dataset. On failure the previous state is kept.
    pub fn load_dataset(&mut self, path: &Path) {
        let dataset = match DatasetLoader::load(path) {
            Ok(dataset) => dataset,
            Err(e) => {
                log::error!("Failed to load {}: {}", path.display(), e);
                self.alert = Some(Alert::error("Error", format!("Failed to load file: {}", e)));
                self.status = "Error loading file.".to_string();
                return;
            }
        };

        self.preview = dataset.preview(PREVIEW_ROW_LIMIT);
        self.stats_text = match StatsCalculator::summarize(&dataset) {
            Ok(report) => report.to_string(),
            Err(e) => {
                log::error!("Statistics failed: {}", e);
                format!("Failed to compute statistics: {}", e)
            }
        };

        self.config.reset();
        self.plot = None;
        self.plot_failure = None;
        self.active_tab = Tab::Data;

        let name = dataset.source_name().to_string();
        self.status = if self.preview.truncated {
            format!(
                "Loaded '{}'. Data table is showing the first {} rows.",
                name, PREVIEW_ROW_LIMIT
            )
        } else {
            format!("Loaded '{}' successfully.", name)
        };
        self.dataset = Some(dataset);
    }

    pub fn select_kind(&mut self, kind: ChartKind) {
        self.config.select_kind(kind);
    }

    pub fn select_x(&mut self, column: &str) {
        self.config.select_x(column);
    }

    pub fn select_y(&mut self, column: &str) -> bool {
        self.config.select_y(column)
    }

    /// Validate the selection and build a new plot.
    pub fn request_plot(&mut self) {
        let Some(dataset) = &self.dataset else {
            self.status = "Error: No data loaded.".to_string();
            return;
        };

        let chart = match self.config.validate(dataset) {
            Ok(chart) => chart,
            Err(e) => {
                log::warn!("Plot request rejected: {}", e);
                match &e {
                    ValidationError::ColumnNotFound(column) => {
                        self.alert = Some(Alert::error(
                            "Plotting Error",
                            format!(
                                "Column not found: '{}'. Please check your selections.",
                                column
                            ),
                        ));
                        self.status = format!("Error plotting: Column '{}' not found.", column);
                    }
                    ValidationError::IncompatibleType(rule) => {
                        self.alert = Some(Alert::error(
                            "Plotting Error",
                            format!("Incompatible data: {}", rule),
                        ));
                        self.status = format!("Error plotting: {}", rule);
                    }
                    _ => self.status = format!("Error: {}", e),
                }
                return;
            }
        };

        // The previous plot goes away before the next one exists.
        self.plot = None;
        self.plot_failure = None;

        match PlotBuilder::build(dataset, &chart) {
            Ok(plot) => {
                log::info!("Generated {}", plot.title);
                self.status = format!("Generated {} successfully.", chart.kind().label());
                self.plot = Some(plot);
                self.plot_generation += 1;
            }
            Err(e) => {
                log::error!("Plot build failed: {}", e);
                self.plot_failure = Some(format!("Plot generation failed.\nError: {}", e));
                self.alert = Some(Alert::error(
                    "Plotting Error",
                    format!("Failed to generate plot: {}", e),
                ));
                self.status = format!("Error plotting: {}", e);
            }
        }
        self.active_tab = Tab::Plot;
    }

    /// Whether an export can start. Warns the user when there is nothing to save.
    pub fn request_export(&mut self) -> bool {
        if self.plot.is_some() {
            return true;
        }
        self.status = "Error: No plot to export.".to_string();
        self.alert = Some(Alert {
            title: "Export Error".to_string(),
            message: "There is no plot to export. Please generate a plot first.".to_string(),
            level: AlertLevel::Warning,
        });
        false
    }

    pub fn export_plot(&mut self, path: &Path) {
        let result = resolve_path(path).and_then(|(path, format)| {
            export::export(self.plot.as_ref(), &path, format).map(|()| path)
        });

        match result {
            Ok(path) => self.status = format!("Plot saved to '{}'", display_name(&path)),
            Err(e) => {
                log::error!("Export to {} failed: {}", path.display(), e);
                self.alert = Some(Alert::error("Error", format!("Failed to save plot: {}", e)));
                self.status = "Error saving plot.".to_string();
            }
        }
    }

    /// Write the statistics of the current dataset as JSON.
    pub fn save_statistics(&mut self, path: &Path) {
        match self.write_statistics(path) {
            Ok(()) => {
                log::info!("Statistics saved to {}", path.display());
                self.status = format!("Statistics saved to '{}'", display_name(path));
            }
            Err(e) => {
                log::error!("Saving statistics failed: {:#}", e);
                self.alert = Some(Alert::error(
                    "Error",
                    format!("Failed to save statistics: {:#}", e),
                ));
                self.status = "Error saving statistics.".to_string();
            }
        }
    }

    fn write_statistics(&self, path: &Path) -> anyhow::Result<()> {
        let dataset = self.dataset.as_ref().context("no data loaded")?;
        let report = StatsCalculator::summarize(dataset).context("computing statistics")?;
        let json = report.to_json().context("serializing statistics")?;
        fs::write(path, json).with_context(|| format!("writing {}", path.display()))?;
        Ok(())
    }

    pub fn dismiss_alert(&mut self) {
        self.alert = None;
    }
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}
