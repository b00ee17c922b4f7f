//! Charts module - chart selection, plot building and rendering

mod builder;
mod config;
mod plotter;
mod renderer;

pub use builder::{Histogram, PlotBuilder, PlotData, PlotError, PlotObject, HISTOGRAM_BINS};
pub use config::{ChartConfiguration, ChartKind, ValidatedChart, ValidationError};
pub use plotter::ChartPlotter;
pub use renderer::{RenderError, StaticChartRenderer, BASE_DPI, BASE_HEIGHT, BASE_WIDTH};
