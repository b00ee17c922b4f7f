//! Chart Plotter Module
//! Draws a [`PlotObject`] as an interactive chart using egui_plot.

use super::builder::{PlotData, PlotObject};
use egui::{Color32, RichText, Stroke};
use egui_plot::{Bar, BarChart, Legend, Line, Plot, PlotPoints, Points};

/// Series color (matches the exported images)
const SERIES_COLOR: Color32 = Color32::from_rgb(31, 119, 180);

/// Draws plot objects inside the UI.
pub struct ChartPlotter;

impl ChartPlotter {
    /// Draw the chart with its title. `generation` changes with every new plot
    /// so zoom and pan state does not leak from the previous one.
    pub fn draw_chart(ui: &mut egui::Ui, plot: &PlotObject, generation: u64) {
        ui.vertical_centered(|ui| {
            ui.label(RichText::new(&plot.title).size(16.0).strong());
        });
        ui.add_space(6.0);

        let mut chart = Plot::new(("chart", generation))
            .x_axis_label(plot.x_label.clone())
            .y_axis_label(plot.y_label.clone())
            .show_grid(true)
            .allow_scroll(false);

        if plot.series_name.is_some() {
            chart = chart.legend(Legend::default());
        }

        if let Some(labels) = plot.categories() {
            let labels = labels.to_vec();
            chart = chart.x_axis_formatter(move |mark, _range| {
                let idx = mark.value.round();
                if (mark.value - idx).abs() > 1e-6 || idx < 0.0 {
                    return String::new();
                }
                labels.get(idx as usize).cloned().unwrap_or_default()
            });
        }

        let name = plot.series_name.clone().unwrap_or_default();

        chart.show(ui, |plot_ui| match &plot.data {
            PlotData::Bars { heights, .. } => {
                let bars: Vec<Bar> = heights
                    .iter()
                    .enumerate()
                    .filter(|(_, h)| h.is_finite())
                    .map(|(i, &h)| Bar::new(i as f64, h).width(0.5).fill(SERIES_COLOR))
                    .collect();
                plot_ui.bar_chart(BarChart::new(bars).color(SERIES_COLOR).name(name));
            }
            PlotData::Line { points, .. } => {
                let line: PlotPoints = points.iter().map(|&(x, y)| [x, y]).collect();
                let markers: PlotPoints = points.iter().map(|&(x, y)| [x, y]).collect();
                plot_ui.line(Line::new(line).color(SERIES_COLOR).width(1.5).name(&name));
                plot_ui.points(Points::new(markers).radius(3.0).color(SERIES_COLOR).name(name));
            }
            PlotData::Scatter { points } => {
                let scatter: PlotPoints = points.iter().map(|&(x, y)| [x, y]).collect();
                plot_ui.points(Points::new(scatter).radius(3.0).color(SERIES_COLOR));
            }
            PlotData::Histogram(hist) => {
                let bars: Vec<Bar> = hist
                    .counts
                    .iter()
                    .enumerate()
                    .map(|(i, &count)| {
                        let (lo, hi) = (hist.edges[i], hist.edges[i + 1]);
                        Bar::new((lo + hi) / 2.0, count as f64)
                            .width(hi - lo)
                            .fill(SERIES_COLOR)
                            .stroke(Stroke::new(1.0, Color32::BLACK))
                    })
                    .collect();
                plot_ui.bar_chart(BarChart::new(bars));
            }
        });
    }

    /// Centered message shown instead of a chart.
    pub fn draw_placeholder(ui: &mut egui::Ui, message: &str) {
        ui.centered_and_justified(|ui| {
            ui.label(RichText::new(message).size(16.0).color(Color32::GRAY));
        });
    }
}
