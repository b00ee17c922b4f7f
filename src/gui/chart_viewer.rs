//! Chart Viewer Widget
//! Plot tab: the interactive chart inside a card, or a placeholder message.

use csv_visualizer::charts::ChartPlotter;
use csv_visualizer::state::AppState;
use egui::Color32;

const PLACEHOLDER: &str = "Generate a plot using the controls on the left.";

pub struct ChartViewer;

impl ChartViewer {
    pub fn show(ui: &mut egui::Ui, state: &AppState) {
        match (&state.plot, &state.plot_failure) {
            (Some(plot), _) => {
                egui::Frame::none()
                    .rounding(8.0)
                    .stroke(egui::Stroke::new(1.0, Color32::from_gray(90)))
                    .fill(ui.visuals().widgets.noninteractive.bg_fill)
                    .inner_margin(12.0)
                    .show(ui, |ui| {
                        ChartPlotter::draw_chart(ui, plot, state.plot_generation);
                    });
            }
            (None, Some(failure)) => ChartPlotter::draw_placeholder(ui, failure),
            (None, None) => ChartPlotter::draw_placeholder(ui, PLACEHOLDER),
        }
    }
}
