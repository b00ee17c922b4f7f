//! Table View Widget
//! Data Table and Statistics tabs.

use csv_visualizer::data::TablePreview;
use egui::{RichText, ScrollArea};

const MIN_COLUMN_WIDTH: f32 = 80.0;

pub struct TableView;

impl TableView {
    /// Striped grid of the preview rows.
    pub fn show_preview(ui: &mut egui::Ui, preview: &TablePreview) {
        if preview.headers.is_empty() {
            ui.centered_and_justified(|ui| {
                ui.label(RichText::new("No Data").size(20.0));
            });
            return;
        }

        ScrollArea::both()
            .auto_shrink([false, false])
            .show(ui, |ui| {
                egui::Grid::new("data_table")
                    .striped(true)
                    .min_col_width(MIN_COLUMN_WIDTH)
                    .spacing([12.0, 4.0])
                    .show(ui, |ui| {
                        for header in &preview.headers {
                            ui.label(RichText::new(header).strong());
                        }
                        ui.end_row();

                        for row in &preview.rows {
                            for cell in row {
                                ui.label(cell);
                            }
                            ui.end_row();
                        }
                    });
            });
    }

    /// Statistics text in a monospace font.
    pub fn show_statistics(ui: &mut egui::Ui, text: &str) {
        ScrollArea::both()
            .auto_shrink([false, false])
            .show(ui, |ui| {
                ui.label(RichText::new(text).monospace());
            });
    }
}
