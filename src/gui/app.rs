//! CSV Visualizer Main Application
//! Main window with control panel, tabbed display and status bar.

use crate::gui::{ChartViewer, ControlPanel, ControlPanelAction, TableView};
use csv_visualizer::state::{AlertLevel, AppState, Tab};
use egui::{Color32, RichText, SidePanel, TopBottomPanel};

/// Main application window.
pub struct VisualizerApp {
    state: AppState,
    control_panel: ControlPanel,
}

impl VisualizerApp {
    pub fn new(_cc: &eframe::CreationContext<'_>) -> Self {
        Self {
            state: AppState::new(),
            control_panel: ControlPanel::new(),
        }
    }

    fn handle_action(&mut self, action: ControlPanelAction) {
        match action {
            ControlPanelAction::None => {}
            ControlPanelAction::LoadCsv => self.handle_load_csv(),
            ControlPanelAction::SelectKind(kind) => self.state.select_kind(kind),
            ControlPanelAction::SelectX(column) => self.state.select_x(&column),
            ControlPanelAction::SelectY(column) => {
                self.state.select_y(&column);
            }
            ControlPanelAction::GeneratePlot => self.state.request_plot(),
            ControlPanelAction::ExportPlot => self.handle_export_plot(),
            ControlPanelAction::SaveStatistics => self.handle_save_statistics(),
        }
    }

    fn handle_load_csv(&mut self) {
        if let Some(path) = rfd::FileDialog::new()
            .set_title("Open CSV File")
            .add_filter("CSV files", &["csv"])
            .add_filter("All files", &["*"])
            .pick_file()
        {
            self.state.load_dataset(&path);
        }
    }

    fn handle_export_plot(&mut self) {
        if !self.state.request_export() {
            return;
        }

        if let Some(path) = rfd::FileDialog::new()
            .set_title("Save Plot As")
            .set_file_name("chart.png")
            .add_filter("PNG", &["png"])
            .add_filter("JPEG", &["jpg", "jpeg"])
            .add_filter("PDF", &["pdf"])
            .save_file()
        {
            self.state.export_plot(&path);
        }
    }

    fn handle_save_statistics(&mut self) {
        if let Some(path) = rfd::FileDialog::new()
            .set_title("Save Statistics")
            .set_file_name("statistics.json")
            .add_filter("JSON", &["json"])
            .save_file()
        {
            self.state.save_statistics(&path);
        }
    }

    fn show_alert(&mut self, ctx: &egui::Context) {
        let Some(alert) = &self.state.alert else {
            return;
        };

        let color = match alert.level {
            AlertLevel::Warning => Color32::from_rgb(255, 193, 7),
            AlertLevel::Error => Color32::from_rgb(220, 53, 69),
        };

        let mut dismissed = false;
        egui::Window::new(RichText::new(&alert.title).color(color))
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
            .show(ctx, |ui| {
                ui.label(&alert.message);
                ui.add_space(8.0);
                ui.vertical_centered(|ui| {
                    if ui.button("OK").clicked() {
                        dismissed = true;
                    }
                });
            });

        if dismissed {
            self.state.dismiss_alert();
        }
    }
}

impl eframe::App for VisualizerApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let modal = self.state.alert.is_some();

        // Left panel - Control Panel
        SidePanel::left("control_panel")
            .min_width(280.0)
            .max_width(330.0)
            .show(ctx, |ui| {
                ui.add_enabled_ui(!modal, |ui| {
                    egui::ScrollArea::vertical().show(ui, |ui| {
                        let action = self.control_panel.show(ui, &self.state);
                        self.handle_action(action);
                    });
                });
            });

        // Bottom - Status Bar
        TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            let color = if self.state.status.contains("Error") {
                Color32::from_rgb(220, 53, 69)
            } else {
                Color32::GRAY
            };
            ui.label(RichText::new(&self.state.status).size(12.0).color(color));
        });

        // Central panel - Tabs
        egui::CentralPanel::default().show(ctx, |ui| {
            ui.horizontal(|ui| {
                let tab = &mut self.state.active_tab;
                ui.selectable_value(tab, Tab::Data, "Data Table");
                ui.selectable_value(tab, Tab::Statistics, "Statistics");
                ui.selectable_value(tab, Tab::Plot, "Plot");
            });
            ui.separator();

            match self.state.active_tab {
                Tab::Data => TableView::show_preview(ui, &self.state.preview),
                Tab::Statistics => TableView::show_statistics(ui, &self.state.stats_text),
                Tab::Plot => ChartViewer::show(ui, &self.state),
            }
        });

        self.show_alert(ctx);
    }
}
