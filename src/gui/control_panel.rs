//! Control Panel Widget
//! Left side panel with file loading, chart selection and actions.

use csv_visualizer::charts::ChartKind;
use csv_visualizer::state::AppState;
use egui::{Color32, ComboBox, RichText};

/// Left side control panel. Reads the state and reports what the user did.
#[derive(Default)]
pub struct ControlPanel;

impl ControlPanel {
    pub fn new() -> Self {
        Self
    }

    /// Draw the control panel
    pub fn show(&self, ui: &mut egui::Ui, state: &AppState) -> ControlPanelAction {
        let mut action = ControlPanelAction::None;
        let has_data = state.has_data();

        ui.vertical_centered(|ui| {
            ui.add_space(5.0);
            ui.label(
                RichText::new("📊 CSV Visualizer")
                    .size(22.0)
                    .color(Color32::from_rgb(100, 149, 237)),
            );
        });
        ui.add_space(10.0);
        ui.separator();
        ui.add_space(5.0);

        // ===== Data Source Section =====
        ui.label(RichText::new("📁 Data Source").size(14.0).strong());
        ui.add_space(5.0);

        egui::Frame::none()
            .fill(ui.visuals().widgets.noninteractive.bg_fill)
            .rounding(5.0)
            .inner_margin(8.0)
            .show(ui, |ui| {
                ui.vertical_centered_justified(|ui| {
                    if ui.button("📂 Load CSV").clicked() {
                        action = ControlPanelAction::LoadCsv;
                    }
                });
                ui.add_space(5.0);

                match &state.dataset {
                    Some(dataset) => {
                        ui.label(format!("File: {}", dataset.source_name()));
                        ui.label(format!(
                            "Rows: {}, Columns: {}",
                            dataset.row_count(),
                            dataset.column_count()
                        ));
                    }
                    None => {
                        ui.label(RichText::new("No file loaded").color(Color32::GRAY));
                    }
                }
            });

        ui.add_space(15.0);
        ui.separator();
        ui.add_space(10.0);

        // ===== Chart Configuration Section =====
        ui.label(RichText::new("🔧 Chart Options").size(14.0).strong());
        ui.add_space(8.0);

        let label_width = 90.0;
        let combo_width = 170.0;
        let columns = state
            .dataset
            .as_ref()
            .map(|d| d.column_names())
            .unwrap_or_default();

        ui.add_enabled_ui(has_data, |ui| {
            ui.horizontal(|ui| {
                ui.add_sized([label_width, 20.0], egui::Label::new("Chart Type:"));
                let selected = state.config.kind().map(ChartKind::label).unwrap_or("");
                ComboBox::from_id_salt("chart_kind")
                    .width(combo_width)
                    .selected_text(selected)
                    .show_ui(ui, |ui| {
                        for kind in ChartKind::ALL {
                            if ui
                                .selectable_label(state.config.kind() == Some(kind), kind.label())
                                .clicked()
                            {
                                action = ControlPanelAction::SelectKind(kind);
                            }
                        }
                    });
            });

            ui.add_space(5.0);

            ui.horizontal(|ui| {
                ui.add_sized([label_width, 20.0], egui::Label::new("X-Axis:"));
                if let Some(column) = Self::column_combo(
                    ui,
                    "x_column",
                    combo_width,
                    &columns,
                    state.config.x_column(),
                ) {
                    action = ControlPanelAction::SelectX(column);
                }
            });

            ui.add_space(5.0);

            ui.add_enabled_ui(state.config.y_enabled(), |ui| {
                ui.horizontal(|ui| {
                    ui.add_sized([label_width, 20.0], egui::Label::new("Y-Axis:"));
                    if let Some(column) = Self::column_combo(
                        ui,
                        "y_column",
                        combo_width,
                        &columns,
                        state.config.y_column(),
                    ) {
                        action = ControlPanelAction::SelectY(column);
                    }
                });
            });
        });

        ui.add_space(15.0);
        ui.separator();
        ui.add_space(10.0);

        // ===== Action Buttons =====
        ui.vertical_centered(|ui| {
            ui.add_enabled_ui(has_data, |ui| {
                let button = egui::Button::new(RichText::new("▶ Generate Plot").size(16.0))
                    .min_size(egui::vec2(200.0, 35.0));
                if ui.add(button).clicked() {
                    action = ControlPanelAction::GeneratePlot;
                }
            });

            ui.add_space(8.0);

            ui.add_enabled_ui(state.has_plot(), |ui| {
                let button = egui::Button::new(RichText::new("💾 Export Plot").size(14.0))
                    .min_size(egui::vec2(150.0, 30.0));
                if ui.add(button).clicked() {
                    action = ControlPanelAction::ExportPlot;
                }
            });

            ui.add_space(8.0);

            ui.add_enabled_ui(has_data, |ui| {
                let button = egui::Button::new(RichText::new("📄 Save Statistics").size(14.0))
                    .min_size(egui::vec2(150.0, 30.0));
                if ui.add(button).clicked() {
                    action = ControlPanelAction::SaveStatistics;
                }
            });
        });

        action
    }

    /// Column selector; returns the newly clicked column.
    fn column_combo(
        ui: &mut egui::Ui,
        id: &str,
        width: f32,
        columns: &[String],
        selected: Option<&str>,
    ) -> Option<String> {
        let mut clicked = None;
        ComboBox::from_id_salt(id)
            .width(width)
            .selected_text(selected.unwrap_or(""))
            .show_ui(ui, |ui| {
                for col in columns {
                    if ui
                        .selectable_label(selected == Some(col.as_str()), col)
                        .clicked()
                    {
                        clicked = Some(col.clone());
                    }
                }
            });
        clicked
    }
}

/// Actions triggered by control panel
#[derive(Debug, Clone, PartialEq)]
pub enum ControlPanelAction {
    None,
    LoadCsv,
    SelectKind(ChartKind),
    SelectX(String),
    SelectY(String),
    GeneratePlot,
    ExportPlot,
    SaveStatistics,
}
