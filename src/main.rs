//! CSV Visualizer - CSV Data Processor and Visualizer
//!
//! A desktop application for inspecting CSV data and plotting its columns.

mod gui;

use eframe::egui;
use gui::VisualizerApp;

fn main() -> eframe::Result<()> {
    env_logger::init();

    // Configure native options
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1300.0, 800.0])
            .with_min_inner_size([1000.0, 600.0])
            .with_title("CSV Data Processor and Visualizer"),
        ..Default::default()
    };

    log::info!("Starting CSV Data Processor and Visualizer");

    // Run the application
    eframe::run_native(
        "CSV Data Processor and Visualizer",
        options,
        Box::new(|cc| Ok(Box::new(VisualizerApp::new(cc)))),
    )
}
