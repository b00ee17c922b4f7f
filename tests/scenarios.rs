//! End-to-end scenarios: load a CSV, choose a chart, build it and export it.

use csv_visualizer::charts::{ChartConfiguration, ChartKind, PlotBuilder, ValidationError};
use csv_visualizer::data::{DatasetLoader, PREVIEW_ROW_LIMIT, TRUNCATION_MARKER};
use csv_visualizer::export::{export, ExportError, ExportFormat};
use csv_visualizer::state::{AppState, Tab};
use csv_visualizer::stats::{StatsCalculator, StatsReport};
use std::fs;
use std::path::PathBuf;
use tempfile::{tempdir, TempDir};

const CITIES: &str = "city,population\n\
Oslo,709000\n\
Lima,10000000\n\
Pune,3100000\n\
Kyiv,2900000\n\
Doha,1200000\n";

fn write_file(dir: &TempDir, name: &str, contents: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, contents).unwrap();
    path
}

fn bar_config() -> ChartConfiguration {
    let mut config = ChartConfiguration::new();
    config.select_kind(ChartKind::Bar);
    config.select_x("city");
    config.select_y("population");
    config
}

#[test]
fn bar_chart_of_city_population() {
    let dir = tempdir().unwrap();
    let dataset = DatasetLoader::load(&write_file(&dir, "cities.csv", CITIES)).unwrap();
    assert_eq!(dataset.row_count(), 5);
    assert!(!dataset.is_numeric("city"));
    assert!(dataset.is_numeric("population"));

    let chart = bar_config().validate(&dataset).unwrap();
    let plot = PlotBuilder::build(&dataset, &chart).unwrap();
    assert_eq!(plot.title, "Bar Chart: population vs city");
    assert_eq!(plot.x_label, "city");
    assert_eq!(plot.y_label, "population");
}

#[test]
fn scatter_over_text_column_is_incompatible() {
    let dir = tempdir().unwrap();
    let dataset = DatasetLoader::load(&write_file(&dir, "cities.csv", CITIES)).unwrap();

    let mut config = ChartConfiguration::new();
    config.select_kind(ChartKind::Scatter);
    config.select_x("city");
    config.select_y("population");

    let err = config.validate(&dataset).unwrap_err();
    assert!(matches!(err, ValidationError::IncompatibleType(_)));
    assert_eq!(err.to_string(), "Scatter plots require numeric X and Y axes.");
}

#[test]
fn line_without_y_is_rejected() {
    let dir = tempdir().unwrap();
    let dataset = DatasetLoader::load(&write_file(&dir, "cities.csv", CITIES)).unwrap();

    let mut config = ChartConfiguration::new();
    config.select_kind(ChartKind::Line);
    config.select_x("population");

    assert_eq!(config.validate(&dataset), Err(ValidationError::MissingYAxis));
}

#[test]
fn exports_png_jpeg_and_pdf() {
    let dir = tempdir().unwrap();
    let dataset = DatasetLoader::load(&write_file(&dir, "cities.csv", CITIES)).unwrap();
    let chart = bar_config().validate(&dataset).unwrap();
    let plot = PlotBuilder::build(&dataset, &chart).unwrap();

    let pdf = dir.path().join("chart.pdf");
    export(Some(&plot), &pdf, ExportFormat::Pdf).unwrap();
    let bytes = fs::read(&pdf).unwrap();
    assert!(bytes.starts_with(b"%PDF"));
    assert!(bytes.ends_with(b"%%EOF\n"));

    let png = dir.path().join("chart.png");
    export(Some(&plot), &png, ExportFormat::Png).unwrap();
    let image = image::open(&png).unwrap();
    // Cropped, but still close to the 2400x1800 canvas
    assert!(image.width() > 1200 && image.width() <= 2400);
    assert!(image.height() > 900 && image.height() <= 1800);

    let jpg = dir.path().join("chart.jpg");
    export(Some(&plot), &jpg, ExportFormat::Jpeg).unwrap();
    assert!(fs::read(&jpg).unwrap().starts_with(&[0xFF, 0xD8]));
}

#[test]
fn every_chart_kind_exports() {
    let dir = tempdir().unwrap();
    let csv = "day,temp,rain\n\
3,14.5,2.0\n\
1,12.0,0.0\n\
2,15.5,7.5\n\
5,9.0,1.0\n\
4,11.0,3.5\n";
    let dataset = DatasetLoader::load(&write_file(&dir, "weather.csv", csv)).unwrap();

    let selections = [
        (ChartKind::Line, "day", Some("temp"), "Line Chart: temp vs day"),
        (ChartKind::Scatter, "temp", Some("rain"), "Scatter Plot: rain vs temp"),
        (ChartKind::Histogram, "temp", None, "Histogram of temp"),
    ];

    for (kind, x, y, title) in selections {
        let mut config = ChartConfiguration::new();
        config.select_kind(kind);
        config.select_x(x);
        if let Some(y) = y {
            config.select_y(y);
        }
        let chart = config.validate(&dataset).unwrap();
        let plot = PlotBuilder::build(&dataset, &chart).unwrap();
        assert_eq!(plot.title, title);

        let pdf = dir.path().join(format!("{:?}.pdf", kind));
        export(Some(&plot), &pdf, ExportFormat::Pdf).unwrap();
        let bytes = fs::read(&pdf).unwrap();
        assert!(bytes.starts_with(b"%PDF"), "{} pdf header", title);
        assert!(bytes.ends_with(b"%%EOF\n"), "{} pdf trailer", title);

        let png = dir.path().join(format!("{:?}.png", kind));
        export(Some(&plot), &png, ExportFormat::Png).unwrap();
        let image = image::open(&png).unwrap();
        assert!(image.width() > 1200 && image.width() <= 2400, "{} width", title);
        assert!(image.height() > 900 && image.height() <= 1800, "{} height", title);
    }
}

#[test]
fn export_without_plot_fails() {
    let dir = tempdir().unwrap();
    let target = dir.path().join("chart.pdf");
    let err = export(None, &target, ExportFormat::Pdf).unwrap_err();
    assert!(matches!(err, ExportError::NoPlot));
    assert_eq!(err.to_string(), "no plot to export");
    assert!(!target.exists());
}

#[test]
fn loading_resets_selection_and_plot() {
    let dir = tempdir().unwrap();
    let first = write_file(&dir, "cities.csv", CITIES);
    let second = write_file(&dir, "scores.csv", "name,score\nann,3\nbob,5\n");

    let mut state = AppState::new();
    state.load_dataset(&first);
    assert_eq!(state.status, "Loaded 'cities.csv' successfully.");
    state.select_kind(ChartKind::Bar);
    state.select_x("city");
    state.select_y("population");
    state.request_plot();
    assert!(state.has_plot());
    assert_eq!(state.active_tab, Tab::Plot);

    state.load_dataset(&second);
    assert!(state.config.is_empty());
    assert!(!state.has_plot());
    assert_eq!(state.active_tab, Tab::Data);
    assert_eq!(state.preview.headers, vec!["name", "score"]);
    assert!(state.stats_text.contains("score"));
}

#[test]
fn failed_load_keeps_previous_dataset() {
    let dir = tempdir().unwrap();
    let mut state = AppState::new();
    state.load_dataset(&write_file(&dir, "cities.csv", CITIES));

    state.load_dataset(&dir.path().join("missing.csv"));
    assert_eq!(state.status, "Error loading file.");
    assert!(state.alert.unwrap().message.starts_with("Failed to load file:"));
    assert_eq!(state.dataset.unwrap().source_name(), "cities.csv");
}

#[test]
fn failed_build_leaves_no_plot() {
    let dir = tempdir().unwrap();
    let path = write_file(&dir, "gaps.csv", "label,value,empty\na,1,\nb,2,\n");

    let mut state = AppState::new();
    state.load_dataset(&path);
    state.select_kind(ChartKind::Bar);
    state.select_x("label");
    state.select_y("value");
    state.request_plot();
    assert!(state.has_plot());

    state.select_kind(ChartKind::Histogram);
    state.select_x("empty");
    state.request_plot();
    assert!(!state.has_plot());
    let failure = state.plot_failure.as_deref().unwrap();
    assert!(failure.starts_with("Plot generation failed.\nError:"));
    assert!(state.status.starts_with("Error plotting:"));
}

#[test]
fn large_file_preview_is_truncated() {
    let dir = tempdir().unwrap();
    let mut csv = String::from("n,square\n");
    for i in 0..(PREVIEW_ROW_LIMIT + 20) {
        csv.push_str(&format!("{},{}\n", i, i * i));
    }
    let path = write_file(&dir, "big.csv", &csv);

    let mut state = AppState::new();
    state.load_dataset(&path);
    assert_eq!(
        state.status,
        "Loaded 'big.csv'. Data table is showing the first 1000 rows."
    );
    assert_eq!(state.preview.rows.len(), PREVIEW_ROW_LIMIT + 1);
    assert!(state.preview.rows[PREVIEW_ROW_LIMIT]
        .iter()
        .all(|c| c == TRUNCATION_MARKER));

    // Statistics still cover every row
    let report = StatsCalculator::summarize(state.dataset.as_ref().unwrap()).unwrap();
    let StatsReport::Table(columns) = report else {
        panic!("expected a table");
    };
    assert_eq!(columns[0].count, PREVIEW_ROW_LIMIT + 20);
}

#[test]
fn statistics_saved_as_json() {
    let dir = tempdir().unwrap();
    let mut state = AppState::new();
    state.load_dataset(&write_file(&dir, "cities.csv", CITIES));

    let target = dir.path().join("stats.json");
    state.save_statistics(&target);
    let json: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&target).unwrap()).unwrap();
    assert_eq!(json["table"][0]["column"], "population");
    assert_eq!(json["table"][0]["count"], 5);
    assert_eq!(state.status, "Statistics saved to 'stats.json'");
}
