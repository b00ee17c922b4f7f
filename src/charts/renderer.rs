//! Static Chart Renderer
//! Rasterizes a [`PlotObject`] with plotters for export.
//!
//! Layout follows an 8x6 inch figure at 100 dpi (800x600 px). Every size is
//! multiplied by the requested scale, so a scale of 3.0 gives a 300 dpi image.
//! The result is cropped tightly around the drawn content.

use super::builder::{PlotData, PlotObject};
use image::{imageops, Rgb, RgbImage};
use plotters::coord::ranged1d::Ranged;
use plotters::coord::types::RangedCoordf64;
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::FontStyle;
use std::borrow::Cow;
use std::ops::Range;
use std::sync::Once;
use thiserror::Error;

pub const BASE_WIDTH: u32 = 800;
pub const BASE_HEIGHT: u32 = 600;
pub const BASE_DPI: f64 = 100.0;

/// Padding kept around the content when cropping, in inches.
const CROP_PAD_INCHES: f64 = 0.1;

// Colors
const SERIES_COLOR: RGBColor = RGBColor(31, 119, 180);
const GRID_COLOR: RGBColor = RGBColor(176, 176, 176);
const GRID_ALPHA: f64 = 0.6;
const BACKGROUND: Rgb<u8> = Rgb([255, 255, 255]);

const X_TICKS: usize = 10;
const Y_TICKS: usize = 10;
const DASHES_PER_LINE: usize = 60;

static INIT_FONTS: Once = Once::new();

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("invalid render size {0}x{1}")]
    InvalidSize(u32, u32),
    #[error("drawing failed: {0}")]
    Drawing(String),
}

/// Register the bundled egui UI font as plotters' `sans-serif`.
/// The `ab_glyph` text path does not discover system fonts.
fn ensure_fonts_registered() {
    INIT_FONTS.call_once(|| {
        let fonts = egui::FontDefinitions::default();
        let Some(data) = fonts.font_data.get("Ubuntu-Light") else {
            log::warn!("Bundled UI font not found; chart text will fail to render");
            return;
        };

        let bytes: &'static [u8] = match data.font.clone() {
            Cow::Borrowed(bytes) => bytes,
            Cow::Owned(bytes) => Box::leak(bytes.into_boxed_slice()),
        };

        if plotters::style::register_font("sans-serif", FontStyle::Normal, bytes).is_err() {
            log::warn!("Failed to register chart font");
        }
    });
}

/// Renders plot objects to RGB images.
pub struct StaticChartRenderer;

impl StaticChartRenderer {
    /// Render at `scale` times the base figure size, then crop to the content.
    pub fn render(plot: &PlotObject, scale: f64) -> Result<RgbImage, RenderError> {
        let width = (BASE_WIDTH as f64 * scale).round() as u32;
        let height = (BASE_HEIGHT as f64 * scale).round() as u32;
        if width == 0 || height == 0 {
            return Err(RenderError::InvalidSize(width, height));
        }

        ensure_fonts_registered();

        let mut buffer = vec![0u8; (width * height * 3) as usize];
        {
            let root = BitMapBackend::with_buffer(&mut buffer, (width, height)).into_drawing_area();
            Self::draw_chart(&root, plot, scale)
                .and_then(|()| root.present())
                .map_err(|e| RenderError::Drawing(e.to_string()))?;
        }

        let image = RgbImage::from_raw(width, height, buffer)
            .ok_or(RenderError::InvalidSize(width, height))?;
        log::debug!("Rendered '{}' at {}x{}", plot.title, width, height);

        let pad = (CROP_PAD_INCHES * BASE_DPI * scale).round() as u32;
        Ok(Self::crop_to_content(&image, pad))
    }

    /// Smallest box holding every non-background pixel, grown by `pad`.
    pub fn crop_to_content(image: &RgbImage, pad: u32) -> RgbImage {
        let (w, h) = image.dimensions();
        let mut min_x = w;
        let mut min_y = h;
        let mut max_x = 0;
        let mut max_y = 0;

        for (x, y, pixel) in image.enumerate_pixels() {
            if *pixel != BACKGROUND {
                min_x = min_x.min(x);
                min_y = min_y.min(y);
                max_x = max_x.max(x);
                max_y = max_y.max(y);
            }
        }

        if min_x > max_x || min_y > max_y {
            return image.clone();
        }

        let left = min_x.saturating_sub(pad);
        let top = min_y.saturating_sub(pad);
        let right = (max_x + pad).min(w - 1);
        let bottom = (max_y + pad).min(h - 1);
        log::debug!("Cropping to ({left},{top})-({right},{bottom})");

        imageops::crop_imm(image, left, top, right - left + 1, bottom - top + 1).to_image()
    }

    fn draw_chart<DB: DrawingBackend>(
        root: &DrawingArea<DB, Shift>,
        plot: &PlotObject,
        scale: f64,
    ) -> Result<(), DrawingAreaErrorKind<DB::ErrorType>> {
        root.fill(&WHITE)?;

        let (x_range, y_range) = Self::ranges(&plot.data);
        let px = |v: f64| (v * scale).round() as u32;

        let mut chart = ChartBuilder::on(root)
            .caption(&plot.title, ("sans-serif", 18.0 * scale))
            .margin(px(16.0))
            .x_label_area_size(px(48.0))
            .y_label_area_size(px(72.0))
            .build_cartesian_2d(x_range.clone(), y_range.clone())?;

        let categories = plot.categories().map(<[String]>::to_vec);
        let x_formatter = |v: &f64| match &categories {
            Some(labels) => Self::category_label(labels, *v),
            None => Self::tick_label(*v),
        };
        let y_formatter = |v: &f64| Self::tick_label(*v);

        chart
            .configure_mesh()
            .disable_mesh()
            .x_labels(X_TICKS)
            .y_labels(Y_TICKS)
            .x_label_formatter(&x_formatter)
            .y_label_formatter(&y_formatter)
            .x_desc(plot.x_label.as_str())
            .y_desc(plot.y_label.as_str())
            .label_style(("sans-serif", 11.0 * scale))
            .axis_desc_style(("sans-serif", 13.0 * scale))
            .axis_style(BLACK.stroke_width(px(1.0).max(1)))
            .draw()?;

        let grid_style = GRID_COLOR.mix(GRID_ALPHA).stroke_width(px(0.8).max(1));
        let x_ticks = RangedCoordf64::from(x_range.clone()).key_points(X_TICKS);
        let y_ticks = RangedCoordf64::from(y_range.clone()).key_points(Y_TICKS);
        let mut grid = Vec::new();
        for x in x_ticks {
            grid.extend(Self::dashes((x, y_range.start), (x, y_range.end)));
        }
        for y in y_ticks {
            grid.extend(Self::dashes((x_range.start, y), (x_range.end, y)));
        }
        chart.draw_series(grid.into_iter().map(|seg| PathElement::new(seg, grid_style)))?;

        let series_style = SERIES_COLOR.filled();
        let marker_size = px(4.0).max(2) as i32;

        match &plot.data {
            PlotData::Bars { heights, .. } => {
                let bars = heights.iter().enumerate().filter(|(_, h)| h.is_finite()).map(
                    |(i, h)| {
                        let x = i as f64;
                        Rectangle::new([(x - 0.25, 0.0), (x + 0.25, *h)], series_style)
                    },
                );
                chart
                    .draw_series(bars)?
                    .label(plot.series_name.clone().unwrap_or_default())
                    .legend(move |(x, y)| {
                        Rectangle::new([(x, y - 5), (x + 10, y + 5)], series_style)
                    });
            }
            PlotData::Line { points, .. } => {
                chart
                    .draw_series(LineSeries::new(
                        points.iter().copied(),
                        SERIES_COLOR.stroke_width(px(1.5).max(1)),
                    ))?
                    .label(plot.series_name.clone().unwrap_or_default())
                    .legend(move |(x, y)| {
                        PathElement::new(vec![(x, y), (x + 20, y)], SERIES_COLOR.stroke_width(2))
                    });
                chart.draw_series(
                    points
                        .iter()
                        .map(|&p| Circle::new(p, marker_size, series_style)),
                )?;
            }
            PlotData::Scatter { points } => {
                chart.draw_series(
                    points
                        .iter()
                        .map(|&p| Circle::new(p, marker_size, series_style)),
                )?;
            }
            PlotData::Histogram(hist) => {
                let edge_style = BLACK.stroke_width(px(1.0).max(1));
                for (i, count) in hist.counts.iter().enumerate() {
                    let corners = [(hist.edges[i], 0.0), (hist.edges[i + 1], *count as f64)];
                    chart.draw_series(std::iter::once(Rectangle::new(corners, series_style)))?;
                    chart.draw_series(std::iter::once(Rectangle::new(corners, edge_style)))?;
                }
            }
        }

        if plot.series_name.is_some() {
            chart
                .configure_series_labels()
                .label_font(("sans-serif", 11.0 * scale))
                .background_style(WHITE.mix(0.8))
                .border_style(BLACK.mix(0.3))
                .position(SeriesLabelPosition::UpperRight)
                .draw()?;
        }

        Ok(())
    }

    /// Data ranges with a 5% margin. Bar and histogram y ranges keep zero as a
    /// hard edge when all heights sit on one side of it.
    fn ranges(data: &PlotData) -> (Range<f64>, Range<f64>) {
        match data {
            PlotData::Bars { heights, .. } => {
                let n = heights.len().max(1) as f64;
                let y = Self::padded(heights.iter().copied().chain([0.0]));
                let y = Self::from_zero(y, heights);
                (-0.5..n - 0.5, y)
            }
            PlotData::Line { points, .. } | PlotData::Scatter { points } => (
                Self::padded(points.iter().map(|p| p.0)),
                Self::padded(points.iter().map(|p| p.1)),
            ),
            PlotData::Histogram(hist) => {
                let max = hist.counts.iter().copied().max().unwrap_or(0) as f64;
                (
                    Self::padded(hist.edges.iter().copied()),
                    Self::from_zero(Self::padded([0.0, max].into_iter()), &[max]),
                )
            }
        }
    }

    fn padded(values: impl Iterator<Item = f64>) -> Range<f64> {
        let (lo, hi) = values
            .filter(|v| v.is_finite())
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
                (lo.min(v), hi.max(v))
            });

        if !lo.is_finite() {
            return 0.0..1.0;
        }
        if lo == hi {
            return lo - 0.5..hi + 0.5;
        }
        let pad = (hi - lo) * 0.05;
        lo - pad..hi + pad
    }

    /// Clamp the padding on the zero side of bars that never cross zero.
    fn from_zero(range: Range<f64>, heights: &[f64]) -> Range<f64> {
        let finite = || heights.iter().copied().filter(|h| h.is_finite());
        if finite().all(|h| h >= 0.0) && range.end > 0.0 {
            0.0..range.end
        } else if finite().all(|h| h <= 0.0) && range.start < 0.0 {
            range.start..0.0
        } else {
            range
        }
    }

    /// Split a straight line into evenly spaced dash segments.
    fn dashes(from: (f64, f64), to: (f64, f64)) -> Vec<Vec<(f64, f64)>> {
        let step = |t: f64| (from.0 + (to.0 - from.0) * t, from.1 + (to.1 - from.1) * t);
        let n = DASHES_PER_LINE as f64;
        (0..DASHES_PER_LINE)
            .map(|i| {
                let start = i as f64 / n;
                vec![step(start), step(start + 0.6 / n)]
            })
            .collect()
    }

    fn category_label(labels: &[String], v: f64) -> String {
        let idx = v.round();
        if (v - idx).abs() > 1e-6 || idx < 0.0 {
            return String::new();
        }
        labels.get(idx as usize).cloned().unwrap_or_default()
    }

    fn tick_label(v: f64) -> String {
        if v == v.trunc() && v.abs() < 1e15 {
            format!("{}", v as i64)
        } else {
            let text = format!("{:.3}", v);
            text.trim_end_matches('0').trim_end_matches('.').to_string()
        }
    }
}
