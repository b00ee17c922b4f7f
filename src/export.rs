//! Export Module
//! Saves a rendered chart as PNG, JPEG or PDF.

use crate::charts::{PlotObject, RenderError, StaticChartRenderer, BASE_DPI};
use crate::pdf::PdfWriter;
use image::codecs::jpeg::JpegEncoder;
use image::{ImageError, ImageFormat, RgbImage};
use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Render scale for exports (300 dpi over the 100 dpi base figure)
pub const EXPORT_SCALE: f64 = 3.0;
pub const JPEG_QUALITY: u8 = 95;

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("no plot to export")]
    NoPlot,
    #[error("unsupported export format: '{0}' (use .png, .jpg, .jpeg or .pdf)")]
    UnsupportedFormat(String),
    #[error("render failed: {0}")]
    Render(#[from] RenderError),
    #[error("image encoding failed: {0}")]
    Image(#[from] ImageError),
    #[error("write failed: {0}")]
    Io(#[from] io::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Png,
    Jpeg,
    Pdf,
}

impl ExportFormat {
    /// Format for a file extension, ignoring case.
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "png" => Some(ExportFormat::Png),
            "jpg" | "jpeg" => Some(ExportFormat::Jpeg),
            "pdf" => Some(ExportFormat::Pdf),
            _ => None,
        }
    }

    pub fn extension(self) -> &'static str {
        match self {
            ExportFormat::Png => "png",
            ExportFormat::Jpeg => "jpg",
            ExportFormat::Pdf => "pdf",
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExportFormat::Png => f.write_str("PNG"),
            ExportFormat::Jpeg => f.write_str("JPEG"),
            ExportFormat::Pdf => f.write_str("PDF"),
        }
    }
}

/// Pick the format from the path's extension. A path without one gets `.png`.
pub fn resolve_path(path: &Path) -> Result<(PathBuf, ExportFormat), ExportError> {
    match path.extension() {
        None => Ok((path.with_extension("png"), ExportFormat::Png)),
        Some(ext) => {
            let ext = ext.to_string_lossy();
            ExportFormat::from_extension(&ext)
                .map(|format| (path.to_path_buf(), format))
                .ok_or_else(|| ExportError::UnsupportedFormat(ext.into_owned()))
        }
    }
}

/// Render `plot` at [`EXPORT_SCALE`] and write it to `path`.
pub fn export(
    plot: Option<&PlotObject>,
    path: &Path,
    format: ExportFormat,
) -> Result<(), ExportError> {
    let plot = plot.ok_or(ExportError::NoPlot)?;
    let image = StaticChartRenderer::render(plot, EXPORT_SCALE)?;

    match format {
        ExportFormat::Png => image.save_with_format(path, ImageFormat::Png)?,
        ExportFormat::Jpeg => fs::write(path, encode_jpeg(&image)?)?,
        ExportFormat::Pdf => {
            let jpeg = encode_jpeg(&image)?;
            let dpi = BASE_DPI * EXPORT_SCALE;
            fs::write(
                path,
                PdfWriter::image_page(&jpeg, image.width(), image.height(), dpi),
            )?;
        }
    }

    log::info!(
        "Exported '{}' as {} ({}x{}) to {}",
        plot.title,
        format,
        image.width(),
        image.height(),
        path.display()
    );
    Ok(())
}

fn encode_jpeg(image: &RgbImage) -> Result<Vec<u8>, ImageError> {
    let mut bytes = Vec::new();
    JpegEncoder::new_with_quality(&mut bytes, JPEG_QUALITY).encode_image(image)?;
    Ok(bytes)
}
