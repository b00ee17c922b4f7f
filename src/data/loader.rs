//! CSV Data Loader Module
//! Reads a comma-separated file with a header row into a [`Dataset`] using Polars.

use super::model::Dataset;
use polars::prelude::*;
use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Rows scanned to infer column types.
pub const INFER_SCHEMA_ROWS: usize = 10_000;

/// Cell contents treated as missing values.
const MISSING_MARKERS: [&str; 8] = ["NA", "N/A", "NaN", "nan", "null", "NULL", "#N/A", "None"];

#[derive(Error, Debug)]
pub enum LoadError {
    #[error("cannot read '{}': {source}", path.display())]
    Unreadable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("malformed CSV: {0}")]
    Malformed(#[from] PolarsError),
    #[error("file contains no columns")]
    NoColumns,
}

/// Loads delimited files into datasets.
pub struct DatasetLoader;

impl DatasetLoader {
    /// Load a CSV file. Nothing else is touched on failure.
    pub fn load(path: &Path) -> Result<Dataset, LoadError> {
        File::open(path).map_err(|source| LoadError::Unreadable {
            path: path.to_path_buf(),
            source,
        })?;

        let missing = NullValues::AllColumns(MISSING_MARKERS.iter().map(|m| (*m).into()).collect());

        let df = LazyCsvReader::new(path)
            .with_has_header(true)
            .with_infer_schema_length(Some(INFER_SCHEMA_ROWS))
            .with_null_values(Some(missing))
            .finish()?
            .collect()?;

        if df.width() == 0 {
            return Err(LoadError::NoColumns);
        }

        let source_name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| path.display().to_string());

        log::info!(
            "Loaded '{}': {} rows, {} columns",
            source_name,
            df.height(),
            df.width()
        );

        Ok(Dataset::from_dataframe(df, source_name))
    }
}
