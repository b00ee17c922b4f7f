//! Data module - CSV loading and the dataset model

mod loader;
mod model;

pub use loader::{DatasetLoader, LoadError, INFER_SCHEMA_ROWS};
pub use model::{ColumnDescriptor, Dataset, TablePreview, PREVIEW_ROW_LIMIT, TRUNCATION_MARKER};
pub(crate) use model::{numeric_values_of, text_values_of};
