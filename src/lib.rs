//! CSV Visualizer - load a CSV file, inspect it, summarize it and chart it.
//!
//! The library holds everything except the window: the dataset model,
//! statistics, chart selection and building, rendering and export, and the
//! application state the GUI drives.

pub mod charts;
pub mod data;
pub mod export;
mod pdf;
pub mod state;
pub mod stats;
