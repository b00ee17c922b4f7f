//! Stats module - descriptive statistics

mod calculator;

pub use calculator::{ColumnStats, StatsCalculator, StatsReport, NO_NUMERIC_DATA};
