//! Dataset Model
//! The loaded table plus the metadata derived from it at load time.

use polars::prelude::*;

/// Number of rows shown in the table view.
pub const PREVIEW_ROW_LIMIT: usize = 1000;

/// Marker used for every cell of the truncation row.
pub const TRUNCATION_MARKER: &str = "...";

/// Name and numeric classification of one column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnDescriptor {
    pub name: String,
    pub is_numeric: bool,
}

/// Bounded, display-ready prefix of a dataset.
#[derive(Debug, Clone, Default)]
pub struct TablePreview {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
    /// True when rows were cut off; the last row is then the `...` marker row.
    pub truncated: bool,
}

/// In-memory tabular data with derived column descriptors.
#[derive(Debug, Clone)]
pub struct Dataset {
    df: DataFrame,
    columns: Vec<ColumnDescriptor>,
    source_name: String,
}

impl Dataset {
    /// Wrap a DataFrame and classify its columns.
    pub fn from_dataframe(df: DataFrame, source_name: impl Into<String>) -> Self {
        let columns = df
            .get_columns()
            .iter()
            .map(|col| ColumnDescriptor {
                name: col.name().to_string(),
                is_numeric: is_numeric_column(col),
            })
            .collect();

        Self {
            df,
            columns,
            source_name: source_name.into(),
        }
    }

    pub fn frame(&self) -> &DataFrame {
        &self.df
    }

    pub fn columns(&self) -> &[ColumnDescriptor] {
        &self.columns
    }

    pub fn column_names(&self) -> Vec<String> {
        self.columns.iter().map(|c| c.name.clone()).collect()
    }

    /// Numeric columns, in dataset order.
    pub fn numeric_columns(&self) -> Vec<&ColumnDescriptor> {
        self.columns.iter().filter(|c| c.is_numeric).collect()
    }

    pub fn column(&self, name: &str) -> Option<&ColumnDescriptor> {
        self.columns.iter().find(|c| c.name == name)
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.column(name).is_some()
    }

    pub fn is_numeric(&self, name: &str) -> bool {
        self.column(name).is_some_and(|c| c.is_numeric)
    }

    pub fn row_count(&self) -> usize {
        self.df.height()
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    pub fn source_name(&self) -> &str {
        &self.source_name
    }

    /// Values of a column as floats; missing entries are `None`.
    pub fn numeric_values(&self, name: &str) -> PolarsResult<Vec<Option<f64>>> {
        numeric_values_of(&self.df, name)
    }

    /// Values of a column as display strings; missing entries are empty.
    pub fn text_values(&self, name: &str) -> PolarsResult<Vec<String>> {
        text_values_of(&self.df, name)
    }

    /// Working copy sorted ascending by `name`. The dataset itself is untouched.
    pub fn sorted_by(&self, name: &str) -> PolarsResult<DataFrame> {
        self.df.sort(
            [name],
            SortMultipleOptions::default()
                .with_maintain_order(true)
                .with_nulls_last(true),
        )
    }

    /// First `max_rows` rows as strings, plus a `...` row when cut off.
    pub fn preview(&self, max_rows: usize) -> TablePreview {
        let headers = self.column_names();
        let shown = self.row_count().min(max_rows);

        let cells: Vec<Vec<String>> = self
            .df
            .get_columns()
            .iter()
            .map(|col| (0..shown).map(|i| cell_text(col, i)).collect())
            .collect();

        let mut rows: Vec<Vec<String>> = (0..shown)
            .map(|i| cells.iter().map(|col| col[i].clone()).collect())
            .collect();

        let truncated = self.row_count() > max_rows;
        if truncated {
            rows.push(vec![TRUNCATION_MARKER.to_string(); headers.len()]);
        }

        TablePreview {
            headers,
            rows,
            truncated,
        }
    }
}

/// Numeric dtypes, or a non-empty column whose every entry is missing.
fn is_numeric_column(col: &Column) -> bool {
    let numeric_dtype = matches!(
        col.dtype(),
        DataType::Float32
            | DataType::Float64
            | DataType::Int8
            | DataType::Int16
            | DataType::Int32
            | DataType::Int64
            | DataType::UInt8
            | DataType::UInt16
            | DataType::UInt32
            | DataType::UInt64
    );
    numeric_dtype || (col.len() > 0 && col.null_count() == col.len())
}

pub(crate) fn numeric_values_of(df: &DataFrame, name: &str) -> PolarsResult<Vec<Option<f64>>> {
    let values = df.column(name)?.cast(&DataType::Float64)?;
    let ca = values.f64()?;
    Ok(ca.into_iter().collect())
}

pub(crate) fn text_values_of(df: &DataFrame, name: &str) -> PolarsResult<Vec<String>> {
    let col = df.column(name)?;
    Ok((0..col.len()).map(|i| cell_text(col, i)).collect())
}

fn cell_text(col: &Column, index: usize) -> String {
    match col.get(index) {
        Ok(AnyValue::Null) | Err(_) => String::new(),
        Ok(AnyValue::String(s)) => s.to_string(),
        Ok(AnyValue::StringOwned(s)) => s.to_string(),
        Ok(value) => value.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Dataset {
        let df = df!(
            "city" => &["Oslo", "Lima", "Pune", "Kyiv", "Doha"],
            "population" => &[709_000i64, 10_000_000, 3_100_000, 2_900_000, 1_200_000],
            "area" => &[Some(454.0), None, Some(331.3), Some(839.0), Some(132.0)]
        )
        .unwrap();
        Dataset::from_dataframe(df, "cities.csv")
    }

    #[test]
    fn classifies_columns() {
        let ds = sample();
        assert_eq!(ds.column_count(), 3);
        assert_eq!(ds.row_count(), 5);
        assert!(!ds.is_numeric("city"));
        assert!(ds.is_numeric("population"));
        assert!(ds.is_numeric("area"));
        assert!(!ds.is_numeric("missing"));

        let numeric: Vec<&str> = ds
            .numeric_columns()
            .iter()
            .map(|c| c.name.as_str())
            .collect();
        assert_eq!(numeric, vec!["population", "area"]);
    }

    #[test]
    fn all_missing_column_counts_as_numeric() {
        let empty: Vec<Option<&str>> = vec![None, None, None];
        let df = DataFrame::new(vec![
            Column::new("label".into(), vec!["a", "b", "c"]),
            Column::new("blank".into(), empty),
        ])
        .unwrap();
        let ds = Dataset::from_dataframe(df, "blank.csv");
        assert!(ds.is_numeric("blank"));
        assert!(!ds.is_numeric("label"));
        assert_eq!(ds.numeric_values("blank").unwrap(), vec![None, None, None]);
    }

    #[test]
    fn extracts_values() {
        let ds = sample();
        let area = ds.numeric_values("area").unwrap();
        assert_eq!(area[0], Some(454.0));
        assert_eq!(area[1], None);

        let cities = ds.text_values("city").unwrap();
        assert_eq!(cities, vec!["Oslo", "Lima", "Pune", "Kyiv", "Doha"]);
        assert!(ds.text_values("nope").is_err());
    }

    #[test]
    fn sorted_copy_leaves_dataset_untouched() {
        let ds = sample();
        let sorted = ds.sorted_by("population").unwrap();
        let pops = numeric_values_of(&sorted, "population").unwrap();
        let pops: Vec<f64> = pops.into_iter().flatten().collect();
        assert!(pops.windows(2).all(|w| w[0] <= w[1]));

        assert_eq!(ds.text_values("city").unwrap()[0], "Oslo");
    }

    #[test]
    fn preview_is_capped_with_marker_row() {
        let values: Vec<i64> = (0..25).collect();
        let df = DataFrame::new(vec![Column::new("n".into(), values)]).unwrap();
        let ds = Dataset::from_dataframe(df, "n.csv");

        let preview = ds.preview(10);
        assert!(preview.truncated);
        assert_eq!(preview.rows.len(), 11);
        assert_eq!(preview.rows[0], vec!["0".to_string()]);
        assert_eq!(preview.rows[10], vec![TRUNCATION_MARKER.to_string()]);

        let full = ds.preview(PREVIEW_ROW_LIMIT);
        assert!(!full.truncated);
        assert_eq!(full.rows.len(), 25);
    }
}
