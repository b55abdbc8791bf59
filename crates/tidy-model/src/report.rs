//! Missing-data report types.

use serde::{Deserialize, Serialize};

/// Missing-data summary for one analyzed column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnMissing {
    pub column: String,
    pub missing_count: usize,
    /// `missing_count / total_rows`; 0 for an empty table.
    pub missing_rate: f64,
}

/// Missing-data patterns across the analyzed columns of a table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MissingReport {
    /// Per-column counts, in analysis order.
    pub columns: Vec<ColumnMissing>,
    /// Columns whose missing rate strictly exceeds the threshold.
    pub high_missing_cols: Vec<String>,
    pub total_rows: usize,
    /// Rows with no missing value in any analyzed column.
    pub complete_rows: usize,
    /// Rows with at least one missing value in the analyzed columns.
    pub rows_with_missing: usize,
}

impl MissingReport {
    fn entry(&self, column: &str) -> Option<&ColumnMissing> {
        self.columns.iter().find(|entry| entry.column == column)
    }

    /// Missing count for a column, `None` if it was not analyzed.
    pub fn missing_count(&self, column: &str) -> Option<usize> {
        self.entry(column).map(|entry| entry.missing_count)
    }

    /// Missing rate for a column, `None` if it was not analyzed.
    pub fn missing_rate(&self, column: &str) -> Option<f64> {
        self.entry(column).map(|entry| entry.missing_rate)
    }

    pub fn is_high_missing(&self, column: &str) -> bool {
        self.high_missing_cols.iter().any(|name| name == column)
    }

    pub fn analyzed_columns(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|entry| entry.column.as_str())
    }
}
