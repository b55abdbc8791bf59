//! Column lookups that fail with the tidy error taxonomy.
//!
//! Polars reports a missing column as a generic `ColumnNotFound` polars error;
//! the engines surface it as [`TidyError::ColumnNotFound`] so callers can match
//! on it without inspecting polars internals.

use polars::prelude::{Column, DataFrame};

use crate::error::{Result, TidyError};

/// Returns true if the frame has a column with exactly this name.
pub fn has_column(df: &DataFrame, name: &str) -> bool {
    df.column(name).is_ok()
}

/// Look up a single column.
pub fn require_column<'a>(df: &'a DataFrame, name: &str) -> Result<&'a Column> {
    df.column(name).map_err(|_| TidyError::ColumnNotFound {
        column: name.to_string(),
    })
}

/// Look up a block of columns, reporting every absent name at once.
pub fn require_columns<'a, S: AsRef<str>>(
    df: &'a DataFrame,
    names: &[S],
) -> Result<Vec<&'a Column>> {
    let missing: Vec<String> = names
        .iter()
        .filter(|name| !has_column(df, name.as_ref()))
        .map(|name| name.as_ref().to_string())
        .collect();
    if !missing.is_empty() {
        return Err(TidyError::ColumnsNotFound { columns: missing });
    }
    names
        .iter()
        .map(|name| require_column(df, name.as_ref()))
        .collect()
}

/// Fail if the engine is about to create a column that already exists.
pub fn ensure_absent(df: &DataFrame, name: &str) -> Result<()> {
    if has_column(df, name) {
        return Err(TidyError::DuplicateColumn {
            column: name.to_string(),
        });
    }
    Ok(())
}

/// Column names of the frame, in order.
pub fn column_names(df: &DataFrame) -> Vec<String> {
    df.get_column_names()
        .iter()
        .map(|name| name.to_string())
        .collect()
}
