//! Missing-data pattern detection.

use polars::prelude::DataFrame;
use tracing::debug;

use tidy_common::missing_flags;
use tidy_model::frame::{column_names, require_columns};
use tidy_model::{ColumnMissing, MissingOptions, MissingReport, Result};

/// Summarize missing values over the selected columns (all columns by default).
///
/// A column is reported as high-missing when its missing rate strictly exceeds
/// `options.threshold`. Rates are 0 for an empty table.
///
/// # Errors
///
/// `ColumnsNotFound` if an explicitly selected column is absent.
pub fn detect_missing_patterns(df: &DataFrame, options: &MissingOptions) -> Result<MissingReport> {
    let selected = match &options.columns {
        Some(columns) => columns.clone(),
        None => column_names(df),
    };
    let analyzed = require_columns(df, selected.as_slice())?;

    let total_rows = df.height();
    let mut row_has_missing = vec![false; total_rows];
    let mut columns = Vec::with_capacity(selected.len());
    let mut high_missing_cols = Vec::new();

    for (name, column) in selected.iter().zip(&analyzed) {
        let flags = missing_flags(column);
        let missing_count = flags.iter().filter(|&&missing| missing).count();
        for (row, missing) in row_has_missing.iter_mut().zip(&flags) {
            *row |= *missing;
        }

        let missing_rate = if total_rows == 0 {
            0.0
        } else {
            missing_count as f64 / total_rows as f64
        };
        if missing_rate > options.threshold {
            high_missing_cols.push(name.clone());
        }
        columns.push(ColumnMissing {
            column: name.clone(),
            missing_count,
            missing_rate,
        });
    }

    let rows_with_missing = row_has_missing.iter().filter(|&&missing| missing).count();
    debug!(
        columns = columns.len(),
        total_rows,
        rows_with_missing,
        high_missing = high_missing_cols.len(),
        "detected missing-data patterns"
    );

    Ok(MissingReport {
        columns,
        high_missing_cols,
        total_rows,
        complete_rows: total_rows - rows_with_missing,
        rows_with_missing,
    })
}
