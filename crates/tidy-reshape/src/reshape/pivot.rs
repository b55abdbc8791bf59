//! Wide/long pivots for question blocks.

use std::collections::HashMap;

use polars::prelude::{AnyValue, Column, DataFrame, DataType, NamedFrom, Series};
use tracing::{debug, warn};

use tidy_common::any_to_text;
use tidy_model::frame::{column_names, require_column, require_columns};
use tidy_model::{Result, TidyError, WideToLongOptions};

/// Build a series from collected cells, keeping `dtype` when they carry no type.
///
/// Empty or all-null cells would otherwise infer `DataType::Null`.
fn series_from_values(name: &str, values: &[AnyValue<'_>], dtype: &DataType) -> Result<Series> {
    if values.is_empty() {
        return Ok(Series::new_empty(name.into(), dtype));
    }
    let series = Series::from_any_values(name.into(), values, false)?;
    if series.dtype() == &DataType::Null {
        return Ok(series.cast(dtype)?);
    }
    Ok(series)
}

/// Suffix of a wide column name after the stub and one leading separator.
fn stub_suffix(name: &str, stub: &str, separator: &str) -> String {
    let rest = name.strip_prefix(stub).unwrap_or(name);
    if separator.is_empty() {
        return rest.to_string();
    }
    rest.strip_prefix(separator).unwrap_or(rest).to_string()
}

/// Melt every column starting with `stub` into long format.
///
/// The output holds the id columns (repeated once per stub column), a
/// `var_name` column with each wide column's suffix, and a value column named
/// after the stub. Rows are stub-column-major: all input rows for the first
/// stub column, then all rows for the next.
///
/// # Errors
///
/// - `ColumnsNotFound` if an id column is absent.
/// - `NoStubColumns` if no non-id column starts with `stub`.
/// - `DuplicateColumn` if `var_name` or `stub` collides with an id column.
pub fn wide_to_long<S: AsRef<str>>(
    df: &DataFrame,
    stub: &str,
    id_columns: &[S],
    options: &WideToLongOptions,
) -> Result<DataFrame> {
    let ids = require_columns(df, id_columns)?;
    let is_id = |name: &str| id_columns.iter().any(|id| id.as_ref() == name);

    let stub_columns: Vec<String> = column_names(df)
        .into_iter()
        .filter(|name| name.starts_with(stub) && !is_id(name.as_str()))
        .collect();
    if stub_columns.is_empty() {
        return Err(TidyError::NoStubColumns {
            stub: stub.to_string(),
        });
    }
    if is_id(&options.var_name) || options.var_name == stub {
        return Err(TidyError::DuplicateColumn {
            column: options.var_name.clone(),
        });
    }
    if is_id(stub) {
        return Err(TidyError::DuplicateColumn {
            column: stub.to_string(),
        });
    }

    let height = df.height();
    let mut columns: Vec<Column> = Vec::with_capacity(ids.len() + 2);

    for id in &ids {
        let series = id.as_materialized_series();
        let mut repeated = series.clone();
        for _ in 1..stub_columns.len() {
            repeated.append(series)?;
        }
        columns.push(repeated.into());
    }

    let variables: Vec<String> = stub_columns
        .iter()
        .flat_map(|name| std::iter::repeat_n(stub_suffix(name, stub, &options.separator), height))
        .collect();
    columns.push(Series::new(options.var_name.as_str().into(), variables).into());

    let mut cells: Vec<AnyValue<'_>> = Vec::with_capacity(height * stub_columns.len());
    for name in &stub_columns {
        let column = df.column(name)?;
        for idx in 0..height {
            cells.push(column.get(idx)?);
        }
    }
    let first_dtype = df.column(&stub_columns[0])?.dtype().clone();
    columns.push(series_from_values(stub, &cells, &first_dtype)?.into());

    debug!(
        stub,
        stub_columns = stub_columns.len(),
        rows = height * stub_columns.len(),
        "melted wide columns to long format"
    );
    Ok(DataFrame::new(columns)?)
}

/// Pivot long data into one row per `index` value and one column per
/// `columns` value.
///
/// Rows and columns appear in first-observed order. Absent
/// (index, column) pairs hold `fill_value`. Rows whose index or column key is
/// missing are skipped.
///
/// # Errors
///
/// - `ColumnsNotFound` if `index`, `columns` or `values` is absent.
/// - `DuplicateEntry` if an (index, column) pair occurs more than once.
/// - `DuplicateColumn` if a pivoted column would be named like the index.
pub fn long_to_wide(
    df: &DataFrame,
    index: &str,
    columns: &str,
    values: &str,
    fill_value: AnyValue<'_>,
) -> Result<DataFrame> {
    require_columns(df, &[index, columns, values])?;
    let index_col = require_column(df, index)?;
    let key_col = require_column(df, columns)?;
    let value_col = require_column(df, values)?;

    let mut index_values: Vec<AnyValue<'_>> = Vec::new();
    let mut index_keys: Vec<String> = Vec::new();
    let mut row_lookup: HashMap<String, usize> = HashMap::new();
    let mut column_keys: Vec<String> = Vec::new();
    let mut column_lookup: HashMap<String, usize> = HashMap::new();
    let mut cells: HashMap<(usize, usize), AnyValue<'_>> = HashMap::new();
    let mut skipped = 0usize;

    for idx in 0..df.height() {
        let index_value = index_col.get(idx)?;
        let (Some(index_key), Some(column_key)) = (
            any_to_text(index_value.clone()),
            any_to_text(key_col.get(idx)?),
        ) else {
            skipped += 1;
            continue;
        };

        let row = match row_lookup.get(&index_key) {
            Some(&row) => row,
            None => {
                let row = index_values.len();
                index_values.push(index_value);
                index_keys.push(index_key.clone());
                row_lookup.insert(index_key, row);
                row
            }
        };
        let col = match column_lookup.get(&column_key) {
            Some(&col) => col,
            None => {
                let col = column_keys.len();
                column_keys.push(column_key.clone());
                column_lookup.insert(column_key, col);
                col
            }
        };

        if cells.insert((row, col), value_col.get(idx)?).is_some() {
            return Err(TidyError::DuplicateEntry {
                index: index_keys[row].clone(),
                column: column_keys[col].clone(),
            });
        }
    }

    if skipped > 0 {
        warn!(index, columns, skipped, "skipped rows with a missing pivot key");
    }
    if column_keys.iter().any(|key| key == index) {
        return Err(TidyError::DuplicateColumn {
            column: index.to_string(),
        });
    }

    let mut output: Vec<Column> = Vec::with_capacity(column_keys.len() + 1);
    output.push(series_from_values(index, &index_values, index_col.dtype())?.into());
    for (col, key) in column_keys.iter().enumerate() {
        let row_cells: Vec<AnyValue<'_>> = (0..index_values.len())
            .map(|row| {
                cells
                    .get(&(row, col))
                    .cloned()
                    .unwrap_or_else(|| fill_value.clone())
            })
            .collect();
        output.push(series_from_values(key, &row_cells, value_col.dtype())?.into());
    }

    debug!(
        index,
        columns,
        rows = index_values.len(),
        pivoted_columns = column_keys.len(),
        "pivoted long data to wide format"
    );
    Ok(DataFrame::new(output)?)
}
