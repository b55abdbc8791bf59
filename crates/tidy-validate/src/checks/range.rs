//! Response range checks.
//!
//! A cell is valid when it is missing or reads as a number inside
//! `[min, max]` (both inclusive). Present cells that cannot be read as a
//! number are invalid.

use polars::prelude::{AnyValue, BooleanChunked, DataFrame, NamedFrom, NewChunkedArray, Series};
use tracing::{debug, trace};

use tidy_common::logging::redact_value;
use tidy_common::{any_to_f64, any_to_string, is_missing};
use tidy_model::frame::{ensure_absent, require_column};
use tidy_model::{HandleInvalid, Result};

/// Result of [`check_response_range`], one variant per [`HandleInvalid`] mode.
#[derive(Debug, Clone)]
pub enum RangeOutcome {
    /// Table with a `<column>_valid` column, plus the invalid-row mask.
    Flagged {
        data: DataFrame,
        invalid: BooleanChunked,
    },
    /// Table without the invalid rows.
    Removed(DataFrame),
    /// Table with invalid cells replaced by null.
    Nulled(DataFrame),
}

impl RangeOutcome {
    pub fn data(&self) -> &DataFrame {
        match self {
            Self::Flagged { data, .. } | Self::Removed(data) | Self::Nulled(data) => data,
        }
    }

    pub fn into_data(self) -> DataFrame {
        match self {
            Self::Flagged { data, .. } | Self::Removed(data) | Self::Nulled(data) => data,
        }
    }

    /// Invalid-row mask; only present in flag mode.
    pub fn invalid_mask(&self) -> Option<&BooleanChunked> {
        match self {
            Self::Flagged { invalid, .. } => Some(invalid),
            Self::Removed(_) | Self::Nulled(_) => None,
        }
    }
}

/// Name of the validity column added in flag mode.
pub fn valid_column_name(column: &str) -> String {
    format!("{column}_valid")
}

fn in_range(value: &AnyValue<'_>, min: f64, max: f64) -> bool {
    if is_missing(value) {
        return true;
    }
    any_to_f64(value.clone()).is_some_and(|v| v >= min && v <= max)
}

/// Check that every present value of `column` lies in `[min, max]`.
///
/// # Errors
///
/// - `ColumnNotFound` if `column` is absent.
/// - `DuplicateColumn` in flag mode if `<column>_valid` already exists.
pub fn check_response_range(
    df: &DataFrame,
    column: &str,
    min: f64,
    max: f64,
    handle_invalid: HandleInvalid,
) -> Result<RangeOutcome> {
    let source = require_column(df, column)?;

    let mut valid = Vec::with_capacity(df.height());
    for idx in 0..df.height() {
        let value = source.get(idx).unwrap_or(AnyValue::Null);
        let ok = in_range(&value, min, max);
        if !ok {
            trace!(
                column,
                row = idx,
                value = redact_value(&any_to_string(value)),
                "value outside accepted range"
            );
        }
        valid.push(ok);
    }
    let invalid_count = valid.iter().filter(|&&ok| !ok).count();
    debug!(
        column,
        min,
        max,
        mode = %handle_invalid,
        invalid = invalid_count,
        "checked response range"
    );

    let valid_mask = BooleanChunked::from_slice(column.into(), &valid);
    match handle_invalid {
        HandleInvalid::Flag => {
            let flag_name = valid_column_name(column);
            ensure_absent(df, &flag_name)?;
            let invalid: Vec<bool> = valid.iter().map(|&ok| !ok).collect();
            let mut data = df.clone();
            data.with_column(Series::new(flag_name.as_str().into(), valid))?;
            Ok(RangeOutcome::Flagged {
                data,
                invalid: BooleanChunked::from_slice(column.into(), &invalid),
            })
        }
        HandleInvalid::Remove => Ok(RangeOutcome::Removed(df.filter(&valid_mask)?)),
        HandleInvalid::Nan => {
            let series = source.as_materialized_series();
            let nulls = Series::full_null(column.into(), series.len(), series.dtype());
            let mut data = df.clone();
            data.with_column(series.zip_with(&valid_mask, &nulls)?)?;
            Ok(RangeOutcome::Nulled(data))
        }
    }
}
