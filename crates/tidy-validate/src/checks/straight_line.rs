//! Straight-lining detection across a question block.

use std::collections::HashSet;

use polars::prelude::{AnyValue, BooleanChunked, DataFrame, NewChunkedArray};
use tracing::debug;

use tidy_common::{any_to_string, is_missing};
use tidy_model::frame::require_columns;
use tidy_model::{Result, StraightLineOptions};

/// Name of the returned mask.
pub const STRAIGHT_LINER_MASK: &str = "straight_liner";

/// A present answer compared by value: numbers by magnitude, text as text.
#[derive(Debug, PartialEq, Eq, Hash)]
enum AnswerKey {
    /// `f64` bits with `-0.0` folded into `0.0`.
    Number(u64),
    Boolean(bool),
    Text(String),
}

impl AnswerKey {
    fn of(value: AnyValue<'_>) -> Self {
        match value {
            AnyValue::Boolean(b) => Self::Boolean(b),
            AnyValue::Int32(_)
            | AnyValue::Int64(_)
            | AnyValue::UInt32(_)
            | AnyValue::UInt64(_)
            | AnyValue::Float32(_)
            | AnyValue::Float64(_) => match value.extract::<f64>() {
                Some(v) if v == 0.0 => Self::Number(0f64.to_bits()),
                Some(v) => Self::Number(v.to_bits()),
                None => Self::Text(any_to_string(value)),
            },
            other => Self::Text(any_to_string(other)),
        }
    }
}

/// Flag rows whose answers across `columns` are (nearly) identical.
///
/// A row is flagged when it has at least one present answer and at most
/// `threshold + 1` distinct present answers. Rows missing every answer in the
/// block are not flagged.
///
/// # Errors
///
/// `ColumnsNotFound` if any of `columns` is absent.
pub fn flag_straight_liners<S: AsRef<str>>(
    df: &DataFrame,
    columns: &[S],
    options: &StraightLineOptions,
) -> Result<BooleanChunked> {
    let block = require_columns(df, columns)?;
    let max_distinct = options.threshold.saturating_add(1);

    let flags: Vec<bool> = (0..df.height())
        .map(|row| {
            let distinct: HashSet<AnswerKey> = block
                .iter()
                .map(|column| column.get(row).unwrap_or(AnyValue::Null))
                .filter(|value| !is_missing(value))
                .map(AnswerKey::of)
                .collect();
            !distinct.is_empty() && distinct.len() <= max_distinct
        })
        .collect();

    debug!(
        columns = block.len(),
        threshold = options.threshold,
        flagged = flags.iter().filter(|&&flag| flag).count(),
        "flagged straight-liners"
    );
    Ok(BooleanChunked::from_slice(STRAIGHT_LINER_MASK.into(), &flags))
}
