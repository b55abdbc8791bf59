//! Cell access helpers over polars `AnyValue`.
//!
//! The missing sentinel is polars null. A float `NaN` counts as missing too,
//! since survey exports often encode skipped numeric answers that way.

use polars::prelude::*;

/// Returns true if the value is the missing sentinel (null or a float `NaN`).
///
/// # Examples
///
/// ```
/// use polars::prelude::AnyValue;
/// use tidy_common::is_missing;
///
/// assert!(is_missing(&AnyValue::Null));
/// assert!(is_missing(&AnyValue::Float64(f64::NAN)));
/// assert!(!is_missing(&AnyValue::Int32(0)));
/// assert!(!is_missing(&AnyValue::String("")));
/// ```
pub fn is_missing(value: &AnyValue<'_>) -> bool {
    match value {
        AnyValue::Null => true,
        AnyValue::Float32(v) => v.is_nan(),
        AnyValue::Float64(v) => v.is_nan(),
        _ => false,
    }
}

/// Renders a cell as text; `Null` becomes an empty string.
///
/// Floats drop a trailing `.0` so `3.0` and `3` render alike.
///
/// # Examples
///
/// ```
/// use polars::prelude::AnyValue;
/// use tidy_common::any_to_string;
///
/// assert_eq!(any_to_string(AnyValue::Null), "");
/// assert_eq!(any_to_string(AnyValue::Int32(42)), "42");
/// assert_eq!(any_to_string(AnyValue::Float64(3.0)), "3");
/// assert_eq!(any_to_string(AnyValue::String("hello")), "hello");
/// ```
pub fn any_to_string(value: AnyValue<'_>) -> String {
    match value {
        AnyValue::Null => String::new(),
        AnyValue::Float32(v) => format_numeric(f64::from(v)),
        AnyValue::Float64(v) => format_numeric(v),
        AnyValue::String(s) => s.to_string(),
        AnyValue::StringOwned(s) => s.to_string(),
        other => other.to_string(),
    }
}

/// Converts `AnyValue` to `String`, returning `None` for missing values.
///
/// Unlike [`any_to_string`], an empty string stays `Some("")`: an empty answer
/// is present data, only the sentinel is missing.
pub fn any_to_text(value: AnyValue<'_>) -> Option<String> {
    if is_missing(&value) {
        None
    } else {
        Some(any_to_string(value))
    }
}

/// Formats a floating-point number as a string without trailing zeros.
///
/// # Examples
///
/// ```
/// use tidy_common::format_numeric;
///
/// assert_eq!(format_numeric(1.0), "1");
/// assert_eq!(format_numeric(1.5), "1.5");
/// assert_eq!(format_numeric(10.0), "10");
/// assert_eq!(format_numeric(0.0), "0");
/// ```
pub fn format_numeric(v: f64) -> String {
    let s = format!("{v}");
    if !s.contains('.') {
        return s;
    }
    let trimmed = s.trim_end_matches('0').trim_end_matches('.');
    if trimmed.is_empty() || trimmed == "-" {
        "0".to_string()
    } else {
        trimmed.to_string()
    }
}

/// Reads a cell as a number. Text is parsed; booleans read as 1 or 0.
///
/// Missing, `NaN` and unparseable cells give `None`.
pub fn any_to_f64(value: AnyValue<'_>) -> Option<f64> {
    let number = match value {
        AnyValue::Boolean(b) => Some(f64::from(u8::from(b))),
        AnyValue::String(s) => parse_f64(s),
        AnyValue::StringOwned(s) => parse_f64(&s),
        other => other.extract::<f64>(),
    };
    number.filter(|v| !v.is_nan())
}

/// Reads a cell as an integer; floats are truncated toward zero.
pub fn any_to_i64(value: AnyValue<'_>) -> Option<i64> {
    match value {
        AnyValue::String(s) => parse_i64(s),
        AnyValue::StringOwned(s) => parse_i64(&s),
        other => other.extract::<i64>(),
    }
}

/// Interprets an indicator cell as selected (`true`) or not selected.
///
/// Missing cells, zero, `false` and unparseable text are all "not selected".
pub fn any_is_truthy(value: AnyValue<'_>) -> bool {
    match value {
        AnyValue::Boolean(b) => b,
        other => any_to_f64(other).is_some_and(|v| v != 0.0),
    }
}

pub fn parse_f64(value: &str) -> Option<f64> {
    value.trim().parse().ok()
}

pub fn parse_i64(value: &str) -> Option<i64> {
    value.trim().parse().ok()
}

/// Read every cell of a column through `f`, one entry per row.
fn map_column<T>(column: &Column, f: impl Fn(AnyValue<'_>) -> T) -> Vec<T> {
    (0..column.len())
        .map(|idx| f(column.get(idx).unwrap_or(AnyValue::Null)))
        .collect()
}

/// Extract a column as numbers; missing and non-numeric cells become `None`.
pub fn numeric_values(column: &Column) -> Vec<Option<f64>> {
    map_column(column, any_to_f64)
}

/// Extract a column as text; only missing cells become `None`.
pub fn text_values(column: &Column) -> Vec<Option<String>> {
    map_column(column, any_to_text)
}

/// Per-row missing flags for a column.
pub fn missing_flags(column: &Column) -> Vec<bool> {
    map_column(column, |value| is_missing(&value))
}

/// Per-row selection flags for an indicator column.
pub fn truthy_flags(column: &Column) -> Vec<bool> {
    map_column(column, any_is_truthy)
}
