//! Speeder detection on completion durations.

use polars::prelude::{BooleanChunked, DataFrame, NewChunkedArray};
use tracing::{debug, warn};

use tidy_common::numeric_values;
use tidy_model::frame::require_column;
use tidy_model::{Result, SpeederMethod, SpeederOptions};

use crate::stats::{median, quantile, sorted_present};

/// Name of the returned mask.
pub const SPEEDER_MASK: &str = "speeder";

/// Tukey fence multiplier for the IQR method.
const IQR_FENCE: f64 = 1.5;
/// Fraction of the median used by the median method.
const MEDIAN_FRACTION: f64 = 0.5;
/// Quantile used by the percentile method.
const LOW_PERCENTILE: f64 = 0.10;

/// Derive a speeder threshold from the ascending present durations.
///
/// Returns `None` when there are no present values.
pub fn derive_threshold(sorted: &[f64], method: SpeederMethod) -> Option<f64> {
    match method {
        SpeederMethod::Iqr => {
            let q1 = quantile(sorted, 0.25)?;
            let q3 = quantile(sorted, 0.75)?;
            Some(q1 - IQR_FENCE * (q3 - q1))
        }
        SpeederMethod::Median => median(sorted).map(|m| m * MEDIAN_FRACTION),
        SpeederMethod::Percentile => quantile(sorted, LOW_PERCENTILE),
    }
}

/// Flag rows whose duration is strictly below the speeder threshold.
///
/// A manual `options.threshold` takes precedence over `options.method`.
/// Missing or non-numeric durations are never flagged.
///
/// # Errors
///
/// `ColumnNotFound` if `column` is absent.
pub fn detect_speeders(
    df: &DataFrame,
    column: &str,
    options: &SpeederOptions,
) -> Result<BooleanChunked> {
    let durations = numeric_values(require_column(df, column)?);

    let threshold = match options.threshold {
        Some(manual) => Some(manual),
        None => {
            let derived = derive_threshold(&sorted_present(&durations), options.method);
            if derived.is_none() {
                warn!(
                    column,
                    method = %options.method,
                    "no present durations; no speeders flagged"
                );
            }
            derived
        }
    };

    let flags: Vec<bool> = durations
        .iter()
        .map(|duration| match (duration, threshold) {
            (Some(value), Some(limit)) => *value < limit,
            _ => false,
        })
        .collect();

    debug!(
        column,
        threshold,
        manual = options.threshold.is_some(),
        flagged = flags.iter().filter(|&&flag| flag).count(),
        "detected speeders"
    );
    Ok(BooleanChunked::from_slice(SPEEDER_MASK.into(), &flags))
}
