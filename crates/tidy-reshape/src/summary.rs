//! Frequency tables consumed by chart renderers.
//!
//! Every table has three columns: `option` (String), `count` (Int64) and
//! `percent` (Float64, 0-100). Single-choice percentages are relative to the
//! non-missing responses; multiple-choice percentages are relative to all
//! respondents, since one respondent can select several options.

use std::collections::HashMap;

use polars::prelude::{DataFrame, NamedFrom, Series};
use tracing::debug;

use tidy_common::{text_values, truthy_flags};
use tidy_model::frame::{require_column, require_columns};
use tidy_model::{CountOptions, Result, SortOrder};

use crate::reshape::option_label;

/// Number of options kept by [`top_n_counts`] when callers have no preference.
pub const DEFAULT_TOP_N: usize = 10;

/// One option's tally, remembering where it first appeared.
#[derive(Debug, Clone)]
struct Tally {
    position: usize,
    label: String,
    count: i64,
}

/// Apply `top_n` and the requested ordering.
fn order_tallies(mut tallies: Vec<Tally>, options: &CountOptions) -> Vec<Tally> {
    // Stable sort: ties keep first-appearance order.
    tallies.sort_by(|a, b| b.count.cmp(&a.count));
    if let Some(n) = options.top_n {
        tallies.truncate(n);
    }
    match options.sort_by {
        SortOrder::Count => {}
        SortOrder::Alphabetical => tallies.sort_by(|a, b| a.label.cmp(&b.label)),
        SortOrder::Unsorted => tallies.sort_by_key(|tally| tally.position),
    }
    tallies
}

fn build_table(tallies: &[Tally], denominator: usize) -> Result<DataFrame> {
    let labels: Vec<&str> = tallies.iter().map(|tally| tally.label.as_str()).collect();
    let counts: Vec<i64> = tallies.iter().map(|tally| tally.count).collect();
    let percents: Vec<f64> = tallies
        .iter()
        .map(|tally| {
            if denominator == 0 {
                0.0
            } else {
                tally.count as f64 / denominator as f64 * 100.0
            }
        })
        .collect();
    Ok(DataFrame::new(vec![
        Series::new("option".into(), labels).into(),
        Series::new("count".into(), counts).into(),
        Series::new("percent".into(), percents).into(),
    ])?)
}

/// Count the answers of a single-choice column.
///
/// Missing answers are excluded from counts and from the percentage base.
///
/// # Errors
///
/// `ColumnNotFound` if `column` is absent.
pub fn single_choice_counts(
    df: &DataFrame,
    column: &str,
    options: &CountOptions,
) -> Result<DataFrame> {
    let source = require_column(df, column)?;

    let mut tallies: Vec<Tally> = Vec::new();
    let mut lookup: HashMap<String, usize> = HashMap::new();
    let mut responses = 0usize;
    for label in text_values(source).into_iter().flatten() {
        responses += 1;
        match lookup.get(&label) {
            Some(&idx) => tallies[idx].count += 1,
            None => {
                lookup.insert(label.clone(), tallies.len());
                tallies.push(Tally {
                    position: tallies.len(),
                    label,
                    count: 1,
                });
            }
        }
    }

    let tallies = order_tallies(tallies, options);
    debug!(
        column,
        responses,
        options = tallies.len(),
        "counted single-choice answers"
    );
    build_table(&tallies, responses)
}

/// Count selections across the indicator columns of a multiple-choice question.
///
/// Option labels are recovered from the column names the same way
/// [`collapse_multiple_choice`](crate::collapse_multiple_choice) does.
///
/// # Errors
///
/// `ColumnsNotFound` if any indicator column is absent.
pub fn multiple_choice_counts<S: AsRef<str>>(
    df: &DataFrame,
    columns: &[S],
    options: &CountOptions,
    prefix: Option<&str>,
) -> Result<DataFrame> {
    let indicators = require_columns(df, columns)?;

    let tallies: Vec<Tally> = indicators
        .iter()
        .zip(columns)
        .enumerate()
        .map(|(position, (column, name))| Tally {
            position,
            label: option_label(name.as_ref(), prefix),
            count: truthy_flags(column).into_iter().filter(|&flag| flag).count() as i64,
        })
        .collect();

    let respondents = df.height();
    let tallies = order_tallies(tallies, options);
    debug!(
        respondents,
        options = tallies.len(),
        "counted multiple-choice selections"
    );
    build_table(&tallies, respondents)
}

/// The `n` most frequent answers of a single-choice column, most frequent first.
pub fn top_n_counts(df: &DataFrame, column: &str, n: usize) -> Result<DataFrame> {
    single_choice_counts(
        df,
        column,
        &CountOptions::new()
            .with_sort_by(SortOrder::Count)
            .with_top_n(n),
    )
}
