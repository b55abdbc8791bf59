//! Multi-select columns: delimited text to indicator columns and back.
//!
//! A multi-select answer is stored as one cell of tokens joined by a
//! separator (`"Blue,Green"`). Expansion creates one `Int32` 0/1 column per
//! distinct token named `<prefix>_<token>`; collapse joins the names of the
//! selected indicators back into one cell.

use std::collections::HashSet;

use polars::prelude::{DataFrame, NamedFrom, Series};
use tracing::debug;

use tidy_common::{text_values, truthy_flags};
use tidy_model::frame::{ensure_absent, has_column, require_column, require_columns};
use tidy_model::{CollapseOptions, ExpandOptions, Result};

/// Name of the indicator column for one option.
pub fn indicator_name(prefix: &str, option: &str) -> String {
    format!("{prefix}_{option}")
}

/// Recover the option label from an indicator column name.
///
/// With an explicit prefix, exactly `<prefix>_` is removed (names without it
/// are returned unchanged). Without one, everything through the first `_` is
/// removed, or the full name is used when it has no `_`.
///
/// # Examples
///
/// ```
/// use tidy_reshape::option_label;
///
/// assert_eq!(option_label("colors_Blue", None), "Blue");
/// assert_eq!(option_label("Blue", None), "Blue");
/// assert_eq!(option_label("fav_colors_Blue", Some("fav_colors")), "Blue");
/// assert_eq!(option_label("fav_colors_Blue", None), "colors_Blue");
/// ```
pub fn option_label(column: &str, prefix: Option<&str>) -> String {
    match prefix {
        Some(prefix) => column
            .strip_prefix(prefix)
            .and_then(|rest| rest.strip_prefix('_'))
            .unwrap_or(column)
            .to_string(),
        None => column
            .split_once('_')
            .map_or(column, |(_, rest)| rest)
            .to_string(),
    }
}

/// Split one cell into trimmed, non-empty tokens.
fn split_tokens<'a>(cell: &'a str, separator: &str) -> Vec<&'a str> {
    if separator.is_empty() {
        let trimmed = cell.trim();
        return if trimmed.is_empty() { vec![] } else { vec![trimmed] };
    }
    cell.split(separator)
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .collect()
}

/// Expand a delimited multi-select column into binary indicator columns.
///
/// One column per distinct token, in first-observed order, is appended to the
/// table. Missing cells get 0 in every indicator. The source column is dropped
/// unless `keep_original` is set.
///
/// # Errors
///
/// - `ColumnNotFound` if `column` is absent.
/// - `DuplicateColumn` if an indicator name already exists in the table.
pub fn expand_multiple_choice(
    df: &DataFrame,
    column: &str,
    options: &ExpandOptions,
) -> Result<DataFrame> {
    let source = require_column(df, column)?;
    let cells = text_values(source);

    let selections: Vec<Option<HashSet<&str>>> = cells
        .iter()
        .map(|cell| {
            cell.as_deref()
                .map(|text| split_tokens(text, &options.separator).into_iter().collect())
        })
        .collect();

    let mut seen: HashSet<&str> = HashSet::new();
    let mut tokens: Vec<&str> = Vec::new();
    for cell in cells.iter().flatten() {
        for token in split_tokens(cell, &options.separator) {
            if seen.insert(token) {
                tokens.push(token);
            }
        }
    }

    let prefix = options.prefix.as_deref().unwrap_or(column);
    let mut out = if options.keep_original {
        df.clone()
    } else {
        df.drop(column)?
    };

    for token in &tokens {
        let name = indicator_name(prefix, token);
        ensure_absent(&out, &name)?;
        let values: Vec<i32> = selections
            .iter()
            .map(|row| i32::from(row.as_ref().is_some_and(|set| set.contains(token))))
            .collect();
        out.with_column(Series::new(name.as_str().into(), values))?;
    }

    debug!(
        column,
        prefix,
        indicators = tokens.len(),
        kept_original = options.keep_original,
        "expanded multiple-choice column"
    );
    Ok(out)
}

/// Collapse binary indicator columns into one delimited text column.
///
/// For each row the option labels of the selected indicators are joined in
/// the given column order. A row with no selection gets the missing sentinel,
/// never an empty string.
///
/// # Errors
///
/// - `ColumnsNotFound` if any indicator column is absent.
/// - `DuplicateColumn` if `output_column` still exists after dropping.
pub fn collapse_multiple_choice<S: AsRef<str>>(
    df: &DataFrame,
    columns: &[S],
    output_column: &str,
    options: &CollapseOptions,
) -> Result<DataFrame> {
    let indicators = require_columns(df, columns)?;
    let labels: Vec<String> = columns
        .iter()
        .map(|name| option_label(name.as_ref(), options.prefix.as_deref()))
        .collect();
    let flags: Vec<Vec<bool>> = indicators.iter().map(|column| truthy_flags(column)).collect();

    let values: Vec<Option<String>> = (0..df.height())
        .map(|row| {
            let selected: Vec<&str> = labels
                .iter()
                .zip(&flags)
                .filter(|(_, column_flags)| column_flags[row])
                .map(|(label, _)| label.as_str())
                .collect();
            if selected.is_empty() {
                None
            } else {
                Some(selected.join(&options.separator))
            }
        })
        .collect();

    let mut out = df.clone();
    if options.drop_original {
        for name in columns {
            if has_column(&out, name.as_ref()) {
                out = out.drop(name.as_ref())?;
            }
        }
    }
    ensure_absent(&out, output_column)?;
    out.with_column(Series::new(output_column.into(), values))?;

    debug!(
        output_column,
        indicators = columns.len(),
        dropped_original = options.drop_original,
        "collapsed indicator columns"
    );
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn split_tokens_trims_and_skips_empty() {
        assert_eq!(split_tokens(" Blue , Green ,", ","), vec!["Blue", "Green"]);
        assert_eq!(split_tokens("", ","), Vec::<&str>::new());
        assert_eq!(split_tokens("A;B", ";"), vec!["A", "B"]);
    }

    #[test]
    fn split_tokens_with_empty_separator_keeps_whole_cell() {
        assert_eq!(split_tokens(" A,B ", ""), vec!["A,B"]);
        assert_eq!(split_tokens("  ", ""), Vec::<&str>::new());
    }

    #[test]
    fn option_label_with_prefix_not_matching() {
        assert_eq!(option_label("other_Blue", Some("colors")), "other_Blue");
        assert_eq!(option_label("colorsBlue", Some("colors")), "colorsBlue");
    }

    #[test]
    fn indicator_name_joins_with_underscore() {
        assert_eq!(indicator_name("colors", "Blue"), "colors_Blue");
    }
}
