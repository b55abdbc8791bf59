//! Row-level logical consistency rules.

use std::collections::HashSet;

use polars::prelude::{DataFrame, NamedFrom, Series};
use tracing::{debug, warn};

use tidy_model::frame::{ensure_absent, has_column};
use tidy_model::{ColumnIndex, ConsistencyRule, Result, RowPredicate, TidyError};

/// Evaluate every rule on every row and add one `consistent_<name>` column per rule.
///
/// All rules are validated before any is evaluated, so a failure never
/// yields a partial result. Each predicate sees the input table only, never
/// the columns added for earlier rules.
///
/// # Errors
///
/// - `MissingCondition` if a rule has no condition.
/// - `DuplicateColumn` if an output column already exists or two rules share
///   a name.
pub fn check_logical_consistency(df: &DataFrame, rules: &[ConsistencyRule]) -> Result<DataFrame> {
    let mut outputs = HashSet::new();
    let mut prepared: Vec<(String, &RowPredicate)> = Vec::with_capacity(rules.len());
    for rule in rules {
        let Some(condition) = rule.condition.as_ref() else {
            return Err(TidyError::MissingCondition {
                rule: rule.name.clone(),
            });
        };
        let output = rule.output_column();
        ensure_absent(df, &output)?;
        if !outputs.insert(output.clone()) {
            return Err(TidyError::DuplicateColumn { column: output });
        }

        let absent: Vec<&str> = rule
            .columns
            .iter()
            .map(String::as_str)
            .filter(|name| !has_column(df, name))
            .collect();
        if !absent.is_empty() {
            warn!(rule = %rule.name, columns = ?absent, "rule declares columns missing from table");
        }
        prepared.push((output, condition));
    }

    let columns = ColumnIndex::new(df);
    let mut out = df.clone();
    for (output, condition) in prepared {
        let results: Vec<bool> = (0..df.height())
            .map(|row| condition(&columns.row(row)))
            .collect();
        let violations = results.iter().filter(|&&ok| !ok).count();
        debug!(rule_column = %output, violations, "evaluated consistency rule");
        out.with_column(Series::new(output.as_str().into(), results))?;
    }
    Ok(out)
}
