//! Row-level logical consistency rules.
//!
//! A rule pairs a name with a row predicate. The predicate receives a
//! [`RowView`] over one row of the input table and returns `true` when that
//! row is consistent. Declared columns are documentation only.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use polars::prelude::{AnyValue, Column, DataFrame};
use tidy_common::{any_to_f64, any_to_i64, any_to_text, is_missing};

/// Row predicate used by consistency rules.
pub type RowPredicate = Arc<dyn Fn(&RowView<'_>) -> bool + Send + Sync>;

/// Columns of a table keyed by name, resolved once and shared by its row views.
#[derive(Debug, Clone)]
pub struct ColumnIndex<'a> {
    by_name: HashMap<&'a str, &'a Column>,
}

impl<'a> ColumnIndex<'a> {
    pub fn new(df: &'a DataFrame) -> Self {
        let by_name = df
            .get_columns()
            .iter()
            .map(|column| (column.name().as_str(), column))
            .collect();
        Self { by_name }
    }

    pub fn get(&self, column: &str) -> Option<&'a Column> {
        self.by_name.get(column).copied()
    }

    /// View of row `row`.
    pub fn row(&self, row: usize) -> RowView<'_> {
        RowView::new(self, row)
    }
}

/// Read-only view of a single table row.
#[derive(Clone, Copy)]
pub struct RowView<'a> {
    columns: &'a ColumnIndex<'a>,
    row: usize,
}

impl<'a> RowView<'a> {
    pub fn new(columns: &'a ColumnIndex<'a>, row: usize) -> Self {
        Self { columns, row }
    }

    /// Position of the row in the table.
    pub fn index(&self) -> usize {
        self.row
    }

    /// Raw cell value; `Null` when the column does not exist.
    pub fn value(&self, column: &str) -> AnyValue<'a> {
        self.columns
            .get(column)
            .and_then(|col| col.get(self.row).ok())
            .unwrap_or(AnyValue::Null)
    }

    /// True if the column is absent or the cell holds the missing sentinel.
    pub fn is_missing(&self, column: &str) -> bool {
        is_missing(&self.value(column))
    }

    pub fn f64(&self, column: &str) -> Option<f64> {
        any_to_f64(self.value(column))
    }

    pub fn i64(&self, column: &str) -> Option<i64> {
        any_to_i64(self.value(column))
    }

    pub fn str(&self, column: &str) -> Option<String> {
        any_to_text(self.value(column))
    }
}

impl fmt::Debug for RowView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RowView").field("row", &self.row).finish()
    }
}

/// A named consistency rule.
#[derive(Clone)]
pub struct ConsistencyRule {
    pub name: String,
    pub condition: Option<RowPredicate>,
    /// Columns the condition reads. Not enforced.
    pub columns: Vec<String>,
}

impl ConsistencyRule {
    /// Create a rule without a condition.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            condition: None,
            columns: Vec::new(),
        }
    }

    pub fn with_condition<F>(mut self, condition: F) -> Self
    where
        F: Fn(&RowView<'_>) -> bool + Send + Sync + 'static,
    {
        self.condition = Some(Arc::new(condition));
        self
    }

    pub fn with_columns<I, S>(mut self, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.columns = columns.into_iter().map(Into::into).collect();
        self
    }

    /// Name of the boolean output column.
    pub fn output_column(&self) -> String {
        format!("consistent_{}", self.name)
    }
}

impl fmt::Debug for ConsistencyRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConsistencyRule")
            .field("name", &self.name)
            .field("has_condition", &self.condition.is_some())
            .field("columns", &self.columns)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use polars::prelude::{NamedFrom, Series};

    use super::*;

    fn frame() -> DataFrame {
        DataFrame::new(vec![
            Series::new("age".into(), &[Some(25), None]).into(),
            Series::new("role".into(), &[Some("analyst"), Some("lead")]).into(),
        ])
        .unwrap()
    }

    #[test]
    fn row_view_reads_typed_values() {
        let df = frame();
        let columns = ColumnIndex::new(&df);
        let row = columns.row(0);
        assert_eq!(row.i64("age"), Some(25));
        assert_eq!(row.f64("age"), Some(25.0));
        assert_eq!(row.str("role").as_deref(), Some("analyst"));
        assert_eq!(row.index(), 0);
    }

    #[test]
    fn row_view_treats_absent_columns_as_missing() {
        let df = frame();
        let columns = ColumnIndex::new(&df);
        let row = columns.row(1);
        assert!(row.is_missing("age"));
        assert!(row.is_missing("nope"));
        assert_eq!(row.f64("nope"), None);
    }

    #[test]
    fn rule_builder_sets_condition() {
        let rule = ConsistencyRule::new("adult")
            .with_condition(|row| row.i64("age").is_some_and(|age| age >= 18))
            .with_columns(["age"]);
        assert_eq!(rule.output_column(), "consistent_adult");
        assert_eq!(rule.columns, vec!["age"]);

        let df = frame();
        let columns = ColumnIndex::new(&df);
        let condition = rule.condition.as_ref().unwrap();
        assert!(condition(&columns.row(0)));
        assert!(!condition(&columns.row(1)));
    }

    #[test]
    fn column_index_resolves_each_column_once_for_all_rows() {
        let df = frame();
        let columns = ColumnIndex::new(&df);
        assert!(columns.get("role").is_some());
        assert!(columns.get("nope").is_none());

        let roles: Vec<Option<String>> = (0..df.height())
            .map(|row| columns.row(row).str("role"))
            .collect();
        assert_eq!(
            roles,
            vec![Some("analyst".to_string()), Some("lead".to_string())]
        );
        assert_eq!(columns.row(1).index(), 1);
    }
}
