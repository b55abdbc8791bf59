//! Shared types for survey tidy-data cleaning.
//!
//! - **error**: the error taxonomy every engine reports through
//! - **frame**: column lookups that fail with that taxonomy
//! - **options**: operation parameters with documented defaults
//! - **report**: missing-data report
//! - **rules**: row-level consistency rules and the row view they read

pub mod error;
pub mod frame;
pub mod options;
pub mod report;
pub mod rules;

pub use error::{Result, TidyError};
pub use options::{
    CollapseOptions, CountOptions, ExpandOptions, HandleInvalid, MissingOptions, SortOrder,
    SpeederMethod, SpeederOptions, StraightLineOptions, WideToLongOptions,
};
pub use report::{ColumnMissing, MissingReport};
pub use rules::{ColumnIndex, ConsistencyRule, RowPredicate, RowView};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_report_lookups() {
        let report = MissingReport {
            columns: vec![
                ColumnMissing {
                    column: "Q1".to_string(),
                    missing_count: 3,
                    missing_rate: 0.75,
                },
                ColumnMissing {
                    column: "Q2".to_string(),
                    missing_count: 0,
                    missing_rate: 0.0,
                },
            ],
            high_missing_cols: vec!["Q1".to_string()],
            total_rows: 4,
            complete_rows: 1,
            rows_with_missing: 3,
        };
        assert_eq!(report.missing_count("Q1"), Some(3));
        assert_eq!(report.missing_rate("Q2"), Some(0.0));
        assert_eq!(report.missing_count("Q3"), None);
        assert!(report.is_high_missing("Q1"));
        assert!(!report.is_high_missing("Q2"));
        assert_eq!(report.analyzed_columns().collect::<Vec<_>>(), vec!["Q1", "Q2"]);
    }

    #[test]
    fn missing_report_serializes() {
        let report = MissingReport {
            columns: vec![ColumnMissing {
                column: "Q1".to_string(),
                missing_count: 1,
                missing_rate: 0.5,
            }],
            high_missing_cols: vec![],
            total_rows: 2,
            complete_rows: 1,
            rows_with_missing: 1,
        };
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["columns"][0]["missing_rate"], 0.5);
        assert_eq!(json["rows_with_missing"], 1);

        let back: MissingReport = serde_json::from_value(json).unwrap();
        assert_eq!(back, report);
    }
}
