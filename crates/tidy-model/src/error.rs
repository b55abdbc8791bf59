use polars::prelude::PolarsError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TidyError {
    #[error("Column '{column}' not found in table")]
    ColumnNotFound { column: String },

    #[error("Columns not found: {}", .columns.join(", "))]
    ColumnsNotFound { columns: Vec<String> },

    #[error("Invalid {parameter} option '{value}'; expected one of: {}", .allowed.join(", "))]
    InvalidOption {
        parameter: &'static str,
        value: String,
        allowed: &'static [&'static str],
    },

    #[error("Rule '{rule}' must have a 'condition' function")]
    MissingCondition { rule: String },

    #[error("Column '{column}' already exists in table")]
    DuplicateColumn { column: String },

    #[error("Index contains duplicate entries for ({index}, {column})")]
    DuplicateEntry { index: String, column: String },

    #[error("No columns start with stub '{stub}'")]
    NoStubColumns { stub: String },

    #[error("polars error: {0}")]
    Polars(#[from] PolarsError),
}

impl TidyError {
    pub(crate) fn invalid_option(
        parameter: &'static str,
        value: &str,
        allowed: &'static [&'static str],
    ) -> Self {
        Self::InvalidOption {
            parameter,
            value: value.to_string(),
            allowed,
        }
    }
}

pub type Result<T> = std::result::Result<T, TidyError>;
