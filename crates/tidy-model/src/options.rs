//! Configuration options for reshape and validation operations.
//!
//! Every option struct has a `Default` matching the documented parameter
//! defaults and can be loaded from configuration through serde. Enumerated
//! options also parse from their lowercase names; an unknown name fails with
//! [`TidyError::InvalidOption`].

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::TidyError;

/// What to do with present values outside the accepted range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HandleInvalid {
    /// Add a `<column>_valid` column and return the invalid-row mask.
    #[default]
    Flag,
    /// Drop invalid rows.
    Remove,
    /// Overwrite invalid cells with the missing sentinel.
    Nan,
}

impl HandleInvalid {
    pub const NAMES: &'static [&'static str] = &["flag", "remove", "nan"];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Flag => "flag",
            Self::Remove => "remove",
            Self::Nan => "nan",
        }
    }
}

impl FromStr for HandleInvalid {
    type Err = TidyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "flag" => Ok(Self::Flag),
            "remove" => Ok(Self::Remove),
            "nan" => Ok(Self::Nan),
            _ => Err(TidyError::invalid_option("handle_invalid", s, Self::NAMES)),
        }
    }
}

impl fmt::Display for HandleInvalid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How a speeder threshold is derived from the duration distribution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SpeederMethod {
    /// Lower Tukey fence: `Q1 - 1.5 * (Q3 - Q1)`.
    #[default]
    Iqr,
    /// Half the median duration.
    Median,
    /// The 10th percentile.
    Percentile,
}

impl SpeederMethod {
    pub const NAMES: &'static [&'static str] = &["iqr", "median", "percentile"];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Iqr => "iqr",
            Self::Median => "median",
            Self::Percentile => "percentile",
        }
    }
}

impl FromStr for SpeederMethod {
    type Err = TidyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "iqr" => Ok(Self::Iqr),
            "median" => Ok(Self::Median),
            "percentile" => Ok(Self::Percentile),
            _ => Err(TidyError::invalid_option("method", s, Self::NAMES)),
        }
    }
}

impl fmt::Display for SpeederMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Ordering of frequency tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    /// Highest count first; ties keep first-appearance order.
    #[default]
    Count,
    /// Ascending option label.
    Alphabetical,
    /// First-appearance order.
    #[serde(rename = "none")]
    Unsorted,
}

impl SortOrder {
    pub const NAMES: &'static [&'static str] = &["count", "alphabetical", "none"];
}

impl FromStr for SortOrder {
    type Err = TidyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "count" => Ok(Self::Count),
            "alphabetical" => Ok(Self::Alphabetical),
            "none" => Ok(Self::Unsorted),
            _ => Err(TidyError::invalid_option("sort_by", s, Self::NAMES)),
        }
    }
}

/// Options for expanding a delimited multi-select column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExpandOptions {
    /// Token separator inside each cell.
    pub separator: String,
    /// Indicator name prefix; defaults to the source column name.
    pub prefix: Option<String>,
    /// Keep the source column next to the indicators.
    pub keep_original: bool,
}

impl Default for ExpandOptions {
    fn default() -> Self {
        Self {
            separator: ",".to_string(),
            prefix: None,
            keep_original: false,
        }
    }
}

impl ExpandOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_separator(mut self, separator: impl Into<String>) -> Self {
        self.separator = separator.into();
        self
    }

    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = Some(prefix.into());
        self
    }

    pub fn with_keep_original(mut self, keep: bool) -> Self {
        self.keep_original = keep;
        self
    }
}

/// Options for collapsing indicator columns back into delimited text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CollapseOptions {
    /// Separator placed between selected option names.
    pub separator: String,
    /// Explicit indicator prefix. When set, exactly `<prefix>_` is stripped
    /// from each column name; otherwise everything through the first `_` is.
    pub prefix: Option<String>,
    /// Drop the indicator columns after collapsing.
    pub drop_original: bool,
}

impl Default for CollapseOptions {
    fn default() -> Self {
        Self {
            separator: ",".to_string(),
            prefix: None,
            drop_original: true,
        }
    }
}

impl CollapseOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_separator(mut self, separator: impl Into<String>) -> Self {
        self.separator = separator.into();
        self
    }

    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = Some(prefix.into());
        self
    }

    pub fn with_drop_original(mut self, drop: bool) -> Self {
        self.drop_original = drop;
        self
    }
}

/// Options for melting stub columns into long format.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WideToLongOptions {
    /// Name of the column holding each wide column's suffix.
    pub var_name: String,
    /// Separator between stub and suffix, removed once from the suffix.
    pub separator: String,
}

impl Default for WideToLongOptions {
    fn default() -> Self {
        Self {
            var_name: "variable".to_string(),
            separator: "_".to_string(),
        }
    }
}

impl WideToLongOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_var_name(mut self, var_name: impl Into<String>) -> Self {
        self.var_name = var_name.into();
        self
    }

    pub fn with_separator(mut self, separator: impl Into<String>) -> Self {
        self.separator = separator.into();
        self
    }
}

/// Options for the missing-data report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MissingOptions {
    /// Columns to analyze; all columns when `None`.
    pub columns: Option<Vec<String>>,
    /// Missing rate above which a column is reported as high-missing.
    pub threshold: f64,
}

impl Default for MissingOptions {
    fn default() -> Self {
        Self {
            columns: None,
            threshold: 0.5,
        }
    }
}

impl MissingOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_columns<I, S>(mut self, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.columns = Some(columns.into_iter().map(Into::into).collect());
        self
    }

    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.threshold = threshold;
        self
    }
}

/// Options for straight-lining detection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct StraightLineOptions {
    /// Extra distinct values tolerated; 0 flags only identical answers.
    pub threshold: usize,
}

impl StraightLineOptions {
    pub fn with_threshold(mut self, threshold: usize) -> Self {
        self.threshold = threshold;
        self
    }
}

/// Options for speeder detection.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SpeederOptions {
    /// Fixed threshold; overrides `method` when set.
    pub threshold: Option<f64>,
    /// Distribution-based threshold when no fixed threshold is given.
    pub method: SpeederMethod,
}

impl SpeederOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.threshold = Some(threshold);
        self
    }

    pub fn with_method(mut self, method: SpeederMethod) -> Self {
        self.method = method;
        self
    }
}

/// Options for frequency tables handed to chart renderers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CountOptions {
    pub sort_by: SortOrder,
    /// Keep only the N most frequent options.
    pub top_n: Option<usize>,
}

impl CountOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_sort_by(mut self, sort_by: SortOrder) -> Self {
        self.sort_by = sort_by;
        self
    }

    pub fn with_top_n(mut self, top_n: usize) -> Self {
        self.top_n = Some(top_n);
        self
    }
}
