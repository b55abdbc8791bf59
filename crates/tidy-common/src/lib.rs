//! Shared utilities for the survey tidy-data crates.
//!
//! This crate provides the Polars value helpers every engine uses to read
//! cells (missing detection, numeric and text coercion) and the `tracing`
//! setup shared by applications embedding the engines.

pub mod logging;
pub mod polars;

// Re-export commonly used functions at crate root for convenience
pub use crate::polars::{
    any_is_truthy, any_to_f64, any_to_i64, any_to_string, any_to_text, format_numeric,
    is_missing, missing_flags, numeric_values, parse_f64, parse_i64, text_values, truthy_flags,
};
