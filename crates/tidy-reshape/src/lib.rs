//! Survey table reshaping.
//!
//! This crate converts survey responses between the shapes analysts need:
//!
//! - **reshape**: multi-select expansion and collapse, wide/long pivots
//! - **summary**: single- and multiple-choice frequency tables for charts
//!
//! Every operation takes the input table by reference and returns a new one.

pub mod reshape;
pub mod summary;

// Re-export the operations for external use
pub use reshape::{
    collapse_multiple_choice, expand_multiple_choice, indicator_name, long_to_wide,
    option_label, wide_to_long,
};
pub use summary::{DEFAULT_TOP_N, multiple_choice_counts, single_choice_counts, top_n_counts};
