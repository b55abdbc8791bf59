//! Reshape Engine: conversions between survey table representations.
//!
//! - **multiple_choice**: delimited multi-select text ⇄ binary indicators
//! - **pivot**: wide (one column per question) ⇄ long (one row per answer)

pub mod multiple_choice;
pub mod pivot;

pub use multiple_choice::{
    collapse_multiple_choice, expand_multiple_choice, indicator_name, option_label,
};
pub use pivot::{long_to_wide, wide_to_long};
