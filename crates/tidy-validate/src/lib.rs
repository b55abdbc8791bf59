//! Survey response validation.
//!
//! - **checks**: range, missing-data, straight-liner, speeder and consistency checks
//! - **stats**: interpolated quantiles used to derive speeder thresholds
//!
//! Row masks are returned as `BooleanChunked` aligned with the input rows.

pub mod checks;
pub mod stats;

pub use checks::{
    RangeOutcome, SPEEDER_MASK, STRAIGHT_LINER_MASK, check_logical_consistency,
    check_response_range, derive_threshold, detect_missing_patterns, detect_speeders,
    flag_straight_liners, valid_column_name,
};
