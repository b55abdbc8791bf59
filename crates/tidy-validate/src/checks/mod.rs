//! Validation check modules.
//!
//! Each module performs one kind of response-quality check. Checks never
//! modify their input: they return a new table, a row mask or a report.

mod consistency;
mod missing;
mod range;
mod speeders;
mod straight_line;

pub use consistency::check_logical_consistency;
pub use missing::detect_missing_patterns;
pub use range::{RangeOutcome, check_response_range, valid_column_name};
pub use speeders::{SPEEDER_MASK, derive_threshold, detect_speeders};
pub use straight_line::{STRAIGHT_LINER_MASK, flag_straight_liners};
