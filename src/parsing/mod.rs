//! Leave roster parsing.
//!
//! This module turns free-text roster cells into structured leave records:
//! rest-day marker extraction, leave pair tokenization, date expansion
//! skipping rest days, and the sheet-level driver that ties them together.

mod date_expansion;
mod rest_days;
mod sheet_parser;
mod tokenizer;

pub use date_expansion::{EXPANSION_STEP_FACTOR, expand_leave_days};
pub use rest_days::{SCHEDULED_HOLIDAY_MARKER, parse_rest_days};
pub use sheet_parser::{LeaveSheetParser, ParsedSheet, UNPARSED_REASON, parse_title};
pub use tokenizer::{parse_leave_pairs, strip_time_ranges};
