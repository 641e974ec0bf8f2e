//! Leave deduction calculation.
//!
//! This module prices parsed leave records through the tiered rate table,
//! applies the display-only physiological relabeling, and aggregates the
//! priced records into per-employee monthly summaries.

mod calculator;
mod deduction;
mod summary;

pub use calculator::{DeductionReport, LeaveDeductionCalculator};
pub use deduction::{calculate_deduction, display_leave_type, price_record, round_up_to_unit};
pub use summary::{DriverAccounts, ShiftClassLookup, summarize_by_employee};
