//! Core data models for the leave engine.
//!
//! Each pipeline stage has its own record type: raw [`LeaveSheet`] cells,
//! tokenized [`LeavePair`]s, per-day [`ParsedLeaveRecord`]s, priced
//! [`DeductionRecord`]s and per-employee [`MonthlySummary`]s.

mod leave_pair;
mod leave_record;
mod sheet;
mod summary;

pub use leave_pair::{LeavePair, RestDays, weekday_index};
pub use leave_record::{
    DeductionRecord, ParsedLeaveRecord, UnparsedLeaveRecord, WEEKDAY_LABELS, date_label,
};
pub use sheet::{Cell, LeaveSheet, ROC_YEAR_OFFSET, SheetPeriod};
pub use summary::{DeductionTotals, MonthlySummary, PLACEHOLDER};
