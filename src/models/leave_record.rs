//! Parsed, unparsed and priced leave records.
//!
//! These are the per-day records produced by the sheet parser and enriched by
//! the deduction calculator. All of them are plain serializable values.

use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::leave_pair::weekday_index;
use super::sheet::{ROC_YEAR_OFFSET, SheetPeriod};

/// Chinese weekday labels, indexed 0 = Monday .. 6 = Sunday.
pub const WEEKDAY_LABELS: [&str; 7] = ["一", "二", "三", "四", "五", "六", "日"];

/// Formats a month/day pair as `MM/DD`.
pub fn date_label(month: u32, day: u32) -> String {
    format!("{:02}/{:02}", month, day)
}

/// One calendar day of leave for one employee.
///
/// `leave_day` is exactly 1 for days produced by expanding a whole-day count,
/// or the original fractional value for partial-day leave.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedLeaveRecord {
    /// Employee identifier.
    pub employee_id: String,
    /// Employee name.
    pub employee_name: String,
    /// ROC calendar year of the leave day.
    pub roc_year: i32,
    /// Gregorian year of the leave day.
    pub year: i32,
    /// Month of the leave day.
    pub month: u32,
    /// Day of month of the leave day.
    pub day: u32,
    /// The leave day.
    pub date: NaiveDate,
    /// `MM/DD` label.
    pub date_label: String,
    /// Weekday index, 0 = Monday .. 6 = Sunday.
    pub weekday: u8,
    /// Chinese weekday label.
    pub weekday_label: String,
    /// Canonical leave type.
    pub leave_type: String,
    /// Days of leave recorded for this date.
    pub leave_day: Decimal,
    /// The roster cell the record came from.
    pub source_text: String,
}

impl ParsedLeaveRecord {
    /// Creates a record, deriving every calendar field from `date`.
    pub fn new(
        employee_id: &str,
        employee_name: &str,
        date: NaiveDate,
        leave_type: &str,
        leave_day: Decimal,
        source_text: &str,
    ) -> Self {
        let weekday = weekday_index(date);
        Self {
            employee_id: employee_id.to_string(),
            employee_name: employee_name.to_string(),
            roc_year: date.year() - ROC_YEAR_OFFSET,
            year: date.year(),
            month: date.month(),
            day: date.day(),
            date,
            date_label: date_label(date.month(), date.day()),
            weekday,
            weekday_label: WEEKDAY_LABELS[usize::from(weekday)].to_string(),
            leave_type: leave_type.to_string(),
            leave_day,
            source_text: source_text.to_string(),
        }
    }
}

/// A roster cell that could not be turned into leave records.
///
/// Always surfaced for manual review.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnparsedLeaveRecord {
    /// Employee identifier.
    pub employee_id: String,
    /// Employee name.
    pub employee_name: String,
    /// ROC calendar year of the sheet.
    pub roc_year: i32,
    /// Gregorian year of the sheet.
    pub year: i32,
    /// Month of the sheet.
    pub month: u32,
    /// Day-of-month column the cell sits in.
    pub day: u32,
    /// `MM/DD` label.
    pub date_label: String,
    /// The cell text.
    pub raw_text: String,
    /// Why the cell was not parsed.
    pub reason: String,
}

impl UnparsedLeaveRecord {
    /// Creates a record for a cell in the given sheet period and day column.
    pub fn new(
        employee_id: &str,
        employee_name: &str,
        period: SheetPeriod,
        day: u32,
        raw_text: &str,
        reason: impl Into<String>,
    ) -> Self {
        Self {
            employee_id: employee_id.to_string(),
            employee_name: employee_name.to_string(),
            roc_year: period.roc_year,
            year: period.year,
            month: period.month,
            day,
            date_label: date_label(period.month, day),
            raw_text: raw_text.to_string(),
            reason: reason.into(),
        }
    }
}

/// A parsed leave record with its deduction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeductionRecord {
    /// The priced record.
    #[serde(flatten)]
    pub record: ParsedLeaveRecord,
    /// Leave type as shown to people; may differ from `record.leave_type`.
    pub display_leave_type: String,
    /// Amount deducted for this record.
    pub deduction_amount: i64,
}
