//! The leave deduction calculator.
//!
//! Ties per-record pricing and monthly aggregation together over one parsed
//! roster, joining the optional shift-class and driver lookups.

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::config::DeductionConfig;
use crate::models::{DeductionRecord, DeductionTotals, MonthlySummary, ParsedLeaveRecord};

use super::deduction::price_record;
use super::summary::{DriverAccounts, ShiftClassLookup, summarize_by_employee};

/// The priced records, summaries and totals of one run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeductionReport {
    /// Every parsed record with its deduction.
    pub records: Vec<DeductionRecord>,
    /// One summary per employee, ordered by employee id.
    pub summaries: Vec<MonthlySummary>,
    /// Totals across all employees.
    pub totals: DeductionTotals,
}

/// Prices parsed leave records and summarizes them per employee.
///
/// # Example
///
/// ```
/// use leave_engine::calculation::LeaveDeductionCalculator;
/// use leave_engine::config::DeductionConfig;
/// use leave_engine::models::ParsedLeaveRecord;
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
///
/// let config = DeductionConfig::default();
/// let record = ParsedLeaveRecord::new(
///     "A01",
///     "王小明",
///     NaiveDate::from_ymd_opt(2025, 11, 3).unwrap(),
///     "事假",
///     Decimal::ONE,
///     "事假1",
/// );
///
/// let report = LeaveDeductionCalculator::new(&config).calculate(vec![record]);
/// assert_eq!(report.totals.total_deduction, 333);
/// ```
#[derive(Debug, Clone)]
pub struct LeaveDeductionCalculator<'a> {
    config: &'a DeductionConfig,
    shift_classes: ShiftClassLookup,
    drivers: DriverAccounts,
}

impl<'a> LeaveDeductionCalculator<'a> {
    /// Creates a calculator with no shift-class or driver information.
    pub fn new(config: &'a DeductionConfig) -> Self {
        Self {
            config,
            shift_classes: ShiftClassLookup::new(),
            drivers: DriverAccounts::new(),
        }
    }

    /// Sets the employee id → shift class lookup.
    pub fn with_shift_classes(mut self, shift_classes: ShiftClassLookup) -> Self {
        self.shift_classes = shift_classes;
        self
    }

    /// Sets the driver accounts.
    pub fn with_drivers(mut self, drivers: DriverAccounts) -> Self {
        self.drivers = drivers;
        self
    }

    /// Prices every record and aggregates the results.
    pub fn calculate(&self, records: Vec<ParsedLeaveRecord>) -> DeductionReport {
        let records: Vec<DeductionRecord> = records
            .into_iter()
            .map(|r| price_record(r, self.config))
            .collect();

        let summaries =
            summarize_by_employee(&records, self.config, &self.shift_classes, &self.drivers);
        let totals = DeductionTotals::from_summaries(&summaries);

        info!(
            records = records.len(),
            employees = totals.employee_count,
            sick_deduction = totals.sick_deduction,
            personal_deduction = totals.personal_deduction,
            total_deduction = totals.total_deduction,
            "Calculated leave deductions"
        );

        DeductionReport {
            records,
            summaries,
            totals,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rust_decimal::Decimal;
    use std::str::FromStr;

    fn record(id: &str, day: u32, leave_type: &str, leave_day: &str, text: &str) -> ParsedLeaveRecord {
        ParsedLeaveRecord::new(
            id,
            "測試員",
            NaiveDate::from_ymd_opt(2025, 11, day).unwrap(),
            leave_type,
            Decimal::from_str(leave_day).unwrap(),
            text,
        )
    }

    #[test]
    fn test_calculate_prices_and_summarizes() {
        let config = DeductionConfig::default();
        let report = LeaveDeductionCalculator::new(&config).calculate(vec![
            record("A01", 3, "事假", "0.3", "扣事0.3"),
            record("A01", 4, "傷病", "1", "生理1"),
            record("B02", 5, "特休", "1", "特休1"),
        ]);

        let amounts: Vec<_> = report.records.iter().map(|r| r.deduction_amount).collect();
        assert_eq!(amounts, vec![167, 167, 0]);
        assert_eq!(report.records[1].display_leave_type, "傷病(生理)");

        assert_eq!(report.summaries.len(), 2);
        assert_eq!(report.totals.employee_count, 2);
        assert_eq!(report.totals.total_deduction, 334);
        assert_eq!(report.totals.sick_deduction, 167);
        assert_eq!(report.totals.personal_deduction, 167);
    }

    #[test]
    fn test_lookups_are_joined() {
        let config = DeductionConfig::default();
        let report = LeaveDeductionCalculator::new(&config)
            .with_shift_classes(ShiftClassLookup::from([(
                "A01".to_string(),
                "夜班".to_string(),
            )]))
            .with_drivers(DriverAccounts::from(["A01".to_string()]))
            .calculate(vec![record("A01", 3, "事假", "1", "事假1")]);

        assert_eq!(report.summaries[0].shift_class, "夜班");
        assert!(report.summaries[0].is_driver);
    }

    #[test]
    fn test_empty_input_gives_empty_report() {
        let config = DeductionConfig::default();
        let report = LeaveDeductionCalculator::new(&config).calculate(Vec::new());
        assert!(report.records.is_empty());
        assert!(report.summaries.is_empty());
        assert_eq!(report.totals, DeductionTotals::default());
    }
}
