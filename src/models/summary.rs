//! Per-employee monthly summaries and run totals.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Placeholder shown for absent optional values.
pub const PLACEHOLDER: &str = "-";

/// One employee's leave and deductions for the month.
///
/// `total_deduction` is always `sick_deduction + personal_deduction`; other
/// leave types are counted in `other_days` but never deduct.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthlySummary {
    /// Employee identifier.
    pub employee_id: String,
    /// Employee name.
    pub name: String,
    /// Shift class from the roster lookup, or [`PLACEHOLDER`].
    pub shift_class: String,
    /// Whether the employee is on the driver list.
    pub is_driver: bool,
    /// Total sick leave days.
    pub sick_days: Decimal,
    /// Total sick leave deduction.
    pub sick_deduction: i64,
    /// Total personal leave days.
    pub personal_days: Decimal,
    /// Total personal leave deduction.
    pub personal_deduction: i64,
    /// Distinct other leave types, comma-joined, or [`PLACEHOLDER`].
    pub other_leave_types: String,
    /// Total days across other leave types.
    pub other_days: Decimal,
    /// Total deduction.
    pub total_deduction: i64,
}

/// Totals across all employees in a run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeductionTotals {
    /// Number of employees with at least one leave record.
    pub employee_count: usize,
    /// Sum of sick leave deductions.
    pub sick_deduction: i64,
    /// Sum of personal leave deductions.
    pub personal_deduction: i64,
    /// Sum of all deductions.
    pub total_deduction: i64,
}

impl DeductionTotals {
    /// Sums a set of monthly summaries, saturating at `i64::MAX`.
    ///
    /// # Example
    ///
    /// ```
    /// use leave_engine::models::DeductionTotals;
    ///
    /// let totals = DeductionTotals::from_summaries(&[]);
    /// assert_eq!(totals.total_deduction, 0);
    /// ```
    pub fn from_summaries(summaries: &[MonthlySummary]) -> Self {
        summaries.iter().fold(
            Self {
                employee_count: summaries.len(),
                ..Self::default()
            },
            |mut totals, s| {
                totals.sick_deduction = totals.sick_deduction.saturating_add(s.sick_deduction);
                totals.personal_deduction = totals
                    .personal_deduction
                    .saturating_add(s.personal_deduction);
                totals.total_deduction = totals.total_deduction.saturating_add(s.total_deduction);
                totals
            },
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn summary(id: &str, sick: i64, personal: i64) -> MonthlySummary {
        MonthlySummary {
            employee_id: id.to_string(),
            name: "測試".to_string(),
            shift_class: PLACEHOLDER.to_string(),
            is_driver: false,
            sick_days: Decimal::ONE,
            sick_deduction: sick,
            personal_days: Decimal::ONE,
            personal_deduction: personal,
            other_leave_types: PLACEHOLDER.to_string(),
            other_days: Decimal::ZERO,
            total_deduction: sick + personal,
        }
    }

    #[test]
    fn test_totals_sum_each_column() {
        let totals = DeductionTotals::from_summaries(&[summary("A", 167, 333), summary("B", 84, 0)]);
        assert_eq!(totals.employee_count, 2);
        assert_eq!(totals.sick_deduction, 251);
        assert_eq!(totals.personal_deduction, 333);
        assert_eq!(totals.total_deduction, 584);
    }

    #[test]
    fn test_totals_saturate() {
        let huge = MonthlySummary {
            total_deduction: i64::MAX,
            ..summary("A", 0, i64::MAX)
        };
        let totals = DeductionTotals::from_summaries(&[huge, summary("B", 84, 333)]);
        assert_eq!(totals.sick_deduction, 84);
        assert_eq!(totals.personal_deduction, i64::MAX);
        assert_eq!(totals.total_deduction, i64::MAX);
    }
}
