//! Monthly per-employee aggregation of priced leave records.

use std::collections::{BTreeMap, HashMap, HashSet};

use rust_decimal::Decimal;

use crate::config::DeductionConfig;
use crate::models::{DeductionRecord, MonthlySummary, PLACEHOLDER};

/// Employee id → shift class, joined from the shift roster.
pub type ShiftClassLookup = HashMap<String, String>;

/// Employee ids flagged as drivers.
pub type DriverAccounts = HashSet<String>;

#[derive(Debug, Default)]
struct Accumulator {
    sick_days: Decimal,
    sick_deduction: i64,
    personal_days: Decimal,
    personal_deduction: i64,
    other_types: Vec<String>,
    other_days: Decimal,
}

/// Aggregates priced records into one summary per (employee id, name).
///
/// Sick and personal leave are summed separately, both days and deduction.
/// Every other leave type contributes only to `other_days` and the list of
/// other type labels. Summaries come back ordered by employee id. Sums
/// saturate instead of overflowing.
///
/// # Arguments
///
/// * `records` - Priced leave records
/// * `config` - Identifies the sick and personal leave types
/// * `shift_classes` - Shift class per employee id; missing entries show [`PLACEHOLDER`]
/// * `drivers` - Driver employee ids
pub fn summarize_by_employee(
    records: &[DeductionRecord],
    config: &DeductionConfig,
    shift_classes: &ShiftClassLookup,
    drivers: &DriverAccounts,
) -> Vec<MonthlySummary> {
    let mut groups: BTreeMap<(&str, &str), Accumulator> = BTreeMap::new();

    for priced in records {
        let record = &priced.record;
        let acc = groups
            .entry((record.employee_id.as_str(), record.employee_name.as_str()))
            .or_default();

        if record.leave_type == config.sick_leave_type {
            acc.sick_days = acc.sick_days.saturating_add(record.leave_day);
            acc.sick_deduction = acc.sick_deduction.saturating_add(priced.deduction_amount);
        } else if record.leave_type == config.personal_leave_type {
            acc.personal_days = acc.personal_days.saturating_add(record.leave_day);
            acc.personal_deduction = acc
                .personal_deduction
                .saturating_add(priced.deduction_amount);
        } else {
            acc.other_days = acc.other_days.saturating_add(record.leave_day);
            if !acc.other_types.contains(&record.leave_type) {
                acc.other_types.push(record.leave_type.clone());
            }
        }
    }

    groups
        .into_iter()
        .map(|((employee_id, name), acc)| MonthlySummary {
            employee_id: employee_id.to_string(),
            name: name.to_string(),
            shift_class: shift_classes
                .get(employee_id)
                .cloned()
                .unwrap_or_else(|| PLACEHOLDER.to_string()),
            is_driver: drivers.contains(employee_id),
            sick_days: acc.sick_days,
            sick_deduction: acc.sick_deduction,
            personal_days: acc.personal_days,
            personal_deduction: acc.personal_deduction,
            other_leave_types: if acc.other_types.is_empty() {
                PLACEHOLDER.to_string()
            } else {
                acc.other_types.join(", ")
            },
            other_days: acc.other_days,
            total_deduction: acc.sick_deduction.saturating_add(acc.personal_deduction),
        })
        .collect()
}
