//! Per-record leave deduction pricing.
//!
//! Each leave record is priced on its own: the day count is rounded up to the
//! configured unit, then billed at the half-day or full-day rate of its leave
//! type. Leave types without a rate never deduct.

use std::borrow::Cow;

use rust_decimal::Decimal;

use crate::config::DeductionConfig;
use crate::models::{DeductionRecord, ParsedLeaveRecord};

/// Rounds a day count up to the next multiple of `unit`.
///
/// This is a ceiling, not ordinary rounding: with a unit of 0.5, `0.1`
/// becomes `0.5` and `0.6` becomes `1.0`. A day count too large to round
/// without overflowing is returned unchanged.
///
/// # Example
///
/// ```
/// use leave_engine::calculation::round_up_to_unit;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let unit = Decimal::from_str("0.5").unwrap();
/// assert_eq!(round_up_to_unit(Decimal::from_str("0.3").unwrap(), unit), unit);
/// assert_eq!(round_up_to_unit(Decimal::from_str("0.6").unwrap(), unit), Decimal::ONE);
/// ```
pub fn round_up_to_unit(leave_day: Decimal, unit: Decimal) -> Decimal {
    if unit <= Decimal::ZERO {
        return leave_day;
    }
    leave_day
        .checked_div(unit)
        .map(|units| units.ceil())
        .and_then(|units| units.checked_mul(unit))
        .unwrap_or(leave_day)
}

/// Calculates the deduction for one leave record.
///
/// # Arguments
///
/// * `leave_type` - The canonical leave type
/// * `leave_day` - The days of leave on this record
/// * `config` - Rate table, rounding unit and half-day threshold
///
/// # Returns
///
/// The half-day rate when the rounded day count is at or below the half-day
/// threshold, the full-day rate above it, and 0 for leave types outside the
/// rate table or non-positive day counts.
///
/// # Example
///
/// ```
/// use leave_engine::calculation::calculate_deduction;
/// use leave_engine::config::DeductionConfig;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let config = DeductionConfig::default();
/// assert_eq!(calculate_deduction("事假", Decimal::from_str("0.3").unwrap(), &config), 167);
/// assert_eq!(calculate_deduction("事假", Decimal::from_str("0.6").unwrap(), &config), 333);
/// assert_eq!(calculate_deduction("特休", Decimal::ONE, &config), 0);
/// ```
pub fn calculate_deduction(leave_type: &str, leave_day: Decimal, config: &DeductionConfig) -> i64 {
    let Some(rates) = config.rates_for(leave_type) else {
        return 0;
    };
    if leave_day <= Decimal::ZERO {
        return 0;
    }

    let adjusted_day = round_up_to_unit(leave_day, config.rounding_unit);
    if adjusted_day <= config.half_day_threshold {
        rates.half_day
    } else {
        rates.full_day
    }
}

/// Returns the leave type as displayed in reports.
///
/// Sick leave whose source text mentions the physiological keyword is shown
/// with the compound physiological label; everything else is shown as-is.
/// This never changes pricing or aggregation.
pub fn display_leave_type<'a>(
    leave_type: &'a str,
    source_text: &str,
    config: &'a DeductionConfig,
) -> Cow<'a, str> {
    if leave_type == config.sick_leave_type && source_text.contains(&config.physiological_keyword) {
        Cow::Borrowed(config.physiological_label.as_str())
    } else {
        Cow::Borrowed(leave_type)
    }
}

/// Prices a parsed record.
pub fn price_record(record: ParsedLeaveRecord, config: &DeductionConfig) -> DeductionRecord {
    let deduction_amount = calculate_deduction(&record.leave_type, record.leave_day, config);
    let display_leave_type =
        display_leave_type(&record.leave_type, &record.source_text, config).into_owned();

    DeductionRecord {
        record,
        display_leave_type,
        deduction_amount,
    }
}
