//! Leave span expansion across calendar days.

use chrono::NaiveDate;
use tracing::warn;

use crate::models::RestDays;

/// Maximum calendar days walked per requested leave day.
pub const EXPANSION_STEP_FACTOR: u32 = 3;

/// Expands a whole-day leave into the calendar dates it consumes.
///
/// Walks forward from `start` (inclusive) one day at a time and keeps every
/// date whose weekday is not in `rest_days`, until `day_count` dates are
/// collected. The walk stops after `3 × day_count` calendar days even if the
/// target was not reached, so an exclusion set covering every weekday returns
/// a short (possibly empty) list instead of looping.
///
/// # Example
///
/// ```
/// use leave_engine::models::RestDays;
/// use leave_engine::parsing::expand_leave_days;
/// use chrono::NaiveDate;
///
/// // 2025-11-04 is a Tuesday; Wednesday (2) and Sunday (6) are rest days
/// let start = NaiveDate::from_ymd_opt(2025, 11, 4).unwrap();
/// let rest_days: RestDays = [2, 6].into_iter().collect();
///
/// let dates = expand_leave_days(start, 2, &rest_days);
/// assert_eq!(dates, vec![
///     NaiveDate::from_ymd_opt(2025, 11, 4).unwrap(),
///     NaiveDate::from_ymd_opt(2025, 11, 6).unwrap(),
/// ]);
/// ```
pub fn expand_leave_days(start: NaiveDate, day_count: u32, rest_days: &RestDays) -> Vec<NaiveDate> {
    let max_steps = day_count.saturating_mul(EXPANSION_STEP_FACTOR);
    let mut dates = Vec::new();
    let mut current = Some(start);
    let mut steps = 0;

    while let Some(date) = current {
        if dates.len() >= day_count as usize || steps >= max_steps {
            break;
        }
        if !rest_days.excludes(date) {
            dates.push(date);
        }
        current = date.succ_opt();
        steps += 1;
    }

    if dates.len() < day_count as usize {
        warn!(
            start = %start,
            day_count,
            collected = dates.len(),
            rest_days = ?rest_days.iter().collect::<Vec<_>>(),
            "Leave expansion stopped at the step limit"
        );
    }

    dates
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Duration};
    use proptest::prelude::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn rest(days: &[u8]) -> RestDays {
        days.iter().copied().collect()
    }

    #[test]
    fn test_no_rest_days_gives_consecutive_days() {
        // 2025-11-28 Friday, spills into December
        let dates = expand_leave_days(date(2025, 11, 28), 4, &RestDays::new());
        assert_eq!(
            dates,
            vec![
                date(2025, 11, 28),
                date(2025, 11, 29),
                date(2025, 11, 30),
                date(2025, 12, 1)
            ]
        );
    }

    #[test]
    fn test_monday_start_with_wednesday_and_sunday_off() {
        // 2025-11-03 is a Monday
        let dates = expand_leave_days(date(2025, 11, 3), 2, &rest(&[2, 6]));
        assert_eq!(dates, vec![date(2025, 11, 3), date(2025, 11, 4)]);
    }

    #[test]
    fn test_skips_excluded_days_until_count_reached() {
        let dates = expand_leave_days(date(2025, 11, 3), 5, &rest(&[2, 6]));
        assert_eq!(
            dates,
            vec![
                date(2025, 11, 3),
                date(2025, 11, 4),
                date(2025, 11, 6),
                date(2025, 11, 7),
                date(2025, 11, 8),
            ]
        );
    }

    #[test]
    fn test_excluded_start_date_is_skipped() {
        // 2025-11-05 is a Wednesday
        let dates = expand_leave_days(date(2025, 11, 5), 1, &rest(&[2]));
        assert_eq!(dates, vec![date(2025, 11, 6)]);
    }

    #[test]
    fn test_all_weekdays_excluded_returns_empty() {
        let dates = expand_leave_days(date(2025, 11, 3), 3, &rest(&[0, 1, 2, 3, 4, 5, 6]));
        assert!(dates.is_empty());
    }

    #[test]
    fn test_step_limit_returns_short_result() {
        // Only Mondays allowed: 2 Mondays need 8 steps but the limit is 6
        let dates = expand_leave_days(date(2025, 11, 3), 2, &rest(&[1, 2, 3, 4, 5, 6]));
        assert_eq!(dates, vec![date(2025, 11, 3)]);
    }

    #[test]
    fn test_zero_days_returns_empty() {
        assert!(expand_leave_days(date(2025, 11, 3), 0, &RestDays::new()).is_empty());
    }

    proptest! {
        #[test]
        fn prop_expansion_respects_count_order_and_exclusions(
            offset in 0i64..3650,
            day_count in 0u32..40,
            excluded in proptest::collection::btree_set(0u8..7, 0..7),
        ) {
            let start = date(2020, 1, 1) + Duration::days(offset);
            let rest_days: RestDays = excluded.iter().copied().collect();
            let dates = expand_leave_days(start, day_count, &rest_days);

            prop_assert!(dates.len() <= day_count as usize);
            prop_assert!(dates.windows(2).all(|w| w[0] < w[1]));
            prop_assert!(dates.iter().all(|d| !rest_days.excludes(*d)));
            prop_assert!(dates.iter().all(|d| *d >= start));
            if let Some(last) = dates.last() {
                prop_assert!((*last - start).num_days() < i64::from(day_count * EXPANSION_STEP_FACTOR));
            }
            if excluded.is_empty() {
                prop_assert_eq!(dates.len(), day_count as usize);
                prop_assert!(dates.iter().enumerate().all(|(i, d)| d.num_days_from_ce() - start.num_days_from_ce() == i as i32));
            }
        }
    }
}
