//! Rest-day marker extraction.
//!
//! Roster clerks annotate a leave label with the weekdays the employee was
//! already off, e.g. `傷病(休三例日)2`: `休三` (rest on Wednesday) and `例日`
//! (scheduled day off on Sunday). Those weekdays are skipped when the leave is
//! spread across calendar days.

use crate::models::RestDays;

/// Chinese weekday characters and their indices, 0 = Monday .. 6 = Sunday.
const WEEKDAY_CHARS: [(char, u8); 7] = [
    ('一', 0),
    ('二', 1),
    ('三', 2),
    ('四', 3),
    ('五', 4),
    ('六', 5),
    ('日', 6),
];

/// Prefixes marking a weekday as a rest day (`休`) or scheduled day off (`例`).
const REST_PREFIXES: [char; 2] = ['休', '例'];

/// Generic scheduled-holiday marker, which always excludes Sunday.
pub const SCHEDULED_HOLIDAY_MARKER: &str = "例假";

/// The weekday excluded by [`SCHEDULED_HOLIDAY_MARKER`].
const SUNDAY: u8 = 6;

/// Extracts the weekdays to skip from a leave label.
///
/// Every `休X` or `例X` where `X` is a weekday character adds that weekday.
/// The generic `例假` marker adds Sunday. A label without markers yields an
/// empty set; this never fails.
///
/// # Example
///
/// ```
/// use leave_engine::parsing::parse_rest_days;
///
/// let rest_days = parse_rest_days("傷病(休三例日)");
/// assert_eq!(rest_days.iter().collect::<Vec<_>>(), vec![2, 6]);
///
/// assert!(parse_rest_days("事假").is_empty());
/// ```
pub fn parse_rest_days(label: &str) -> RestDays {
    let mut rest_days = RestDays::new();

    for (weekday_char, index) in WEEKDAY_CHARS {
        let marked = REST_PREFIXES.iter().any(|prefix| {
            let marker: String = [*prefix, weekday_char].iter().collect();
            label.contains(&marker)
        });
        if marked {
            rest_days.insert(index);
        }
    }

    // TODO: confirm with payroll whether 例假 should follow the employee's
    // actual scheduled day off instead of always meaning Sunday.
    if label.contains(SCHEDULED_HOLIDAY_MARKER) {
        rest_days.insert(SUNDAY);
    }

    rest_days
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn indices(label: &str) -> Vec<u8> {
        parse_rest_days(label).iter().collect()
    }

    #[test]
    fn test_explicit_rest_and_scheduled_markers() {
        assert_eq!(indices("傷病(休三例日)"), vec![2, 6]);
    }

    #[test]
    fn test_scheduled_holiday_marker_adds_sunday() {
        assert_eq!(indices("事假(例假)"), vec![6]);
    }

    #[test]
    fn test_scheduled_holiday_with_explicit_sunday_collapses() {
        assert_eq!(indices("事假(例日例假)"), vec![6]);
    }

    #[test]
    fn test_scheduled_holiday_keeps_other_markers() {
        assert_eq!(indices("特休(休六例假)"), vec![5, 6]);
    }

    #[test]
    fn test_every_weekday_character() {
        assert_eq!(indices("休一休二休三休四休五休六休日"), vec![0, 1, 2, 3, 4, 5, 6]);
        assert_eq!(indices("例一例五"), vec![0, 4]);
    }

    #[test]
    fn test_weekday_without_prefix_is_ignored() {
        assert!(parse_rest_days("週三請假").is_empty());
        assert!(parse_rest_days("").is_empty());
    }

    proptest! {
        #[test]
        fn prop_indices_always_in_weekday_range(label in "\\PC{0,20}") {
            let rest_days = parse_rest_days(&label);
            prop_assert!(rest_days.iter().all(|d| d <= 6));
            prop_assert!(rest_days.len() <= 7);
        }

        #[test]
        fn prop_scheduled_holiday_always_excludes_sunday(prefix in "\\PC{0,8}", suffix in "\\PC{0,8}") {
            let label = format!("{}例假{}", prefix, suffix);
            prop_assert!(parse_rest_days(&label).contains(6));
        }
    }
}
