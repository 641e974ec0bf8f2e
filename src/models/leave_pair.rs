//! Tokenized leave pairs.

use std::collections::BTreeSet;

use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Weekdays (0 = Monday .. 6 = Sunday) skipped when expanding a leave span.
///
/// # Example
///
/// ```
/// use leave_engine::models::RestDays;
/// use chrono::NaiveDate;
///
/// let rest_days: RestDays = [2, 6].into_iter().collect();
/// // 2025-11-05 is a Wednesday
/// assert!(rest_days.excludes(NaiveDate::from_ymd_opt(2025, 11, 5).unwrap()));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RestDays(BTreeSet<u8>);

impl RestDays {
    /// Creates an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a weekday index; indices above 6 are ignored.
    ///
    /// Returns true if the index was newly added.
    pub fn insert(&mut self, weekday: u8) -> bool {
        weekday <= 6 && self.0.insert(weekday)
    }

    /// Returns true if the weekday index is in the set.
    pub fn contains(&self, weekday: u8) -> bool {
        self.0.contains(&weekday)
    }

    /// Returns true if the date falls on an excluded weekday.
    pub fn excludes(&self, date: NaiveDate) -> bool {
        self.contains(weekday_index(date))
    }

    /// Returns true if no weekday is excluded.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns the number of excluded weekdays.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Iterates the excluded weekday indices in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = u8> + '_ {
        self.0.iter().copied()
    }
}

impl FromIterator<u8> for RestDays {
    fn from_iter<I: IntoIterator<Item = u8>>(iter: I) -> Self {
        let mut rest_days = RestDays::new();
        for weekday in iter {
            rest_days.insert(weekday);
        }
        rest_days
    }
}

/// Returns the weekday index of a date, 0 = Monday .. 6 = Sunday.
pub fn weekday_index(date: NaiveDate) -> u8 {
    date.weekday().num_days_from_monday() as u8
}

/// One (leave type, day count) pair found in a roster cell.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeavePair {
    /// Canonical leave type after synonym normalization.
    pub leave_type: String,
    /// Number of days; always positive.
    pub day_count: Decimal,
    /// Weekdays to skip when expanding this leave across calendar days.
    pub rest_days: RestDays,
}

impl LeavePair {
    /// Returns the day count as a whole number of days when it is an integer of at least 1.
    ///
    /// Fractional counts (half days, hourly leave) return `None` and are reported unexpanded.
    /// So do counts beyond `u32::MAX`; the sheet parser rejects those long before this.
    pub fn whole_days(&self) -> Option<u32> {
        use rust_decimal::prelude::ToPrimitive;

        if self.day_count >= Decimal::ONE && self.day_count.fract().is_zero() {
            self.day_count.to_u32()
        } else {
            None
        }
    }
}
