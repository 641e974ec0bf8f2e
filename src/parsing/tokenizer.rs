//! Leave cell tokenization.
//!
//! A roster cell packs one or more `label + number` runs, e.g. `事假1傷病0.5`
//! or `8:30~12:30扣病0.5`. Shift-time annotations are removed first so their
//! digits are not read as day counts.

use std::borrow::Cow;
use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;
use rust_decimal::Decimal;
use tracing::debug;

use crate::config::LeaveTypesConfig;
use crate::models::LeavePair;

use super::rest_days::parse_rest_days;

static TIME_RANGE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[0-9]{1,2}:[0-9]{2}\s*[~～]\s*[0-9]{1,2}:[0-9]{2}")
        .expect("time range pattern is valid")
});

static LEAVE_PAIR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"([^0-9,]+)([0-9]+(?:\.[0-9]+)?)").expect("leave pair pattern is valid")
});

static ANNOTATION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\([^)]*\)|（[^）]*）").expect("annotation pattern is valid"));

/// Separators trimmed from both ends of a label along with whitespace.
const LABEL_SEPARATORS: [char; 5] = ['、', '，', '；', ';', '/'];

/// Folds full-width digits and punctuation used in numbers and times to ASCII.
pub(crate) fn fold_full_width(text: &str) -> Cow<'_, str> {
    let needs_folding = text
        .chars()
        .any(|c| matches!(c, '０'..='９' | '．' | '：'));
    if !needs_folding {
        return Cow::Borrowed(text);
    }

    Cow::Owned(
        text.chars()
            .map(|c| match c {
                '０'..='９' => char::from(b'0' + (c as u32 - '０' as u32) as u8),
                '．' => '.',
                '：' => ':',
                other => other,
            })
            .collect(),
    )
}

/// Removes embedded `H:MM~H:MM` shift-time ranges.
pub fn strip_time_ranges(text: &str) -> Cow<'_, str> {
    TIME_RANGE.replace_all(text, "")
}

/// Turns a raw label into its leave type candidate: annotations removed, edges trimmed.
fn clean_label(raw_label: &str) -> String {
    ANNOTATION
        .replace_all(raw_label, "")
        .trim_matches(|c: char| c.is_whitespace() || LABEL_SEPARATORS.contains(&c))
        .to_string()
}

/// Extracts the leave pairs from one roster cell, left to right.
///
/// Pairs with a day count of zero, an unreadable number, or an empty label are
/// discarded. Rest-day markers are read from the raw label before its
/// parenthesized annotation is removed; the cleaned label is then mapped
/// through the synonym table. A cell with no pairs returns an empty list.
///
/// # Example
///
/// ```
/// use leave_engine::config::LeaveTypesConfig;
/// use leave_engine::parsing::parse_leave_pairs;
/// use rust_decimal::Decimal;
///
/// let pairs = parse_leave_pairs("扣事1傷病(休三例日)2", &LeaveTypesConfig::default());
///
/// assert_eq!(pairs.len(), 2);
/// assert_eq!(pairs[0].leave_type, "事假");
/// assert_eq!(pairs[1].leave_type, "傷病");
/// assert_eq!(pairs[1].day_count, Decimal::from(2));
/// assert_eq!(pairs[1].rest_days.iter().collect::<Vec<_>>(), vec![2, 6]);
/// ```
pub fn parse_leave_pairs(text: &str, leave_types: &LeaveTypesConfig) -> Vec<LeavePair> {
    let folded = fold_full_width(text);
    let stripped = strip_time_ranges(&folded);

    LEAVE_PAIR
        .captures_iter(&stripped)
        .filter_map(|caps| {
            let raw_label = caps.get(1)?.as_str();
            let raw_day = caps.get(2)?.as_str();

            let day_count = match Decimal::from_str(raw_day) {
                Ok(d) if d > Decimal::ZERO => d,
                Ok(_) => return None,
                Err(e) => {
                    debug!(raw_day, error = %e, "Discarding unreadable day count");
                    return None;
                }
            };

            let label = clean_label(raw_label);
            if label.is_empty() {
                return None;
            }

            Some(LeavePair {
                leave_type: leave_types.normalize(&label).to_string(),
                day_count,
                rest_days: parse_rest_days(raw_label),
            })
        })
        .collect()
}
