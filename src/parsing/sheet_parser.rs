//! Leave roster sheet parsing.
//!
//! Layout of a leave roster:
//!
//! ```text
//! row 0          114年11月 請假明細            <- title: ROC year and month
//! ...
//! header         人事編號 | 姓名 | 1 | 2 | ...  <- marker in the first column
//! header + 1     (sub-header, ignored)
//! header + 2..   A01      | 王小明 | 事假1 | ...
//!                         |        | 傷病0.5      <- continuation row, id/name blank
//! ```
//!
//! Column 0 holds the employee id, column 1 the name and column `c ≥ 2` the
//! leave annotation for day `c - 1` of the month.

use std::sync::LazyLock;

use regex::Regex;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::config::LeaveTypesConfig;
use crate::error::{EngineError, EngineResult};
use crate::models::{LeaveSheet, ParsedLeaveRecord, SheetPeriod, UnparsedLeaveRecord};

use super::date_expansion::expand_leave_days;
use super::tokenizer::{fold_full_width, parse_leave_pairs};

static TITLE_PERIOD: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"([0-9]+)\s*年\s*([0-9]+)\s*月").expect("title pattern is valid")
});

/// Reason recorded for cells that yield no leave pairs.
pub const UNPARSED_REASON: &str = "could not parse leave type or day count";

/// Column holding the employee id.
const ID_COLUMN: usize = 0;
/// Column holding the employee name.
const NAME_COLUMN: usize = 1;
/// First day-of-month column; it holds day 1.
const FIRST_DAY_COLUMN: usize = 2;
/// Rows between the header marker row and the first data row.
const HEADER_HEIGHT: usize = 2;

/// Reads the ROC year and month from a title such as `114年11月`.
///
/// # Example
///
/// ```
/// use leave_engine::parsing::parse_title;
///
/// let period = parse_title("114年11月 請假明細").unwrap();
/// assert_eq!((period.roc_year, period.year, period.month), (114, 2025, 11));
/// assert!(parse_title("請假明細").is_none());
/// ```
pub fn parse_title(title: &str) -> Option<SheetPeriod> {
    let folded = fold_full_width(title);
    let caps = TITLE_PERIOD.captures(&folded)?;
    let roc_year = caps.get(1)?.as_str().parse().ok()?;
    let month = caps.get(2)?.as_str().parse().ok()?;
    SheetPeriod::from_roc(roc_year, month)
}

/// The outcome of parsing a leave roster.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedSheet {
    /// The month the roster covers.
    pub period: SheetPeriod,
    /// One record per leave day, sorted by employee id, date label and leave type.
    pub parsed: Vec<ParsedLeaveRecord>,
    /// Cells that need manual review, in sheet order.
    pub unparsed: Vec<UnparsedLeaveRecord>,
}

/// Parses leave roster sheets into per-day leave records.
#[derive(Debug, Clone)]
pub struct LeaveSheetParser<'a> {
    leave_types: &'a LeaveTypesConfig,
}

impl<'a> LeaveSheetParser<'a> {
    /// Creates a parser using the given header marker and synonym table.
    pub fn new(leave_types: &'a LeaveTypesConfig) -> Self {
        Self { leave_types }
    }

    /// Parses a sheet.
    ///
    /// # Returns
    ///
    /// The sheet period with parsed and unparsed records, or an error if:
    /// - The title does not carry a year and month (`InvalidTitle`)
    /// - No row starts with the header marker (`HeaderNotFound`)
    ///
    /// Unreadable cells never fail the parse; they become [`UnparsedLeaveRecord`]s.
    /// So does a whole cell when any of its pairs carries more days than the
    /// configured `max_day_count`.
    pub fn parse(&self, sheet: &LeaveSheet) -> EngineResult<ParsedSheet> {
        let period = self.read_period(sheet)?;
        let header_row = self.find_header_row(sheet)?;
        let column_count = sheet.column_count();

        let mut parsed = Vec::new();
        let mut unparsed = Vec::new();
        let mut employee_id = String::new();
        let mut employee_name = String::new();

        for row in (header_row + HEADER_HEIGHT)..sheet.row_count() {
            if let Some(id) = sheet.cell(row, ID_COLUMN).display_value() {
                employee_id = id;
            }
            if let Some(name) = sheet.cell(row, NAME_COLUMN).display_value() {
                employee_name = name;
            }

            for column in FIRST_DAY_COLUMN..column_count {
                let Some(text) = sheet.cell(row, column).text() else {
                    continue;
                };
                let day = (column - FIRST_DAY_COLUMN + 1) as u32;

                let Some(date) = period.date(day) else {
                    warn!(employee_id = %employee_id, day, text, "Leave entered on a day outside the month");
                    unparsed.push(UnparsedLeaveRecord::new(
                        &employee_id,
                        &employee_name,
                        period,
                        day,
                        text,
                        format!(
                            "day {} does not exist in {}-{:02}",
                            day, period.year, period.month
                        ),
                    ));
                    continue;
                };

                let pairs = parse_leave_pairs(text, self.leave_types);
                if pairs.is_empty() {
                    debug!(employee_id = %employee_id, day, text, "Cell has no leave pairs");
                    unparsed.push(UnparsedLeaveRecord::new(
                        &employee_id,
                        &employee_name,
                        period,
                        day,
                        text,
                        UNPARSED_REASON,
                    ));
                    continue;
                }

                let max_day_count = Decimal::from(self.leave_types.max_day_count);
                if let Some(oversized) = pairs.iter().find(|p| p.day_count > max_day_count) {
                    warn!(
                        employee_id = %employee_id,
                        day,
                        text,
                        day_count = %oversized.day_count,
                        "Leave day count above the limit"
                    );
                    unparsed.push(UnparsedLeaveRecord::new(
                        &employee_id,
                        &employee_name,
                        period,
                        day,
                        text,
                        format!(
                            "day count {} exceeds the limit of {} days",
                            oversized.day_count, self.leave_types.max_day_count
                        ),
                    ));
                    continue;
                }

                for pair in pairs {
                    match pair.whole_days() {
                        Some(days) => {
                            let dates = expand_leave_days(date, days, &pair.rest_days);
                            parsed.extend(dates.into_iter().map(|d| {
                                ParsedLeaveRecord::new(
                                    &employee_id,
                                    &employee_name,
                                    d,
                                    &pair.leave_type,
                                    Decimal::ONE,
                                    text,
                                )
                            }));
                        }
                        None => parsed.push(ParsedLeaveRecord::new(
                            &employee_id,
                            &employee_name,
                            date,
                            &pair.leave_type,
                            pair.day_count,
                            text,
                        )),
                    }
                }
            }
        }

        parsed.sort_by(|a, b| {
            (&a.employee_id, &a.date_label, &a.leave_type).cmp(&(
                &b.employee_id,
                &b.date_label,
                &b.leave_type,
            ))
        });

        info!(
            roc_year = period.roc_year,
            month = period.month,
            parsed = parsed.len(),
            unparsed = unparsed.len(),
            "Parsed leave roster"
        );
        if !unparsed.is_empty() {
            warn!(count = unparsed.len(), "Some leave cells need manual review");
        }

        Ok(ParsedSheet {
            period,
            parsed,
            unparsed,
        })
    }

    /// Reads the period from the first non-blank cell of the first row.
    fn read_period(&self, sheet: &LeaveSheet) -> EngineResult<SheetPeriod> {
        let title = sheet
            .rows()
            .first()
            .and_then(|row| row.iter().find_map(|cell| cell.display_value()))
            .unwrap_or_default();

        parse_title(&title).ok_or(EngineError::InvalidTitle { title })
    }

    fn find_header_row(&self, sheet: &LeaveSheet) -> EngineResult<usize> {
        let marker = self.leave_types.header_marker.as_str();
        (0..sheet.row_count())
            .find(|&row| sheet.cell(row, ID_COLUMN).display_value().as_deref() == Some(marker))
            .ok_or_else(|| EngineError::HeaderNotFound {
                marker: marker.to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Cell;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    /// Builds a November 2025 (ROC 114) roster with 30 day columns.
    fn roster(rows: Vec<(&str, &str, Vec<(u32, &str)>)>) -> LeaveSheet {
        let mut header = vec![Cell::from("人事編號"), Cell::from("姓名")];
        header.extend((1..=30u32).map(|d| Cell::Number(f64::from(d))));
        let mut grid = vec![
            vec![Cell::from("114年11月 請假明細")],
            header,
            vec![Cell::Empty, Cell::Empty, Cell::from("六")],
        ];
        for (id, name, entries) in rows {
            let mut row = vec![Cell::from(id), Cell::from(name)];
            row.resize(32, Cell::Empty);
            for (day, text) in entries {
                row[day as usize + 1] = Cell::from(text);
            }
            grid.push(row);
        }
        LeaveSheet::new(grid)
    }

    fn parse(sheet: &LeaveSheet) -> EngineResult<ParsedSheet> {
        let config = LeaveTypesConfig::default();
        LeaveSheetParser::new(&config).parse(sheet)
    }

    #[test]
    fn test_title_variants() {
        assert_eq!(parse_title("114年11月").unwrap().year, 2025);
        assert_eq!(parse_title("114 年 1 月").unwrap().month, 1);
        assert_eq!(parse_title("１１４年１２月").unwrap().month, 12);
        assert!(parse_title("114年13月").is_none());
        assert!(parse_title("").is_none());
    }

    #[test]
    fn test_whole_day_leave_expands_into_daily_records() {
        // 2025-11-03 is a Monday
        let sheet = roster(vec![("A01", "王小明", vec![(3, "事假2")])]);
        let result = parse(&sheet).unwrap();

        assert_eq!(result.period.year, 2025);
        assert_eq!(result.parsed.len(), 2);
        assert_eq!(result.parsed[0].date_label, "11/03");
        assert_eq!(result.parsed[1].date_label, "11/04");
        assert!(result.parsed.iter().all(|r| r.leave_day == Decimal::ONE));
        assert!(result.parsed.iter().all(|r| r.source_text == "事假2"));
        assert!(result.unparsed.is_empty());
    }

    #[test]
    fn test_rest_day_markers_skip_weekdays() {
        // 2025-11-04 Tuesday; skip Wednesday and Sunday
        let sheet = roster(vec![("A01", "王小明", vec![(4, "傷病(休三例日)3")])]);
        let result = parse(&sheet).unwrap();

        let labels: Vec<_> = result.parsed.iter().map(|r| r.date_label.as_str()).collect();
        assert_eq!(labels, vec!["11/04", "11/06", "11/07"]);
        assert!(result.parsed.iter().all(|r| r.leave_type == "傷病"));
    }

    #[test]
    fn test_fractional_leave_is_not_expanded() {
        let sheet = roster(vec![("A01", "王小明", vec![(10, "扣事0.5"), (11, "特休1.5")])]);
        let result = parse(&sheet).unwrap();

        assert_eq!(result.parsed.len(), 2);
        assert_eq!(result.parsed[0].leave_type, "事假");
        assert_eq!(result.parsed[0].leave_day, dec("0.5"));
        assert_eq!(result.parsed[0].date_label, "11/10");
        assert_eq!(result.parsed[1].leave_day, dec("1.5"));
        assert_eq!(result.parsed[1].date_label, "11/11");
    }

    #[test]
    fn test_unparseable_cell_becomes_one_unparsed_record() {
        let sheet = roster(vec![("A01", "王小明", vec![(5, "請假"), (6, "事假1")])]);
        let result = parse(&sheet).unwrap();

        assert_eq!(result.unparsed.len(), 1);
        let unparsed = &result.unparsed[0];
        assert_eq!(unparsed.employee_id, "A01");
        assert_eq!(unparsed.day, 5);
        assert_eq!(unparsed.date_label, "11/05");
        assert_eq!(unparsed.raw_text, "請假");
        assert_eq!(unparsed.reason, UNPARSED_REASON);
        assert_eq!(result.parsed.len(), 1);
    }

    #[test]
    fn test_continuation_rows_inherit_employee() {
        let sheet = roster(vec![
            ("A01", "王小明", vec![(3, "事假1")]),
            ("", "", vec![(3, "傷病0.5")]),
            ("B02", "李小華", vec![(7, "扣病1")]),
            (" ", "", vec![(8, "事假1")]),
        ]);
        let result = parse(&sheet).unwrap();

        let a01: Vec<_> = result.parsed.iter().filter(|r| r.employee_id == "A01").collect();
        assert_eq!(a01.len(), 2);
        assert!(a01.iter().all(|r| r.employee_name == "王小明"));

        let b02: Vec<_> = result.parsed.iter().filter(|r| r.employee_id == "B02").collect();
        assert_eq!(b02.len(), 2);
        assert!(b02.iter().all(|r| r.employee_name == "李小華"));
    }

    #[test]
    fn test_numeric_employee_ids_are_rendered_as_integers() {
        let mut sheet = roster(vec![("", "王小明", vec![(3, "事假1")])]);
        let mut rows = sheet.rows().to_vec();
        rows[3][0] = Cell::Number(10234.0);
        sheet = LeaveSheet::new(rows);

        let result = parse(&sheet).unwrap();
        assert_eq!(result.parsed[0].employee_id, "10234");
    }

    #[test]
    fn test_output_sorted_by_employee_date_and_type() {
        let sheet = roster(vec![
            ("B02", "李小華", vec![(2, "事假1")]),
            ("A01", "王小明", vec![(9, "事假1"), (1, "特休1傷病1")]),
        ]);
        let result = parse(&sheet).unwrap();

        let keys: Vec<_> = result
            .parsed
            .iter()
            .map(|r| (r.employee_id.as_str(), r.date_label.as_str(), r.leave_type.as_str()))
            .collect();
        assert_eq!(
            keys,
            vec![
                ("A01", "11/01", "傷病"),
                ("A01", "11/01", "特休"),
                ("A01", "11/09", "事假"),
                ("B02", "11/02", "事假"),
            ]
        );
    }

    #[test]
    fn test_leave_running_past_month_end_keeps_real_dates() {
        let sheet = roster(vec![("A01", "王小明", vec![(30, "事假2")])]);
        let result = parse(&sheet).unwrap();

        assert_eq!(result.parsed.len(), 2);
        let dec_1 = result.parsed.iter().find(|r| r.month == 12).unwrap();
        assert_eq!(dec_1.day, 1);
        assert_eq!(dec_1.date_label, "12/01");
    }

    #[test]
    fn test_day_column_beyond_month_is_reported() {
        let mut rows = roster(vec![("A01", "王小明", vec![])]).rows().to_vec();
        rows[3].push(Cell::from("事假1"));
        let result = parse(&LeaveSheet::new(rows)).unwrap();

        assert!(result.parsed.is_empty());
        assert_eq!(result.unparsed.len(), 1);
        assert_eq!(result.unparsed[0].day, 31);
        assert!(result.unparsed[0].reason.contains("does not exist"));
    }

    #[test]
    fn test_missing_title_is_a_format_error() {
        let mut rows = roster(vec![]).rows().to_vec();
        rows[0] = vec![Cell::from("請假明細")];

        match parse(&LeaveSheet::new(rows)) {
            Err(err @ EngineError::InvalidTitle { .. }) => assert!(err.is_format_error()),
            other => panic!("Expected InvalidTitle, got {:?}", other),
        }
    }

    #[test]
    fn test_missing_header_marker_is_a_format_error() {
        let sheet = LeaveSheet::new(vec![
            vec![Cell::from("114年11月")],
            vec![Cell::from("編號"), Cell::from("姓名")],
        ]);

        match parse(&sheet) {
            Err(EngineError::HeaderNotFound { marker }) => assert_eq!(marker, "人事編號"),
            other => panic!("Expected HeaderNotFound, got {:?}", other),
        }
    }

    #[test]
    fn test_empty_sheet_reports_invalid_title() {
        assert!(matches!(
            parse(&LeaveSheet::default()),
            Err(EngineError::InvalidTitle { .. })
        ));
    }

    #[test]
    fn test_numeric_and_blank_cells_are_ignored() {
        let mut rows = roster(vec![("A01", "王小明", vec![(4, "   ")])]).rows().to_vec();
        rows[3][6] = Cell::Number(8.0);
        let result = parse(&LeaveSheet::new(rows)).unwrap();

        assert!(result.parsed.is_empty());
        assert!(result.unparsed.is_empty());
    }

    #[test]
    fn test_reparsing_is_deterministic() {
        let sheet = roster(vec![
            ("A01", "王小明", vec![(3, "事假1傷病(休三)2"), (20, "扣事0.3")]),
            ("B02", "李小華", vec![(1, "無")]),
        ]);
        let first = serde_json::to_string(&parse(&sheet).unwrap()).unwrap();
        let second = serde_json::to_string(&parse(&sheet).unwrap()).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_oversized_day_counts_are_sent_to_review() {
        let sheet = roster(vec![(
            "A01",
            "王小明",
            vec![
                (3, "特休100000000"),
                (4, "特休5000000000"),
                (5, "事假79228162514264337593543950335"),
                (6, "事假1特休367"),
            ],
        )]);
        let result = parse(&sheet).unwrap();

        assert!(result.parsed.is_empty());
        assert_eq!(result.unparsed.len(), 4);
        assert_eq!(
            result.unparsed[0].reason,
            "day count 100000000 exceeds the limit of 366 days"
        );
        assert!(result.unparsed.iter().all(|r| r.reason.contains("exceeds the limit")));
    }

    #[test]
    fn test_day_count_at_the_limit_is_expanded() {
        let sheet = roster(vec![("A01", "王小明", vec![(1, "特休366")])]);
        let result = parse(&sheet).unwrap();

        assert_eq!(result.parsed.len(), 366);
        assert!(result.parsed.iter().all(|r| r.leave_day == Decimal::ONE));
        assert!(result.unparsed.is_empty());
    }
}
