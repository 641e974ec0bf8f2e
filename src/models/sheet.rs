//! Raw leave roster models.
//!
//! A [`LeaveSheet`] is the grid handed over by a workbook reader or an API
//! client. It carries no interpretation beyond cell kinds; the sheet parser
//! turns it into leave records.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A single spreadsheet cell.
///
/// Serialized untagged, so JSON `null`, numbers and strings map directly onto
/// the three variants.
///
/// # Example
///
/// ```
/// use leave_engine::models::Cell;
///
/// let cell: Cell = serde_json::from_str("\"事假1\"").unwrap();
/// assert_eq!(cell.text(), Some("事假1"));
///
/// let id: Cell = serde_json::from_str("10234").unwrap();
/// assert_eq!(id.display_value().as_deref(), Some("10234"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Cell {
    /// A blank cell.
    #[default]
    Empty,
    /// A numeric cell.
    Number(f64),
    /// A text cell.
    Text(String),
}

static EMPTY_CELL: Cell = Cell::Empty;

impl Cell {
    /// Returns the text of a text cell holding something other than whitespace.
    ///
    /// Numeric cells are never leave annotations and return `None`.
    pub fn text(&self) -> Option<&str> {
        match self {
            Cell::Text(s) if !s.trim().is_empty() => Some(s),
            _ => None,
        }
    }

    /// Returns the cell rendered as an identifier, or `None` when blank.
    ///
    /// Whole numbers render without a fractional part, so an employee number
    /// stored as `10234.0` becomes `"10234"`.
    pub fn display_value(&self) -> Option<String> {
        match self {
            Cell::Empty => None,
            Cell::Text(s) => {
                let trimmed = s.trim();
                (!trimmed.is_empty()).then(|| trimmed.to_string())
            }
            Cell::Number(n) if n.is_finite() && n.fract() == 0.0 => Some(format!("{:.0}", n)),
            Cell::Number(n) => Some(n.to_string()),
        }
    }

    /// Returns true if the cell holds no identifier or text.
    pub fn is_blank(&self) -> bool {
        self.display_value().is_none()
    }
}

impl From<&str> for Cell {
    fn from(value: &str) -> Self {
        Cell::Text(value.to_string())
    }
}

impl From<String> for Cell {
    fn from(value: String) -> Self {
        Cell::Text(value)
    }
}

impl From<f64> for Cell {
    fn from(value: f64) -> Self {
        Cell::Number(value)
    }
}

/// A leave roster worksheet as a grid of cells.
///
/// Rows may have different lengths; cells beyond the end of a row read as
/// [`Cell::Empty`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LeaveSheet {
    rows: Vec<Vec<Cell>>,
}

impl LeaveSheet {
    /// Creates a sheet from rows of cells.
    pub fn new(rows: Vec<Vec<Cell>>) -> Self {
        Self { rows }
    }

    /// Returns all rows.
    pub fn rows(&self) -> &[Vec<Cell>] {
        &self.rows
    }

    /// Returns the cell at `(row, column)`, or an empty cell when out of range.
    pub fn cell(&self, row: usize, column: usize) -> &Cell {
        self.rows
            .get(row)
            .and_then(|r| r.get(column))
            .unwrap_or(&EMPTY_CELL)
    }

    /// Returns the number of rows.
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Returns the width of the widest row.
    pub fn column_count(&self) -> usize {
        self.rows.iter().map(Vec::len).max().unwrap_or(0)
    }
}

/// The calendar month a leave roster covers, read from its title.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SheetPeriod {
    /// Republic of China calendar year (Gregorian year minus 1911).
    pub roc_year: i32,
    /// Gregorian year.
    pub year: i32,
    /// Month, 1 through 12.
    pub month: u32,
}

/// Offset between the Gregorian and ROC calendars.
pub const ROC_YEAR_OFFSET: i32 = 1911;

impl SheetPeriod {
    /// Creates a period from an ROC year and month.
    ///
    /// Returns `None` when the month is outside 1..=12.
    ///
    /// # Example
    ///
    /// ```
    /// use leave_engine::models::SheetPeriod;
    ///
    /// let period = SheetPeriod::from_roc(114, 11).unwrap();
    /// assert_eq!(period.year, 2025);
    /// ```
    pub fn from_roc(roc_year: i32, month: u32) -> Option<Self> {
        if !(1..=12).contains(&month) {
            return None;
        }
        Some(Self {
            roc_year,
            year: roc_year + ROC_YEAR_OFFSET,
            month,
        })
    }

    /// Returns the date of a day in this month, or `None` if it does not exist.
    pub fn date(&self, day: u32) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year, self.month, day)
    }
}
