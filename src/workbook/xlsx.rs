//! Reading leave rosters from Excel workbooks.

use std::path::Path;

use calamine::{Data, Reader, open_workbook_auto};
use tracing::{debug, info};

use crate::error::{EngineError, EngineResult};
use crate::models::{Cell, LeaveSheet};

/// Converts a calamine cell into a [`Cell`].
pub(crate) fn cell_from_data(data: &Data) -> Cell {
    match data {
        Data::Empty | Data::Error(_) => Cell::Empty,
        Data::String(s) => Cell::Text(s.clone()),
        Data::Float(f) => Cell::Number(*f),
        Data::Int(i) => Cell::Number(*i as f64),
        Data::Bool(b) => Cell::Text(b.to_string()),
        Data::DateTime(dt) => Cell::Text(dt.to_string()),
        Data::DateTimeIso(s) | Data::DurationIso(s) => Cell::Text(s.clone()),
    }
}

/// Reads the first worksheet of an `.xlsx` or `.xls` workbook.
///
/// calamine only returns the used range; it is padded back so row and column
/// indices match the worksheet's own.
///
/// # Returns
///
/// The sheet grid, or `WorkbookError` if the file cannot be opened or has no
/// worksheet.
pub fn read_leave_sheet<P: AsRef<Path>>(path: P) -> EngineResult<LeaveSheet> {
    let path = path.as_ref();
    let workbook_error = |message: String| EngineError::WorkbookError {
        path: path.display().to_string(),
        message,
    };

    let mut workbook = open_workbook_auto(path).map_err(|e| workbook_error(e.to_string()))?;
    let sheet_name = workbook
        .sheet_names()
        .first()
        .cloned()
        .ok_or_else(|| workbook_error("workbook has no worksheet".to_string()))?;
    let range = workbook
        .worksheet_range(&sheet_name)
        .map_err(|e| workbook_error(e.to_string()))?;

    let (start_row, start_column) = range
        .start()
        .map(|(r, c)| (r as usize, c as usize))
        .unwrap_or((0, 0));
    debug!(sheet = %sheet_name, start_row, start_column, "Reading worksheet");

    let mut rows: Vec<Vec<Cell>> = vec![Vec::new(); start_row];
    rows.extend(range.rows().map(|row| {
        let mut cells = vec![Cell::Empty; start_column];
        cells.extend(row.iter().map(cell_from_data));
        cells
    }));

    info!(
        path = %path.display(),
        sheet = %sheet_name,
        rows = rows.len(),
        "Loaded leave workbook"
    );

    Ok(LeaveSheet::new(rows))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cell_conversion() {
        assert_eq!(cell_from_data(&Data::Empty), Cell::Empty);
        assert_eq!(
            cell_from_data(&Data::String("事假1".to_string())),
            Cell::Text("事假1".to_string())
        );
        assert_eq!(cell_from_data(&Data::Float(2.5)), Cell::Number(2.5));
        assert_eq!(cell_from_data(&Data::Int(10234)), Cell::Number(10234.0));
        assert_eq!(cell_from_data(&Data::Bool(true)), Cell::Text("true".to_string()));
    }

    #[test]
    fn test_missing_workbook_returns_workbook_error() {
        match read_leave_sheet("/nonexistent/114年11月.xlsx") {
            Err(EngineError::WorkbookError { path, .. }) => {
                assert!(path.contains("114年11月.xlsx"));
            }
            other => panic!("Expected WorkbookError, got {:?}", other),
        }
    }
}
