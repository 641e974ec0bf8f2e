//! CSV export of a processed roster.
//!
//! Files are UTF-8 with a byte-order mark so spreadsheet tools open the
//! Chinese text correctly.

use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use rust_decimal::Decimal;
use serde::Serialize;
use tracing::info;

use crate::calculation::DeductionReport;
use crate::error::{EngineError, EngineResult};
use crate::models::{DeductionRecord, UnparsedLeaveRecord};

/// Per-day leave records with deductions.
pub const LEAVE_BASIC_FILE: &str = "leave_basic.csv";
/// Cells that need manual review.
pub const LEAVE_UNPARSED_FILE: &str = "leave_unparsed.csv";
/// Per-employee monthly summaries.
pub const MONTHLY_SUMMARY_FILE: &str = "monthly_summary.csv";

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Where each exported file was written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportedFiles {
    /// The per-day records file.
    pub leave_basic: PathBuf,
    /// The unparsed cells file, written only when there are any.
    pub leave_unparsed: Option<PathBuf>,
    /// The monthly summary file.
    pub monthly_summary: PathBuf,
}

#[derive(Debug, Serialize)]
struct LeaveBasicRow<'a> {
    employee_id: &'a str,
    employee_name: &'a str,
    roc_year: i32,
    year: i32,
    month: u32,
    day: u32,
    date_label: &'a str,
    weekday: u8,
    weekday_label: &'a str,
    leave_type: &'a str,
    display_leave_type: &'a str,
    leave_day: Decimal,
    deduction_amount: i64,
    source_text: &'a str,
}

impl<'a> From<&'a DeductionRecord> for LeaveBasicRow<'a> {
    fn from(priced: &'a DeductionRecord) -> Self {
        let r = &priced.record;
        Self {
            employee_id: &r.employee_id,
            employee_name: &r.employee_name,
            roc_year: r.roc_year,
            year: r.year,
            month: r.month,
            day: r.day,
            date_label: &r.date_label,
            weekday: r.weekday,
            weekday_label: &r.weekday_label,
            leave_type: &r.leave_type,
            display_leave_type: &priced.display_leave_type,
            leave_day: r.leave_day,
            deduction_amount: priced.deduction_amount,
            source_text: &r.source_text,
        }
    }
}

/// Writes serializable rows as a BOM-prefixed CSV file.
pub fn write_csv<T, I, P>(path: P, rows: I) -> EngineResult<()>
where
    T: Serialize,
    I: IntoIterator<Item = T>,
    P: AsRef<Path>,
{
    let path = path.as_ref();
    let export_error = |message: String| EngineError::ExportError {
        path: path.display().to_string(),
        message,
    };

    let mut file = File::create(path).map_err(|e| export_error(e.to_string()))?;
    file.write_all(UTF8_BOM)
        .map_err(|e| export_error(e.to_string()))?;

    let mut writer = csv::Writer::from_writer(file);
    for row in rows {
        writer
            .serialize(row)
            .map_err(|e| export_error(e.to_string()))?;
    }
    writer.flush().map_err(|e| export_error(e.to_string()))
}

/// Writes the per-day, unparsed and summary files into `output_dir`.
///
/// The directory is created if needed. The unparsed file is only written
/// when there are unparsed cells.
pub fn export_report<P: AsRef<Path>>(
    output_dir: P,
    report: &DeductionReport,
    unparsed: &[UnparsedLeaveRecord],
) -> EngineResult<ExportedFiles> {
    let output_dir = output_dir.as_ref();
    fs::create_dir_all(output_dir).map_err(|e| EngineError::ExportError {
        path: output_dir.display().to_string(),
        message: e.to_string(),
    })?;

    let leave_basic = output_dir.join(LEAVE_BASIC_FILE);
    write_csv(&leave_basic, report.records.iter().map(LeaveBasicRow::from))?;

    let leave_unparsed = if unparsed.is_empty() {
        None
    } else {
        let path = output_dir.join(LEAVE_UNPARSED_FILE);
        write_csv(&path, unparsed)?;
        Some(path)
    };

    let monthly_summary = output_dir.join(MONTHLY_SUMMARY_FILE);
    write_csv(&monthly_summary, &report.summaries)?;

    info!(
        output_dir = %output_dir.display(),
        records = report.records.len(),
        unparsed = unparsed.len(),
        summaries = report.summaries.len(),
        "Exported leave report"
    );

    Ok(ExportedFiles {
        leave_basic,
        leave_unparsed,
        monthly_summary,
    })
}
