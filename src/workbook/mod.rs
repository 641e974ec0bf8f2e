//! File collaborators around the pipeline.
//!
//! Reads leave rosters from Excel workbooks, the shift-class roster and
//! driver list from CSV, and writes result CSV files.

mod export;
mod lookups;
mod xlsx;

pub use export::{
    ExportedFiles, LEAVE_BASIC_FILE, LEAVE_UNPARSED_FILE, MONTHLY_SUMMARY_FILE, export_report,
    write_csv,
};
pub use lookups::{
    DRIVER_ACCOUNT_COLUMN, DriverListCache, SHIFT_CLASS_COLUMNS, SHIFT_ID_COLUMNS,
    load_driver_accounts, load_shift_classes,
};
pub use xlsx::read_leave_sheet;
