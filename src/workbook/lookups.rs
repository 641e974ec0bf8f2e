//! Shift-class roster and driver list lookups.
//!
//! Both lookups are CSV files keyed by employee id. The shift-class roster is
//! required when given; the driver list is optional and degrades to an empty
//! set.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::calculation::{DriverAccounts, ShiftClassLookup};
use crate::error::{EngineError, EngineResult};

/// Accepted headers for the employee id column of the shift roster.
pub const SHIFT_ID_COLUMNS: [&str; 3] = ["emp_id", "卡號", "公務帳號"];

/// Accepted headers for the shift class column of the shift roster.
pub const SHIFT_CLASS_COLUMNS: [&str; 2] = ["shift_class", "班別"];

/// Header of the account column in the driver list.
pub const DRIVER_ACCOUNT_COLUMN: &str = "公務帳號";

const BOM: char = '\u{feff}';

fn open_reader(path: &Path) -> csv::Result<csv::Reader<std::fs::File>> {
    csv::ReaderBuilder::new().flexible(true).from_path(path)
}

fn find_column(headers: &csv::StringRecord, candidates: &[&str]) -> Option<usize> {
    candidates.iter().find_map(|candidate| {
        headers
            .iter()
            .position(|h| h.trim_start_matches(BOM).trim() == *candidate)
    })
}

/// Loads the employee id → shift class lookup.
///
/// The first row for an employee wins. Rows with a blank id are skipped.
///
/// # Returns
///
/// The lookup, or `LookupError` if the file cannot be read or lacks an id or
/// shift class column.
pub fn load_shift_classes<P: AsRef<Path>>(path: P) -> EngineResult<ShiftClassLookup> {
    let path = path.as_ref();
    let lookup_error = |message: String| EngineError::LookupError {
        path: path.display().to_string(),
        message,
    };

    let mut reader = open_reader(path).map_err(|e| lookup_error(e.to_string()))?;
    let headers = reader.headers().map_err(|e| lookup_error(e.to_string()))?.clone();

    let id_column = find_column(&headers, &SHIFT_ID_COLUMNS).ok_or_else(|| {
        lookup_error(format!("missing id column, expected one of {:?}", SHIFT_ID_COLUMNS))
    })?;
    let class_column = find_column(&headers, &SHIFT_CLASS_COLUMNS).ok_or_else(|| {
        lookup_error(format!(
            "missing shift class column, expected one of {:?}",
            SHIFT_CLASS_COLUMNS
        ))
    })?;

    let mut lookup = ShiftClassLookup::new();
    for row in reader.records() {
        let row = row.map_err(|e| lookup_error(e.to_string()))?;
        let id = row.get(id_column).unwrap_or_default().trim();
        if id.is_empty() {
            continue;
        }
        let class = row.get(class_column).unwrap_or_default().trim();
        lookup
            .entry(id.to_string())
            .or_insert_with(|| class.to_string());
    }

    info!(path = %path.display(), employees = lookup.len(), "Loaded shift classes");
    Ok(lookup)
}

fn read_driver_accounts(path: &Path) -> Result<DriverAccounts, String> {
    let mut reader = open_reader(path).map_err(|e| e.to_string())?;
    let headers = reader.headers().map_err(|e| e.to_string())?.clone();
    let column = find_column(&headers, &[DRIVER_ACCOUNT_COLUMN])
        .ok_or_else(|| format!("missing '{}' column", DRIVER_ACCOUNT_COLUMN))?;

    let mut accounts = HashSet::new();
    for row in reader.records() {
        let row = row.map_err(|e| e.to_string())?;
        let account = row.get(column).unwrap_or_default().trim();
        if !account.is_empty() {
            accounts.insert(account.to_string());
        }
    }
    Ok(accounts)
}

/// Loads driver accounts, warning and returning an empty set on any failure.
pub fn load_driver_accounts<P: AsRef<Path>>(path: P) -> DriverAccounts {
    let path = path.as_ref();
    match read_driver_accounts(path) {
        Ok(accounts) => {
            info!(path = %path.display(), drivers = accounts.len(), "Loaded driver list");
            accounts
        }
        Err(message) => {
            warn!(
                path = %path.display(),
                error = %message,
                "Driver list unavailable, treating every employee as a non-driver"
            );
            DriverAccounts::new()
        }
    }
}

/// Caches the driver list of one path for the lifetime of a session.
///
/// Loading a different path replaces the cached list; [`clear`] drops it so
/// the next load reads the file again.
///
/// [`clear`]: DriverListCache::clear
#[derive(Debug, Default)]
pub struct DriverListCache {
    cached: Option<(PathBuf, DriverAccounts)>,
}

impl DriverListCache {
    /// Creates an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the driver accounts for `path`, reading the file on a miss.
    pub fn load<P: AsRef<Path>>(&mut self, path: P) -> &DriverAccounts {
        let path = path.as_ref();
        if matches!(&self.cached, Some((cached, _)) if cached.as_path() == path) {
            debug!(path = %path.display(), "Driver list cache hit");
        } else {
            self.cached = None;
        }
        let (_, accounts) = self
            .cached
            .get_or_insert_with(|| (path.to_path_buf(), load_driver_accounts(path)));
        accounts
    }

    /// Forgets the cached driver list.
    pub fn clear(&mut self) {
        self.cached = None;
    }

    /// Whether a driver list is currently cached.
    pub fn is_cached(&self) -> bool {
        self.cached.is_some()
    }
}
