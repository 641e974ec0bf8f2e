//! Error types for the leave engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for every fatal condition that can occur while loading configuration,
//! reading a leave roster, or exporting results. Cell-level parse failures are
//! not errors; they are reported as [`UnparsedLeaveRecord`](crate::models::UnparsedLeaveRecord)s.

use thiserror::Error;

/// The main error type for the leave engine.
///
/// # Example
///
/// ```
/// use leave_engine::error::EngineError;
///
/// let error = EngineError::HeaderNotFound {
///     marker: "人事編號".to_string(),
/// };
/// assert_eq!(error.to_string(), "Header row marker '人事編號' not found in sheet");
/// assert!(error.is_format_error());
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed or holds invalid values.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// The sheet title does not carry a recognizable ROC year and month.
    #[error("Could not read year/month from sheet title '{title}'")]
    InvalidTitle {
        /// The title text that was inspected.
        title: String,
    },

    /// The personnel-ID header row could not be located.
    #[error("Header row marker '{marker}' not found in sheet")]
    HeaderNotFound {
        /// The marker text that was searched for.
        marker: String,
    },

    /// The workbook could not be opened or contains no worksheet.
    #[error("Failed to read workbook '{path}': {message}")]
    WorkbookError {
        /// The workbook path.
        path: String,
        /// A description of the failure.
        message: String,
    },

    /// A roster or driver lookup file could not be read.
    #[error("Failed to read lookup file '{path}': {message}")]
    LookupError {
        /// The lookup file path.
        path: String,
        /// A description of the failure.
        message: String,
    },

    /// A result file could not be written.
    #[error("Failed to write '{path}': {message}")]
    ExportError {
        /// The output path.
        path: String,
        /// A description of the failure.
        message: String,
    },
}

impl EngineError {
    /// Returns true when the error means the input is not a leave roster layout.
    ///
    /// These are the fatal format errors that must be surfaced distinctly from
    /// routine unparseable cells.
    pub fn is_format_error(&self) -> bool {
        matches!(
            self,
            EngineError::InvalidTitle { .. } | EngineError::HeaderNotFound { .. }
        )
    }
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_not_found_displays_path() {
        let error = EngineError::ConfigNotFound {
            path: "/missing/deduction.yaml".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Configuration file not found: /missing/deduction.yaml"
        );
    }

    #[test]
    fn test_config_parse_error_displays_path_and_message() {
        let error = EngineError::ConfigParseError {
            path: "/config/bad.yaml".to_string(),
            message: "invalid YAML syntax".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Failed to parse configuration file '/config/bad.yaml': invalid YAML syntax"
        );
    }

    #[test]
    fn test_invalid_title_displays_title() {
        let error = EngineError::InvalidTitle {
            title: "請假明細".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Could not read year/month from sheet title '請假明細'"
        );
    }

    #[test]
    fn test_workbook_error_displays_path_and_message() {
        let error = EngineError::WorkbookError {
            path: "data/114年11月.xlsx".to_string(),
            message: "no worksheet".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Failed to read workbook 'data/114年11月.xlsx': no worksheet"
        );
    }

    #[test]
    fn test_format_errors_are_distinguished() {
        assert!(
            EngineError::InvalidTitle {
                title: String::new()
            }
            .is_format_error()
        );
        assert!(
            !EngineError::LookupError {
                path: "drivers.csv".to_string(),
                message: "missing".to_string(),
            }
            .is_format_error()
        );
        assert!(
            !EngineError::ExportError {
                path: "out.csv".to_string(),
                message: "denied".to_string(),
            }
            .is_format_error()
        );
    }

    #[test]
    fn test_errors_implement_std_error() {
        fn assert_error<T: std::error::Error>() {}
        assert_error::<EngineError>();
    }

    #[test]
    fn test_error_propagation_with_question_mark() {
        fn returns_header_not_found() -> EngineResult<()> {
            Err(EngineError::HeaderNotFound {
                marker: "人事編號".to_string(),
            })
        }

        fn propagates_error() -> EngineResult<()> {
            returns_header_not_found()?;
            Ok(())
        }

        assert!(propagates_error().is_err());
    }
}
