//! Response types for the leave engine API.
//!
//! Successful bodies wrap the pipeline output together with the request's
//! correlation id; failures are an [`ApiError`] with a stable code.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::calculation::DeductionReport;
use crate::error::EngineError;
use crate::models::{
    DeductionRecord, DeductionTotals, MonthlySummary, ParsedLeaveRecord, SheetPeriod,
    UnparsedLeaveRecord,
};

/// Response body for `POST /leave/parse`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParseResponse {
    /// Correlation id of the request.
    pub request_id: Uuid,
    /// The sheet's month.
    pub period: SheetPeriod,
    /// One record per leave day.
    pub records: Vec<ParsedLeaveRecord>,
    /// Cells that need manual review.
    pub unparsed: Vec<UnparsedLeaveRecord>,
}

/// Response body for `POST /leave/deductions`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeductionResponse {
    /// Correlation id of the request.
    pub request_id: Uuid,
    /// The sheet's month.
    pub period: SheetPeriod,
    /// Priced leave records.
    pub records: Vec<DeductionRecord>,
    /// Per-employee monthly summaries.
    pub summaries: Vec<MonthlySummary>,
    /// Totals across all employees.
    pub totals: DeductionTotals,
    /// Cells that need manual review.
    pub unparsed: Vec<UnparsedLeaveRecord>,
}

impl DeductionResponse {
    /// Assembles the response from a calculated report.
    pub fn new(
        request_id: Uuid,
        period: SheetPeriod,
        report: DeductionReport,
        unparsed: Vec<UnparsedLeaveRecord>,
    ) -> Self {
        Self {
            request_id,
            period,
            records: report.records,
            summaries: report.summaries,
            totals: report.totals,
            unparsed,
        }
    }
}

/// API error response structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    /// Error code for programmatic handling.
    pub code: String,
    /// Human-readable error message.
    pub message: String,
    /// Optional details about the error.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }

    /// Creates a new API error with details.
    pub fn with_details(
        code: impl Into<String>,
        message: impl Into<String>,
        details: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: Some(details.into()),
        }
    }

    /// Creates a malformed JSON error response.
    pub fn malformed_json(message: impl Into<String>) -> Self {
        Self::new("MALFORMED_JSON", message)
    }
}

/// API error with HTTP status code.
pub struct ApiErrorResponse {
    /// The HTTP status code.
    pub status: StatusCode,
    /// The error body.
    pub error: ApiError,
}

impl IntoResponse for ApiErrorResponse {
    fn into_response(self) -> Response {
        (self.status, Json(self.error)).into_response()
    }
}

impl From<EngineError> for ApiErrorResponse {
    fn from(error: EngineError) -> Self {
        let message = error.to_string();
        let (status, error) = match error {
            EngineError::ConfigNotFound { .. } | EngineError::ConfigParseError { .. } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ApiError::with_details("CONFIG_ERROR", "Configuration error", message),
            ),
            EngineError::InvalidTitle { .. } => (
                StatusCode::UNPROCESSABLE_ENTITY,
                ApiError::with_details(
                    "INVALID_TITLE",
                    message,
                    "The first row must hold a title like '114年11月'",
                ),
            ),
            EngineError::HeaderNotFound { .. } => (
                StatusCode::UNPROCESSABLE_ENTITY,
                ApiError::with_details(
                    "HEADER_NOT_FOUND",
                    message,
                    "The sheet must contain a header row starting with the personnel id marker",
                ),
            ),
            EngineError::WorkbookError { .. } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ApiError::new("WORKBOOK_ERROR", message),
            ),
            EngineError::LookupError { .. } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ApiError::new("LOOKUP_ERROR", message),
            ),
            EngineError::ExportError { .. } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ApiError::new("EXPORT_ERROR", message),
            ),
        };
        ApiErrorResponse { status, error }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_serialization() {
        let error = ApiError::new("TEST_ERROR", "Test message");
        let json = serde_json::to_string(&error).unwrap();
        assert!(json.contains("\"code\":\"TEST_ERROR\""));
        assert!(json.contains("\"message\":\"Test message\""));
        assert!(!json.contains("details"));
    }

    #[test]
    fn test_format_errors_are_unprocessable() {
        let api_error: ApiErrorResponse = EngineError::InvalidTitle {
            title: "請假表".to_string(),
        }
        .into();
        assert_eq!(api_error.status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(api_error.error.code, "INVALID_TITLE");
        assert!(api_error.error.message.contains("請假表"));

        let api_error: ApiErrorResponse = EngineError::HeaderNotFound {
            marker: "人事編號".to_string(),
        }
        .into();
        assert_eq!(api_error.status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(api_error.error.code, "HEADER_NOT_FOUND");
    }

    #[test]
    fn test_config_errors_are_server_errors() {
        let api_error: ApiErrorResponse = EngineError::ConfigNotFound {
            path: "deduction.yaml".to_string(),
        }
        .into();
        assert_eq!(api_error.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(api_error.error.code, "CONFIG_ERROR");
        assert!(api_error.error.details.unwrap().contains("deduction.yaml"));
    }
}
