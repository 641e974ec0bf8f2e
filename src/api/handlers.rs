//! HTTP request handlers for the leave engine API.

use std::collections::HashSet;
use std::time::Instant;

use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::post,
};
use tracing::{info, warn};
use uuid::Uuid;

use crate::calculation::LeaveDeductionCalculator;
use crate::error::EngineError;
use crate::parsing::LeaveSheetParser;

use super::request::{DeductionRequest, ParseRequest};
use super::response::{ApiError, ApiErrorResponse, DeductionResponse, ParseResponse};
use super::state::AppState;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/leave/parse", post(parse_handler))
        .route("/leave/deductions", post(deductions_handler))
        .with_state(state)
}

fn json_response<T: serde::Serialize>(status: StatusCode, body: T) -> Response {
    (
        status,
        [(header::CONTENT_TYPE, "application/json")],
        Json(body),
    )
        .into_response()
}

fn rejection_response(correlation_id: Uuid, rejection: JsonRejection) -> Response {
    let error = match rejection {
        JsonRejection::JsonDataError(err) => {
            let body_text = err.body_text();
            warn!(
                correlation_id = %correlation_id,
                error = %body_text,
                "JSON data error"
            );
            if body_text.contains("missing field") {
                ApiError::new("VALIDATION_ERROR", body_text)
            } else {
                ApiError::malformed_json(body_text)
            }
        }
        JsonRejection::JsonSyntaxError(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "JSON syntax error"
            );
            ApiError::malformed_json(format!("Invalid JSON syntax: {}", err))
        }
        JsonRejection::MissingJsonContentType(_) => {
            ApiError::new("MISSING_CONTENT_TYPE", "Content-Type must be application/json")
        }
        _ => ApiError::malformed_json("Failed to parse request body"),
    };
    json_response(StatusCode::BAD_REQUEST, error)
}

fn engine_error_response(correlation_id: Uuid, err: EngineError) -> Response {
    warn!(
        correlation_id = %correlation_id,
        error = %err,
        format_error = err.is_format_error(),
        "Leave sheet rejected"
    );
    let api_error: ApiErrorResponse = err.into();
    json_response(api_error.status, api_error.error)
}

/// Handler for `POST /leave/parse`.
///
/// Parses a roster grid into per-day leave records and unparsed cells.
async fn parse_handler(
    State(state): State<AppState>,
    payload: Result<Json<ParseRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing leave parse request");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return rejection_response(correlation_id, rejection),
    };

    let start_time = Instant::now();
    match LeaveSheetParser::new(state.leave_types()).parse(&request.sheet) {
        Ok(parsed) => {
            info!(
                correlation_id = %correlation_id,
                year = parsed.period.year,
                month = parsed.period.month,
                parsed = parsed.parsed.len(),
                unparsed = parsed.unparsed.len(),
                duration_us = start_time.elapsed().as_micros(),
                "Leave sheet parsed"
            );
            json_response(
                StatusCode::OK,
                ParseResponse {
                    request_id: correlation_id,
                    period: parsed.period,
                    records: parsed.parsed,
                    unparsed: parsed.unparsed,
                },
            )
        }
        Err(err) => engine_error_response(correlation_id, err),
    }
}

/// Handler for `POST /leave/deductions`.
///
/// Parses a roster grid, prices every leave record and returns the monthly
/// summaries. Shift classes and drivers are optional lookups.
async fn deductions_handler(
    State(state): State<AppState>,
    payload: Result<Json<DeductionRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing leave deduction request");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return rejection_response(correlation_id, rejection),
    };

    let start_time = Instant::now();
    let parsed = match LeaveSheetParser::new(state.leave_types()).parse(&request.sheet) {
        Ok(parsed) => parsed,
        Err(err) => return engine_error_response(correlation_id, err),
    };

    let drivers: HashSet<String> = request.drivers.into_iter().collect();
    let report = LeaveDeductionCalculator::new(state.deduction())
        .with_shift_classes(request.shift_classes)
        .with_drivers(drivers)
        .calculate(parsed.parsed);

    info!(
        correlation_id = %correlation_id,
        records = report.records.len(),
        unparsed = parsed.unparsed.len(),
        employees = report.totals.employee_count,
        total_deduction = report.totals.total_deduction,
        duration_us = start_time.elapsed().as_micros(),
        "Leave deductions calculated"
    );

    json_response(
        StatusCode::OK,
        DeductionResponse::new(correlation_id, parsed.period, report, parsed.unparsed),
    )
}
