//! HTTP API for the leave engine.
//!
//! Exposes the sheet parser and the deduction calculator as JSON endpoints.
//! Sheets are posted as a grid of cells, so callers do their own workbook
//! reading.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::{DeductionRequest, ParseRequest};
pub use response::{ApiError, ApiErrorResponse, DeductionResponse, ParseResponse};
pub use state::AppState;
