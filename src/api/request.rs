//! Request types for the leave engine API.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::models::LeaveSheet;

/// Request body for `POST /leave/parse`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParseRequest {
    /// The roster grid, row by row, exactly as laid out in the worksheet.
    pub sheet: LeaveSheet,
}

/// Request body for `POST /leave/deductions`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeductionRequest {
    /// The roster grid, row by row, exactly as laid out in the worksheet.
    pub sheet: LeaveSheet,
    /// Employee id → shift class.
    #[serde(default)]
    pub shift_classes: HashMap<String, String>,
    /// Employee ids on the driver list.
    #[serde(default)]
    pub drivers: Vec<String>,
}
