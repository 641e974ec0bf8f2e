//! Leave roster parsing and leave deduction engine.
//!
//! This crate reads monthly leave rosters kept as free-text spreadsheet
//! cells, turns each annotation into per-day leave records, and prices
//! sick and personal leave into payroll deductions with monthly
//! per-employee summaries.

#![warn(missing_docs)]

pub mod api;
pub mod calculation;
pub mod config;
pub mod error;
pub mod models;
pub mod parsing;
pub mod workbook;
