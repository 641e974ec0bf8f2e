//! Configuration types for leave parsing and deduction.
//!
//! This module contains the strongly-typed configuration structures that
//! are deserialized from YAML configuration files. Every field has a default
//! matching the shipped `config/default` directory.

use rust_decimal::Decimal;
use serde::Deserialize;
use std::collections::HashMap;

/// The canonical personal leave type.
pub const PERSONAL_LEAVE: &str = "事假";

/// The canonical sick leave type.
pub const SICK_LEAVE: &str = "傷病";

/// The marker text in the first column of the roster header row.
pub const DEFAULT_HEADER_MARKER: &str = "人事編號";

/// Largest day count a single leave pair may carry, a full leap year.
pub const DEFAULT_MAX_DAY_COUNT: u32 = 366;

/// Full-day and half-day deduction amounts for one leave type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct TierRates {
    /// Amount deducted when the rounded day count exceeds the half-day threshold.
    pub full_day: i64,
    /// Amount deducted when the rounded day count is at or below the half-day threshold.
    pub half_day: i64,
}

/// Deduction rules from `deduction.yaml`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct DeductionConfig {
    /// Day fractions are rounded up to a multiple of this unit.
    #[serde(default = "default_half")]
    pub rounding_unit: Decimal,
    /// Rounded day counts at or below this value use the half-day rate.
    #[serde(default = "default_half")]
    pub half_day_threshold: Decimal,
    /// Canonical sick leave type, aggregated into the sick columns.
    #[serde(default = "default_sick_leave_type")]
    pub sick_leave_type: String,
    /// Canonical personal leave type, aggregated into the personal columns.
    #[serde(default = "default_personal_leave_type")]
    pub personal_leave_type: String,
    /// Source-text keyword that triggers the physiological display label.
    #[serde(default = "default_physiological_keyword")]
    pub physiological_keyword: String,
    /// Display label for sick leave recorded as physiological leave.
    #[serde(default = "default_physiological_label")]
    pub physiological_label: String,
    /// Rate table keyed by canonical leave type.
    #[serde(default = "default_rates")]
    pub rates: HashMap<String, TierRates>,
}

impl Default for DeductionConfig {
    fn default() -> Self {
        Self {
            rounding_unit: default_half(),
            half_day_threshold: default_half(),
            sick_leave_type: default_sick_leave_type(),
            personal_leave_type: default_personal_leave_type(),
            physiological_keyword: default_physiological_keyword(),
            physiological_label: default_physiological_label(),
            rates: default_rates(),
        }
    }
}

impl DeductionConfig {
    /// Returns the rates for a leave type, or `None` if it never deducts.
    pub fn rates_for(&self, leave_type: &str) -> Option<TierRates> {
        self.rates.get(leave_type).copied()
    }
}

/// Roster layout and synonym table from `leave_types.yaml`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct LeaveTypesConfig {
    /// First-column text identifying the header row.
    #[serde(default = "default_header_marker")]
    pub header_marker: String,
    /// Shorthand label → canonical leave type.
    #[serde(default = "default_aliases")]
    pub aliases: HashMap<String, String>,
    /// Cells holding a day count above this are sent to manual review.
    #[serde(default = "default_max_day_count")]
    pub max_day_count: u32,
}

impl Default for LeaveTypesConfig {
    fn default() -> Self {
        Self {
            header_marker: default_header_marker(),
            aliases: default_aliases(),
            max_day_count: default_max_day_count(),
        }
    }
}

impl LeaveTypesConfig {
    /// Maps a label through the synonym table; unmapped labels pass through.
    pub fn normalize<'a>(&'a self, label: &'a str) -> &'a str {
        self.aliases.get(label).map(String::as_str).unwrap_or(label)
    }
}

/// The complete configuration used by a parse-and-calculate run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LeaveConfig {
    deduction: DeductionConfig,
    leave_types: LeaveTypesConfig,
}

impl LeaveConfig {
    /// Creates a new LeaveConfig from its component parts.
    pub fn new(deduction: DeductionConfig, leave_types: LeaveTypesConfig) -> Self {
        Self {
            deduction,
            leave_types,
        }
    }

    /// Returns the deduction rules.
    pub fn deduction(&self) -> &DeductionConfig {
        &self.deduction
    }

    /// Returns the roster layout and synonym table.
    pub fn leave_types(&self) -> &LeaveTypesConfig {
        &self.leave_types
    }
}

fn default_half() -> Decimal {
    Decimal::new(5, 1)
}

fn default_sick_leave_type() -> String {
    SICK_LEAVE.to_string()
}

fn default_personal_leave_type() -> String {
    PERSONAL_LEAVE.to_string()
}

fn default_physiological_keyword() -> String {
    "生理".to_string()
}

fn default_physiological_label() -> String {
    "傷病(生理)".to_string()
}

fn default_rates() -> HashMap<String, TierRates> {
    HashMap::from([
        (
            PERSONAL_LEAVE.to_string(),
            TierRates {
                full_day: 333,
                half_day: 167,
            },
        ),
        (
            SICK_LEAVE.to_string(),
            TierRates {
                full_day: 167,
                half_day: 84,
            },
        ),
    ])
}

fn default_header_marker() -> String {
    DEFAULT_HEADER_MARKER.to_string()
}

fn default_max_day_count() -> u32 {
    DEFAULT_MAX_DAY_COUNT
}

fn default_aliases() -> HashMap<String, String> {
    [
        ("扣事", PERSONAL_LEAVE),
        ("扣病", SICK_LEAVE),
        ("扣特", "特休"),
        ("扣補", "補休"),
        ("生理", SICK_LEAVE),
        ("生理假", SICK_LEAVE),
    ]
    .into_iter()
    .map(|(alias, canonical)| (alias.to_string(), canonical.to_string()))
    .collect()
}
