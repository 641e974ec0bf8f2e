//! Configuration loading and management for the leave engine.
//!
//! This module loads the deduction rate table, rounding rules, roster layout
//! and leave type synonyms from YAML files.
//!
//! # Example
//!
//! ```no_run
//! use leave_engine::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config/default").unwrap();
//! println!("Rounding unit: {}", config.config().deduction().rounding_unit);
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{
    DEFAULT_HEADER_MARKER, DEFAULT_MAX_DAY_COUNT, DeductionConfig, LeaveConfig, LeaveTypesConfig,
    PERSONAL_LEAVE, SICK_LEAVE, TierRates,
};
