//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading leave
//! configurations from YAML files.

use rust_decimal::Decimal;
use std::fs;
use std::path::Path;

use tracing::debug;

use crate::error::{EngineError, EngineResult};

use super::types::{DeductionConfig, LeaveConfig, LeaveTypesConfig, TierRates};

/// Loads and provides access to leave configuration.
///
/// # Directory Structure
///
/// ```text
/// config/default/
/// ├── deduction.yaml    # Rounding unit, rate table, display labels
/// └── leave_types.yaml  # Header marker and leave type synonyms
/// ```
///
/// # Example
///
/// ```no_run
/// use leave_engine::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config/default")?;
/// let rates = loader.get_rates("事假");
/// # Ok::<(), leave_engine::error::EngineError>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct ConfigLoader {
    config: LeaveConfig,
}

impl ConfigLoader {
    /// Loads configuration from the specified directory.
    ///
    /// # Returns
    ///
    /// Returns a `ConfigLoader` instance on success, or an error if:
    /// - Either file is missing (`ConfigNotFound`)
    /// - Either file contains invalid YAML (`ConfigParseError`)
    /// - The rounding unit is not positive or a rate is negative (`ConfigParseError`)
    /// - A rate is keyed by a leave type other than sick or personal leave (`ConfigParseError`)
    /// - `max_day_count` is zero (`ConfigParseError`)
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();

        let deduction_path = path.join("deduction.yaml");
        let deduction = Self::load_yaml::<DeductionConfig>(&deduction_path)?;
        Self::validate_deduction(&deduction_path, &deduction)?;

        let leave_types_path = path.join("leave_types.yaml");
        let leave_types = Self::load_yaml::<LeaveTypesConfig>(&leave_types_path)?;
        Self::validate_leave_types(&leave_types_path, &leave_types)?;

        debug!(
            path = %path.display(),
            rate_types = deduction.rates.len(),
            aliases = leave_types.aliases.len(),
            "Loaded leave configuration"
        );

        Ok(Self {
            config: LeaveConfig::new(deduction, leave_types),
        })
    }

    /// Wraps an already-built configuration.
    pub fn from_config(config: LeaveConfig) -> Self {
        Self { config }
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> EngineResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| EngineError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    fn validate_deduction(path: &Path, config: &DeductionConfig) -> EngineResult<()> {
        let invalid = |message: String| EngineError::ConfigParseError {
            path: path.display().to_string(),
            message,
        };

        if config.rounding_unit <= Decimal::ZERO {
            return Err(invalid(format!(
                "rounding_unit must be positive, got {}",
                config.rounding_unit
            )));
        }

        // Other leave types never reach a deduction total.
        if let Some(leave_type) = config
            .rates
            .keys()
            .find(|t| **t != config.sick_leave_type && **t != config.personal_leave_type)
        {
            return Err(invalid(format!(
                "rates may only be set for '{}' and '{}', found '{}'",
                config.sick_leave_type, config.personal_leave_type, leave_type
            )));
        }

        if let Some((leave_type, _)) = config
            .rates
            .iter()
            .find(|(_, r)| r.full_day < 0 || r.half_day < 0)
        {
            return Err(invalid(format!(
                "rates for '{}' must not be negative",
                leave_type
            )));
        }

        Ok(())
    }

    fn validate_leave_types(path: &Path, config: &LeaveTypesConfig) -> EngineResult<()> {
        if config.max_day_count == 0 {
            return Err(EngineError::ConfigParseError {
                path: path.display().to_string(),
                message: "max_day_count must be at least 1".to_string(),
            });
        }
        Ok(())
    }

    /// Returns the underlying leave configuration.
    pub fn config(&self) -> &LeaveConfig {
        &self.config
    }

    /// Returns the rates for a leave type, or `None` if it never deducts.
    pub fn get_rates(&self, leave_type: &str) -> Option<TierRates> {
        self.config.deduction().rates_for(leave_type)
    }
}
