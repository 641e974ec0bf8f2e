//! Shared state for the leave engine API.

use std::sync::Arc;

use crate::config::{ConfigLoader, DeductionConfig, LeaveTypesConfig};

/// State shared by every request handler: the loaded leave configuration.
#[derive(Clone)]
pub struct AppState {
    config: Arc<ConfigLoader>,
}

impl AppState {
    /// Creates the state from a loaded configuration.
    pub fn new(config: ConfigLoader) -> Self {
        Self {
            config: Arc::new(config),
        }
    }

    /// Returns the configuration loader.
    pub fn config(&self) -> &ConfigLoader {
        &self.config
    }

    /// Returns the leave type vocabulary used by the sheet parser.
    pub fn leave_types(&self) -> &LeaveTypesConfig {
        self.config.config().leave_types()
    }

    /// Returns the rate table and rounding rules.
    pub fn deduction(&self) -> &DeductionConfig {
        self.config.config().deduction()
    }
}
