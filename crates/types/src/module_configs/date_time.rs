//! DateTime module configuration.

use super::BaseModuleConfig;
use crate::module_config::ModuleConfig;

fn default_format() -> String {
    "%Y-%m-%d %H:%M:%S".to_string()
}

fn default_timezone() -> String {
    "Local".to_string()
}

/// DateTime module configuration
#[derive(Debug, Clone, PartialEq)]
pub struct DateTimeConfig {
    pub base: BaseModuleConfig,
    /// strftime-style format string
    pub format: String,
    /// Timezone ID (e.g., "America/New_York", "Europe/London", "Local")
    pub timezone: String,
}

impl Default for DateTimeConfig {
    fn default() -> Self {
        Self {
            base: BaseModuleConfig::default(),
            format: default_format(),
            timezone: default_timezone(),
        }
    }
}

impl DateTimeConfig {
    pub fn from_config(config: &ModuleConfig) -> Self {
        Self {
            base: BaseModuleConfig::from_config(config),
            format: config.get_str("format", &default_format()),
            timezone: config.get_str("timezone", &default_timezone()),
        }
    }
}
