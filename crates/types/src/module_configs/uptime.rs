//! Uptime module configuration.

use super::BaseModuleConfig;
use crate::module_config::ModuleConfig;

/// Uptime module configuration
#[derive(Debug, Clone, PartialEq, Default)]
pub struct UptimeConfig {
    pub base: BaseModuleConfig,
    /// Duration format using `%y %w %d %h %m %s`; `None` picks one that drops leading zero units
    pub format: Option<String>,
}

impl UptimeConfig {
    pub fn from_config(config: &ModuleConfig) -> Self {
        let format = config.get_str("format", "default");
        Self {
            base: BaseModuleConfig::from_config(config),
            format: (format != "default" && !format.is_empty()).then_some(format),
        }
    }
}
