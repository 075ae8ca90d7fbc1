//! LoadAverage module configuration.

use super::BaseModuleConfig;
use crate::module_config::ModuleConfig;

/// LoadAverage module configuration (only the shared settings)
#[derive(Debug, Clone, PartialEq, Default)]
pub struct LoadAverageConfig {
    pub base: BaseModuleConfig,
}

impl LoadAverageConfig {
    pub fn from_config(config: &ModuleConfig) -> Self {
        Self {
            base: BaseModuleConfig::from_config(config),
        }
    }
}
