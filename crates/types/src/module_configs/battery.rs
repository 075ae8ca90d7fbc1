//! Battery module configuration.

use super::BaseModuleConfig;
use crate::module_config::ModuleConfig;

/// Which battery figure to show
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BatteryAttribute {
    #[default]
    Percent,
    State,
}

/// Battery module configuration
#[derive(Debug, Clone, PartialEq, Default)]
pub struct BatteryConfig {
    pub base: BaseModuleConfig,
    pub attribute: BatteryAttribute,
}

impl BatteryConfig {
    pub fn from_config(config: &ModuleConfig) -> Self {
        let attribute = match config.get_str("attribute", "percent").as_str() {
            "percent" => BatteryAttribute::Percent,
            "state" => BatteryAttribute::State,
            other => {
                log::warn!("Unknown battery attribute '{}', using percent", other);
                BatteryAttribute::Percent
            }
        };

        Self {
            base: BaseModuleConfig::from_config(config),
            attribute,
        }
    }
}
