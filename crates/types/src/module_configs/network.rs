//! Network module configuration.

use super::BaseModuleConfig;
use crate::module_config::ModuleConfig;

/// Which interfaces the network module reports on
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum NetworkInterface {
    /// Sum of every interface
    #[default]
    All,
    Named(String),
}

impl NetworkInterface {
    fn parse(name: &str) -> Self {
        if name.is_empty() || name == "all" {
            NetworkInterface::All
        } else {
            NetworkInterface::Named(name.to_string())
        }
    }
}

/// Network module configuration
#[derive(Debug, Clone, PartialEq, Default)]
pub struct NetworkConfig {
    pub base: BaseModuleConfig,
    pub interface: NetworkInterface,
}

impl NetworkConfig {
    pub fn from_config(config: &ModuleConfig) -> Self {
        Self {
            base: BaseModuleConfig::from_config(config),
            interface: NetworkInterface::parse(&config.get_str("interface", "all")),
        }
    }
}
