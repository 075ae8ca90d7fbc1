//! Memory module configuration.

use super::BaseModuleConfig;
use crate::module_config::ModuleConfig;

/// Which memory figure to show
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MemoryAttribute {
    RamTotal,
    RamAvailable,
    RamUsed,
    #[default]
    RamUsedPercent,
    RamFree,
    RamString,
    SwapUsed,
    SwapFree,
    SwapUsedPercent,
    SwapString,
}

impl MemoryAttribute {
    pub fn from_name(name: &str) -> Option<Self> {
        let attribute = match name {
            "ram_total" => MemoryAttribute::RamTotal,
            "ram_available" => MemoryAttribute::RamAvailable,
            "ram_used" => MemoryAttribute::RamUsed,
            "ram_used_percent" => MemoryAttribute::RamUsedPercent,
            "ram_free" => MemoryAttribute::RamFree,
            "ram_string" => MemoryAttribute::RamString,
            "swap_used" => MemoryAttribute::SwapUsed,
            "swap_free" => MemoryAttribute::SwapFree,
            "swap_used_percent" => MemoryAttribute::SwapUsedPercent,
            "swap_string" => MemoryAttribute::SwapString,
            _ => return None,
        };
        Some(attribute)
    }

    pub fn is_swap(&self) -> bool {
        matches!(
            self,
            MemoryAttribute::SwapUsed
                | MemoryAttribute::SwapFree
                | MemoryAttribute::SwapUsedPercent
                | MemoryAttribute::SwapString
        )
    }
}

/// Memory module configuration
#[derive(Debug, Clone, PartialEq, Default)]
pub struct MemoryConfig {
    pub base: BaseModuleConfig,
    pub attribute: MemoryAttribute,
}

impl MemoryConfig {
    pub fn from_config(config: &ModuleConfig) -> Self {
        let name = config.get_str("attribute", "ram_used_percent");
        let attribute = MemoryAttribute::from_name(&name).unwrap_or_else(|| {
            log::warn!("Unknown memory attribute '{}', using ram_used_percent", name);
            MemoryAttribute::default()
        });

        Self {
            base: BaseModuleConfig::from_config(config),
            attribute,
        }
    }
}
