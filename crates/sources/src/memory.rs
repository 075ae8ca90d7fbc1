//! Memory (RAM and swap) module

use crate::util::{assemble, format_ibytes};
use anyhow::Result;
use once_cell::sync::Lazy;
use sensbar_core::{BoxedModule, Module, ModuleMetadata};
use sensbar_types::module_configs::{MemoryAttribute, MemoryConfig};
use sensbar_types::{gradient_color, Block, ModuleConfig};
use std::sync::Mutex;
use std::time::Duration;
use sysinfo::System;

/// Shared sysinfo::System instance for all Memory module instances.
static SHARED_MEMORY_SYSTEM: Lazy<Mutex<System>> = Lazy::new(|| {
    log::info!("Creating shared Memory sysinfo::System instance");
    Mutex::new(System::new())
});

/// Memory figures in bytes
#[derive(Debug, Clone, Copy, Default, PartialEq)]
struct MemorySnapshot {
    total: u64,
    available: u64,
    used: u64,
    free: u64,
    swap_total: u64,
    swap_used: u64,
    swap_free: u64,
}

impl MemorySnapshot {
    fn read() -> Self {
        let mut system = SHARED_MEMORY_SYSTEM.lock().unwrap_or_else(|poisoned| {
            log::warn!("Shared memory mutex was poisoned, recovering");
            poisoned.into_inner()
        });
        system.refresh_memory();

        Self {
            total: system.total_memory(),
            available: system.available_memory(),
            used: system.used_memory(),
            free: system.free_memory(),
            swap_total: system.total_swap(),
            swap_used: system.used_swap(),
            swap_free: system.free_swap(),
        }
    }

    fn ram_percent(&self) -> f64 {
        percent(self.used, self.total)
    }

    fn swap_percent(&self) -> f64 {
        percent(self.swap_used, self.swap_total)
    }
}

fn percent(part: u64, whole: u64) -> f64 {
    if whole == 0 {
        return 0.0;
    }
    part as f64 / whole as f64 * 100.0
}

/// Shows a single RAM or swap figure
pub struct MemoryModule {
    metadata: ModuleMetadata,
    config: MemoryConfig,
}

impl MemoryModule {
    pub fn new(config: MemoryConfig) -> Self {
        Self {
            metadata: ModuleMetadata::new("Memory", "Memory", "RAM and swap usage"),
            config,
        }
    }

    pub fn create(config: &ModuleConfig) -> Result<BoxedModule> {
        Ok(Box::new(Self::new(MemoryConfig::from_config(config))))
    }

    fn blocks_for(&self, mem: &MemorySnapshot) -> Vec<Block> {
        let attribute = self.config.attribute;
        let used_percent = if attribute.is_swap() {
            mem.swap_percent()
        } else {
            mem.ram_percent()
        };

        let text = match attribute {
            MemoryAttribute::RamTotal => format_ibytes(mem.total),
            MemoryAttribute::RamAvailable => format_ibytes(mem.available),
            MemoryAttribute::RamUsed => format_ibytes(mem.used),
            MemoryAttribute::RamUsedPercent | MemoryAttribute::SwapUsedPercent => {
                format!("{}%", used_percent as u64)
            }
            MemoryAttribute::RamFree => format_ibytes(mem.free),
            MemoryAttribute::RamString => format!(
                "{} / {} ({}%)",
                format_ibytes(mem.used),
                format_ibytes(mem.total),
                used_percent as u64
            ),
            MemoryAttribute::SwapUsed => format_ibytes(mem.swap_used),
            MemoryAttribute::SwapFree => format_ibytes(mem.swap_free),
            MemoryAttribute::SwapString => format!(
                "{} / {} ({}%)",
                format_ibytes(mem.swap_used),
                format_ibytes(mem.swap_total),
                used_percent as u64
            ),
        };

        let base = &self.config.base;
        let block = base
            .inner_block()
            .with_text(text)
            .with_color(gradient_color(used_percent / 100.0));
        assemble(base, vec![block])
    }
}

impl Module for MemoryModule {
    fn metadata(&self) -> &ModuleMetadata {
        &self.metadata
    }

    fn refresh_interval(&self) -> Duration {
        self.config.base.refresh
    }

    fn make_blocks(&mut self) -> Vec<Block> {
        self.blocks_for(&MemorySnapshot::read())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const GIB: u64 = 1024 * 1024 * 1024;

    fn snapshot() -> MemorySnapshot {
        MemorySnapshot {
            total: 8 * GIB,
            available: 6 * GIB,
            used: 2 * GIB,
            free: 5 * GIB,
            swap_total: 4 * GIB,
            swap_used: 3 * GIB,
            swap_free: GIB,
        }
    }

    fn module(attribute: &str) -> MemoryModule {
        MemoryModule::new(MemoryConfig::from_config(&ModuleConfig::from_value(
            json!({ "attribute": attribute }),
        )))
    }

    #[test]
    fn test_ram_attributes() {
        let mem = snapshot();
        assert_eq!(module("ram_used_percent").blocks_for(&mem)[0].full_text, "25%");
        assert_eq!(module("ram_total").blocks_for(&mem)[0].full_text, "8.0 GiB");
        assert_eq!(module("ram_free").blocks_for(&mem)[0].full_text, "5.0 GiB");
        assert_eq!(
            module("ram_string").blocks_for(&mem)[0].full_text,
            "2.0 GiB / 8.0 GiB (25%)"
        );
    }

    #[test]
    fn test_swap_colored_by_swap_usage() {
        let mem = snapshot();
        let blocks = module("swap_used_percent").blocks_for(&mem);
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].full_text, "75%");
        assert_eq!(blocks[0].color, gradient_color(0.75));
    }

    #[test]
    fn test_no_swap_is_zero_percent() {
        let mem = MemorySnapshot {
            total: GIB,
            used: GIB / 2,
            ..Default::default()
        };
        assert_eq!(module("swap_used_percent").blocks_for(&mem)[0].full_text, "0%");
    }

    #[test]
    fn test_live_read_produces_a_block() {
        let mut memory = module("ram_used");
        let blocks = memory.make_blocks();
        assert_eq!(blocks.len(), 1);
        assert!(blocks[0].full_text.ends_with('B'));
    }
}
