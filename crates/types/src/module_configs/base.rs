//! Settings shared by every module.

use std::time::Duration;

use crate::block::Block;
use crate::module_config::ModuleConfig;

fn default_refresh_ms() -> u64 {
    1000
}

fn default_final_separator() -> bool {
    true
}

fn default_block_separator_width() -> u32 {
    0
}

fn default_final_separator_width() -> u32 {
    9
}

/// Common module configuration: label, refresh rate and separator spacing
#[derive(Debug, Clone, PartialEq)]
pub struct BaseModuleConfig {
    /// Text of the leading label block; empty means no label
    pub label: String,
    pub refresh: Duration,
    /// Draw a separator after the module's last block
    pub final_separator: bool,
    /// Spacing between blocks inside the module
    pub block_separator_width: u32,
    /// Spacing after the module's last block
    pub final_separator_width: u32,
}

impl Default for BaseModuleConfig {
    fn default() -> Self {
        Self {
            label: String::new(),
            refresh: Duration::from_millis(default_refresh_ms()),
            final_separator: default_final_separator(),
            block_separator_width: default_block_separator_width(),
            final_separator_width: default_final_separator_width(),
        }
    }
}

impl BaseModuleConfig {
    pub fn from_config(config: &ModuleConfig) -> Self {
        let refresh_ms = match config.get_u64("refresh", default_refresh_ms()) {
            0 => {
                log::warn!("refresh of 0ms is invalid, using {}ms", default_refresh_ms());
                default_refresh_ms()
            }
            ms => ms,
        };

        Self {
            label: config.get_str("label", ""),
            refresh: Duration::from_millis(refresh_ms),
            final_separator: config.get_bool("final_separator", default_final_separator()),
            block_separator_width: clamp_width(
                config.get_u64("block_separator_width", default_block_separator_width().into()),
            ),
            final_separator_width: clamp_width(
                config.get_u64("final_separator_width", default_final_separator_width().into()),
            ),
        }
    }

    /// Label block, if a label is configured
    pub fn label_block(&self) -> Option<Block> {
        if self.label.is_empty() {
            return None;
        }
        Some(Block::spaced(self.block_separator_width).with_text(self.label.clone()))
    }

    /// A block inside the module (separator hidden, inner spacing)
    pub fn inner_block(&self) -> Block {
        Block::spaced(self.block_separator_width)
    }

    /// Turn `block` into the module's last block: final spacing, separator per config
    pub fn finish_block(&self, block: &mut Block) {
        block.set_separator_width(self.final_separator_width);
        if self.final_separator {
            block.draw_separator();
        } else {
            block.suppress_separator();
        }
    }

    /// A fresh block already shaped as the module's last block
    pub fn final_block(&self) -> Block {
        let mut block = self.inner_block();
        self.finish_block(&mut block);
        block
    }
}

fn clamp_width(value: u64) -> u32 {
    u32::try_from(value).unwrap_or(u32::MAX)
}
