//! Load average module

use crate::util::assemble;
use anyhow::Result;
use sensbar_core::{BoxedModule, Module, ModuleMetadata};
use sensbar_types::module_configs::LoadAverageConfig;
use sensbar_types::{gradient_color, BaseModuleConfig, Block, ModuleConfig};
use std::time::Duration;
use sysinfo::System;

/// Shows the 1, 5 and 15 minute load averages, colored by load per core
pub struct LoadAverageModule {
    metadata: ModuleMetadata,
    config: LoadAverageConfig,
    cores: usize,
}

impl LoadAverageModule {
    pub fn new(config: LoadAverageConfig) -> Self {
        let cores = std::thread::available_parallelism()
            .map(|n| n.get())
            .unwrap_or_else(|e| {
                log::error!("Failed to count CPUs: {}", e);
                1
            });

        Self {
            metadata: ModuleMetadata::new("LoadAverage", "Load Average", "System load averages"),
            config,
            cores,
        }
    }

    pub fn create(config: &ModuleConfig) -> Result<BoxedModule> {
        Ok(Box::new(Self::new(LoadAverageConfig::from_config(config))))
    }
}

fn load_blocks(base: &BaseModuleConfig, loads: [f64; 3], cores: usize) -> Vec<Block> {
    let cores = cores.max(1) as f64;
    let values = loads
        .iter()
        .map(|load| {
            base.inner_block()
                .with_text(format!("{:.2}", load))
                .with_color(gradient_color(load / cores))
        })
        .collect();
    assemble(base, values)
}

impl Module for LoadAverageModule {
    fn metadata(&self) -> &ModuleMetadata {
        &self.metadata
    }

    fn refresh_interval(&self) -> Duration {
        self.config.base.refresh
    }

    fn make_blocks(&mut self) -> Vec<Block> {
        let avg = System::load_average();
        load_blocks(&self.config.base, [avg.one, avg.five, avg.fifteen], self.cores)
    }
}
