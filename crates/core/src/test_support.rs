//! Fake modules for engine tests

use crate::module::{Module, ModuleMetadata};
use anyhow::Result;
use sensbar_types::{Block, ModuleConfig};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

/// Module emitting `"<id> <n>"` where n counts compute cycles
pub struct FakeModule {
    metadata: ModuleMetadata,
    interval: Duration,
    calls: Arc<AtomicUsize>,
}

impl FakeModule {
    pub fn counting(id: &str, interval: Duration) -> (Self, Arc<AtomicUsize>) {
        let calls = Arc::new(AtomicUsize::new(0));
        let module = Self {
            metadata: ModuleMetadata::new(id, id, "test module"),
            interval,
            calls: Arc::clone(&calls),
        };
        (module, calls)
    }
}

impl Module for FakeModule {
    fn metadata(&self) -> &ModuleMetadata {
        &self.metadata
    }

    fn refresh_interval(&self) -> Duration {
        self.interval
    }

    fn make_blocks(&mut self) -> Vec<Block> {
        let n = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
        vec![Block::new(format!("{} {}", self.metadata.id, n))]
    }
}

/// Module whose compute blocks its thread for `delay`, then emits `"late"`
pub struct BlockingModule {
    metadata: ModuleMetadata,
    delay: Duration,
    started: Arc<AtomicUsize>,
}

impl BlockingModule {
    pub fn new(id: &str, delay: Duration) -> (Self, Arc<AtomicUsize>) {
        let started = Arc::new(AtomicUsize::new(0));
        let module = Self {
            metadata: ModuleMetadata::new(id, id, "blocking test module"),
            delay,
            started: Arc::clone(&started),
        };
        (module, started)
    }
}

impl Module for BlockingModule {
    fn metadata(&self) -> &ModuleMetadata {
        &self.metadata
    }

    fn refresh_interval(&self) -> Duration {
        Duration::from_secs(3600)
    }

    fn make_blocks(&mut self) -> Vec<Block> {
        self.started.fetch_add(1, Ordering::SeqCst);
        std::thread::sleep(self.delay);
        vec![Block::new("late")]
    }
}

fn refresh_from(config: &ModuleConfig) -> Duration {
    Duration::from_millis(config.get_u64("refresh", 1000))
}

pub fn clock_factory(config: &ModuleConfig) -> Result<crate::BoxedModule> {
    Ok(Box::new(FakeModule::counting("Clock", refresh_from(config)).0))
}

pub fn load_factory(config: &ModuleConfig) -> Result<crate::BoxedModule> {
    Ok(Box::new(FakeModule::counting("Load", refresh_from(config)).0))
}

pub fn memory_factory(config: &ModuleConfig) -> Result<crate::BoxedModule> {
    Ok(Box::new(FakeModule::counting("Memory", refresh_from(config)).0))
}

pub fn disk_factory(config: &ModuleConfig) -> Result<crate::BoxedModule> {
    Ok(Box::new(FakeModule::counting("Disk", refresh_from(config)).0))
}

pub fn failing_factory(_config: &ModuleConfig) -> Result<crate::BoxedModule> {
    Err(anyhow::anyhow!("no sensor available"))
}
