//! Module trait and related types

use sensbar_types::Block;
use std::time::Duration;

/// Metadata about a module instance
#[derive(Debug, Clone)]
pub struct ModuleMetadata {
    /// Registered module type (e.g. "DateTime")
    pub id: String,
    /// Human-readable name
    pub name: String,
    /// Description of what this module shows
    pub description: String,
}

impl ModuleMetadata {
    pub fn new(id: &str, name: &str, description: &str) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            description: description.to_string(),
        }
    }
}

/// Trait for all modules
///
/// A module turns some piece of system state into a sequence of blocks.
/// The engine calls [`Module::make_blocks`] on the blocking thread pool once
/// per refresh interval and publishes the result; modules never talk to the
/// aggregator directly.
pub trait Module: Send {
    /// Get metadata about this module
    fn metadata(&self) -> &ModuleMetadata;

    /// How often `make_blocks` should run
    fn refresh_interval(&self) -> Duration;

    /// Compute the blocks for this cycle
    ///
    /// May block on system calls or subprocesses, but should return within
    /// roughly one refresh interval. Failures are rendered as data (an
    /// error-text block, or fewer blocks), never returned as errors.
    fn make_blocks(&mut self) -> Vec<Block>;
}

/// Type-erased module for dynamic dispatch
pub type BoxedModule = Box<dyn Module>;
