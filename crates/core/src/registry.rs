//! Registry of module constructors

use crate::handle::ModuleHandle;
use crate::module::BoxedModule;
use anyhow::{anyhow, Context, Result};
use log::{info, warn};
use sensbar_types::{ModuleConfig, ModuleDeclaration};
use std::collections::HashMap;
use tokio_util::sync::CancellationToken;

/// Function that creates a module from its configuration
pub type ModuleFactory = fn(&ModuleConfig) -> Result<BoxedModule>;

/// Registry for module constructors
///
/// Built once at startup and passed to whoever resolves the configured
/// module list. Built-in modules register themselves through
/// `sensbar_sources::register_all`; anything else can call
/// [`Registry::register`] before resolution.
pub struct Registry {
    modules: HashMap<String, ModuleFactory>,
}

impl Registry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self {
            modules: HashMap::new(),
        }
    }

    /// Register a module constructor, replacing any previous one with the same name
    pub fn register(&mut self, id: &str, factory: ModuleFactory) {
        if self.modules.insert(id.to_string(), factory).is_some() {
            warn!("Module {} registered twice, keeping the latest", id);
        }
    }

    /// Create a module by name
    pub fn create(&self, id: &str, config: &ModuleConfig) -> Result<BoxedModule> {
        let factory = self
            .modules
            .get(id)
            .ok_or_else(|| anyhow!("no module named {} is registered", id))?;
        factory(config).with_context(|| format!("failed to create module {}", id))
    }

    /// Create a module by name and start its task
    pub fn spawn(
        &self,
        id: &str,
        config: &ModuleConfig,
        parent: &CancellationToken,
    ) -> Result<ModuleHandle> {
        let module = self.create(id, config)?;
        Ok(ModuleHandle::spawn(module, parent))
    }

    /// Start every declared module in order, skipping the ones that cannot start
    ///
    /// The returned handles keep declaration order; a skipped declaration
    /// leaves no gap.
    pub fn start_modules(
        &self,
        declarations: &[ModuleDeclaration],
        parent: &CancellationToken,
    ) -> Vec<ModuleHandle> {
        let mut handles = Vec::with_capacity(declarations.len());

        for (index, declaration) in declarations.iter().enumerate() {
            let Some(name) = declaration.name.as_deref() else {
                warn!("Module #{} has no name, skipping it", index + 1);
                continue;
            };

            match self.spawn(name, &declaration.config, parent) {
                Ok(handle) => handles.push(handle),
                Err(e) => warn!("Failed to load module #{} ({}): {:#}", index + 1, name, e),
            }
        }

        info!(
            "Started {} of {} configured modules",
            handles.len(),
            declarations.len()
        );
        handles
    }

    /// List all registered module names, sorted
    pub fn list(&self) -> Vec<String> {
        let mut names: Vec<String> = self.modules.keys().cloned().collect();
        names.sort();
        names
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}
