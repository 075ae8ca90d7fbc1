//! ShellCommand module configuration.

use super::BaseModuleConfig;
use crate::module_config::ModuleConfig;

fn default_shell() -> String {
    "/bin/bash".to_string()
}

/// ShellCommand module configuration
#[derive(Debug, Clone, PartialEq)]
pub struct ShellCommandConfig {
    pub base: BaseModuleConfig,
    /// Command line passed to `<shell> -c`; empty disables the module's output
    pub cmd: String,
    pub shell: String,
}

impl Default for ShellCommandConfig {
    fn default() -> Self {
        Self {
            base: BaseModuleConfig::default(),
            cmd: String::new(),
            shell: default_shell(),
        }
    }
}

impl ShellCommandConfig {
    pub fn from_config(config: &ModuleConfig) -> Self {
        Self {
            base: BaseModuleConfig::from_config(config),
            cmd: config.get_str("cmd", ""),
            shell: config.get_str("shell", &default_shell()),
        }
    }
}
