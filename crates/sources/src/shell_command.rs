//! Shell command module: shows a command's trimmed stdout

use crate::util::assemble;
use anyhow::{anyhow, Context, Result};
use sensbar_core::{BoxedModule, Module, ModuleMetadata};
use sensbar_types::module_configs::ShellCommandConfig;
use sensbar_types::{gradient_color, Block, ModuleConfig};
use std::process::Command;
use std::time::Duration;

pub struct ShellCommandModule {
    metadata: ModuleMetadata,
    config: ShellCommandConfig,
}

impl ShellCommandModule {
    pub fn new(config: ShellCommandConfig) -> Self {
        Self {
            metadata: ModuleMetadata::new("ShellCommand", "Shell Command", "Output of a shell command"),
            config,
        }
    }

    pub fn create(config: &ModuleConfig) -> Result<BoxedModule> {
        Ok(Box::new(Self::new(ShellCommandConfig::from_config(config))))
    }

    fn run(&self) -> Result<String> {
        let output = Command::new(&self.config.shell)
            .arg("-c")
            .arg(&self.config.cmd)
            .output()
            .with_context(|| format!("failed to run {}", self.config.shell))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            let stderr = stderr.trim();
            if stderr.is_empty() {
                return Err(anyhow!("{}", output.status));
            }
            return Err(anyhow!("{}: {}", output.status, stderr));
        }

        Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
    }
}

impl Module for ShellCommandModule {
    fn metadata(&self) -> &ModuleMetadata {
        &self.metadata
    }

    fn refresh_interval(&self) -> Duration {
        self.config.base.refresh
    }

    fn make_blocks(&mut self) -> Vec<Block> {
        let base = &self.config.base;
        if self.config.cmd.is_empty() {
            return assemble(base, Vec::new());
        }

        let block = match self.run() {
            Ok(text) => base.inner_block().with_text(text),
            Err(e) => {
                log::warn!("Command '{}' failed: {:#}", self.config.cmd, e);
                base.inner_block()
                    .with_text(format!("{:#}", e))
                    .with_color(gradient_color(1.0))
            }
        };
        assemble(base, vec![block])
    }
}
