//! Uptime module

use crate::util::assemble;
use anyhow::{bail, Result};
use sensbar_core::{BoxedModule, Module, ModuleMetadata};
use sensbar_types::module_configs::UptimeConfig;
use sensbar_types::{gradient_color, Block, ModuleConfig};
use std::time::Duration;
use sysinfo::System;

const MINUTE: u64 = 60;
const HOUR: u64 = 60 * MINUTE;
const DAY: u64 = 24 * HOUR;
const WEEK: u64 = 7 * DAY;
const YEAR: u64 = 365 * DAY;

/// Seconds per unit for each format verb, largest first
const UNITS: [(char, u64); 6] = [
    ('y', YEAR),
    ('w', WEEK),
    ('d', DAY),
    ('h', HOUR),
    ('m', MINUTE),
    ('s', 1),
];

/// Format `seconds` with `%y %w %d %h %m %s` verbs (`%%` for a literal percent).
///
/// Units missing from the format roll into the next smaller unit that is
/// present, so `%dd%hh` shows eight days rather than one week and one day.
pub fn format_duration(seconds: u64, format: &str) -> Result<String> {
    let mut verbs = Vec::new();
    let mut chars = format.chars();
    while let Some(c) = chars.next() {
        if c != '%' {
            continue;
        }
        match chars.next() {
            Some('%') => {}
            Some(verb) if UNITS.iter().any(|(unit, _)| *unit == verb) => verbs.push(verb),
            Some(verb) => bail!("unknown duration verb %{}", verb),
            None => bail!("dangling % at end of duration format"),
        }
    }

    let mut remaining = seconds;
    let mut values = [0u64; 6];
    for (i, (unit, size)) in UNITS.iter().enumerate() {
        if verbs.contains(unit) {
            values[i] = remaining / size;
            remaining %= size;
        }
    }

    let mut out = String::with_capacity(format.len() + 8);
    let mut chars = format.chars();
    while let Some(c) = chars.next() {
        if c != '%' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('%') => out.push('%'),
            Some(verb) => {
                if let Some(i) = UNITS.iter().position(|(unit, _)| *unit == verb) {
                    out.push_str(&values[i].to_string());
                }
            }
            None => {}
        }
    }
    Ok(out)
}

/// Format that starts at the largest non-zero unit
pub fn adaptive_format(seconds: u64) -> &'static str {
    if seconds >= YEAR {
        "%yy%ww%dd%hh%mm%ss"
    } else if seconds >= WEEK {
        "%ww%dd%hh%mm%ss"
    } else if seconds >= DAY {
        "%dd%hh%mm%ss"
    } else if seconds >= HOUR {
        "%hh%mm%ss"
    } else {
        "%mm%ss"
    }
}

/// Shows how long the machine has been up
pub struct UptimeModule {
    metadata: ModuleMetadata,
    config: UptimeConfig,
}

impl UptimeModule {
    pub fn new(config: UptimeConfig) -> Self {
        Self {
            metadata: ModuleMetadata::new("Uptime", "Uptime", "Time since boot"),
            config,
        }
    }

    pub fn create(config: &ModuleConfig) -> Result<BoxedModule> {
        Ok(Box::new(Self::new(UptimeConfig::from_config(config))))
    }

    fn blocks_for(&self, seconds: u64) -> Vec<Block> {
        let format = self
            .config
            .format
            .as_deref()
            .unwrap_or_else(|| adaptive_format(seconds));

        let base = &self.config.base;
        let block = match format_duration(seconds, format) {
            Ok(text) => base.inner_block().with_text(text),
            Err(e) => {
                log::error!("Invalid uptime format '{}': {}", format, e);
                base.inner_block()
                    .with_text(e.to_string())
                    .with_color(gradient_color(1.0))
            }
        };
        assemble(base, vec![block])
    }
}

impl Module for UptimeModule {
    fn metadata(&self) -> &ModuleMetadata {
        &self.metadata
    }

    fn refresh_interval(&self) -> Duration {
        self.config.base.refresh
    }

    fn make_blocks(&mut self) -> Vec<Block> {
        self.blocks_for(System::uptime())
    }
}
