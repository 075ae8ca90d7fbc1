//! Battery module, read from the kernel's power_supply class

use crate::util::{assemble, read_i64, read_line};
use anyhow::Result;
use sensbar_core::{BoxedModule, Module, ModuleMetadata};
use sensbar_types::module_configs::{BatteryAttribute, BatteryConfig};
use sensbar_types::{gradient_color, Block, ModuleConfig};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

const POWER_SUPPLY_ROOT: &str = "/sys/class/power_supply";

#[derive(Debug, Clone, PartialEq)]
struct BatteryReading {
    /// Charge as a fraction of the last full charge
    level: Option<f64>,
    state: String,
}

impl BatteryReading {
    fn read(dir: &Path) -> Self {
        let ratio = |now: &str, full: &str| -> Option<f64> {
            let now = read_i64(&dir.join(now))?;
            let full = read_i64(&dir.join(full))?;
            (full > 0).then(|| now as f64 / full as f64)
        };

        let level = ratio("energy_now", "energy_full")
            .or_else(|| ratio("charge_now", "charge_full"))
            .or_else(|| read_i64(&dir.join("capacity")).map(|pct| pct as f64 / 100.0));

        Self {
            level,
            state: read_line(&dir.join("status")).unwrap_or_else(|| "Unknown".to_string()),
        }
    }
}

/// Supply directories whose `type` is `Battery`, sorted by name
fn battery_dirs(root: &Path) -> Vec<PathBuf> {
    let entries = match fs::read_dir(root) {
        Ok(entries) => entries,
        Err(e) => {
            log::warn!("Failed to list power supplies in {}: {}", root.display(), e);
            return Vec::new();
        }
    };

    let mut dirs: Vec<PathBuf> = entries
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| read_line(&path.join("type")).as_deref() == Some("Battery"))
        .collect();
    dirs.sort();
    dirs
}

/// Shows charge level or charging state, one block per battery
pub struct BatteryModule {
    metadata: ModuleMetadata,
    config: BatteryConfig,
    root: PathBuf,
}

impl BatteryModule {
    pub fn new(config: BatteryConfig) -> Self {
        Self {
            metadata: ModuleMetadata::new("Battery", "Battery", "Battery charge and state"),
            config,
            root: PathBuf::from(POWER_SUPPLY_ROOT),
        }
    }

    pub fn create(config: &ModuleConfig) -> Result<BoxedModule> {
        Ok(Box::new(Self::new(BatteryConfig::from_config(config))))
    }

    fn battery_block(&self, reading: &BatteryReading) -> Block {
        let block = self.config.base.inner_block();
        match self.config.attribute {
            BatteryAttribute::Percent => match reading.level {
                Some(level) => block
                    .with_text(format!("{}", (level * 100.0) as u64))
                    .with_color(gradient_color(1.0 - level)),
                None => block.with_text("?"),
            },
            BatteryAttribute::State => block.with_text(reading.state.clone()),
        }
    }
}

impl Module for BatteryModule {
    fn metadata(&self) -> &ModuleMetadata {
        &self.metadata
    }

    fn refresh_interval(&self) -> Duration {
        self.config.base.refresh
    }

    fn make_blocks(&mut self) -> Vec<Block> {
        let values = battery_dirs(&self.root)
            .iter()
            .map(|dir| self.battery_block(&BatteryReading::read(dir)))
            .collect();
        assemble(&self.config.base, values)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sensbar_types::Separator;
    use serde_json::json;

    fn write_supply(root: &Path, name: &str, files: &[(&str, &str)]) {
        let dir = root.join(name);
        fs::create_dir_all(&dir).unwrap();
        for (file, content) in files {
            fs::write(dir.join(file), format!("{}\n", content)).unwrap();
        }
    }

    fn module(root: &Path, attribute: &str) -> BatteryModule {
        let mut battery = BatteryModule::new(BatteryConfig::from_config(
            &ModuleConfig::from_value(json!({ "attribute": attribute })),
        ));
        battery.root = root.to_path_buf();
        battery
    }

    fn fake_sysfs() -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        write_supply(dir.path(), "AC", &[("type", "Mains"), ("online", "1")]);
        write_supply(
            dir.path(),
            "BAT0",
            &[
                ("type", "Battery"),
                ("status", "Discharging"),
                ("energy_now", "25000"),
                ("energy_full", "100000"),
            ],
        );
        write_supply(
            dir.path(),
            "BAT1",
            &[("type", "Battery"), ("status", "Full"), ("capacity", "100")],
        );
        dir
    }

    #[test]
    fn test_percent_per_battery() {
        let sysfs = fake_sysfs();
        let blocks = module(sysfs.path(), "percent").make_blocks();

        let texts: Vec<&str> = blocks.iter().map(|b| b.full_text.as_str()).collect();
        assert_eq!(texts, vec!["25", "100"]);
        assert_eq!(blocks[0].color, gradient_color(0.75));
        assert_eq!(blocks[1].color, "#00ff00");
        assert_eq!(blocks[1].separator, Separator::Drawn { width: 9 });
    }

    #[test]
    fn test_state() {
        let sysfs = fake_sysfs();
        let blocks = module(sysfs.path(), "state").make_blocks();
        let texts: Vec<&str> = blocks.iter().map(|b| b.full_text.as_str()).collect();
        assert_eq!(texts, vec!["Discharging", "Full"]);
    }

    #[test]
    fn test_charge_files_and_unknown_level() {
        let dir = tempfile::tempdir().unwrap();
        write_supply(
            dir.path(),
            "BAT0",
            &[("type", "Battery"), ("charge_now", "1500"), ("charge_full", "3000")],
        );
        write_supply(dir.path(), "BAT1", &[("type", "Battery")]);

        let blocks = module(dir.path(), "percent").make_blocks();
        assert_eq!(blocks[0].full_text, "50");
        assert_eq!(blocks[1].full_text, "?");

        let states = module(dir.path(), "state").make_blocks();
        assert_eq!(states[0].full_text, "Unknown");
    }

    #[test]
    fn test_no_batteries() {
        let dir = tempfile::tempdir().unwrap();
        assert!(module(dir.path(), "percent").make_blocks().is_empty());
    }
}
