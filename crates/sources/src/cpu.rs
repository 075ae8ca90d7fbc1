//! CPU module
//!
//! Shows per-core (or averaged) utilization as a bar glyph or a percentage,
//! or the package temperature read from the kernel's thermal zones.

use crate::util::{assemble, read_i64, read_line};
use anyhow::Result;
use sensbar_core::{BoxedModule, Module, ModuleMetadata};
use sensbar_types::module_configs::{CpuConfig, CpuMonitor};
use sensbar_types::{gradient_color, Align, Block, ModuleConfig};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use sysinfo::{CpuRefreshKind, RefreshKind, System, MINIMUM_CPU_UPDATE_INTERVAL};

const THERMAL_ROOT: &str = "/sys/class/thermal";
const PACKAGE_ZONE_TYPE: &str = "x86_pkg_temp";

/// Eight bar heights, lowest first
const GRAPH_GLYPHS: [char; 8] = ['▁', '▂', '▃', '▄', '▅', '▆', '▇', '█'];

pub struct CpuModule {
    metadata: ModuleMetadata,
    config: CpuConfig,
    system: System,
    last_refresh: Instant,
    thermal_root: PathBuf,
}

impl CpuModule {
    pub fn new(config: CpuConfig) -> Self {
        // Usage is measured between two refreshes; this is the first one
        let system = System::new_with_specifics(
            RefreshKind::new().with_cpu(CpuRefreshKind::new().with_cpu_usage()),
        );

        Self {
            metadata: ModuleMetadata::new("CPU", "CPU", "CPU utilization and temperature"),
            config,
            system,
            last_refresh: Instant::now(),
            thermal_root: PathBuf::from(THERMAL_ROOT),
        }
    }

    pub fn create(config: &ModuleConfig) -> Result<BoxedModule> {
        Ok(Box::new(Self::new(CpuConfig::from_config(config))))
    }

    /// Runs on the blocking pool, so waiting out the minimum interval is fine
    fn usage(&mut self) -> Vec<f32> {
        let wait = settle_delay(self.last_refresh.elapsed());
        if !wait.is_zero() {
            std::thread::sleep(wait);
        }
        self.system.refresh_cpu_usage();
        self.last_refresh = Instant::now();
        if self.config.average {
            vec![self.system.global_cpu_usage()]
        } else {
            self.system.cpus().iter().map(|cpu| cpu.cpu_usage()).collect()
        }
    }

    fn usage_block(&self, usage: f64) -> Block {
        let block = self.config.base.inner_block();
        let block = match self.config.monitor {
            CpuMonitor::Percent => block
                .with_text(format!("{}", usage as u64))
                .with_min_width("99")
                .with_align(Align::Right),
            _ => block.with_text(graph_glyph(usage).to_string()),
        };
        block.with_color(gradient_color(usage / 100.0))
    }

    fn temperature_block(&self, celsius: i64) -> Block {
        self.config
            .base
            .inner_block()
            .with_text(format!("{}℃", celsius))
            .with_color(gradient_color(self.config.temperature_fraction(celsius)))
    }
}

/// How long to wait before usage figures are meaningful again
fn settle_delay(since_last_refresh: Duration) -> Duration {
    MINIMUM_CPU_UPDATE_INTERVAL.saturating_sub(since_last_refresh)
}

/// Glyph for a usage percentage
fn graph_glyph(usage: f64) -> char {
    let index = ((usage.clamp(0.0, 100.0) / 100.0) * 7.0) as usize;
    GRAPH_GLYPHS[index.min(GRAPH_GLYPHS.len() - 1)]
}

/// Package temperatures in °C, one per `x86_pkg_temp` zone, in zone order
fn package_temperatures(thermal_root: &Path) -> Vec<i64> {
    let entries = match fs::read_dir(thermal_root) {
        Ok(entries) => entries,
        Err(e) => {
            log::warn!("Failed to list thermal zones in {}: {}", thermal_root.display(), e);
            return Vec::new();
        }
    };

    let mut zones: Vec<PathBuf> = entries
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_name().to_string_lossy().starts_with("thermal_zone"))
        .map(|entry| entry.path())
        .collect();
    zones.sort();

    zones
        .iter()
        .filter(|zone| read_line(&zone.join("type")).as_deref() == Some(PACKAGE_ZONE_TYPE))
        .filter_map(|zone| read_i64(&zone.join("temp")))
        .map(|millidegrees| millidegrees / 1000)
        .collect()
}

impl Module for CpuModule {
    fn metadata(&self) -> &ModuleMetadata {
        &self.metadata
    }

    fn refresh_interval(&self) -> Duration {
        self.config.base.refresh
    }

    fn make_blocks(&mut self) -> Vec<Block> {
        let values = match self.config.monitor {
            CpuMonitor::Graph | CpuMonitor::Percent => self
                .usage()
                .into_iter()
                .map(|usage| self.usage_block(usage as f64))
                .collect(),
            CpuMonitor::Temp => package_temperatures(&self.thermal_root)
                .into_iter()
                .map(|celsius| self.temperature_block(celsius))
                .collect(),
        };
        assemble(&self.config.base, values)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sensbar_types::Separator;
    use serde_json::json;

    fn module(value: serde_json::Value) -> CpuModule {
        CpuModule::new(CpuConfig::from_config(&ModuleConfig::from_value(value)))
    }

    fn write_zone(root: &Path, name: &str, kind: &str, millidegrees: &str) {
        let zone = root.join(name);
        fs::create_dir_all(&zone).unwrap();
        fs::write(zone.join("type"), format!("{}\n", kind)).unwrap();
        fs::write(zone.join("temp"), format!("{}\n", millidegrees)).unwrap();
    }

    #[test]
    fn test_graph_glyph_scale() {
        assert_eq!(graph_glyph(0.0), '▁');
        assert_eq!(graph_glyph(50.0), '▄');
        assert_eq!(graph_glyph(99.0), '▇');
        assert_eq!(graph_glyph(100.0), '█');
        assert_eq!(graph_glyph(250.0), '█');
    }

    #[test]
    fn test_settle_delay() {
        assert_eq!(settle_delay(Duration::ZERO), MINIMUM_CPU_UPDATE_INTERVAL);
        assert_eq!(settle_delay(MINIMUM_CPU_UPDATE_INTERVAL * 2), Duration::ZERO);
    }

    #[test]
    fn test_first_usage_waits_for_minimum_interval() {
        let mut cpu = module(json!({ "average": true }));
        let created = cpu.last_refresh;
        cpu.make_blocks();
        assert!(cpu.last_refresh.duration_since(created) >= MINIMUM_CPU_UPDATE_INTERVAL);
    }

    #[test]
    fn test_percent_block_shape() {
        let cpu = module(json!({ "monitor": "percent" }));
        let block = cpu.usage_block(42.7);
        assert_eq!(block.full_text, "42");
        assert_eq!(block.min_width, "99");
        assert_eq!(block.align, Some(Align::Right));
    }

    #[test]
    fn test_average_reports_one_block() {
        let mut cpu = module(json!({ "average": true, "label": "cpu" }));
        let blocks = cpu.make_blocks();
        assert_eq!(blocks.len(), 2);
        assert_eq!(blocks[0].full_text, "cpu");
        assert!(GRAPH_GLYPHS.iter().any(|g| blocks[1].full_text == g.to_string()));
        assert_eq!(blocks[1].separator, Separator::Drawn { width: 9 });
    }

    #[test]
    fn test_temperature_reads_package_zones_only() {
        let dir = tempfile::tempdir().unwrap();
        write_zone(dir.path(), "thermal_zone0", "acpitz", "30000");
        write_zone(dir.path(), "thermal_zone1", "x86_pkg_temp", "60500");
        write_zone(dir.path(), "thermal_zone2", "x86_pkg_temp", "bogus");
        write_zone(dir.path(), "cooling_device0", "x86_pkg_temp", "99000");

        assert_eq!(package_temperatures(dir.path()), vec![60]);

        let mut cpu = module(json!({ "monitor": "temp" }));
        cpu.thermal_root = dir.path().to_path_buf();
        let blocks = cpu.make_blocks();
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].full_text, "60℃");
        assert_eq!(blocks[0].color, gradient_color(0.5));
        assert_eq!(blocks[0].separator, Separator::Drawn { width: 9 });
    }

    #[test]
    fn test_missing_thermal_root_yields_no_values() {
        assert!(package_temperatures(Path::new("/nonexistent/thermal")).is_empty());
    }
}
