//! CPU module configuration.

use super::BaseModuleConfig;
use crate::module_config::ModuleConfig;

/// What the CPU module displays
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CpuMonitor {
    /// One bar glyph per core
    #[default]
    Graph,
    /// Usage percentage per core
    Percent,
    /// Package temperature from thermal zones
    Temp,
}

impl CpuMonitor {
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "graph" => Some(CpuMonitor::Graph),
            "percent" => Some(CpuMonitor::Percent),
            "temp" => Some(CpuMonitor::Temp),
            _ => None,
        }
    }
}

fn default_temp_green() -> i64 {
    40
}

fn default_temp_red() -> i64 {
    80
}

/// Configured temperatures are clamped into this range (°C)
const TEMP_MIN: i64 = -273;
const TEMP_MAX: i64 = 1000;

fn clamp_temperature(key: &str, celsius: i64) -> i64 {
    let clamped = celsius.clamp(TEMP_MIN, TEMP_MAX);
    if clamped != celsius {
        log::warn!("{} ({}) is out of range, using {}", key, celsius, clamped);
    }
    clamped
}

/// CPU module configuration
#[derive(Debug, Clone, PartialEq)]
pub struct CpuConfig {
    pub base: BaseModuleConfig,
    pub monitor: CpuMonitor,
    /// Report one averaged value instead of per-core values
    pub average: bool,
    /// Temperature (°C) shown fully green
    pub temp_green: i64,
    /// Temperature (°C) shown fully red
    pub temp_red: i64,
}

impl Default for CpuConfig {
    fn default() -> Self {
        Self {
            base: BaseModuleConfig::default(),
            monitor: CpuMonitor::default(),
            average: false,
            temp_green: default_temp_green(),
            temp_red: default_temp_red(),
        }
    }
}

impl CpuConfig {
    pub fn from_config(config: &ModuleConfig) -> Self {
        let name = config.get_str("monitor", "graph");
        let monitor = CpuMonitor::from_name(&name).unwrap_or_else(|| {
            log::warn!("Unknown cpu monitor '{}', using graph", name);
            CpuMonitor::default()
        });

        let temp_green =
            clamp_temperature("temp_green", config.get_i64("temp_green", default_temp_green()));
        let mut temp_red =
            clamp_temperature("temp_red", config.get_i64("temp_red", default_temp_red()));
        if temp_red <= temp_green {
            log::warn!(
                "temp_red ({}) must be above temp_green ({}), widening the range",
                temp_red,
                temp_green
            );
            temp_red = temp_green + 1;
        }

        Self {
            base: BaseModuleConfig::from_config(config),
            monitor,
            average: config.get_bool("average", false),
            temp_green,
            temp_red,
        }
    }

    /// Fraction of the green→red range a temperature sits at
    pub fn temperature_fraction(&self, celsius: i64) -> f64 {
        let above_green = (celsius as f64 - self.temp_green as f64).max(0.0);
        above_green / (self.temp_red as f64 - self.temp_green as f64)
    }
}
