//! Typed configuration for every built-in module.
//!
//! Each config is resolved from a [`ModuleConfig`](crate::ModuleConfig) with
//! per-key fallbacks, so building one never fails.

pub mod base;
pub mod battery;
pub mod cpu;
pub mod date_time;
pub mod load_average;
pub mod memory;
pub mod network;
pub mod shell_command;
pub mod uptime;

pub use base::BaseModuleConfig;
pub use battery::{BatteryAttribute, BatteryConfig};
pub use cpu::{CpuConfig, CpuMonitor};
pub use date_time::DateTimeConfig;
pub use load_average::LoadAverageConfig;
pub use memory::{MemoryAttribute, MemoryConfig};
pub use network::{NetworkConfig, NetworkInterface};
pub use shell_command::ShellCommandConfig;
pub use uptime::UptimeConfig;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ModuleConfig;
    use serde_json::json;

    fn config(value: serde_json::Value) -> ModuleConfig {
        ModuleConfig::from_value(value)
    }

    #[test]
    fn test_cpu_config_parsing() {
        let cpu = CpuConfig::from_config(&config(json!({
            "monitor": "temp",
            "average": true,
            "temp_green": 50,
            "temp_red": 90,
        })));
        assert_eq!(cpu.monitor, CpuMonitor::Temp);
        assert!(cpu.average);
        assert!((cpu.temperature_fraction(70) - 0.5).abs() < f64::EPSILON);
        assert_eq!(cpu.temperature_fraction(20), 0.0);
    }

    #[test]
    fn test_cpu_config_unknown_monitor_and_inverted_range() {
        let cpu = CpuConfig::from_config(&config(json!({
            "monitor": "sparkline",
            "temp_green": 60,
            "temp_red": 30,
        })));
        assert_eq!(cpu.monitor, CpuMonitor::Graph);
        assert_eq!(cpu.temp_red, 61);
    }

    #[test]
    fn test_cpu_config_extreme_temperatures_are_clamped() {
        let cpu = CpuConfig::from_config(&config(json!({ "temp_green": i64::MAX })));
        assert_eq!(cpu.temp_green, 1000);
        assert_eq!(cpu.temp_red, 1001);
        let hottest = cpu.temperature_fraction(i64::MAX);
        assert!(hottest.is_finite() && hottest > 1.0);

        let cpu = CpuConfig::from_config(&config(json!({
            "temp_green": i64::MIN,
            "temp_red": 100,
        })));
        assert_eq!(cpu.temp_green, -273);
        assert_eq!(cpu.temp_red, 100);
        let fraction = cpu.temperature_fraction(60);
        assert!((fraction - 333.0 / 373.0).abs() < 1e-9);
        assert_eq!(cpu.temperature_fraction(i64::MIN), 0.0);
    }

    #[test]
    fn test_memory_attribute_fallback() {
        let memory = MemoryConfig::from_config(&config(json!({ "attribute": "swap_free" })));
        assert_eq!(memory.attribute, MemoryAttribute::SwapFree);
        assert!(memory.attribute.is_swap());

        let memory = MemoryConfig::from_config(&config(json!({ "attribute": "vram" })));
        assert_eq!(memory.attribute, MemoryAttribute::RamUsedPercent);
    }

    #[test]
    fn test_network_interface() {
        let all = NetworkConfig::from_config(&ModuleConfig::new());
        assert_eq!(all.interface, NetworkInterface::All);

        let named = NetworkConfig::from_config(&config(json!({ "interface": "wlan0" })));
        assert_eq!(named.interface, NetworkInterface::Named("wlan0".to_string()));
    }

    #[test]
    fn test_uptime_default_format_is_adaptive() {
        assert_eq!(UptimeConfig::from_config(&ModuleConfig::new()).format, None);
        let custom = UptimeConfig::from_config(&config(json!({ "format": "%dd %hh" })));
        assert_eq!(custom.format.as_deref(), Some("%dd %hh"));
    }

    #[test]
    fn test_date_time_and_shell_defaults() {
        let dt = DateTimeConfig::from_config(&config(json!({ "timezone": 3 })));
        assert_eq!(dt.timezone, "Local");
        assert_eq!(dt.format, "%Y-%m-%d %H:%M:%S");

        let sh = ShellCommandConfig::from_config(&config(json!({ "cmd": "echo hi" })));
        assert_eq!(sh.cmd, "echo hi");
        assert_eq!(sh.shell, "/bin/bash");
    }

    #[test]
    fn test_battery_attribute() {
        let bat = BatteryConfig::from_config(&config(json!({ "attribute": "state" })));
        assert_eq!(bat.attribute, BatteryAttribute::State);
    }
}
