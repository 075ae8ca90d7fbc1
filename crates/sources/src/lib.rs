//! sensbar-sources: Built-in status modules for sensbar.

mod battery;
mod cpu;
mod date_time;
mod load_average;
mod memory;
mod network;
mod shell_command;
mod uptime;
mod util;

pub use battery::BatteryModule;
pub use cpu::CpuModule;
pub use date_time::DateTimeModule;
pub use load_average::LoadAverageModule;
pub use memory::MemoryModule;
pub use network::NetworkModule;
pub use shell_command::ShellCommandModule;
pub use uptime::{adaptive_format, format_duration, UptimeModule};

use sensbar_core::Registry;

/// Register all built-in modules under their configuration names
pub fn register_all(registry: &mut Registry) {
    registry.register("DateTime", DateTimeModule::create);
    registry.register("LoadAverage", LoadAverageModule::create);
    registry.register("Memory", MemoryModule::create);
    registry.register("CPU", CpuModule::create);
    registry.register("Network", NetworkModule::create);
    registry.register("Uptime", UptimeModule::create);
    registry.register("Battery", BatteryModule::create);
    registry.register("ShellCommand", ShellCommandModule::create);

    log::debug!("Registered {} built-in modules", registry.list().len());
}
