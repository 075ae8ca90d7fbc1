//! Helpers shared by the built-in modules

use sensbar_types::{BaseModuleConfig, Block};
use std::fs;
use std::path::Path;

/// Prepend the label block and shape the last value block as the module's final block.
///
/// With no value blocks, only the label (if any) is returned; it keeps its
/// inner spacing.
pub fn assemble(base: &BaseModuleConfig, mut values: Vec<Block>) -> Vec<Block> {
    if let Some(last) = values.last_mut() {
        base.finish_block(last);
    }

    let mut blocks = Vec::with_capacity(values.len() + 1);
    blocks.extend(base.label_block());
    blocks.extend(values);
    blocks
}

/// First line of a small sysfs-style file, trimmed
pub fn read_line(path: &Path) -> Option<String> {
    let content = fs::read_to_string(path).ok()?;
    content.lines().next().map(|line| line.trim().to_string())
}

/// Read a sysfs attribute as an integer
pub fn read_i64(path: &Path) -> Option<i64> {
    read_line(path)?.parse().ok()
}

const IEC_UNITS: [&str; 7] = ["B", "KiB", "MiB", "GiB", "TiB", "PiB", "EiB"];

/// Human-readable size with binary prefixes, e.g. `1.5 KiB` or `82 MiB`
pub fn format_ibytes(bytes: u64) -> String {
    if bytes < 1024 {
        return format!("{} B", bytes);
    }

    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < IEC_UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }

    if value < 10.0 {
        format!("{:.1} {}", value, IEC_UNITS[unit])
    } else {
        format!("{:.0} {}", value, IEC_UNITS[unit])
    }
}
