//! Configuration management

mod settings;

pub use settings::{ConfigError, StatusConfig};
