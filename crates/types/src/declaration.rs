//! One `modules:` entry of the status configuration.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::module_config::ModuleConfig;

/// A configured module: registered name plus its raw settings
///
/// Parsing is lenient. A bare string is taken as a name with no settings;
/// an entry without a usable `name` keeps `name: None` so the caller can log
/// and skip it instead of rejecting the whole file.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ModuleDeclaration {
    pub name: Option<String>,
    pub config: ModuleConfig,
}

impl ModuleDeclaration {
    pub fn new(name: &str, config: ModuleConfig) -> Self {
        Self {
            name: Some(name.to_string()),
            config,
        }
    }

    pub fn from_value(value: Value) -> Self {
        match value {
            Value::String(name) => Self {
                name: Some(name),
                config: ModuleConfig::default(),
            },
            Value::Object(mut map) => {
                let name = match map.remove("name") {
                    Some(Value::String(name)) if !name.is_empty() => Some(name),
                    Some(Value::String(_)) | None => None,
                    Some(other) => {
                        log::warn!("Module name {} is not a string", other);
                        None
                    }
                };
                let config = map
                    .remove("config")
                    .map(ModuleConfig::from_value)
                    .unwrap_or_default();
                Self { name, config }
            }
            other => {
                log::warn!("Module entry {} is not a mapping", other);
                Self::default()
            }
        }
    }
}

impl<'de> Deserialize<'de> for ModuleDeclaration {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Ok(Self::from_value(value))
    }
}
