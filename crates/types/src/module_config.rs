//! Loosely typed per-module configuration.
//!
//! Module settings arrive from the config file as an arbitrary mapping.
//! Lookups never fail: a missing or mistyped key yields the caller's default.

use serde::{Deserialize, Deserializer};
use serde_json::{Map, Value};

/// Raw key/value settings for one module
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ModuleConfig {
    values: Map<String, Value>,
}

impl ModuleConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from an arbitrary JSON value; anything but an object becomes empty
    pub fn from_value(value: Value) -> Self {
        match value {
            Value::Object(values) => Self { values },
            Value::Null => Self::default(),
            other => {
                log::warn!("Module config is not a mapping ({}), ignoring it", other);
                Self::default()
            }
        }
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// String value, or `default` when missing or not a string
    pub fn get_str(&self, key: &str, default: &str) -> String {
        match self.values.get(key) {
            Some(Value::String(s)) => s.clone(),
            Some(other) => {
                self.mistyped(key, other, "string");
                default.to_string()
            }
            None => default.to_string(),
        }
    }

    /// Boolean value; also accepts `"true"`/`"false"` strings
    pub fn get_bool(&self, key: &str, default: bool) -> bool {
        match self.values.get(key) {
            Some(Value::Bool(b)) => *b,
            Some(Value::String(s)) if s.eq_ignore_ascii_case("true") => true,
            Some(Value::String(s)) if s.eq_ignore_ascii_case("false") => false,
            Some(other) => {
                self.mistyped(key, other, "bool");
                default
            }
            None => default,
        }
    }

    /// Non-negative integer; accepts whole floats and numeric strings
    pub fn get_u64(&self, key: &str, default: u64) -> u64 {
        match self.values.get(key) {
            Some(value) => match Self::as_i64(value) {
                Some(n) if n >= 0 => n as u64,
                _ => {
                    self.mistyped(key, value, "non-negative integer");
                    default
                }
            },
            None => default,
        }
    }

    /// Signed integer; accepts whole floats and numeric strings
    pub fn get_i64(&self, key: &str, default: i64) -> i64 {
        match self.values.get(key) {
            Some(value) => Self::as_i64(value).unwrap_or_else(|| {
                self.mistyped(key, value, "integer");
                default
            }),
            None => default,
        }
    }

    pub fn get_f64(&self, key: &str, default: f64) -> f64 {
        match self.values.get(key) {
            Some(Value::Number(n)) => n.as_f64().unwrap_or(default),
            Some(Value::String(s)) => s.trim().parse().unwrap_or_else(|_| {
                log::warn!("Config key '{}' = {:?} is not a number, using {}", key, s, default);
                default
            }),
            Some(other) => {
                self.mistyped(key, other, "number");
                default
            }
            None => default,
        }
    }

    fn as_i64(value: &Value) -> Option<i64> {
        match value {
            Value::Number(n) => n.as_i64().or_else(|| {
                n.as_f64()
                    .filter(|f| f.is_finite() && f.fract() == 0.0)
                    .map(|f| f as i64)
            }),
            Value::String(s) => s.trim().parse().ok(),
            _ => None,
        }
    }

    fn mistyped(&self, key: &str, value: &Value, expected: &str) {
        log::warn!(
            "Config key '{}' = {} is not a {}, using default",
            key,
            value,
            expected
        );
    }
}

impl<'de> Deserialize<'de> for ModuleConfig {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Ok(Self::from_value(value))
    }
}
