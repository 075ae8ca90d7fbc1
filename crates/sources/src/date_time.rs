//! Date and time module

use crate::util::assemble;
use anyhow::Result;
use chrono::format::{Item, StrftimeItems};
use chrono::{DateTime, Local, Utc};
use chrono_tz::Tz;
use sensbar_core::{BoxedModule, Module, ModuleMetadata};
use sensbar_types::module_configs::DateTimeConfig;
use sensbar_types::{Block, ModuleConfig};
use std::fmt::Write;
use std::time::Duration;

/// Shows the current time in a strftime format
pub struct DateTimeModule {
    metadata: ModuleMetadata,
    config: DateTimeConfig,
    /// None means the system's local zone
    timezone: Option<Tz>,
}

impl DateTimeModule {
    pub fn new(mut config: DateTimeConfig) -> Self {
        if StrftimeItems::new(&config.format).any(|item| matches!(item, Item::Error)) {
            log::warn!(
                "Invalid date format '{}', using the default",
                config.format
            );
            config.format = DateTimeConfig::default().format;
        }

        let timezone = if config.timezone == "Local" {
            None
        } else {
            match config.timezone.parse::<Tz>() {
                Ok(tz) => Some(tz),
                Err(e) => {
                    log::warn!("Unknown timezone '{}' ({}), using local time", config.timezone, e);
                    None
                }
            }
        };

        Self {
            metadata: ModuleMetadata::new("DateTime", "Date & Time", "Current date and time"),
            config,
            timezone,
        }
    }

    pub fn create(config: &ModuleConfig) -> Result<BoxedModule> {
        Ok(Box::new(Self::new(DateTimeConfig::from_config(config))))
    }

    fn render(&self, now: DateTime<Utc>) -> String {
        let mut text = String::new();
        let written = match self.timezone {
            Some(tz) => write!(text, "{}", now.with_timezone(&tz).format(&self.config.format)),
            None => write!(text, "{}", now.with_timezone(&Local).format(&self.config.format)),
        };
        if written.is_err() {
            log::error!("Failed to format time with '{}'", self.config.format);
            return "invalid date format".to_string();
        }
        text
    }

    fn blocks_at(&self, now: DateTime<Utc>) -> Vec<Block> {
        let base = &self.config.base;
        assemble(base, vec![base.inner_block().with_text(self.render(now))])
    }
}

impl Module for DateTimeModule {
    fn metadata(&self) -> &ModuleMetadata {
        &self.metadata
    }

    fn refresh_interval(&self) -> Duration {
        self.config.base.refresh
    }

    fn make_blocks(&mut self) -> Vec<Block> {
        self.blocks_at(Utc::now())
    }
}
