//! Network traffic module

use crate::util::{assemble, format_ibytes};
use anyhow::Result;
use once_cell::sync::Lazy;
use sensbar_core::{BoxedModule, Module, ModuleMetadata};
use sensbar_types::module_configs::{NetworkConfig, NetworkInterface};
use sensbar_types::{Block, ModuleConfig};
use std::sync::Mutex;
use std::time::Duration;
use sysinfo::Networks;

/// Shared Networks instance for all Network module instances.
static SHARED_NETWORKS: Lazy<Mutex<Networks>> = Lazy::new(|| {
    log::info!("Creating shared Networks sysinfo instance");
    Mutex::new(Networks::new_with_refreshed_list())
});

/// Turns cumulative byte counters into per-cycle deltas
#[derive(Debug, Default)]
struct TrafficCounter {
    previous: Option<(u64, u64)>,
}

impl TrafficCounter {
    /// Bytes (sent, received) since the last call; zero on the first call
    fn delta(&mut self, sent: u64, received: u64) -> (u64, u64) {
        let delta = match self.previous {
            Some((prev_sent, prev_received)) => (
                sent.saturating_sub(prev_sent),
                received.saturating_sub(prev_received),
            ),
            None => (0, 0),
        };
        self.previous = Some((sent, received));
        delta
    }
}

fn traffic_text(up: u64, down: u64) -> String {
    format!("{} up - {} dn", format_ibytes(up), format_ibytes(down))
}

/// Shows bytes sent and received during the last refresh interval
pub struct NetworkModule {
    metadata: ModuleMetadata,
    config: NetworkConfig,
    counter: TrafficCounter,
}

impl NetworkModule {
    pub fn new(config: NetworkConfig) -> Self {
        Self {
            metadata: ModuleMetadata::new("Network", "Network", "Network traffic per interval"),
            config,
            counter: TrafficCounter::default(),
        }
    }

    pub fn create(config: &ModuleConfig) -> Result<BoxedModule> {
        Ok(Box::new(Self::new(NetworkConfig::from_config(config))))
    }

    /// Cumulative (sent, received) for the configured interface(s)
    fn totals(&self) -> Option<(u64, u64)> {
        let mut networks = SHARED_NETWORKS.lock().unwrap_or_else(|poisoned| {
            log::warn!("Shared networks mutex was poisoned, recovering");
            poisoned.into_inner()
        });
        networks.refresh();

        match &self.config.interface {
            NetworkInterface::All => Some(networks.iter().fold((0, 0), |(sent, received), (_, data)| {
                (sent + data.total_transmitted(), received + data.total_received())
            })),
            NetworkInterface::Named(name) => networks
                .iter()
                .find(|(iface, _)| iface.as_str() == name)
                .map(|(_, data)| (data.total_transmitted(), data.total_received())),
        }
    }
}

impl Module for NetworkModule {
    fn metadata(&self) -> &ModuleMetadata {
        &self.metadata
    }

    fn refresh_interval(&self) -> Duration {
        self.config.base.refresh
    }

    fn make_blocks(&mut self) -> Vec<Block> {
        let text = match self.totals() {
            Some((sent, received)) => {
                let (up, down) = self.counter.delta(sent, received);
                traffic_text(up, down)
            }
            None => {
                if let NetworkInterface::Named(name) = &self.config.interface {
                    log::debug!("Interface {} not found", name);
                }
                // Next appearance starts a fresh delta
                self.counter = TrafficCounter::default();
                "down".to_string()
            }
        };

        let base = &self.config.base;
        assemble(base, vec![base.inner_block().with_text(text)])
    }
}
