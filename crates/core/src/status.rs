//! The status engine: fans module updates into one ordered cache and
//! publishes frames at a bounded rate.

use crate::constants::{DEFAULT_MIN_REFRESH, MIN_REFRESH_LOWER_BOUND};
use crate::handle::ModuleHandle;
use crate::registry::Registry;
use log::{debug, info, trace};
use sensbar_types::{Block, ModuleDeclaration};
use std::time::Duration;
use tokio::sync::watch;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;

/// One flattened snapshot of every module's latest blocks
pub type Frame = Vec<Block>;

/// Aggregates module output
///
/// Owns one cache slot per started module, in configured order. Only the
/// drain step writes the cache; frames leave through a watch channel so the
/// renderer always picks up the newest one and never stalls the drain loop.
pub struct Status {
    modules: Vec<ModuleHandle>,
    cache: Vec<Vec<Block>>,
    min_refresh: Duration,
    frames: watch::Sender<Frame>,
}

impl Status {
    pub fn new(modules: Vec<ModuleHandle>, min_refresh: Duration) -> Self {
        let min_refresh = if min_refresh < MIN_REFRESH_LOWER_BOUND {
            debug!(
                "Drain interval {:?} below {:?}, clamping",
                min_refresh, MIN_REFRESH_LOWER_BOUND
            );
            MIN_REFRESH_LOWER_BOUND
        } else {
            min_refresh
        };
        let cache = vec![Vec::new(); modules.len()];
        let (frames, _) = watch::channel(Vec::new());

        Self {
            modules,
            cache,
            min_refresh,
            frames,
        }
    }

    /// Resolve and start the declared modules; failures get no slot
    pub fn from_declarations(
        registry: &Registry,
        declarations: &[ModuleDeclaration],
        min_refresh: Duration,
        parent: &CancellationToken,
    ) -> Self {
        Self::new(registry.start_modules(declarations, parent), min_refresh)
    }

    /// Number of cache slots (== started modules)
    pub fn len(&self) -> usize {
        self.cache.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cache.is_empty()
    }

    pub fn min_refresh(&self) -> Duration {
        self.min_refresh
    }

    pub fn module_ids(&self) -> Vec<&str> {
        self.modules.iter().map(|m| m.id()).collect()
    }

    pub fn cache(&self) -> &[Vec<Block>] {
        &self.cache
    }

    /// Receiver of published frames; starts with nothing unseen
    pub fn subscribe(&self) -> watch::Receiver<Frame> {
        self.frames.subscribe()
    }

    /// Poll every module once without waiting and fold new output into the cache.
    ///
    /// Returns true when at least one slot changed.
    pub fn drain(&mut self) -> bool {
        let mut dirty = false;
        for (module, slot) in self.modules.iter_mut().zip(self.cache.iter_mut()) {
            if let Some(blocks) = module.try_take_update() {
                *slot = blocks;
                dirty = true;
            }
        }
        dirty
    }

    /// All cached blocks in module order, then block order
    pub fn flatten(&self) -> Frame {
        self.cache.iter().flatten().cloned().collect()
    }

    fn publish(&self) {
        self.frames.send_replace(self.flatten());
    }

    /// Run one drain iteration, publishing a frame if anything changed
    pub fn tick(&mut self) -> bool {
        let dirty = self.drain();
        if dirty {
            self.publish();
        }
        dirty
    }

    /// Drain loop; runs until `token` is cancelled, then stops every module.
    ///
    /// Iterations start at most once per `min_refresh`, however many modules
    /// published in between.
    pub async fn run(mut self, token: CancellationToken) {
        info!(
            "Status engine running with {} modules (min refresh {:?})",
            self.modules.len(),
            self.min_refresh
        );

        loop {
            let start = Instant::now();
            if token.is_cancelled() {
                break;
            }

            let dirty = self.tick();

            let elapsed = start.elapsed();
            trace!("Drain took {:?} (dirty: {})", elapsed, dirty);

            let pause = self.min_refresh.saturating_sub(elapsed);
            tokio::select! {
                biased;
                _ = token.cancelled() => break,
                _ = tokio::time::sleep(pause) => {}
            }
        }

        self.stop_modules().await;
    }

    async fn stop_modules(&mut self) {
        for module in &self.modules {
            module.stop();
        }
        for module in &mut self.modules {
            module.join().await;
        }
        debug!("All modules stopped");
    }
}
