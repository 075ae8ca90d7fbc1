//! Live module handles: one tokio task per module, publishing through a watch channel.

use crate::module::BoxedModule;
use log::{debug, error};
use sensbar_types::Block;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;

/// A running module
///
/// The module's task owns the sending half of a watch channel. Each publish
/// replaces the previous value, so the sender never blocks and a reader only
/// ever sees the most recent block sequence.
pub struct ModuleHandle {
    id: String,
    updates: watch::Receiver<Vec<Block>>,
    token: CancellationToken,
    task: Option<JoinHandle<()>>,
}

impl ModuleHandle {
    /// Start `module` on its own task, cancelled together with `parent`
    pub fn spawn(module: BoxedModule, parent: &CancellationToken) -> Self {
        let id = module.metadata().id.clone();
        let (tx, rx) = watch::channel(Vec::new());
        let token = parent.child_token();
        let task = tokio::spawn(run_module(module, tx, token.clone()));

        Self {
            id,
            updates: rx,
            token,
            task: Some(task),
        }
    }

    /// A handle fed by hand instead of a module task
    #[cfg(test)]
    pub(crate) fn manual(id: &str) -> (Self, watch::Sender<Vec<Block>>) {
        let (tx, rx) = watch::channel(Vec::new());
        let handle = Self {
            id: id.to_string(),
            updates: rx,
            token: CancellationToken::new(),
            task: None,
        };
        (handle, tx)
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    /// A separate receiver for the module's output, for waiting on changes
    pub fn updates(&self) -> watch::Receiver<Vec<Block>> {
        self.updates.clone()
    }

    /// Take the latest published blocks if they have not been seen yet.
    ///
    /// Never waits. Values published and replaced between two calls are
    /// never observed.
    pub fn try_take_update(&mut self) -> Option<Vec<Block>> {
        let latest = self.updates.borrow_and_update();
        if latest.has_changed() {
            Some(latest.to_vec())
        } else {
            None
        }
    }

    /// Cancel the module; safe to call any number of times
    pub fn stop(&self) {
        self.token.cancel();
    }

    pub fn is_stopped(&self) -> bool {
        self.token.is_cancelled()
    }

    /// Wait for the module task to exit
    pub async fn join(&mut self) {
        if let Some(task) = self.task.take() {
            if let Err(e) = task.await {
                error!("Module {} task failed: {}", self.id, e);
            }
        }
    }
}

impl Drop for ModuleHandle {
    fn drop(&mut self) {
        self.token.cancel();
    }
}

async fn run_module(
    mut module: BoxedModule,
    updates: watch::Sender<Vec<Block>>,
    token: CancellationToken,
) {
    let id = module.metadata().id.clone();
    let mut ticker = tokio::time::interval(module.refresh_interval());
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    debug!("Module {} started (refresh {:?})", id, module.refresh_interval());

    loop {
        tokio::select! {
            biased;
            _ = token.cancelled() => break,
            _ = ticker.tick() => {}
        }

        let compute = tokio::task::spawn_blocking(move || {
            let blocks = module.make_blocks();
            (module, blocks)
        });

        // A compute still running at cancellation finishes on the blocking
        // pool and its result is discarded.
        let (returned, blocks) = tokio::select! {
            biased;
            _ = token.cancelled() => break,
            result = compute => match result {
                Ok(computed) => computed,
                Err(e) => {
                    error!("Module {} panicked while computing blocks: {}", id, e);
                    break;
                }
            },
        };
        module = returned;

        if token.is_cancelled() {
            break;
        }
        updates.send_replace(blocks);
    }

    debug!("Module {} stopped", id);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::FakeModule;
    use std::time::Duration;

    #[tokio::test(start_paused = true)]
    async fn test_module_publishes_immediately_and_on_each_tick() {
        let root = CancellationToken::new();
        let (module, _) = FakeModule::counting("Tick", Duration::from_millis(500));
        let mut handle = ModuleHandle::spawn(Box::new(module), &root);

        tokio::time::sleep(Duration::from_millis(10)).await;
        let first = handle.try_take_update().expect("initial publish");
        assert_eq!(first[0].full_text, "Tick 1");
        assert!(handle.try_take_update().is_none());

        tokio::time::sleep(Duration::from_millis(500)).await;
        let second = handle.try_take_update().expect("second publish");
        assert_eq!(second[0].full_text, "Tick 2");

        handle.stop();
        handle.join().await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_stop_is_idempotent_and_ends_publishing() {
        let root = CancellationToken::new();
        let (module, calls) = FakeModule::counting("Idle", Duration::from_millis(100));
        let mut handle = ModuleHandle::spawn(Box::new(module), &root);

        tokio::time::sleep(Duration::from_millis(250)).await;
        handle.stop();
        handle.stop();
        assert!(handle.is_stopped());
        handle.join().await;

        let computed = calls.load(std::sync::atomic::Ordering::SeqCst);
        let _ = handle.try_take_update();
        tokio::time::sleep(Duration::from_secs(1)).await;
        assert!(handle.try_take_update().is_none());
        assert_eq!(calls.load(std::sync::atomic::Ordering::SeqCst), computed);
    }

    #[tokio::test(start_paused = true)]
    async fn test_parent_cancellation_reaches_module() {
        let root = CancellationToken::new();
        let (module, _) = FakeModule::counting("Child", Duration::from_millis(100));
        let mut handle = ModuleHandle::spawn(Box::new(module), &root);

        root.cancel();
        assert!(handle.is_stopped());
        tokio::time::timeout(Duration::from_secs(1), handle.join())
            .await
            .expect("module task exits after parent cancellation");
    }

    #[tokio::test(start_paused = true)]
    async fn test_updates_receiver_sees_publishes() {
        let root = CancellationToken::new();
        let (module, _) = FakeModule::counting("Watched", Duration::from_millis(200));
        let handle = ModuleHandle::spawn(Box::new(module), &root);
        let mut updates = handle.updates();

        updates.changed().await.unwrap();
        assert_eq!(updates.borrow_and_update()[0].full_text, "Watched 1");
        updates.changed().await.unwrap();
        assert_eq!(updates.borrow_and_update()[0].full_text, "Watched 2");
        root.cancel();
    }

    #[test]
    fn test_manual_handle_latest_value_wins() {
        let (mut handle, tx) = ModuleHandle::manual("Manual");
        assert!(handle.try_take_update().is_none());

        tx.send_replace(vec![Block::new("A")]);
        tx.send_replace(vec![Block::new("B")]);
        let seen = handle.try_take_update().unwrap();
        assert_eq!(seen, vec![Block::new("B")]);
        assert!(handle.try_take_update().is_none());
    }
}
