//! Startup and shutdown coordination for the engine tasks

use crate::renderer::Renderer;
use crate::status::Status;
use log::{debug, error, info, warn};
use sensbar_types::ProtocolHeader;
use std::io::Write;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;

/// Where the coordinator is in its one-way lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecycleState {
    Running,
    Stopping,
    Stopped,
}

/// Owns the root cancellation token and every engine task
///
/// Cancelling the root token reaches each module (through child tokens),
/// the drain loop and the renderer. There is no way back to `Running`.
pub struct Lifecycle {
    token: CancellationToken,
    state: LifecycleState,
    tasks: Vec<(String, JoinHandle<()>)>,
}

impl Lifecycle {
    pub fn new() -> Self {
        Self {
            token: CancellationToken::new(),
            state: LifecycleState::Running,
            tasks: Vec::new(),
        }
    }

    /// Root token; modules should be spawned with a child of it
    pub fn token(&self) -> &CancellationToken {
        &self.token
    }

    pub fn state(&self) -> LifecycleState {
        self.state
    }

    /// Track a task so shutdown waits for it
    pub fn track(&mut self, name: &str, task: JoinHandle<()>) {
        self.tasks.push((name.to_string(), task));
    }

    /// Spawn the drain loop and the renderer
    ///
    /// If the renderer cannot write (the bar closed our stdout), it cancels
    /// the root token so the whole process winds down.
    pub fn launch<W>(&mut self, status: Status, mut renderer: Renderer<W>, header: ProtocolHeader)
    where
        W: Write + Send + 'static,
    {
        let frames = status.subscribe();

        let status_token = self.token.clone();
        self.track("status", tokio::spawn(status.run(status_token)));

        let render_token = self.token.clone();
        self.track(
            "renderer",
            tokio::spawn(async move {
                if let Err(e) = renderer.run(&header, frames, render_token.clone()).await {
                    error!("Failed to write status output: {}", e);
                    render_token.cancel();
                }
            }),
        );
    }

    /// Resolves once shutdown has been requested, by anyone
    pub async fn stop_requested(&self) {
        self.token.cancelled().await;
    }

    /// Cancel everything and wait up to `grace` for tasks to finish.
    ///
    /// Tasks still running at the deadline are aborted; their count is
    /// returned. Calling this again after the first time does nothing.
    pub async fn shutdown(&mut self, grace: Duration) -> usize {
        if self.state != LifecycleState::Running {
            return 0;
        }
        self.state = LifecycleState::Stopping;
        info!("Stopping {} tasks", self.tasks.len());
        self.token.cancel();

        let deadline = Instant::now() + grace;
        let mut aborted = 0;
        for (name, mut task) in self.tasks.drain(..) {
            match tokio::time::timeout_at(deadline, &mut task).await {
                Ok(Ok(())) => debug!("Task {} finished", name),
                Ok(Err(e)) => error!("Task {} failed: {}", name, e),
                Err(_) => {
                    warn!("Task {} did not stop within {:?}, aborting it", name, grace);
                    task.abort();
                    aborted += 1;
                }
            }
        }

        self.state = LifecycleState::Stopped;
        info!("Stopped");
        aborted
    }
}

impl Default for Lifecycle {
    fn default() -> Self {
        Self::new()
    }
}
