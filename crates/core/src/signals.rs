//! Process termination signals.
//!
//! [`wait_for_shutdown_signal`] completes when the process should stop.
//!
//! **Unix:** `SIGINT`, `SIGTERM` and `SIGQUIT`.
//! **Other platforms:** Ctrl-C via [`tokio::signal::ctrl_c`].
//!
//! The bar's own stop/continue signals (`stop_signal`/`cont_signal` in the
//! header) are not handled here; they pause the process, not end it.

/// Waits for a termination signal.
///
/// Returns `Err` if signal registration fails.
#[cfg(unix)]
pub async fn wait_for_shutdown_signal() -> std::io::Result<()> {
    use tokio::signal::unix::{signal, SignalKind};

    let mut sigint = signal(SignalKind::interrupt())?;
    let mut sigterm = signal(SignalKind::terminate())?;
    let mut sigquit = signal(SignalKind::quit())?;

    tokio::select! {
        _ = sigint.recv() => log::info!("Received SIGINT"),
        _ = sigterm.recv() => log::info!("Received SIGTERM"),
        _ = sigquit.recv() => log::info!("Received SIGQUIT"),
    }
    Ok(())
}

/// Waits for a termination signal.
#[cfg(not(unix))]
pub async fn wait_for_shutdown_signal() -> std::io::Result<()> {
    tokio::signal::ctrl_c().await
}
