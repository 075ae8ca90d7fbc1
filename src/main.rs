use anyhow::{Context, Result};
use clap::Parser;
use log::{error, info, warn};
use sensbar::config::StatusConfig;
use sensbar::core::{
    wait_for_shutdown_signal, Lifecycle, Registry, Renderer, Status, DEFAULT_SHUTDOWN_GRACE,
};
use sensbar::sources;
use std::io;
use std::path::PathBuf;

/// sensbar - a status line generator for i3bar
#[derive(Parser, Debug)]
#[command(name = "sensbar")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Configuration file (defaults to the per-user config, then ./config.yaml)
    #[arg(short = 'c', long = "config", value_name = "PATH")]
    config: Option<PathBuf>,

    /// List available modules and exit
    #[arg(short = 'l', long = "list-modules")]
    list_modules: bool,

    /// Debug verbosity level (0=warn, 1=info, 2=debug, 3=trace)
    #[arg(short = 'd', long = "debug", value_name = "LEVEL", default_value = "0")]
    debug: u8,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // stdout carries the protocol, so logs go to stderr
    let log_level = match cli.debug {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    // Allow RUST_LOG to override CLI setting
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level))
        .target(env_logger::Target::Stderr)
        .init();

    warn!("Starting sensbar v{}", env!("CARGO_PKG_VERSION"));

    let mut registry = Registry::new();
    sources::register_all(&mut registry);

    if cli.list_modules {
        for name in registry.list() {
            println!("{}", name);
        }
        return Ok(());
    }

    let config_path = cli.config.unwrap_or_else(StatusConfig::default_path);
    info!("Loading configuration from {}", config_path.display());
    let config =
        StatusConfig::load_from_path(&config_path).context("failed to load configuration")?;

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("failed to start the async runtime")?;

    runtime.block_on(run(&registry, &config));

    // A module stuck in a blocking call must not hold the process open
    runtime.shutdown_timeout(DEFAULT_SHUTDOWN_GRACE);
    info!("Exiting");
    Ok(())
}

async fn run(registry: &Registry, config: &StatusConfig) {
    let mut lifecycle = Lifecycle::new();

    let status = Status::from_declarations(
        registry,
        &config.modules,
        config.min_refresh(),
        lifecycle.token(),
    );
    if status.is_empty() {
        warn!("No modules started; the status line will stay empty");
    } else {
        info!("Started modules: {}", status.module_ids().join(", "));
    }

    lifecycle.launch(status, Renderer::new(io::stdout()), config.header());

    tokio::select! {
        result = wait_for_shutdown_signal() => {
            if let Err(e) = result {
                error!("Failed to listen for termination signals: {}", e);
                lifecycle.stop_requested().await;
            }
        }
        _ = lifecycle.stop_requested() => info!("Output closed"),
    }

    let aborted = lifecycle.shutdown(DEFAULT_SHUTDOWN_GRACE).await;
    if aborted > 0 {
        warn!("{} tasks had to be aborted during shutdown", aborted);
    }
}
