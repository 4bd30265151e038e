use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use color_eyre::Result;
use tokio_util::sync::CancellationToken;
use tracing_subscriber::EnvFilter;

use sysdash::config::{Config, load_config, load_config_from_path};
use sysdash::server;
use sysdash::system::refresh::spawn_refresh_task;
use sysdash::system::sampler::Sampler;
use sysdash::system::store::SnapshotStore;

#[derive(Parser)]
#[command(name = "sysdash", about = "Web dashboard serving live host metrics")]
struct Cli {
    /// Path to config file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Address to bind
    #[arg(long)]
    bind: Option<String>,

    /// Port to listen on
    #[arg(long)]
    port: Option<u16>,

    /// Refresh interval in milliseconds
    #[arg(long)]
    interval_ms: Option<u64>,
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let config = load_config_for_cli(&cli);
    let addr: SocketAddr = format!("{}:{}", config.server.bind, config.server.port).parse()?;

    let mut sampler = Sampler::new(config.sampler.top_processes);
    // Give the first CPU delta a real measurement window before the
    // synchronous startup sample.
    tokio::time::sleep(sysinfo::MINIMUM_CPU_UPDATE_INTERVAL).await;
    let store = Arc::new(SnapshotStore::new(sampler.sample()));

    let shutdown = CancellationToken::new();
    let refresh = spawn_refresh_task(
        sampler,
        store.clone(),
        Duration::from_millis(config.sampler.interval_ms),
        shutdown.clone(),
    );

    {
        let shutdown = shutdown.clone();
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                tracing::info!("shutdown requested");
                shutdown.cancel();
            }
        });
    }

    tracing::info!(
        interval_ms = config.sampler.interval_ms,
        "starting refresh loop and server"
    );
    server::serve(addr, store, shutdown.clone()).await?;

    shutdown.cancel();
    let _ = refresh.await;
    Ok(())
}

fn load_config_for_cli(cli: &Cli) -> Config {
    let mut config = match &cli.config {
        Some(path) => load_config_from_path(path),
        None => load_config(),
    };

    if let Some(ref bind) = cli.bind {
        config.server.bind = bind.clone();
    }
    if let Some(port) = cli.port {
        config.server.port = port;
    }
    if let Some(interval) = cli.interval_ms {
        config.sampler.interval_ms = interval;
    }

    config
}
