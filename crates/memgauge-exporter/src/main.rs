//! memgauge exporter
//!
//! - Loads `memgauge.yaml` (or the path given as first argument)
//! - Registers `<namespace>_memory_*` gauges into a private registry
//! - Refreshes them from the nsqd stats dump on a fixed interval
//! - Serves `/metrics`, `/healthz`, `/readyz`

use std::net::SocketAddr;
use std::sync::Arc;

use tokio::sync::watch;
use tracing_subscriber::{fmt, EnvFilter};

use memgauge_core::error::{MemGaugeError, Result};
use memgauge_exporter::{app_state, config, router, shutdown, source, updater};

#[tokio::main]
async fn main() {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();

    if let Err(e) = run().await {
        tracing::error!(code = e.code().as_str(), error = %e, "memgauge exporter failed");
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    let path = std::env::args().nth(1).unwrap_or_else(|| "memgauge.yaml".to_string());
    let cfg = config::load_from_file(&path)?;
    let listen: SocketAddr = cfg.exporter.listen.parse().map_err(|e| {
        MemGaugeError::Config(format!("exporter.listen must be a valid SocketAddr: {e}"))
    })?;
    let every = cfg.exporter.update_interval();
    let stats_source: Arc<dyn source::SnapshotSource> =
        Arc::new(source::JsonFileSource::new(cfg.source.stats_path.clone()));

    let state = app_state::AppState::new(cfg)?;

    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    let updater_task = updater::spawn_updater(state.clone(), stats_source, every, shutdown_rx);

    let app = router::build_router(state.clone());

    tracing::info!(%listen, namespace = %state.cfg().exporter.namespace, "memgauge exporter starting");
    let listener = tokio::net::TcpListener::bind(listen)
        .await
        .map_err(|e| MemGaugeError::Internal(format!("bind {listen} failed: {e}")))?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown::ctrl_c())
        .await
        .map_err(|e| MemGaugeError::Internal(format!("server failed: {e}")))?;

    let _ = shutdown_tx.send(true);
    updater::join(updater_task).await;
    Ok(())
}
