//! chuckle server binary.
//!
//! Reads `config.toml` (or the path given with `--config`), makes sure the
//! jokes table exists, starts the background fetch loop, and serves the JSON
//! API until Ctrl-C or SIGTERM.

mod settings;

use std::{path::PathBuf, sync::Arc};

use anyhow::Context as _;
use chuckle_core::JokeStore;
use chuckle_ingest::{HttpJokeSource, Ingestor, Scheduler};
use chuckle_store_sqlite::SqliteStore;
use clap::Parser;
use settings::ServerConfig;
use tokio::{net::TcpListener, sync::watch};
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about = "Periodic joke collector")]
struct Cli {
  /// Path to the TOML configuration file.
  #[arg(short, long, default_value = "config.toml")]
  config: PathBuf,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  // Initialise tracing.
  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy(),
    )
    .init();

  let cli = Cli::parse();
  let cfg = ServerConfig::load(&cli.config)?;

  // A store that cannot be initialised is not fatal: requests will fail
  // until the database comes back.
  let store = SqliteStore::open(&cfg.database_path, cfg.retry_policy());
  if let Err(e) = store.ensure_schema().await {
    tracing::error!(error = %e, "schema initialisation failed, starting anyway");
  }

  let source = HttpJokeSource::new(cfg.joke_api_url.clone(), cfg.http_timeout())
    .context("failed to build HTTP client")?;
  let ingestor = Arc::new(Ingestor::new(store, source));

  let (shutdown_tx, shutdown_rx) = watch::channel(false);
  let scheduler = Scheduler::new(Arc::clone(&ingestor), cfg.fetch_interval()).spawn(shutdown_rx);

  let app = chuckle_api::router(ingestor);
  let address = format!("{}:{}", cfg.host, cfg.port);

  tracing::info!("Listening on http://{address}");
  let listener = TcpListener::bind(&address)
    .await
    .with_context(|| format!("failed to bind {address}"))?;

  axum::serve(listener, app)
    .with_graceful_shutdown(shutdown_signal())
    .await
    .context("server error")?;

  shutdown_tx.send_replace(true);
  scheduler.await.context("scheduler task panicked")?;

  Ok(())
}

/// Resolves on Ctrl-C, or SIGTERM on Unix.
async fn shutdown_signal() {
  let ctrl_c = async {
    if let Err(e) = tokio::signal::ctrl_c().await {
      tracing::error!(error = %e, "cannot listen for Ctrl-C");
      std::future::pending::<()>().await;
    }
  };

  #[cfg(unix)]
  let terminate = async {
    use tokio::signal::unix::{SignalKind, signal};
    match signal(SignalKind::terminate()) {
      Ok(mut sigterm) => {
        sigterm.recv().await;
      }
      Err(e) => {
        tracing::error!(error = %e, "cannot listen for SIGTERM");
        std::future::pending::<()>().await;
      }
    }
  };

  #[cfg(not(unix))]
  let terminate = std::future::pending::<()>();

  tokio::select! {
    _ = ctrl_c => {},
    _ = terminate => {},
  }
  tracing::info!("shutdown signal received");
}
