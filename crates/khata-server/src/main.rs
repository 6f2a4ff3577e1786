//! khata-server binary.
//!
//! Reads `config.toml` (or the path specified with `--config`), opens an
//! in-process SQLite store, and serves the dashboard API over HTTP.
//!
//! Configuration keys can also be supplied through the environment with a
//! `KHATA_` prefix (e.g. `KHATA_PORT=8080`).

use std::{
  path::{Path, PathBuf},
  sync::Arc,
};

use anyhow::Context as _;
use axum::{
  Router,
  extract::DefaultBodyLimit,
  http::StatusCode,
};
use clap::Parser;
use khata_store_sqlite::SqliteStore;
use serde::Deserialize;
use tokio::net::TcpListener;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

/// Bulk sync payloads can be large; mirror the reference deployment's 50 MB
/// request cap.
const BODY_LIMIT: usize = 50 * 1024 * 1024;

#[derive(Parser)]
#[command(author, version, about = "Khata dashboard backend")]
struct Cli {
  /// Path to the TOML configuration file.
  #[arg(short, long, default_value = "config.toml")]
  config: PathBuf,
}

/// Runtime server configuration, deserialised from `config.toml` and the
/// `KHATA_*` environment.
#[derive(Debug, Clone, Deserialize)]
struct ServerConfig {
  #[serde(default = "default_host")]
  host:       String,
  #[serde(default = "default_port")]
  port:       u16,
  #[serde(default = "default_store_path")]
  store_path: PathBuf,
}

fn default_host() -> String { "127.0.0.1".to_owned() }
fn default_port() -> u16 { 3000 }
fn default_store_path() -> PathBuf { PathBuf::from("khata.db") }

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

  // Load configuration.
  let settings = config::Config::builder()
    .add_source(config::File::from(cli.config).required(false))
    .add_source(config::Environment::with_prefix("KHATA"))
    .build()
    .context("failed to read config file")?;

  let server_cfg: ServerConfig = settings
    .try_deserialize()
    .context("failed to deserialise ServerConfig")?;

  // Expand `~` in store path.
  let store_path = expand_tilde(&server_cfg.store_path);

  // Open the SQLite store; the schema bootstrap runs here, idempotently.
  let store = SqliteStore::open(&store_path)
    .await
    .with_context(|| format!("failed to open store at {store_path:?}"))?;

  // The dashboard is a browser client served from elsewhere, so CORS is
  // wide open; there is no authentication on this API.
  let app = Router::new()
    .nest("/api", khata_api::api_router(Arc::new(store)))
    .fallback(not_found)
    .layer(TraceLayer::new_for_http())
    .layer(CorsLayer::permissive())
    .layer(DefaultBodyLimit::max(BODY_LIMIT));

  let address = format!("{}:{}", server_cfg.host, server_cfg.port);

  tracing::info!("Listening on http://{address}");
  let listener = TcpListener::bind(&address)
    .await
    .with_context(|| format!("failed to bind {address}"))?;

  axum::serve(listener, app).await.context("server error")?;

  Ok(())
}

async fn not_found() -> (StatusCode, &'static str) {
  (StatusCode::NOT_FOUND, "Not Found")
}

/// Expand a leading `~` to the user's home directory.
fn expand_tilde(path: &Path) -> PathBuf {
  let s = path.to_string_lossy();
  if let Some(rest) = s.strip_prefix("~/")
    && let Ok(home) = std::env::var("HOME")
  {
    return PathBuf::from(home).join(rest);
  }
  path.to_path_buf()
}
