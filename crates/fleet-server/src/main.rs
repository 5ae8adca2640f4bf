//! fleet-server binary.
//!
//! Reads `fleet.toml` (or the path given with `--config`), layers `FLEET_*`
//! environment variables over it, opens the SQLite store and serves the JSON
//! API over HTTP.
//!
//! # API key hash generation
//!
//! To generate the argon2 PHC string for `api_key_hash`:
//!
//! ```
//! cargo run -p fleet-server -- --hash-key
//! ```

mod settings;

use std::{path::PathBuf, sync::Arc};

use anyhow::Context as _;
use argon2::{Argon2, PasswordHasher, password_hash::SaltString};
use clap::Parser;
use fleet_api::{AppState, AuthConfig};
use fleet_core::FleetService;
use fleet_store_sqlite::SqliteStore;
use rand_core::OsRng;
use tokio::net::TcpListener;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

use crate::settings::{ServerConfig, expand_tilde};

#[derive(Parser)]
#[command(author, version, about = "Fleet logistics API server")]
struct Cli {
  /// Path to the TOML configuration file.
  #[arg(short, long, default_value = "fleet.toml")]
  config: PathBuf,

  /// Print the argon2 hash for an API key entered on stdin and exit.
  #[arg(long)]
  hash_key: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy(),
    )
    .init();

  let cli = Cli::parse();

  if cli.hash_key {
    let key = read_key()?;
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
      .hash_password(key.as_bytes(), &salt)
      .map_err(|e| anyhow::anyhow!("argon2 error: {e}"))?
      .to_string();
    println!("{hash}");
    return Ok(());
  }

  let server_cfg = ServerConfig::load(&cli.config)?;
  let store_path = expand_tilde(&server_cfg.store_path);

  let store = SqliteStore::open(&store_path)
    .await
    .with_context(|| format!("failed to open store at {store_path:?}"))?;

  let service = FleetService::new(Arc::new(store))
    .with_max_attempts(server_cfg.write_attempts);
  let state = AppState::new(service, AuthConfig {
    api_key_hash: server_cfg.api_key_hash.clone(),
  });

  let app = fleet_api::api_router(state);
  let address = server_cfg.address();

  tracing::info!(
    store = %store_path.display(),
    write_attempts = server_cfg.write_attempts,
    "Listening on http://{address}"
  );
  let listener = TcpListener::bind(&address)
    .await
    .with_context(|| format!("failed to bind {address}"))?;

  axum::serve(listener, app).await.context("server error")?;

  Ok(())
}

/// Read an API key from one line of stdin.
fn read_key() -> anyhow::Result<String> {
  use std::io::{self, BufRead, Write};
  print!("API key: ");
  io::stdout().flush().ok();
  let mut line = String::new();
  io::stdin().lock().read_line(&mut line)?;
  let key = line.trim_end_matches(['\n', '\r']);
  anyhow::ensure!(!key.is_empty(), "API key must not be empty");
  Ok(key.to_string())
}
