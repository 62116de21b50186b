//! docontact server binary.
//!
//! Reads `config.toml` (or the path given with `--config`) layered under
//! `DOCONTACT_*` environment variables, opens the SQLite store, and serves
//! the contact form and admin pages over HTTP.
//!
//! # Password hash generation
//!
//! ```
//! cargo run -p docontact-web -- --hash-password
//! ```

use std::{
  net::SocketAddr,
  path::{Path, PathBuf},
  sync::Arc,
};

use anyhow::Context as _;
use argon2::{Argon2, PasswordHasher, password_hash::SaltString};
use clap::Parser;
use docontact_core::service::SubmissionService;
use docontact_store_sqlite::SqliteStore;
use docontact_web::{AppState, ServerConfig, token::TokenIssuer};
use rand_core::OsRng;
use tokio::net::TcpListener;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about = "DoContact contact-form server")]
struct Cli {
  /// Path to the TOML configuration file.
  #[arg(short, long, default_value = "config.toml")]
  config: PathBuf,

  /// Print the argon2 hash for a password entered on stdin and exit.
  #[arg(long)]
  hash_password: bool,

  /// Create or upgrade the submissions table and exit.
  #[arg(long)]
  migrate: bool,
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

  if cli.hash_password {
    let password = read_password()?;
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
      .hash_password(password.as_bytes(), &salt)
      .map_err(|e| anyhow::anyhow!("argon2 error: {e}"))?
      .to_string();
    println!("{hash}");
    return Ok(());
  }

  let settings = config::Config::builder()
    .add_source(config::File::from(cli.config).required(false))
    .add_source(config::Environment::with_prefix("DOCONTACT"))
    .build()
    .context("failed to read config file")?;

  let server_cfg: ServerConfig = settings
    .try_deserialize()
    .context("failed to deserialise ServerConfig")?;

  let store_path = expand_tilde(&server_cfg.store_path);

  // Opening also applies the schema.
  let store = SqliteStore::open(&store_path)
    .await
    .with_context(|| format!("failed to open store at {store_path:?}"))?;

  if cli.migrate {
    let version = store.schema_version().await.context("failed to read schema version")?;
    tracing::info!(version, path = ?store_path, "schema up to date");
    return Ok(());
  }

  let auth = server_cfg
    .auth_config()
    .context("auth_username and auth_password_hash must be set to serve")?;

  let tokens = if server_cfg.token_secret.is_empty() {
    tracing::warn!("token_secret not set; using a random secret, forms expire on restart");
    TokenIssuer::random(server_cfg.token_lifetime_secs)
  } else {
    TokenIssuer::new(server_cfg.token_secret.as_bytes(), server_cfg.token_lifetime_secs)
  };

  let state = AppState {
    service: SubmissionService::new(Arc::new(store)),
    auth:    Arc::new(auth),
    tokens:  Arc::new(tokens),
    config:  Arc::new(server_cfg.clone()),
  };

  let app = docontact_web::router(state);
  let address = format!("{}:{}", server_cfg.host, server_cfg.port);

  tracing::info!("Listening on http://{address}");
  let listener = TcpListener::bind(&address)
    .await
    .with_context(|| format!("failed to bind {address}"))?;

  axum::serve(listener, app.into_make_service_with_connect_info::<SocketAddr>())
    .await
    .context("server error")?;

  Ok(())
}

/// Read a password from stdin.
fn read_password() -> anyhow::Result<String> {
  use std::io::{self, BufRead, Write};
  print!("Password: ");
  io::stdout().flush().ok();
  let mut line = String::new();
  io::stdin().lock().read_line(&mut line)?;
  Ok(line.trim_end_matches(['\r', '\n']).to_string())
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
