//! GHC API entry-point: loads settings, wires the HTTP server, and serves
//! until shutdown.

mod server;

use std::sync::Arc;

use actix_web::cookie::Key;
use actix_web::web;
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use ghc_api::inbound::http::health::HealthState;
use ghc_api::settings::AppSettings;
use server::{ServerConfig, create_server};

/// Application bootstrap.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = AppSettings::load_from_iter(std::env::args_os())
        .map_err(|e| std::io::Error::other(format!("failed to load settings: {e}")))?;
    let key = load_session_key(&settings)?;
    let bind_addr = settings.bind_addr();

    let config = ServerConfig::new(
        key,
        settings.cookie_secure(),
        bind_addr,
        Arc::new(settings.flag_fetcher()),
    );

    let health_state = web::Data::new(HealthState::new());
    let server = create_server(health_state, config)?;
    info!(%bind_addr, "ghc api listening");
    server.await
}

/// `Key::derive_from` panics on shorter input.
const MIN_KEY_MATERIAL: usize = 32;

fn load_session_key(settings: &AppSettings) -> std::io::Result<Key> {
    let key_path = settings.session_key_file();
    match std::fs::read(&key_path) {
        Ok(bytes) if bytes.len() < MIN_KEY_MATERIAL => Err(std::io::Error::other(format!(
            "session key at {} must hold at least {MIN_KEY_MATERIAL} bytes",
            key_path.display()
        ))),
        Ok(bytes) => Ok(Key::derive_from(&bytes)),
        Err(e) if cfg!(debug_assertions) || settings.session_allow_ephemeral => {
            warn!(path = %key_path.display(), error = %e, "using temporary session key (dev only)");
            Ok(Key::generate())
        }
        Err(e) => Err(std::io::Error::other(format!(
            "failed to read session key at {}: {e}",
            key_path.display()
        ))),
    }
}
