//! HTTP server for the PIT engine.
//!
//! Environment:
//! - `PIT_ENGINE_ADDR`: listen address (default `0.0.0.0:3000`)
//! - `PIT_ENGINE_CONFIG_DIR`: directory of regime YAML files (default: built-in presets)
//! - `RUST_LOG`: log filter (default `info`)

use std::env;
use std::net::SocketAddr;

use pit_engine::api::{AppState, create_router};
use pit_engine::config::{RegimeCatalog, RegimeLoader};
use tracing::info;
use tracing_subscriber::EnvFilter;

const DEFAULT_ADDR: &str = "0.0.0.0:3000";

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    // A missing .env file is fine
    dotenvy::dotenv().ok();

    let env_filter = EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new("info"))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .compact()
        .try_init()?;

    let catalog = match env::var("PIT_ENGINE_CONFIG_DIR") {
        Ok(dir) => {
            let catalog = RegimeLoader::load(&dir)?;
            info!(dir = %dir, regimes = catalog.len(), "Loaded tax regimes");
            catalog
        }
        Err(_) => {
            info!("Using built-in tax regimes");
            RegimeCatalog::builtin()
        }
    };

    let addr: SocketAddr = env::var("PIT_ENGINE_ADDR")
        .unwrap_or_else(|_| DEFAULT_ADDR.to_string())
        .parse()?;

    let app = create_router(AppState::new(catalog));
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(%addr, "PIT engine listening");

    axum::serve(listener, app).await?;
    Ok(())
}
