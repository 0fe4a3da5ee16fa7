//! Wayfarer route planning HTTP service.
//!
//! # Configuration
//!
//! - `WAYFARER_MAP_PATH` - Path to the map JSON file (default: the platform data directory)
//! - `RUST_LOG` - Log level (default: info)
//! - `LOG_FORMAT` - Log format: json (default) or text
//! - `METRICS_ENABLED` - `false` disables the Prometheus recorder
//! - `SERVICE_PORT` - HTTP port (default: 8080)

use std::env;
use std::net::SocketAddr;

use tracing::{error, info, warn};

use wayfarer_lib::resolve_map_path;
use wayfarer_service::{app, init_logging, init_metrics, AppState, LoggingConfig, MetricsConfig};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let logging_config = LoggingConfig::from_env().with_service("wayfarer-service");
    init_logging(&logging_config);

    if let Err(e) = init_metrics(&MetricsConfig::from_env()) {
        warn!(error = %e, "failed to initialize metrics, continuing without metrics");
    }

    let map_path = resolve_map_path(None).map_err(|e| {
        error!(error = %e, "failed to locate the map file");
        e
    })?;
    let port: u16 = env::var("SERVICE_PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(8080);

    info!(map_path = %map_path.display(), port, "starting wayfarer service");

    let state = AppState::load(&map_path).map_err(|e| {
        error!(error = %e, path = %map_path.display(), "failed to load application state");
        e
    })?;

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    info!(addr = %addr, "listening on");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app(state)).await?;

    Ok(())
}
