//! Prometheus metrics for the service.
//!
//! - [`MetricsConfig`]: whether metrics are collected
//! - [`init_metrics`]: install the Prometheus recorder
//! - [`metrics_handler`]: axum handler for `/metrics`
//! - route planning counters and histograms
//!
//! # Example
//!
//! ```no_run
//! use wayfarer_service::metrics::{MetricsConfig, init_metrics, metrics_handler};
//! use axum::{Router, routing::get};
//!
//! init_metrics(&MetricsConfig::default()).expect("failed to initialize metrics");
//! let app: Router = Router::new().route("/metrics", get(metrics_handler));
//! ```

use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use once_cell::sync::OnceCell;
use serde::{Deserialize, Serialize};

/// Global Prometheus handle for rendering metrics.
static PROMETHEUS_HANDLE: OnceCell<PrometheusHandle> = OnceCell::new();

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetricsConfig {
    pub enabled: bool,
}

impl Default for MetricsConfig {
    fn default() -> Self {
        Self { enabled: true }
    }
}

impl MetricsConfig {
    /// `METRICS_ENABLED`: "true" or "false" (default: true).
    pub fn from_env() -> Self {
        let enabled = std::env::var("METRICS_ENABLED")
            .map(|v| v.to_lowercase() != "false")
            .unwrap_or(true);

        Self { enabled }
    }
}

/// Initialize the Prometheus metrics recorder.
///
/// # Errors
///
/// Returns an error if metrics are disabled, the recorder is already
/// installed, or the Prometheus builder fails.
pub fn init_metrics(config: &MetricsConfig) -> Result<(), MetricsError> {
    if !config.enabled {
        return Err(MetricsError::Disabled);
    }

    let handle = PrometheusBuilder::new()
        .install_recorder()
        .map_err(|e| MetricsError::InstallFailed(e.to_string()))?;

    PROMETHEUS_HANDLE
        .set(handle)
        .map_err(|_| MetricsError::AlreadyInitialized)?;

    Ok(())
}

/// Returns `None` until [`init_metrics`] has succeeded.
pub fn prometheus_handle() -> Option<&'static PrometheusHandle> {
    PROMETHEUS_HANDLE.get()
}

/// Axum handler for the `/metrics` endpoint (Prometheus exposition format).
pub async fn metrics_handler() -> String {
    PROMETHEUS_HANDLE
        .get()
        .map(|h| h.render())
        .unwrap_or_else(|| "# Metrics not initialized\n".to_string())
}

/// Errors that can occur during metrics initialization.
#[derive(Debug, Clone)]
pub enum MetricsError {
    Disabled,
    AlreadyInitialized,
    InstallFailed(String),
}

impl std::fmt::Display for MetricsError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MetricsError::Disabled => write!(f, "metrics are disabled"),
            MetricsError::AlreadyInitialized => write!(f, "metrics recorder already initialized"),
            MetricsError::InstallFailed(e) => {
                write!(f, "failed to install metrics recorder: {}", e)
            }
        }
    }
}

impl std::error::Error for MetricsError {}

// =============================================================================
// Route planning metrics
// =============================================================================

/// Record a successful plan and how many alternatives it produced.
///
/// Increments `wayfarer_routes_planned_total` and records the
/// `wayfarer_route_alternatives` histogram. Plans without any path count as
/// planned with zero alternatives.
pub fn record_route_planned(alternatives: usize) {
    let outcome = if alternatives == 0 { "no_path" } else { "found" };
    metrics::counter!("wayfarer_routes_planned_total", "outcome" => outcome).increment(1);
    metrics::histogram!("wayfarer_route_alternatives").record(alternatives as f64);
}

/// Record a rejected or failed route request.
///
/// * `reason` - e.g. "validation_error", "unknown_settlement", "internal_error"
pub fn record_route_failed(reason: &str) {
    metrics::counter!(
        "wayfarer_routes_failed_total",
        "reason" => reason.to_string()
    )
    .increment(1);
}

/// Record the hop count of the best path.
pub fn record_route_hops(hops: usize) {
    metrics::histogram!("wayfarer_route_hops").record(hops as f64);
}

/// Record a settlement listing and the number of entries returned.
pub fn record_settlements_queried(returned: usize) {
    metrics::counter!("wayfarer_settlement_queries_total").increment(1);
    metrics::histogram!("wayfarer_settlements_returned").record(returned as f64);
}
