//! Health check handlers for liveness and readiness probes.

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::AppState;

/// Health status response for liveness and readiness probes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthStatus {
    /// "ok" or "not_ready: <reason>".
    pub status: String,

    pub service: String,

    pub version: String,

    /// Number of cells in the loaded map (readiness only).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cells_loaded: Option<usize>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub settlements_loaded: Option<usize>,

    /// RFC 3339 timestamp of the map load (readiness only).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub loaded_at: Option<String>,
}

impl HealthStatus {
    /// Create a healthy liveness status.
    pub fn alive(service: &str, version: &str) -> Self {
        Self {
            status: "ok".to_string(),
            service: service.to_string(),
            version: version.to_string(),
            cells_loaded: None,
            settlements_loaded: None,
            loaded_at: None,
        }
    }

    /// Create a ready status with map information.
    pub fn ready(
        service: &str,
        version: &str,
        cells: usize,
        settlements: usize,
        loaded_at: String,
    ) -> Self {
        Self {
            status: "ok".to_string(),
            service: service.to_string(),
            version: version.to_string(),
            cells_loaded: Some(cells),
            settlements_loaded: Some(settlements),
            loaded_at: Some(loaded_at),
        }
    }

    /// Create a not-ready status.
    pub fn not_ready(service: &str, version: &str, reason: &str) -> Self {
        Self {
            status: format!("not_ready: {}", reason),
            service: service.to_string(),
            version: version.to_string(),
            cells_loaded: None,
            settlements_loaded: None,
            loaded_at: None,
        }
    }
}

/// Liveness probe handler.
///
/// ```text
/// GET /health/live
/// {"status":"ok","service":"wayfarer-service","version":"0.1.0"}
/// ```
pub async fn health_live() -> impl IntoResponse {
    let status = HealthStatus::alive(env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));
    (StatusCode::OK, Json(status))
}

/// Readiness probe handler.
///
/// Ready once a map with at least one cell is loaded.
pub async fn health_ready(State(state): State<AppState>) -> Response {
    let service = env!("CARGO_PKG_NAME");
    let version = env!("CARGO_PKG_VERSION");

    let map = state.map();
    if map.graph.is_empty() {
        let status = HealthStatus::not_ready(service, version, "no cells loaded");
        return (StatusCode::SERVICE_UNAVAILABLE, Json(status)).into_response();
    }

    let status = HealthStatus::ready(
        service,
        version,
        map.graph.len(),
        map.settlements.len(),
        state.loaded_at().to_rfc3339(),
    );
    (StatusCode::OK, Json(status)).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_health_status_alive() {
        let status = HealthStatus::alive("test-service", "1.0.0");
        assert_eq!(status.status, "ok");
        assert!(status.cells_loaded.is_none());
    }

    #[test]
    fn test_health_status_not_ready() {
        let status = HealthStatus::not_ready("test-service", "1.0.0", "no data");
        assert!(status.status.starts_with("not_ready:"));
        assert!(status.status.contains("no data"));
    }

    #[test]
    fn test_health_status_serialization() {
        let status = HealthStatus::alive("wayfarer", "0.1.0");
        let json = serde_json::to_string(&status).unwrap();
        assert!(json.contains("\"status\":\"ok\""));
        assert!(!json.contains("cells_loaded"));

        let ready = HealthStatus::ready("wayfarer", "0.1.0", 12, 6, "now".to_string());
        let json = serde_json::to_string(&ready).unwrap();
        assert!(json.contains("\"cells_loaded\":12"));
        assert!(json.contains("\"settlements_loaded\":6"));
    }
}
