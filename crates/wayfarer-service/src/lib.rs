//! HTTP service for the wayfarer route planner.
//!
//! - [`AppState`]: the map, loaded once at startup and shared by all handlers
//! - [`health`]: liveness/readiness probes
//! - [`ProblemDetails`]: RFC 9457 Problem Details for error responses
//! - [`ServiceResponse`]: wrapper for successful responses with content type
//! - [`metrics`]: Prometheus metrics
//! - [`logging`]: structured JSON logging setup
//! - [`middleware`]: request IDs and HTTP metrics
//! - [`app`]: the assembled router
//!
//! Handlers are HTTP glue only; route planning lives in `wayfarer-lib`.
//!
//! # Endpoints
//!
//! - `POST /api/v1/route` - alternatives between two settlements
//! - `GET /api/v1/settlements` - list or search settlements
//! - `GET /metrics` - Prometheus metrics
//! - `GET /health/live`, `GET /health/ready` - probes
//!
//! # Testing Support
//!
//! The [`test_utils`] module loads the fixture map for handler tests. Enable
//! the `test-utils` feature to access it from dependent crates.

#![deny(warnings)]

mod health;
pub mod logging;
pub mod metrics;
pub mod middleware;
mod problem;
mod request;
mod response;
mod routes;
mod state;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use health::{health_live, health_ready, HealthStatus};
pub use logging::{init_logging, LogFormat, LoggingConfig};
pub use metrics::{
    init_metrics, metrics_handler, record_route_failed, record_route_hops, record_route_planned,
    record_settlements_queried, MetricsConfig, MetricsError,
};
pub use middleware::{extract_or_generate_request_id, MetricsLayer, RequestId, REQUEST_ID_HEADER};
pub use problem::{
    from_lib_error, ProblemDetails, ProblemKind, PROBLEM_INTERNAL_ERROR, PROBLEM_INVALID_REQUEST,
    PROBLEM_SERVICE_UNAVAILABLE, PROBLEM_UNKNOWN_SETTLEMENT,
};
pub use request::{RouteRequest, SettlementsQuery, Validate, MAX_PATHS_LIMIT, SETTLEMENTS_LIMIT};
pub use response::{ApiResponse, ServiceResponse};
pub use routes::{app, route_handler, settlements_handler, RouteResponse, SettlementsResponse};
pub use state::{AppState, AppStateError};
