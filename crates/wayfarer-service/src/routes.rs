//! Router and API handlers.
//!
//! Handlers are thin: parse, validate, call `wayfarer-lib`, shape the
//! response. An unreachable destination is a successful response with an
//! empty `paths` array.

use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Query, State,
    },
    http::HeaderMap,
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use wayfarer_lib::{plan_route, Error as LibError, Path, PlanEndpoint, Settlement, UnitConfig};

use crate::health::{health_live, health_ready};
use crate::metrics::{
    metrics_handler, record_route_failed, record_route_hops, record_route_planned,
    record_settlements_queried,
};
use crate::middleware::{extract_or_generate_request_id, MetricsLayer};
use crate::problem::{from_lib_error, ProblemDetails};
use crate::request::{RouteRequest, SettlementsQuery, Validate};
use crate::response::{ApiResponse, ServiceResponse};
use crate::state::AppState;

/// Alternatives between two settlements.
#[derive(Debug, Serialize)]
pub struct RouteResponse {
    pub from: PlanEndpoint,
    pub to: PlanEndpoint,
    /// Units the path distances and tolls are expressed in.
    pub units: UnitConfig,
    /// Best first; empty when the destination is unreachable.
    pub paths: Vec<Path>,
}

#[derive(Debug, Serialize)]
pub struct SettlementsResponse {
    pub settlements: Vec<Settlement>,
    /// Matches left out by the limit.
    pub remaining: usize,
}

/// Build the service router around a loaded map.
pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/api/v1/route", post(route_handler))
        .route("/api/v1/settlements", get(settlements_handler))
        .route("/metrics", get(metrics_handler))
        .route("/health/live", get(health_live))
        .route("/health/ready", get(health_ready))
        .layer(TraceLayer::new_for_http())
        .layer(MetricsLayer)
        .with_state(state)
}

fn failure_reason(error: &LibError) -> &'static str {
    match error {
        LibError::UnknownSettlement { .. } => "unknown_settlement",
        LibError::IdenticalEndpoints { .. } | LibError::InvalidEdge { .. } => "validation_error",
        _ => "internal_error",
    }
}

/// Handle `POST /api/v1/route`.
pub async fn route_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    payload: Result<Json<RouteRequest>, JsonRejection>,
) -> ApiResponse<RouteResponse> {
    let request_id = extract_or_generate_request_id(&headers);
    let request_id = request_id.as_str();

    let Json(request) = match payload {
        Ok(payload) => payload,
        Err(rejection) => {
            record_route_failed("validation_error");
            return ApiResponse::Error(ProblemDetails::bad_request(
                rejection.body_text(),
                request_id,
            ));
        }
    };

    info!(
        request_id,
        from = %request.from,
        to = %request.to,
        max_paths = ?request.max_paths,
        "handling route request"
    );

    if let Err(problem) = request.validate(request_id) {
        record_route_failed("validation_error");
        return problem.into();
    }

    let map = state.map();
    let plan = match request
        .to_lib_request()
        .and_then(|lib_request| plan_route(map, &lib_request))
    {
        Ok(plan) => plan,
        Err(e) => {
            warn!(request_id, error = %e, "route planning failed");
            record_route_failed(failure_reason(&e));
            return ApiResponse::Error(from_lib_error(&e, request_id));
        }
    };

    record_route_planned(plan.paths.len());
    if let Some(best) = plan.best() {
        record_route_hops(best.hop_count());
    }
    info!(request_id, paths = plan.paths.len(), "route planned");

    ApiResponse::Success(ServiceResponse::new(RouteResponse {
        from: plan.start,
        to: plan.goal,
        units: map.units.clone(),
        paths: plan.paths,
    }))
}

/// Handle `GET /api/v1/settlements?search=&limit=`.
pub async fn settlements_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    query: Result<Query<SettlementsQuery>, QueryRejection>,
) -> ApiResponse<SettlementsResponse> {
    let request_id = extract_or_generate_request_id(&headers);
    let request_id = request_id.as_str();

    let Query(query) = match query {
        Ok(query) => query,
        Err(rejection) => {
            return ApiResponse::Error(ProblemDetails::bad_request(
                rejection.body_text(),
                request_id,
            ));
        }
    };
    if let Err(problem) = query.validate(request_id) {
        return problem.into();
    }

    let search = state
        .map()
        .search_settlements(query.search.as_deref().unwrap_or(""), query.limit);
    record_settlements_queried(search.matches.len());

    ApiResponse::Success(ServiceResponse::new(SettlementsResponse {
        settlements: search.matches.into_iter().cloned().collect(),
        remaining: search.remaining,
    }))
}
