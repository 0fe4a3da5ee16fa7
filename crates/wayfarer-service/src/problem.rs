//! Error bodies for the route service, in the RFC 9457 Problem Details shape.
//!
//! Every failure the service reports falls into one [`ProblemKind`], which
//! fixes the `type` URI, title and HTTP status. The request ID is carried in
//! `instance` so a client can quote it back.

use std::fmt;

use axum::{
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use wayfarer_lib::Error as LibError;

pub const PROBLEM_UNKNOWN_SETTLEMENT: &str = "/problems/unknown-settlement";
pub const PROBLEM_INVALID_REQUEST: &str = "/problems/invalid-request";
pub const PROBLEM_INTERNAL_ERROR: &str = "/problems/internal-error";
/// No usable map is loaded.
pub const PROBLEM_SERVICE_UNAVAILABLE: &str = "/problems/service-unavailable";

const PROBLEM_CONTENT_TYPE: &str = "application/problem+json";

/// Categories of failure the service reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProblemKind {
    InvalidRequest,
    UnknownSettlement,
    ServiceUnavailable,
    Internal,
}

impl ProblemKind {
    fn type_uri(self) -> &'static str {
        match self {
            ProblemKind::InvalidRequest => PROBLEM_INVALID_REQUEST,
            ProblemKind::UnknownSettlement => PROBLEM_UNKNOWN_SETTLEMENT,
            ProblemKind::ServiceUnavailable => PROBLEM_SERVICE_UNAVAILABLE,
            ProblemKind::Internal => PROBLEM_INTERNAL_ERROR,
        }
    }

    fn title(self) -> &'static str {
        match self {
            ProblemKind::InvalidRequest => "Invalid Request",
            ProblemKind::UnknownSettlement => "Unknown Settlement",
            ProblemKind::ServiceUnavailable => "Service Unavailable",
            ProblemKind::Internal => "Internal Error",
        }
    }

    pub fn status(self) -> StatusCode {
        match self {
            ProblemKind::InvalidRequest => StatusCode::BAD_REQUEST,
            ProblemKind::UnknownSettlement => StatusCode::NOT_FOUND,
            ProblemKind::ServiceUnavailable => StatusCode::SERVICE_UNAVAILABLE,
            ProblemKind::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// Body of every non-2xx response.
///
/// ```
/// use wayfarer_service::{ProblemDetails, PROBLEM_INVALID_REQUEST};
///
/// let problem = ProblemDetails::bad_request("max_paths must be positive", "req-1");
/// assert_eq!(problem.type_uri, PROBLEM_INVALID_REQUEST);
/// assert_eq!(problem.status, 400);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProblemDetails {
    #[serde(rename = "type")]
    pub type_uri: String,
    pub title: String,
    pub status: u16,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
    /// The request ID.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instance: Option<String>,
    pub content_type: String,
}

impl ProblemDetails {
    pub fn new(type_uri: impl Into<String>, title: impl Into<String>, status: StatusCode) -> Self {
        Self {
            type_uri: type_uri.into(),
            title: title.into(),
            status: status.as_u16(),
            detail: None,
            instance: None,
            content_type: PROBLEM_CONTENT_TYPE.to_string(),
        }
    }

    /// A problem of `kind` for the request `request_id`.
    pub fn of(kind: ProblemKind, detail: impl Into<String>, request_id: impl Into<String>) -> Self {
        Self::new(kind.type_uri(), kind.title(), kind.status())
            .with_detail(detail)
            .with_request_id(request_id)
    }

    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }

    pub fn with_request_id(mut self, request_id: impl Into<String>) -> Self {
        self.instance = Some(request_id.into());
        self
    }

    pub fn bad_request(detail: impl Into<String>, request_id: impl Into<String>) -> Self {
        Self::of(ProblemKind::InvalidRequest, detail, request_id)
    }

    /// Unknown settlement name, listing close matches when there are any.
    pub fn unknown_settlement(
        name: &str,
        suggestions: &[String],
        request_id: impl Into<String>,
    ) -> Self {
        let mut detail = format!("Settlement '{name}' not found");
        if !suggestions.is_empty() {
            detail.push_str(&format!(". Did you mean: {}?", suggestions.join(", ")));
        }
        Self::of(ProblemKind::UnknownSettlement, detail, request_id)
    }

    pub fn internal_error(detail: impl Into<String>, request_id: impl Into<String>) -> Self {
        Self::of(ProblemKind::Internal, detail, request_id)
    }

    pub fn service_unavailable(detail: impl Into<String>, request_id: impl Into<String>) -> Self {
        Self::of(ProblemKind::ServiceUnavailable, detail, request_id)
    }
}

impl fmt::Display for ProblemDetails {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.detail {
            Some(detail) => write!(f, "{} ({}): {detail}", self.title, self.status),
            None => write!(f, "{} ({})", self.title, self.status),
        }
    }
}

impl std::error::Error for ProblemDetails {}

impl IntoResponse for ProblemDetails {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        let mut response = (status, Json(&self)).into_response();
        response.headers_mut().insert(
            header::CONTENT_TYPE,
            HeaderValue::from_static(PROBLEM_CONTENT_TYPE),
        );
        response
    }
}

/// Map a planning error onto the problem a client should see.
pub fn from_lib_error(error: &LibError, request_id: &str) -> ProblemDetails {
    match error {
        LibError::UnknownSettlement { name, suggestions } => {
            ProblemDetails::unknown_settlement(name, suggestions, request_id)
        }
        LibError::IdenticalEndpoints { .. }
        | LibError::InvalidEdge { .. }
        | LibError::UnknownCell { .. } => ProblemDetails::bad_request(error.to_string(), request_id),
        LibError::MapNotFound { path } => ProblemDetails::service_unavailable(
            format!("Map not available at {}", path.display()),
            request_id,
        ),
        _ => ProblemDetails::internal_error(error.to_string(), request_id),
    }
}
