//! Response wrappers for HTTP handlers.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::ProblemDetails;

/// Wrapper for successful responses with content type metadata.
///
/// Mirrors `ProblemDetails` by carrying the content type in the body.
///
/// # Example
///
/// ```
/// use wayfarer_service::ServiceResponse;
/// use serde::Serialize;
///
/// #[derive(Serialize)]
/// struct Totals {
///     hops: usize,
///     distance: f64,
/// }
///
/// let response = ServiceResponse::new(Totals { hops: 4, distance: 88.0 });
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceResponse<T> {
    /// The actual response payload.
    #[serde(flatten)]
    pub data: T,

    pub content_type: String,
}

impl<T> ServiceResponse<T> {
    pub fn new(data: T) -> Self {
        Self {
            data,
            content_type: "application/json".to_string(),
        }
    }
}

impl<T> From<T> for ServiceResponse<T> {
    fn from(data: T) -> Self {
        Self::new(data)
    }
}

impl<T: Serialize> IntoResponse for ServiceResponse<T> {
    fn into_response(self) -> Response {
        Json(self).into_response()
    }
}

/// Handler outcome: a payload or an RFC 9457 problem.
#[derive(Debug)]
pub enum ApiResponse<T> {
    Success(ServiceResponse<T>),
    Error(ProblemDetails),
}

impl<T> From<Box<ProblemDetails>> for ApiResponse<T> {
    fn from(problem: Box<ProblemDetails>) -> Self {
        ApiResponse::Error(*problem)
    }
}

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> Response {
        match self {
            ApiResponse::Success(data) => (StatusCode::OK, Json(data)).into_response(),
            ApiResponse::Error(problem) => problem.into_response(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
    struct TestData {
        value: i32,
    }

    #[test]
    fn test_response_flatten_serialization() {
        let response = ServiceResponse::new(TestData { value: 42 });
        let json = serde_json::to_string(&response).unwrap();

        assert!(json.contains("\"value\":42"));
        assert!(json.contains("\"content_type\":\"application/json\""));
        assert!(!json.contains("\"data\":{"));
    }

    #[test]
    fn test_response_from_trait() {
        let data = TestData { value: 99 };
        let response: ServiceResponse<TestData> = data.clone().into();
        assert_eq!(response.data, data);
    }

    #[test]
    fn test_api_response_status() {
        let ok: ApiResponse<TestData> =
            ApiResponse::Success(ServiceResponse::new(TestData { value: 1 }));
        assert_eq!(ok.into_response().status(), StatusCode::OK);

        let problem = Box::new(ProblemDetails::bad_request("nope", "req"));
        let err: ApiResponse<TestData> = problem.into();
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            response.headers()[axum::http::header::CONTENT_TYPE],
            "application/problem+json"
        );
    }
}
