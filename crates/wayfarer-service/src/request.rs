//! Request types and validation for HTTP endpoints.

use serde::{Deserialize, Serialize};

use wayfarer_lib::{EdgeKey, Error as LibError, RouteRequest as LibRouteRequest, DEFAULT_MAX_PATHS};

use crate::ProblemDetails;

/// Largest number of alternatives a single request may ask for.
pub const MAX_PATHS_LIMIT: usize = 10;

/// Largest settlement page size.
pub const SETTLEMENTS_LIMIT: usize = 1000;

/// Validation trait for request types.
///
/// Implementations should validate all fields and return a `ProblemDetails`
/// error for invalid input.
pub trait Validate {
    /// The `request_id` populates the `instance` field of any returned
    /// `ProblemDetails`.
    ///
    /// Returns a boxed `ProblemDetails` to avoid large `Result::Err` variants.
    fn validate(&self, request_id: &str) -> Result<(), Box<ProblemDetails>>;
}

/// Request for alternatives between two settlements.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RouteRequest {
    /// Starting settlement name.
    pub from: String,

    /// Destination settlement name.
    pub to: String,

    /// Number of alternatives wanted (default 3).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_paths: Option<usize>,

    /// Edges to leave out, each written as two cell ids (`"3-4"`).
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub avoid_edges: Vec<String>,
}

impl RouteRequest {
    /// Parse the avoided edges.
    pub fn avoided_edges(&self) -> Result<Vec<EdgeKey>, LibError> {
        self.avoid_edges.iter().map(|edge| edge.parse()).collect()
    }

    /// Convert to a library request.
    pub fn to_lib_request(&self) -> Result<LibRouteRequest, LibError> {
        Ok(LibRouteRequest::new(self.from.trim(), self.to.trim())
            .with_max_paths(self.max_paths.unwrap_or(DEFAULT_MAX_PATHS))
            .avoiding(self.avoided_edges()?))
    }
}

impl Validate for RouteRequest {
    fn validate(&self, request_id: &str) -> Result<(), Box<ProblemDetails>> {
        if self.from.trim().is_empty() {
            return Err(Box::new(ProblemDetails::bad_request(
                "The 'from' field is required and cannot be empty",
                request_id,
            )));
        }

        if self.to.trim().is_empty() {
            return Err(Box::new(ProblemDetails::bad_request(
                "The 'to' field is required and cannot be empty",
                request_id,
            )));
        }

        if let Some(max_paths) = self.max_paths {
            if max_paths == 0 || max_paths > MAX_PATHS_LIMIT {
                return Err(Box::new(ProblemDetails::bad_request(
                    format!("The 'max_paths' field must be between 1 and {MAX_PATHS_LIMIT}"),
                    request_id,
                )));
            }
        }

        if let Err(err) = self.avoided_edges() {
            return Err(Box::new(ProblemDetails::bad_request(
                format!("The 'avoid_edges' field is invalid: {err}"),
                request_id,
            )));
        }

        Ok(())
    }
}

/// Query string for the settlements listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SettlementsQuery {
    /// Case-insensitive filter on the `Name (State)` label.
    #[serde(default)]
    pub search: Option<String>,

    /// Maximum number of settlements to return.
    #[serde(default = "default_limit")]
    pub limit: usize,
}

fn default_limit() -> usize {
    100
}

impl Validate for SettlementsQuery {
    fn validate(&self, request_id: &str) -> Result<(), Box<ProblemDetails>> {
        if self.limit == 0 || self.limit > SETTLEMENTS_LIMIT {
            return Err(Box::new(ProblemDetails::bad_request(
                format!("The 'limit' parameter must be between 1 and {SETTLEMENTS_LIMIT}"),
                request_id,
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(from: &str, to: &str) -> RouteRequest {
        RouteRequest {
            from: from.to_string(),
            to: to.to_string(),
            max_paths: None,
            avoid_edges: Vec::new(),
        }
    }

    #[test]
    fn test_route_request_valid() {
        assert!(request("Oakham", "Brindle").validate("req-1").is_ok());
    }

    #[test]
    fn test_route_request_empty_endpoints() {
        let err = request("  ", "Brindle").validate("req-2").unwrap_err();
        assert_eq!(err.status, 400);
        assert!(err.detail.as_deref().unwrap().contains("'from'"));

        let err = request("Oakham", "").validate("req-3").unwrap_err();
        assert!(err.detail.as_deref().unwrap().contains("'to'"));
    }

    #[test]
    fn test_route_request_max_paths_bounds() {
        let mut req = request("Oakham", "Brindle");
        req.max_paths = Some(0);
        assert!(req.validate("req").is_err());
        req.max_paths = Some(MAX_PATHS_LIMIT + 1);
        assert!(req.validate("req").is_err());
        req.max_paths = Some(MAX_PATHS_LIMIT);
        assert!(req.validate("req").is_ok());
    }

    #[test]
    fn test_route_request_edges() {
        let mut req = request("Oakham", "Brindle");
        req.avoid_edges = vec!["4-3".to_string()];
        assert!(req.validate("req").is_ok());
        let lib = req.to_lib_request().unwrap();
        assert_eq!(lib.avoid_edges, vec![EdgeKey::new(3, 4)]);
        assert_eq!(lib.max_paths, DEFAULT_MAX_PATHS);

        req.avoid_edges = vec!["3x4".to_string()];
        let err = req.validate("req").unwrap_err();
        assert!(err.detail.as_deref().unwrap().contains("3x4"));
    }

    #[test]
    fn test_route_request_deserializes_optional_fields() {
        let req: RouteRequest =
            serde_json::from_str(r#"{"from":"Oakham","to":"Brindle"}"#).unwrap();
        assert!(req.max_paths.is_none());
        assert!(req.avoid_edges.is_empty());
    }

    #[test]
    fn test_settlements_query_limit() {
        let query: SettlementsQuery = serde_json::from_str("{}").unwrap();
        assert_eq!(query.limit, 100);
        assert!(query.validate("req").is_ok());

        let query = SettlementsQuery {
            search: None,
            limit: 0,
        };
        assert!(query.validate("req").is_err());
    }
}
