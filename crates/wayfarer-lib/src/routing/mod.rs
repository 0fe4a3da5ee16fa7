//! Route planning entry points.
//!
//! This module provides:
//! - [`PathQuery`] / [`find_paths`] - alternative paths between two cells
//! - [`RouteRequest`] / [`plan_route`] - the same, addressed by settlement name
//! - [`RoutePlan`] - resolved endpoints plus the enriched paths
//!
//! # Example
//!
//! ```ignore
//! use wayfarer_lib::{load_route_map, plan_route, RouteRequest};
//!
//! let map = load_route_map(Path::new("docs/fixtures/minimal_map.json"))?;
//! let plan = plan_route(&map, &RouteRequest::new("Oakham", "Brindle"))?;
//! println!("{} alternatives", plan.paths.len());
//! ```

mod diversifier;

pub use diversifier::{find_alternative_paths, middle_span};

use serde::Serialize;
use tracing::debug;

use crate::error::{Error, Result};
use crate::graph::{EdgeExclusions, EdgeKey};
use crate::map::{CellId, RouteMap, SettlementId};
use crate::segments::{aggregate_path, Path};

/// Number of alternatives computed when the caller does not say otherwise.
pub const DEFAULT_MAX_PATHS: usize = 3;

/// Cell-level path query.
#[derive(Debug, Clone, PartialEq)]
pub struct PathQuery {
    pub source: CellId,
    pub destination: CellId,
    pub max_paths: usize,
    /// Edges that no path may use.
    pub exclusions: EdgeExclusions,
}

impl PathQuery {
    pub fn new(source: CellId, destination: CellId) -> Self {
        Self {
            source,
            destination,
            max_paths: DEFAULT_MAX_PATHS,
            exclusions: EdgeExclusions::new(),
        }
    }

    pub fn with_max_paths(mut self, max_paths: usize) -> Self {
        self.max_paths = max_paths;
        self
    }

    /// Add edges that must not be traversed.
    pub fn excluding(mut self, edges: impl IntoIterator<Item = EdgeKey>) -> Self {
        self.exclusions = self.exclusions.with_edges(edges);
        self
    }
}

/// Compute up to `query.max_paths` distinct paths, best first.
///
/// An unreachable destination, identical endpoints, or endpoints missing from
/// the map all produce an empty list.
pub fn find_paths(map: &RouteMap, query: &PathQuery) -> Vec<Path> {
    let raw_paths = find_alternative_paths(
        &map.graph,
        &map.catalog,
        query.source,
        query.destination,
        query.max_paths,
        &query.exclusions,
    );
    debug!(
        source = query.source,
        destination = query.destination,
        requested = query.max_paths,
        found = raw_paths.len(),
        "path search finished"
    );
    raw_paths
        .iter()
        .map(|raw| aggregate_path(map, raw))
        .collect()
}

/// High-level request addressed by settlement names.
#[derive(Debug, Clone, PartialEq)]
pub struct RouteRequest {
    pub start: String,
    pub goal: String,
    pub max_paths: usize,
    pub avoid_edges: Vec<EdgeKey>,
}

impl RouteRequest {
    pub fn new(start: impl Into<String>, goal: impl Into<String>) -> Self {
        Self {
            start: start.into(),
            goal: goal.into(),
            max_paths: DEFAULT_MAX_PATHS,
            avoid_edges: Vec::new(),
        }
    }

    pub fn with_max_paths(mut self, max_paths: usize) -> Self {
        self.max_paths = max_paths;
        self
    }

    pub fn avoiding(mut self, edges: impl IntoIterator<Item = EdgeKey>) -> Self {
        self.avoid_edges.extend(edges);
        self
    }
}

/// One end of a planned route.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlanEndpoint {
    pub cell: CellId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub settlement: Option<SettlementId>,
    /// Settlement name, or `cell <id>` for cells without one.
    pub name: String,
}

impl PlanEndpoint {
    fn for_cell(map: &RouteMap, cell: CellId) -> Self {
        match map.settlement_at(cell) {
            Some(settlement) => Self {
                cell,
                settlement: Some(settlement.id),
                name: settlement.name.clone(),
            },
            None => Self {
                cell,
                settlement: None,
                name: format!("cell {cell}"),
            },
        }
    }
}

/// Planned route returned by the library.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RoutePlan {
    pub start: PlanEndpoint,
    pub goal: PlanEndpoint,
    /// Alternatives, best first. Empty when the goal is unreachable.
    pub paths: Vec<Path>,
}

impl RoutePlan {
    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    /// The lowest-cost path, if any.
    pub fn best(&self) -> Option<&Path> {
        self.paths.first()
    }
}

/// Resolve a settlement name to the cell it sits on.
fn resolve_settlement(map: &RouteMap, name: &str) -> Result<CellId> {
    map.settlement_by_name(name)
        .map(|settlement| settlement.cell)
        .ok_or_else(|| Error::UnknownSettlement {
            name: name.to_string(),
            suggestions: map.fuzzy_settlement_matches(name, 3),
        })
}

/// Plan alternatives between two named settlements.
///
/// Unknown names fail with suggestions and naming the same settlement twice
/// fails with [`Error::IdenticalEndpoints`]. An unreachable goal is not an
/// error: the plan simply has no paths.
pub fn plan_route(map: &RouteMap, request: &RouteRequest) -> Result<RoutePlan> {
    let start = resolve_settlement(map, &request.start)?;
    let goal = resolve_settlement(map, &request.goal)?;
    if start == goal {
        return Err(Error::IdenticalEndpoints {
            name: request.start.clone(),
        });
    }

    let query = PathQuery::new(start, goal)
        .with_max_paths(request.max_paths)
        .excluding(request.avoid_edges.iter().copied());
    Ok(RoutePlan {
        start: PlanEndpoint::for_cell(map, start),
        goal: PlanEndpoint::for_cell(map, goal),
        paths: find_paths(map, &query),
    })
}

/// Plan alternatives between two raw cell ids.
pub fn plan_cells(map: &RouteMap, query: &PathQuery) -> Result<RoutePlan> {
    for id in [query.source, query.destination] {
        if !map.graph.contains(id) {
            return Err(Error::UnknownCell { id });
        }
    }
    if query.source == query.destination {
        return Err(Error::IdenticalEndpoints {
            name: format!("cell {}", query.source),
        });
    }

    Ok(RoutePlan {
        start: PlanEndpoint::for_cell(map, query.source),
        goal: PlanEndpoint::for_cell(map, query.destination),
        paths: find_paths(map, query),
    })
}
