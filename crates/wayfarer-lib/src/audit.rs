//! Data-quality checks on a loaded map.
//!
//! The search and the aggregator tolerate bad data by skipping it; the audit
//! reports the same problems up front so map authors can fix them.

use std::fmt;

use serde::Serialize;

use crate::map::{CellId, RouteId, RouteMap};

/// Problem found in a map.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DataWarning {
    /// Edge whose route id is missing from the catalog; never traversed.
    UnknownRoute {
        from: CellId,
        to: CellId,
        route: RouteId,
    },
    /// Edge between two cells at the same position; its weight is zero.
    ZeroLengthEdge { from: CellId, to: CellId },
}

impl fmt::Display for DataWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataWarning::UnknownRoute { from, to, route } => {
                write!(f, "edge {from}-{to} references unknown route {route}")
            }
            DataWarning::ZeroLengthEdge { from, to } => {
                write!(f, "edge {from}-{to} joins cells at the same position")
            }
        }
    }
}

/// Check every edge of `map` once, in ascending edge order.
pub fn audit_map(map: &RouteMap) -> Vec<DataWarning> {
    let mut warnings = Vec::new();
    for (edge, route) in map.graph.edges() {
        let (from, to) = (edge.low(), edge.high());
        if map.catalog.get(route).is_none() {
            warnings.push(DataWarning::UnknownRoute { from, to, route });
        }
        let coincident = match (map.graph.cell(from), map.graph.cell(to)) {
            (Some(a), Some(b)) => a.position.distance_to(&b.position) == 0.0,
            _ => false,
        };
        if coincident {
            warnings.push(DataWarning::ZeroLengthEdge { from, to });
        }
    }
    warnings
}
