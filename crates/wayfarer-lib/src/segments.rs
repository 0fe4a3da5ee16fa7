//! Splitting paths into same-route segments and estimating real-world travel.
//!
//! Segment estimates deliberately use a second cost model: the straight line
//! between a segment's end cells stretched by the class winding factor. The
//! search cost of the same path is kept alongside in [`Path::search_cost`];
//! the two are not expected to agree.

use std::ops::Range;

use serde::Serialize;
use tracing::warn;

use crate::config::UnitConfig;
use crate::map::{CellId, RouteClass, RouteId, RouteMap};
use crate::path::RawPath;
use crate::weight::elevation_penalty;

/// Maximal run of a path's edges travelled on one route.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RouteSegment {
    pub route: RouteId,
    pub class: RouteClass,
    /// Route name, generated from the class when the route is unnamed.
    pub name: String,
    /// Cells of the run, including both end cells.
    pub cells: Vec<CellId>,
    /// Estimated length in display units.
    pub distance: f64,
    pub time_hours: f64,
    pub toll: f64,
    /// Names of settlements strictly inside the run, in travel order.
    pub settlements: Vec<String>,
}

impl RouteSegment {
    /// Number of edges in the run.
    pub fn edge_count(&self) -> usize {
        self.cells.len().saturating_sub(1)
    }
}

/// A path with its real-world estimates.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Path {
    pub cells: Vec<CellId>,
    pub routes: Vec<RouteId>,
    /// Total estimated length in display units.
    pub distance: f64,
    pub time_hours: f64,
    pub toll: f64,
    pub segments: Vec<RouteSegment>,
    /// Total edge weight found by the search, in map units.
    pub search_cost: f64,
    /// Segments left out of the totals because their route is unknown.
    #[serde(skip_serializing_if = "is_zero")]
    pub skipped_segments: usize,
}

impl Path {
    /// Number of traversed edges.
    pub fn hop_count(&self) -> usize {
        self.routes.len()
    }

    pub fn first_cell(&self) -> Option<CellId> {
        self.cells.first().copied()
    }

    pub fn last_cell(&self) -> Option<CellId> {
        self.cells.last().copied()
    }

    /// `true` when any segment is travelled on a highway.
    pub fn uses_highway(&self) -> bool {
        self.segments
            .iter()
            .any(|segment| segment.class == RouteClass::Highway)
    }
}

fn is_zero(value: &usize) -> bool {
    *value == 0
}

/// Group edge indexes into maximal runs sharing one route id.
///
/// Each returned range indexes `routes`; the ranges are contiguous, in order,
/// and together cover every edge exactly once.
pub fn partition_edges(routes: &[RouteId]) -> Vec<(RouteId, Range<usize>)> {
    let mut runs: Vec<(RouteId, Range<usize>)> = Vec::new();
    for (index, &route) in routes.iter().enumerate() {
        match runs.last_mut() {
            Some((current, range)) if *current == route => range.end = index + 1,
            _ => runs.push((route, index..index + 1)),
        }
    }
    runs
}

/// Attach segment breakdown and distance, time, and toll estimates to `raw`.
///
/// A segment whose route id is not in the map's catalog is left out of both
/// the segment list and the totals and counted in `skipped_segments`.
pub fn aggregate_path(map: &RouteMap, raw: &RawPath) -> Path {
    let endpoints = [raw.cells.first().copied(), raw.cells.last().copied()];
    let endpoint_settlements: Vec<_> = endpoints
        .iter()
        .flatten()
        .filter_map(|&cell| map.graph.cell(cell).and_then(|c| c.settlement))
        .collect();

    let mut segments = Vec::new();
    let mut skipped_segments = 0;

    for (route_id, range) in partition_edges(&raw.routes) {
        let cells = &raw.cells[range.start..=range.end];
        let Some(route) = map.catalog.get(route_id) else {
            warn!(route = route_id, edges = range.len(), "skipping segment with unknown route");
            skipped_segments += 1;
            continue;
        };
        let Some(estimate) = estimate_segment(map, cells, route.class, &map.units) else {
            warn!(route = route_id, "skipping segment with cells missing from the graph");
            skipped_segments += 1;
            continue;
        };

        let settlements = cells[1..cells.len() - 1]
            .iter()
            .filter_map(|&cell| map.graph.cell(cell).and_then(|c| c.settlement))
            .filter(|id| !endpoint_settlements.contains(id))
            .filter_map(|id| map.settlement(id).map(|s| s.name.clone()))
            .collect();

        segments.push(RouteSegment {
            route: route_id,
            class: route.class,
            name: route.display_name(),
            cells: cells.to_vec(),
            distance: estimate.distance,
            time_hours: estimate.time_hours,
            toll: estimate.toll,
            settlements,
        });
    }

    Path {
        cells: raw.cells.clone(),
        routes: raw.routes.clone(),
        distance: segments.iter().map(|s| s.distance).sum(),
        time_hours: segments.iter().map(|s| s.time_hours).sum(),
        toll: segments.iter().map(|s| s.toll).sum(),
        segments,
        search_cost: raw.cost,
        skipped_segments,
    }
}

#[derive(Debug, Clone, Copy)]
struct SegmentEstimate {
    distance: f64,
    time_hours: f64,
    toll: f64,
}

fn estimate_segment(
    map: &RouteMap,
    cells: &[CellId],
    class: RouteClass,
    units: &UnitConfig,
) -> Option<SegmentEstimate> {
    let first = map.graph.cell(*cells.first()?)?;
    let last = map.graph.cell(*cells.last()?)?;
    let profile = class.profile();

    let straight = first.position.distance_to(&last.position);
    let distance = straight * profile.winding_factor * units.distance_scale;
    let time_hours =
        distance / profile.speed_kmh * elevation_penalty(first.elevation, last.elevation);
    let toll = distance * profile.toll_rate;

    Some(SegmentEstimate {
        distance,
        time_hours,
        toll,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::map::{Cell, CellPosition, Route, Settlement};

    fn cell(id: CellId, x: f64, elevation: f64) -> Cell {
        Cell {
            id,
            position: CellPosition { x, y: 0.0 },
            elevation,
            settlement: None,
        }
    }

    fn line_map() -> RouteMap {
        RouteMap::from_parts(
            (1..=5).map(|id| cell(id, f64::from(id - 1) * 10.0, 0.0)),
            [
                Route {
                    id: 1,
                    class: RouteClass::Highway,
                    name: Some("Kingsway".to_string()),
                },
                Route {
                    id: 2,
                    class: RouteClass::Trail,
                    name: None,
                },
            ],
            [(1, 2, 1), (2, 3, 1), (3, 4, 2), (4, 5, 2)],
            [
                Settlement {
                    id: 1,
                    name: "Start".to_string(),
                    cell: 1,
                    state: None,
                },
                Settlement {
                    id: 2,
                    name: "Midway".to_string(),
                    cell: 2,
                    state: None,
                },
                Settlement {
                    id: 3,
                    name: "Junction".to_string(),
                    cell: 3,
                    state: None,
                },
            ],
            UnitConfig::default().with_distance_scale(2.0),
        )
    }

    fn raw(cells: Vec<CellId>, routes: Vec<RouteId>) -> RawPath {
        RawPath {
            cumulative_costs: vec![0.0; cells.len()],
            cells,
            routes,
            cost: 1.0,
        }
    }

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn partition_groups_consecutive_routes() {
        let runs = partition_edges(&[1, 1, 2, 2, 2, 1]);
        assert_eq!(runs, vec![(1, 0..2), (2, 2..5), (1, 5..6)]);
        assert!(partition_edges(&[]).is_empty());
    }

    #[test]
    fn segments_partition_every_edge() {
        let map = line_map();
        let path = aggregate_path(&map, &raw(vec![1, 2, 3, 4, 5], vec![1, 1, 2, 2]));
        let covered: usize = path.segments.iter().map(RouteSegment::edge_count).sum();
        assert_eq!(covered, path.hop_count());
        assert_eq!(path.segments[0].cells, vec![1, 2, 3]);
        assert_eq!(path.segments[1].cells, vec![3, 4, 5]);
    }

    #[test]
    fn estimates_use_class_profiles_and_scale() {
        let map = line_map();
        let path = aggregate_path(&map, &raw(vec![1, 2, 3, 4, 5], vec![1, 1, 2, 2]));

        let highway = &path.segments[0];
        assert!(approx(highway.distance, 20.0 * 1.1 * 2.0));
        assert!(approx(highway.time_hours, 44.0 / 120.0));
        assert!(approx(highway.toll, 44.0 * 0.0055));

        let trail = &path.segments[1];
        assert_eq!(trail.name, "Trail 2");
        assert!(approx(trail.distance, 20.0 * 1.5 * 2.0));
        assert_eq!(trail.toll, 0.0);

        assert!(approx(path.distance, highway.distance + trail.distance));
        assert!(approx(path.toll, highway.toll));
        assert_eq!(path.search_cost, 1.0);
    }

    #[test]
    fn interior_settlements_exclude_path_endpoints() {
        let map = line_map();
        let path = aggregate_path(&map, &raw(vec![1, 2, 3, 4, 5], vec![1, 1, 2, 2]));
        assert_eq!(path.segments[0].settlements, vec!["Midway".to_string()]);
        assert!(path.segments[1].settlements.is_empty());
    }

    #[test]
    fn climbing_segment_takes_longer() {
        let flat = RouteMap::from_parts(
            [cell(1, 0.0, 0.0), cell(2, 10.0, 0.0)],
            [Route {
                id: 1,
                class: RouteClass::LocalRoad,
                name: None,
            }],
            [(1, 2, 1)],
            [],
            UnitConfig::default(),
        );
        let hilly = RouteMap::from_parts(
            [cell(1, 0.0, 0.0), cell(2, 10.0, 100.0)],
            [Route {
                id: 1,
                class: RouteClass::LocalRoad,
                name: None,
            }],
            [(1, 2, 1)],
            [],
            UnitConfig::default(),
        );
        let path = raw(vec![1, 2], vec![1]);
        let flat_time = aggregate_path(&flat, &path).time_hours;
        let hilly_time = aggregate_path(&hilly, &path).time_hours;
        assert!(approx(hilly_time, flat_time * 1.3));
    }

    #[test]
    fn unknown_routes_are_skipped_not_fatal() {
        let map = line_map();
        let path = aggregate_path(&map, &raw(vec![1, 2, 3], vec![1, 77]));
        assert_eq!(path.segments.len(), 1);
        assert_eq!(path.skipped_segments, 1);
        assert!(approx(path.distance, 10.0 * 1.1 * 2.0));
    }
}
