use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashMap, HashSet};

use tracing::{trace, warn};

use crate::graph::{CellGraph, EdgeExclusions};
use crate::map::{CellId, RouteCatalog, RouteId};
use crate::weight::edge_weight;

/// Path produced by the search before any real-world estimates are attached.
#[derive(Debug, Clone, PartialEq)]
pub struct RawPath {
    /// Cells from source to destination, at least two.
    pub cells: Vec<CellId>,
    /// Route used for each traversed edge; one shorter than `cells`.
    pub routes: Vec<RouteId>,
    /// Settled search distance of each cell in `cells`, starting at `0`.
    pub cumulative_costs: Vec<f64>,
    /// Total search cost (the last cumulative cost).
    pub cost: f64,
}

impl RawPath {
    /// Number of traversed edges.
    pub fn edge_count(&self) -> usize {
        self.routes.len()
    }
}

/// Find the lowest-weight path from `source` to `destination`.
///
/// Cells are settled in order of tentative distance, ties going to the lowest
/// cell id, so identical inputs always produce the identical path. Edges in
/// `exclusions` and edges whose route is missing from `catalog` are never
/// traversed.
///
/// Returns `None` when the destination is unreachable, when either endpoint is
/// not in the graph, or when source and destination are the same cell.
pub fn find_shortest_path(
    graph: &CellGraph,
    catalog: &RouteCatalog,
    source: CellId,
    destination: CellId,
    exclusions: &EdgeExclusions,
) -> Option<RawPath> {
    if source == destination || !graph.contains(source) || !graph.contains(destination) {
        return None;
    }

    let mut distances: HashMap<CellId, f64> = HashMap::new();
    let mut parents: HashMap<CellId, (CellId, RouteId)> = HashMap::new();
    let mut settled: HashSet<CellId> = HashSet::new();
    let mut queue = BinaryHeap::new();

    distances.insert(source, 0.0);
    queue.push(QueueEntry::new(source, 0.0));

    while let Some(entry) = queue.pop() {
        if !settled.insert(entry.node) {
            continue;
        }
        if entry.node == destination {
            return Some(reconstruct_path(&parents, &distances, source, destination));
        }

        let current_distance = entry.cost.0;
        let Some(current) = graph.cell(entry.node) else {
            continue;
        };

        for (next, route_id) in graph.neighbours(entry.node) {
            if settled.contains(&next) || exclusions.contains(entry.node, next) {
                continue;
            }
            let Some(route) = catalog.get(route_id) else {
                warn!(
                    from = entry.node,
                    to = next,
                    route = route_id,
                    "skipping edge with unknown route"
                );
                continue;
            };
            let Some(neighbour) = graph.cell(next) else {
                continue;
            };

            let next_cost = current_distance + edge_weight(current, neighbour, route.class);
            if next_cost < *distances.get(&next).unwrap_or(&f64::INFINITY) {
                distances.insert(next, next_cost);
                parents.insert(next, (entry.node, route_id));
                queue.push(QueueEntry::new(next, next_cost));
            }
        }
    }

    trace!(source, destination, settled = settled.len(), "destination unreachable");
    None
}

fn reconstruct_path(
    parents: &HashMap<CellId, (CellId, RouteId)>,
    distances: &HashMap<CellId, f64>,
    source: CellId,
    destination: CellId,
) -> RawPath {
    let mut cells = vec![destination];
    let mut routes = Vec::new();
    let mut current = destination;
    while current != source {
        let Some(&(parent, route)) = parents.get(&current) else {
            break;
        };
        routes.push(route);
        cells.push(parent);
        current = parent;
    }
    cells.reverse();
    routes.reverse();

    let cumulative_costs: Vec<f64> = cells
        .iter()
        .map(|cell| distances.get(cell).copied().unwrap_or(0.0))
        .collect();
    let cost = cumulative_costs.last().copied().unwrap_or(0.0);

    RawPath {
        cells,
        routes,
        cumulative_costs,
        cost,
    }
}

#[derive(Copy, Clone, Debug, Default)]
struct FloatOrd(f64);

impl PartialEq for FloatOrd {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for FloatOrd {}

impl PartialOrd for FloatOrd {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for FloatOrd {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
struct QueueEntry {
    node: CellId,
    cost: FloatOrd,
}

impl QueueEntry {
    fn new(node: CellId, cost: f64) -> Self {
        Self {
            node,
            cost: FloatOrd(cost),
        }
    }
}

impl Ord for QueueEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse ordering so BinaryHeap becomes a min-heap by cost, then id.
        other
            .cost
            .cmp(&self.cost)
            .then_with(|| other.node.cmp(&self.node))
    }
}

impl PartialOrd for QueueEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::EdgeKey;
    use crate::map::{Cell, CellPosition, Route, RouteClass};

    fn cell(id: CellId, x: f64, y: f64) -> Cell {
        Cell {
            id,
            position: CellPosition { x, y },
            elevation: 0.0,
            settlement: None,
        }
    }

    fn catalog() -> RouteCatalog {
        RouteCatalog::new([
            Route {
                id: 1,
                class: RouteClass::LocalRoad,
                name: None,
            },
            Route {
                id: 2,
                class: RouteClass::Highway,
                name: None,
            },
        ])
    }

    /// Square 1-2-4 / 1-3-4 where both sides are the same length.
    fn square() -> CellGraph {
        let mut graph = CellGraph::new([
            cell(1, 0.0, 0.0),
            cell(2, 10.0, 0.0),
            cell(3, 0.0, 10.0),
            cell(4, 10.0, 10.0),
        ]);
        graph.connect(1, 2, 1);
        graph.connect(2, 4, 1);
        graph.connect(1, 3, 1);
        graph.connect(3, 4, 1);
        graph
    }

    #[test]
    fn finds_path_and_records_routes() {
        let path =
            find_shortest_path(&square(), &catalog(), 1, 4, &EdgeExclusions::new()).unwrap();
        assert_eq!(path.cells.first(), Some(&1));
        assert_eq!(path.cells.last(), Some(&4));
        assert_eq!(path.routes.len(), path.cells.len() - 1);
        assert!((path.cost - 20.0).abs() < 1e-9);
    }

    #[test]
    fn equal_cost_ties_resolve_to_lowest_cell_id() {
        let path =
            find_shortest_path(&square(), &catalog(), 1, 4, &EdgeExclusions::new()).unwrap();
        assert_eq!(path.cells, vec![1, 2, 4]);
    }

    #[test]
    fn exclusions_force_the_other_side() {
        let exclusions = EdgeExclusions::new().with_edges([EdgeKey::new(2, 1)]);
        let path = find_shortest_path(&square(), &catalog(), 1, 4, &exclusions).unwrap();
        assert_eq!(path.cells, vec![1, 3, 4]);
    }

    #[test]
    fn faster_class_wins_over_shorter_distance() {
        let mut graph = CellGraph::new([cell(1, 0.0, 0.0), cell(2, 10.0, 0.0), cell(3, 5.0, 0.5)]);
        graph.connect(1, 2, 1);
        graph.connect(1, 3, 2);
        graph.connect(3, 2, 2);
        let path = find_shortest_path(&graph, &catalog(), 1, 2, &EdgeExclusions::new()).unwrap();
        assert_eq!(path.cells, vec![1, 3, 2]);
        assert_eq!(path.routes, vec![2, 2]);
    }

    #[test]
    fn cumulative_costs_never_decrease() {
        let path =
            find_shortest_path(&square(), &catalog(), 1, 4, &EdgeExclusions::new()).unwrap();
        assert_eq!(path.cumulative_costs[0], 0.0);
        assert!(path.cumulative_costs.windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn unreachable_or_degenerate_queries_return_none() {
        let mut graph = square();
        let catalog = catalog();
        assert!(find_shortest_path(&graph, &catalog, 1, 1, &EdgeExclusions::new()).is_none());
        assert!(find_shortest_path(&graph, &catalog, 1, 99, &EdgeExclusions::new()).is_none());

        graph = CellGraph::new(graph.cells().cloned().collect::<Vec<_>>());
        assert!(find_shortest_path(&graph, &catalog, 1, 4, &EdgeExclusions::new()).is_none());
    }

    #[test]
    fn coincident_cells_are_crossed_at_zero_cost() {
        let mut graph = CellGraph::new([cell(1, 0.0, 0.0), cell(2, 0.0, 0.0), cell(3, 10.0, 0.0)]);
        graph.connect(1, 2, 1);
        graph.connect(2, 3, 1);

        let path = find_shortest_path(&graph, &catalog(), 1, 3, &EdgeExclusions::new()).unwrap();
        assert_eq!(path.cells, vec![1, 2, 3]);
        assert_eq!(path.cumulative_costs, vec![0.0, 0.0, 10.0]);
        assert!(path.cumulative_costs.windows(2).all(|w| w[0] <= w[1]));

        let hop = find_shortest_path(&graph, &catalog(), 1, 2, &EdgeExclusions::new()).unwrap();
        assert_eq!(hop.cells, vec![1, 2]);
        assert_eq!(hop.cost, 0.0);
    }

    #[test]
    fn edges_with_unknown_routes_are_skipped() {
        let mut graph = CellGraph::new([cell(1, 0.0, 0.0), cell(2, 1.0, 0.0)]);
        graph.connect(1, 2, 42);
        assert!(find_shortest_path(&graph, &catalog(), 1, 2, &EdgeExclusions::new()).is_none());
    }
}
