use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::error::Error;
use crate::map::{Cell, CellId, RouteId};

/// Undirected key for the edge between two cells.
///
/// The pair is canonicalised so that `EdgeKey::new(a, b) == EdgeKey::new(b, a)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct EdgeKey {
    low: CellId,
    high: CellId,
}

impl EdgeKey {
    pub fn new(a: CellId, b: CellId) -> Self {
        if a <= b {
            Self { low: a, high: b }
        } else {
            Self { low: b, high: a }
        }
    }

    /// The smaller cell id of the pair.
    pub fn low(&self) -> CellId {
        self.low
    }

    /// The larger cell id of the pair.
    pub fn high(&self) -> CellId {
        self.high
    }
}

impl fmt::Display for EdgeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.low, self.high)
    }
}

impl FromStr for EdgeKey {
    type Err = Error;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let invalid = || Error::InvalidEdge {
            value: value.to_string(),
        };
        let (a, b) = value.split_once('-').ok_or_else(invalid)?;
        let a = a.trim().parse::<CellId>().map_err(|_| invalid())?;
        let b = b.trim().parse::<CellId>().map_err(|_| invalid())?;
        Ok(EdgeKey::new(a, b))
    }
}

/// Set of edges a single search must not traverse.
///
/// The set is a value: adding edges produces a new set and leaves the original
/// untouched, so one search can never observe exclusions meant for another.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EdgeExclusions {
    edges: BTreeSet<EdgeKey>,
}

impl EdgeExclusions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return a new set containing these exclusions plus `edges`.
    #[must_use]
    pub fn with_edges(&self, edges: impl IntoIterator<Item = EdgeKey>) -> Self {
        let mut next = self.edges.clone();
        next.extend(edges);
        Self { edges: next }
    }

    pub fn contains(&self, a: CellId, b: CellId) -> bool {
        self.edges.contains(&EdgeKey::new(a, b))
    }

    pub fn len(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &EdgeKey> {
        self.edges.iter()
    }
}

impl FromIterator<EdgeKey> for EdgeExclusions {
    fn from_iter<I: IntoIterator<Item = EdgeKey>>(iter: I) -> Self {
        Self {
            edges: iter.into_iter().collect(),
        }
    }
}

/// Cells and the routes joining them.
///
/// Membership is undirected: connecting `a` and `b` makes each a neighbour of
/// the other through the same route. Neighbours are kept ordered by cell id so
/// every traversal of the graph is reproducible.
#[derive(Debug, Clone, Default)]
pub struct CellGraph {
    cells: BTreeMap<CellId, Cell>,
    adjacency: BTreeMap<CellId, BTreeMap<CellId, RouteId>>,
}

impl CellGraph {
    /// Build a graph from cells with no connections yet.
    pub fn new(cells: impl IntoIterator<Item = Cell>) -> Self {
        let cells: BTreeMap<CellId, Cell> = cells.into_iter().map(|c| (c.id, c)).collect();
        let adjacency = cells.keys().map(|&id| (id, BTreeMap::new())).collect();
        Self { cells, adjacency }
    }

    /// Join two cells with a route. Returns `false` when either cell is
    /// unknown or the cells are the same; the graph is left unchanged then.
    ///
    /// Connecting an already joined pair replaces its route.
    pub fn connect(&mut self, a: CellId, b: CellId, route: RouteId) -> bool {
        if a == b || !self.cells.contains_key(&a) || !self.cells.contains_key(&b) {
            return false;
        }
        self.adjacency.entry(a).or_default().insert(b, route);
        self.adjacency.entry(b).or_default().insert(a, route);
        true
    }

    pub fn cell(&self, id: CellId) -> Option<&Cell> {
        self.cells.get(&id)
    }

    pub fn contains(&self, id: CellId) -> bool {
        self.cells.contains_key(&id)
    }

    /// All cells ordered by id.
    pub fn cells(&self) -> impl Iterator<Item = &Cell> {
        self.cells.values()
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Neighbours of `cell` with the route joining them, ordered by cell id.
    pub fn neighbours(&self, cell: CellId) -> impl Iterator<Item = (CellId, RouteId)> + '_ {
        self.adjacency
            .get(&cell)
            .into_iter()
            .flat_map(|targets| targets.iter().map(|(&target, &route)| (target, route)))
    }

    /// Route joining two adjacent cells, if any.
    pub fn route_between(&self, a: CellId, b: CellId) -> Option<RouteId> {
        self.adjacency.get(&a).and_then(|targets| targets.get(&b)).copied()
    }

    /// Every undirected edge once, ordered by key.
    pub fn edges(&self) -> impl Iterator<Item = (EdgeKey, RouteId)> + '_ {
        self.adjacency.iter().flat_map(|(&from, targets)| {
            targets
                .iter()
                .filter(move |(to, _)| from < **to)
                .map(move |(&to, &route)| (EdgeKey::new(from, to), route))
        })
    }

    pub fn edge_count(&self) -> usize {
        self.edges().count()
    }
}
