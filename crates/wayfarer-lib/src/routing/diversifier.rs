//! Alternative path generation by repeated, increasingly constrained searches.

use tracing::debug;

use crate::graph::{CellGraph, EdgeExclusions, EdgeKey};
use crate::map::{CellId, RouteCatalog};
use crate::path::{find_shortest_path, RawPath};

/// Edges in the middle half of `path`.
///
/// The span covers edge indexes `[⌊n/4⌋, ⌊3n/4⌋)` where `n` is the number of
/// cells, clipped to the edge count. For any path of two or more cells the
/// span holds at least one edge.
pub fn middle_span(path: &RawPath) -> impl Iterator<Item = EdgeKey> + '_ {
    let cell_count = path.cells.len();
    let start = cell_count / 4;
    let end = (cell_count * 3 / 4).min(path.edge_count());
    (start..end).map(move |i| EdgeKey::new(path.cells[i], path.cells[i + 1]))
}

/// Find up to `max_paths` distinct paths between `source` and `destination`.
///
/// The first path is the plain shortest path under `initial`. After each hit
/// the middle half of that path is added to the exclusions, which pushes the
/// next search through a different interior while still allowing similar
/// entry and exit legs. The loop stops early as soon as a search fails, so
/// fewer paths than requested is a normal outcome.
pub fn find_alternative_paths(
    graph: &CellGraph,
    catalog: &RouteCatalog,
    source: CellId,
    destination: CellId,
    max_paths: usize,
    initial: &EdgeExclusions,
) -> Vec<RawPath> {
    let mut paths = Vec::new();
    let mut exclusions = initial.clone();

    for index in 0..max_paths {
        let Some(path) = find_shortest_path(graph, catalog, source, destination, &exclusions)
        else {
            debug!(
                source,
                destination,
                found = index,
                excluded = exclusions.len(),
                "no further alternative paths"
            );
            break;
        };

        exclusions = exclusions.with_edges(middle_span(&path));
        paths.push(path);
    }

    paths
}
