use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::fmt;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Deserializer, Serialize};
use tracing::{debug, warn};

use crate::config::UnitConfig;
use crate::error::{Error, Result};
use crate::graph::CellGraph;

/// Numeric identifier for a map cell.
pub type CellId = u32;

/// Numeric identifier for a route.
pub type RouteId = u32;

/// Numeric identifier for a settlement.
pub type SettlementId = u32;

/// Minimum Jaro-Winkler similarity for a settlement name suggestion.
const FUZZY_MATCH_THRESHOLD: f64 = 0.7;

/// Planar coordinates of a cell in map units.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CellPosition {
    pub x: f64,
    pub y: f64,
}

impl CellPosition {
    /// Calculate the Euclidean distance to another position.
    pub fn distance_to(&self, other: &Self) -> f64 {
        (other.x - self.x).hypot(other.y - self.y)
    }
}

/// Atomic map unit and graph vertex.
#[derive(Debug, Clone, PartialEq)]
pub struct Cell {
    pub id: CellId,
    pub position: CellPosition,
    pub elevation: f64,
    pub settlement: Option<SettlementId>,
}

/// A named place attached to a cell.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Settlement {
    pub id: SettlementId,
    pub name: String,
    pub cell: CellId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
}

impl Settlement {
    /// Display label in the form `Name (State)`.
    pub fn label(&self) -> String {
        format!("{} ({})", self.name, self.state.as_deref().unwrap_or("Unknown"))
    }
}

/// Categorical speed and terrain profile of a route.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum RouteClass {
    Highway,
    Secondary,
    Tertiary,
    LocalRoad,
    Trail,
    SeaRoute,
    Custom,
}

impl RouteClass {
    pub const ALL: [RouteClass; 7] = [
        RouteClass::Highway,
        RouteClass::Secondary,
        RouteClass::Tertiary,
        RouteClass::LocalRoad,
        RouteClass::Trail,
        RouteClass::SeaRoute,
        RouteClass::Custom,
    ];

    /// Parse a class name from map data.
    ///
    /// Accepts the canonical kebab-case names as well as the route group names
    /// used by map generators (`route-a`, `roads`, `trails`, ...). Anything
    /// else is a [`RouteClass::Custom`] route.
    pub fn from_group(group: &str) -> Self {
        match group.trim().to_ascii_lowercase().as_str() {
            "highway" | "route-a" => RouteClass::Highway,
            "secondary" | "route-c" => RouteClass::Secondary,
            "tertiary" | "route-e" => RouteClass::Tertiary,
            "local-road" | "roads" => RouteClass::LocalRoad,
            "trail" | "trails" => RouteClass::Trail,
            "sea-route" | "searoutes" => RouteClass::SeaRoute,
            _ => RouteClass::Custom,
        }
    }

    /// Human-readable label.
    pub fn label(self) -> &'static str {
        match self {
            RouteClass::Highway => "Highway",
            RouteClass::Secondary => "Secondary road",
            RouteClass::Tertiary => "Tertiary road",
            RouteClass::LocalRoad => "Road",
            RouteClass::Trail => "Trail",
            RouteClass::SeaRoute => "Sea route",
            RouteClass::Custom => "Route",
        }
    }
}

impl fmt::Display for RouteClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let value = match self {
            RouteClass::Highway => "highway",
            RouteClass::Secondary => "secondary",
            RouteClass::Tertiary => "tertiary",
            RouteClass::LocalRoad => "local-road",
            RouteClass::Trail => "trail",
            RouteClass::SeaRoute => "sea-route",
            RouteClass::Custom => "custom",
        };
        f.write_str(value)
    }
}

impl<'de> Deserialize<'de> for RouteClass {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let group = String::deserialize(deserializer)?;
        Ok(RouteClass::from_group(&group))
    }
}

/// Named connector of one class.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Route {
    pub id: RouteId,
    pub class: RouteClass,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl Route {
    /// The route's name, or a generated `"<Class> <id>"` name when unnamed.
    pub fn display_name(&self) -> String {
        match self.name.as_deref() {
            Some(name) if !name.trim().is_empty() => name.to_string(),
            _ => format!("{} {}", self.class.label(), self.id),
        }
    }
}

/// Lookup from route id to route.
#[derive(Debug, Clone, Default)]
pub struct RouteCatalog {
    routes: BTreeMap<RouteId, Route>,
}

impl RouteCatalog {
    /// Build a catalog; a repeated route id keeps its first definition.
    pub fn new(routes: impl IntoIterator<Item = Route>) -> Self {
        let mut catalog = BTreeMap::new();
        for route in routes {
            if catalog.contains_key(&route.id) {
                warn!(route = route.id, "duplicate route id; keeping the first");
                continue;
            }
            catalog.insert(route.id, route);
        }
        Self { routes: catalog }
    }

    pub fn get(&self, id: RouteId) -> Option<&Route> {
        self.routes.get(&id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Route> {
        self.routes.values()
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}

/// Result of a settlement name search.
#[derive(Debug, Clone, PartialEq)]
pub struct SettlementSearch<'a> {
    /// Matches sorted by name, at most `limit` of them.
    pub matches: Vec<&'a Settlement>,
    /// Number of further matches that were cut off by the limit.
    pub remaining: usize,
}

/// In-memory map: the cell graph, its route catalog, and its settlements.
///
/// The map is read-only once built and can be shared freely between queries.
#[derive(Debug, Clone, Default)]
pub struct RouteMap {
    pub graph: CellGraph,
    pub catalog: RouteCatalog,
    pub settlements: BTreeMap<SettlementId, Settlement>,
    pub units: UnitConfig,
    name_to_id: HashMap<String, SettlementId>,
}

impl RouteMap {
    /// Assemble a map from its parts.
    ///
    /// Cell settlement links are derived from `settlements`. Connections or
    /// settlements that reference unknown cells are dropped with a warning, as
    /// are repeated settlement ids after the first.
    pub fn from_parts(
        cells: impl IntoIterator<Item = Cell>,
        routes: impl IntoIterator<Item = Route>,
        connections: impl IntoIterator<Item = (CellId, CellId, RouteId)>,
        settlements: impl IntoIterator<Item = Settlement>,
        units: UnitConfig,
    ) -> Self {
        let mut cells: BTreeMap<CellId, Cell> = cells.into_iter().map(|c| (c.id, c)).collect();
        let mut kept = BTreeMap::new();
        let mut name_to_id = HashMap::new();

        for settlement in settlements {
            let Some(cell) = cells.get_mut(&settlement.cell) else {
                warn!(
                    settlement = %settlement.name,
                    cell = settlement.cell,
                    "dropping settlement on unknown cell"
                );
                continue;
            };
            if kept.contains_key(&settlement.id) {
                warn!(
                    settlement = %settlement.name,
                    id = settlement.id,
                    "duplicate settlement id; keeping the first"
                );
                continue;
            }
            cell.settlement = Some(settlement.id);
            let key = settlement.name.to_lowercase();
            if name_to_id.contains_key(&key) {
                warn!(settlement = %settlement.name, "duplicate settlement name; keeping the first");
            } else {
                name_to_id.insert(key, settlement.id);
            }
            kept.insert(settlement.id, settlement);
        }

        let mut graph = CellGraph::new(cells.into_values());
        for (from, to, route) in connections {
            if !graph.connect(from, to, route) {
                warn!(from, to, route, "dropping connection with unknown or identical endpoints");
            }
        }

        Self {
            graph,
            catalog: RouteCatalog::new(routes),
            settlements: kept,
            units,
            name_to_id,
        }
    }

    /// Replace the unit configuration.
    pub fn with_units(mut self, units: UnitConfig) -> Self {
        self.units = units;
        self
    }

    pub fn settlement(&self, id: SettlementId) -> Option<&Settlement> {
        self.settlements.get(&id)
    }

    /// Settlement located on `cell`, if any.
    pub fn settlement_at(&self, cell: CellId) -> Option<&Settlement> {
        self.graph
            .cell(cell)
            .and_then(|c| c.settlement)
            .and_then(|id| self.settlements.get(&id))
    }

    /// Lookup a settlement identifier by name, ignoring case.
    pub fn settlement_id_by_name(&self, name: &str) -> Option<SettlementId> {
        self.name_to_id.get(&name.trim().to_lowercase()).copied()
    }

    /// Lookup a settlement by name, ignoring case.
    pub fn settlement_by_name(&self, name: &str) -> Option<&Settlement> {
        self.settlement_id_by_name(name)
            .and_then(|id| self.settlements.get(&id))
    }

    /// Settlement names similar to `name`, best match first.
    pub fn fuzzy_settlement_matches(&self, name: &str, limit: usize) -> Vec<String> {
        let needle = name.trim().to_lowercase();
        let mut scored: Vec<(f64, &str)> = self
            .settlements
            .values()
            .map(|s| {
                (
                    strsim::jaro_winkler(&needle, &s.name.to_lowercase()),
                    s.name.as_str(),
                )
            })
            .filter(|(score, _)| *score >= FUZZY_MATCH_THRESHOLD)
            .collect();
        scored.sort_by(|a, b| b.0.total_cmp(&a.0).then_with(|| a.1.cmp(b.1)));
        scored
            .into_iter()
            .take(limit)
            .map(|(_, name)| name.to_string())
            .collect()
    }

    /// Settlements whose label contains `filter` (ignoring case), sorted by
    /// name. An empty filter matches everything.
    pub fn search_settlements(&self, filter: &str, limit: usize) -> SettlementSearch<'_> {
        let needle = filter.trim().to_lowercase();
        let mut matches: Vec<&Settlement> = self
            .settlements
            .values()
            .filter(|s| needle.is_empty() || s.label().to_lowercase().contains(&needle))
            .collect();
        matches.sort_by(|a, b| a.name.cmp(&b.name).then_with(|| a.id.cmp(&b.id)));
        let remaining = matches.len().saturating_sub(limit);
        matches.truncate(limit);
        SettlementSearch { matches, remaining }
    }
}

#[derive(Debug, Deserialize)]
struct MapFile {
    #[serde(default)]
    units: UnitConfig,
    cells: Vec<CellRecord>,
    #[serde(default)]
    routes: Vec<RouteRecord>,
    #[serde(default)]
    connections: Vec<ConnectionRecord>,
    #[serde(default)]
    settlements: Vec<SettlementRecord>,
}

#[derive(Debug, Deserialize)]
struct CellRecord {
    id: CellId,
    x: f64,
    y: f64,
    #[serde(default)]
    elevation: f64,
}

#[derive(Debug, Deserialize)]
struct RouteRecord {
    id: RouteId,
    class: RouteClass,
    #[serde(default)]
    name: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ConnectionRecord {
    from: CellId,
    to: CellId,
    route: RouteId,
}

#[derive(Debug, Deserialize)]
struct SettlementRecord {
    id: SettlementId,
    name: String,
    cell: CellId,
    #[serde(default)]
    state: Option<String>,
}

/// Load a map from a JSON map file.
///
/// The loader rejects duplicate cell, route, or settlement ids and
/// non-finite coordinates, and
/// drops (with a warning) connections and settlements that point at cells the
/// file does not define.
pub fn load_route_map(path: &Path) -> Result<RouteMap> {
    if !path.exists() {
        return Err(Error::MapNotFound {
            path: path.to_path_buf(),
        });
    }
    let bytes = fs::read(path)?;
    let map = parse_route_map(&bytes)?;
    debug!(
        path = %path.display(),
        cells = map.graph.len(),
        edges = map.graph.edge_count(),
        routes = map.catalog.len(),
        settlements = map.settlements.len(),
        "loaded route map"
    );
    Ok(map)
}

/// Parse a map from JSON bytes.
pub fn parse_route_map(bytes: &[u8]) -> Result<RouteMap> {
    let file: MapFile = serde_json::from_slice(bytes)?;

    if !file.units.is_valid() {
        return Err(Error::InvalidMap {
            message: format!(
                "distance_scale must be a positive number, got {}",
                file.units.distance_scale
            ),
        });
    }

    let mut seen = BTreeMap::new();
    for record in &file.cells {
        if !(record.x.is_finite() && record.y.is_finite() && record.elevation.is_finite()) {
            return Err(Error::InvalidMap {
                message: format!("cell {} has non-finite coordinates", record.id),
            });
        }
        if seen.insert(record.id, ()).is_some() {
            return Err(Error::InvalidMap {
                message: format!("duplicate cell id {}", record.id),
            });
        }
    }

    let mut seen_routes = BTreeSet::new();
    for record in &file.routes {
        if !seen_routes.insert(record.id) {
            return Err(Error::InvalidMap {
                message: format!("duplicate route id {}", record.id),
            });
        }
    }

    let mut seen_settlements = BTreeSet::new();
    for record in &file.settlements {
        if !seen_settlements.insert(record.id) {
            return Err(Error::InvalidMap {
                message: format!("duplicate settlement id {}", record.id),
            });
        }
    }

    let cells = file.cells.into_iter().map(|record| Cell {
        id: record.id,
        position: CellPosition {
            x: record.x,
            y: record.y,
        },
        elevation: record.elevation,
        settlement: None,
    });
    let routes = file.routes.into_iter().map(|record| Route {
        id: record.id,
        class: record.class,
        name: record.name,
    });
    let connections = file
        .connections
        .into_iter()
        .map(|record| (record.from, record.to, record.route));
    let settlements = file.settlements.into_iter().map(|record| Settlement {
        id: record.id,
        name: record.name,
        cell: record.cell,
        state: record.state,
    });

    Ok(RouteMap::from_parts(
        cells,
        routes,
        connections,
        settlements,
        file.units,
    ))
}
