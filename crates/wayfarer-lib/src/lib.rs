//! Wayfarer library entry points.
//!
//! This crate loads a map of cells joined by classified routes, finds the
//! shortest path between two cells plus a handful of diverse alternatives,
//! and annotates each path with distance, travel time, toll, and
//! turn-by-turn steps. Higher-level consumers (CLI, HTTP service) should only
//! depend on the functions exported here instead of reimplementing behavior.

#![deny(warnings)]

pub mod audit;
pub mod config;
pub mod dataset;
pub mod error;
pub mod graph;
pub mod map;
pub mod output;
pub mod path;
pub mod routing;
pub mod segments;
pub mod weight;

pub use audit::{audit_map, DataWarning};
pub use config::UnitConfig;
pub use dataset::{default_map_path, resolve_map_path, MAP_PATH_ENV};
pub use error::{Error, Result};
pub use graph::{CellGraph, EdgeExclusions, EdgeKey};
pub use map::{
    load_route_map, parse_route_map, Cell, CellId, CellPosition, Route, RouteCatalog, RouteClass,
    RouteId, RouteMap, Settlement, SettlementId, SettlementSearch,
};
pub use output::{
    format_duration, BadgeTone, FollowStep, NavigationStep, PathSummary, RouteBadge,
    RouteRenderMode, RouteSummary,
};
pub use path::{find_shortest_path, RawPath};
pub use routing::{
    find_alternative_paths, find_paths, plan_cells, plan_route, PathQuery, PlanEndpoint,
    RoutePlan, RouteRequest, DEFAULT_MAX_PATHS,
};
pub use segments::{aggregate_path, Path, RouteSegment};
pub use weight::{edge_weight, elevation_penalty, ClassProfile};
