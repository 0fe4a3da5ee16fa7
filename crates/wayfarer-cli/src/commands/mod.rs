// One module per subcommand; main.rs only parses arguments and dispatches.

pub mod check;
pub mod route;
pub mod settlements;

use std::path::Path;

use anyhow::{Context, Result};

use wayfarer_lib::{load_route_map, resolve_map_path, RouteMap};

/// Locate and load the map every subcommand works on.
pub fn load_map(explicit: Option<&Path>) -> Result<RouteMap> {
    let path = resolve_map_path(explicit).context("failed to locate the map file")?;
    load_route_map(&path).with_context(|| format!("failed to load map from {}", path.display()))
}
