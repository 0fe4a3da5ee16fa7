//! Route and path command handlers for planning alternatives between two
//! settlements or two raw cells.

use std::path::Path;

use anyhow::{bail, Context, Result};
use clap::Args;

use wayfarer_cli::output::OutputFormat;
use wayfarer_lib::{
    plan_cells, plan_route, CellId, EdgeKey, PathQuery, RouteMap, RoutePlan, RouteRequest,
    RouteSummary, DEFAULT_MAX_PATHS,
};

use super::load_map;

/// Arguments for the route command.
#[derive(Args, Debug, Clone)]
pub struct RouteCommandArgs {
    /// Starting settlement name.
    #[arg(long)]
    pub from: String,
    /// Destination settlement name.
    #[arg(long)]
    pub to: String,
    /// Maximum number of alternatives to print.
    #[arg(long, default_value_t = DEFAULT_MAX_PATHS)]
    pub max_paths: usize,
    /// Edge to leave out of every search, written as two cell ids (`3-4`).
    #[arg(long = "avoid-edge", value_name = "A-B")]
    pub avoid_edges: Vec<EdgeKey>,
    /// Multiplier from map units to display units, overriding the map file.
    #[arg(long)]
    pub distance_scale: Option<f64>,
    /// Display distance unit, overriding the map file.
    #[arg(long)]
    pub unit: Option<String>,
}

impl RouteCommandArgs {
    /// Convert CLI args to a library [`RouteRequest`].
    pub fn to_request(&self) -> RouteRequest {
        RouteRequest::new(self.from.as_str(), self.to.as_str())
            .with_max_paths(self.max_paths)
            .avoiding(self.avoid_edges.iter().copied())
    }

    /// Apply the unit overrides to a loaded map.
    fn apply_units(&self, map: RouteMap) -> Result<RouteMap> {
        let mut units = map.units.clone();
        if let Some(scale) = self.distance_scale {
            units = units.with_distance_scale(scale);
        }
        if let Some(unit) = &self.unit {
            units = units.with_distance_unit(unit.as_str());
        }
        if !units.is_valid() {
            bail!(
                "--distance-scale must be a positive finite number, got {}",
                units.distance_scale
            );
        }
        Ok(map.with_units(units))
    }
}

/// Arguments for the path command.
#[derive(Args, Debug, Clone)]
pub struct PathCommandArgs {
    /// Starting cell id.
    #[arg(long)]
    pub from_cell: CellId,
    /// Destination cell id.
    #[arg(long)]
    pub to_cell: CellId,
    /// Maximum number of alternatives to print.
    #[arg(long, default_value_t = DEFAULT_MAX_PATHS)]
    pub max_paths: usize,
}

/// Handle the route subcommand.
///
/// Unknown settlement names fail with suggestions; an unreachable goal is
/// reported on stdout and is not an error.
pub fn handle_route_command(
    map_path: Option<&Path>,
    format: OutputFormat,
    args: &RouteCommandArgs,
) -> Result<()> {
    let map = args.apply_units(load_map(map_path)?)?;
    let plan = plan_route(&map, &args.to_request()).context("failed to plan route")?;
    render_plan(&map, &plan, format)
}

/// Handle the path subcommand.
pub fn handle_path_command(
    map_path: Option<&Path>,
    format: OutputFormat,
    args: &PathCommandArgs,
) -> Result<()> {
    let map = load_map(map_path)?;
    let query = PathQuery::new(args.from_cell, args.to_cell).with_max_paths(args.max_paths);
    let plan = plan_cells(&map, &query).context("failed to plan path")?;
    render_plan(&map, &plan, format)
}

fn render_plan(map: &RouteMap, plan: &RoutePlan, format: OutputFormat) -> Result<()> {
    if plan.is_empty() {
        return format
            .render_no_route(plan)
            .context("failed to write route output");
    }

    let summary = RouteSummary::from_plan(map, plan)
        .context("failed to build route summary for display")?;
    format
        .render_route(&summary)
        .context("failed to write route output")
}
