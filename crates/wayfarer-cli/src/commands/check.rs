//! Check command handler for reporting data problems in a map.

use std::path::Path;

use anyhow::{Context, Result};

use wayfarer_cli::output::{render_json, OutputFormat};
use wayfarer_lib::audit_map;

use super::load_map;

/// Handle the check subcommand.
///
/// Problems are reported, not fatal: the command succeeds whenever the map
/// loads.
pub fn handle_check_command(map_path: Option<&Path>, format: OutputFormat) -> Result<()> {
    let map = load_map(map_path)?;
    let warnings = audit_map(&map);

    if format.is_json() {
        return render_json(&warnings).context("failed to write warnings");
    }

    for warning in &warnings {
        println!("warning: {warning}");
    }
    if warnings.is_empty() {
        println!(
            "Map looks clean: {} cells, {} edges, {} routes, {} settlements.",
            map.graph.len(),
            map.graph.edge_count(),
            map.catalog.len(),
            map.settlements.len()
        );
    } else {
        println!("{} problem(s) found.", warnings.len());
    }
    Ok(())
}
