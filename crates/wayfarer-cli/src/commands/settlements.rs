//! Settlements command handler for listing and searching place names.

use std::path::Path;

use anyhow::{Context, Result};
use clap::Args;
use serde::Serialize;

use wayfarer_cli::output::{render_json, OutputFormat};
use wayfarer_lib::Settlement;

use super::load_map;

/// Arguments for the settlements command.
#[derive(Args, Debug, Clone)]
pub struct SettlementsCommandArgs {
    /// Only list settlements whose `Name (State)` label contains this text.
    #[arg(long)]
    pub search: Option<String>,
    /// Maximum number of settlements to print.
    #[arg(long, default_value_t = 100)]
    pub limit: usize,
}

#[derive(Serialize)]
struct SettlementListing<'a> {
    settlements: &'a [&'a Settlement],
    remaining: usize,
}

/// Handle the settlements subcommand.
pub fn handle_settlements_command(
    map_path: Option<&Path>,
    format: OutputFormat,
    args: &SettlementsCommandArgs,
) -> Result<()> {
    let map = load_map(map_path)?;
    let filter = args.search.as_deref().unwrap_or("");
    let search = map.search_settlements(filter, args.limit);

    if format.is_json() {
        let listing = SettlementListing {
            settlements: &search.matches,
            remaining: search.remaining,
        };
        return render_json(&listing).context("failed to write settlements");
    }

    if search.matches.is_empty() && search.remaining == 0 {
        match args.search.as_deref() {
            Some(text) => println!("No settlements match '{text}'."),
            None => println!("The map has no settlements."),
        }
        return Ok(());
    }

    for settlement in &search.matches {
        println!("{}", settlement.label());
    }
    if search.remaining > 0 {
        println!("... and {} more", search.remaining);
    }
    Ok(())
}
