mod commands;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use wayfarer_cli::output::OutputFormat;

use crate::commands::check::handle_check_command;
use crate::commands::route::{
    handle_path_command, handle_route_command, PathCommandArgs, RouteCommandArgs,
};
use crate::commands::settlements::{handle_settlements_command, SettlementsCommandArgs};

#[derive(Parser, Debug)]
#[command(author, version, about = "Wayfarer map and route planning utilities")]
struct Cli {
    /// Map file to load instead of `WAYFARER_MAP_PATH` or the default location.
    #[arg(long, global = true)]
    map: Option<PathBuf>,

    /// Output format.
    #[arg(long, value_enum, global = true, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Plan alternative routes between two settlements.
    Route(RouteCommandArgs),
    /// Plan alternative paths between two cell ids.
    Path(PathCommandArgs),
    /// List settlements, optionally filtered by name or state.
    Settlements(SettlementsCommandArgs),
    /// Report data problems in the map.
    Check,
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();
    let map = cli.map.as_deref();

    match &cli.command {
        Command::Route(args) => handle_route_command(map, cli.format, args),
        Command::Path(args) => handle_path_command(map, cli.format, args),
        Command::Settlements(args) => handle_settlements_command(map, cli.format, args),
        Command::Check => handle_check_command(map, cli.format),
    }
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .finish();

    let _ = tracing::subscriber::set_global_default(subscriber);
}
