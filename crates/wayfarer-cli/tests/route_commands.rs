use std::path::PathBuf;

use assert_cmd::cargo::cargo_bin_cmd;
use assert_cmd::Command;
use predicates::prelude::*;

fn fixture_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("../../docs/fixtures/minimal_map.json")
        .canonicalize()
        .expect("fixture map present")
}

fn cli() -> Command {
    let mut cmd = cargo_bin_cmd!("wayfarer-cli");
    cmd.env("RUST_LOG", "error")
        .env("NO_COLOR", "1")
        .env_remove("WAYFARER_MAP_PATH")
        .arg("--map")
        .arg(fixture_path());
    cmd
}

#[test]
fn route_prints_every_alternative() {
    cli()
        .args(["route", "--from", "Oakham", "--to", "Brindle"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Route 1: Oakham -> Brindle (88 km • 44m • €0.48)",
        ))
        .stdout(predicate::str::contains("  1. Start at Oakham"))
        .stdout(predicate::str::contains(
            "Follow KING for 88 km (44m) [€0.48] (passing through Marrow)",
        ))
        .stdout(predicate::str::contains("Route 2: Oakham -> Brindle"))
        .stdout(predicate::str::contains("Follow OLD for 120 km (2h 0m)"))
        .stdout(predicate::str::contains("Arrive at Brindle"));
}

#[test]
fn route_names_are_case_insensitive() {
    cli()
        .args(["route", "--from", "oakham", "--to", "BRINDLE"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Route 1: Oakham -> Brindle"));
}

#[test]
fn max_paths_limits_alternatives() {
    cli()
        .args(["route", "--from", "Oakham", "--to", "Brindle", "--max-paths", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Route 1:"))
        .stdout(predicate::str::contains("Route 2:").not());
}

#[test]
fn avoided_edge_changes_the_best_route() {
    cli()
        .args([
            "route",
            "--from",
            "Oakham",
            "--to",
            "Brindle",
            "--avoid-edge",
            "3-4",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Route 1: Oakham -> Brindle (120 km • 2h 0m)",
        ));
}

#[test]
fn malformed_avoid_edge_is_rejected() {
    cli()
        .args([
            "route",
            "--from",
            "Oakham",
            "--to",
            "Brindle",
            "--avoid-edge",
            "3x4",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid edge '3x4'"));
}

#[test]
fn unit_overrides_rescale_distances() {
    cli()
        .args([
            "route",
            "--from",
            "Oakham",
            "--to",
            "Brindle",
            "--distance-scale",
            "1",
            "--unit",
            "mi",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Follow KING for 44 mi (22m) [€0.24]",
        ));
}

#[test]
fn invalid_distance_scale_is_rejected() {
    cli()
        .args([
            "route",
            "--from",
            "Oakham",
            "--to",
            "Brindle",
            "--distance-scale",
            "0",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("positive finite number"));
}

#[test]
fn unreachable_destination_is_not_an_error() {
    cli()
        .args(["route", "--from", "Oakham", "--to", "Isolde"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "No route found between Oakham and Isolde.",
        ));
}

#[test]
fn unknown_settlement_suggests_names() {
    cli()
        .args(["route", "--from", "Okham", "--to", "Brindle"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown settlement name: Okham"))
        .stderr(predicate::str::contains("Did you mean"));
}

#[test]
fn identical_endpoints_are_rejected() {
    cli()
        .args(["route", "--from", "Oakham", "--to", "oakham"])
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "start and destination must be different",
        ));
}

#[test]
fn compact_format_lists_badges() {
    cli()
        .args(["--format", "compact", "route", "--from", "Oakham", "--to", "Brindle"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Route 1: 88 km • 44m • €0.48 | KING"));
}

#[test]
fn rich_format_emits_markdown() {
    cli()
        .args(["--format", "rich", "route", "--from", "Oakham", "--to", "Brindle"])
        .assert()
        .success()
        .stdout(predicate::str::contains("**Route 1**"))
        .stdout(predicate::str::contains("Follow `KING`"));
}

#[test]
fn enhanced_format_without_color_has_no_escapes() {
    cli()
        .args(["--format", "enhanced", "route", "--from", "Oakham", "--to", "Brindle"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Route 1: Oakham → Brindle"))
        .stdout(predicate::str::contains("\x1b[").not());
}

#[test]
fn json_format_emits_tagged_steps() {
    cli()
        .args(["--format", "json", "route", "--from", "Oakham", "--to", "Brindle"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"kind\": \"follow\""))
        .stdout(predicate::str::contains("\"start\": \"Oakham\""));
}

#[test]
fn json_format_reports_empty_plans() {
    cli()
        .args(["--format", "json", "route", "--from", "Oakham", "--to", "Isolde"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"paths\": []"));
}

#[test]
fn path_command_accepts_cell_ids() {
    cli()
        .args(["path", "--from-cell", "1", "--to-cell", "5"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Route 1: Oakham -> Brindle"));
}

#[test]
fn path_command_names_cells_without_settlements() {
    cli()
        .args(["path", "--from-cell", "6", "--to-cell", "20"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "No route found between cell 6 and Isolde.",
        ));
}

#[test]
fn path_command_rejects_unknown_cells() {
    cli()
        .args(["path", "--from-cell", "1", "--to-cell", "999"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown cell id: 999"));
}
