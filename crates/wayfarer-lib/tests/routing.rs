use std::path::PathBuf;

use wayfarer_lib::{
    find_paths, load_route_map, plan_route, EdgeKey, Error, PathQuery, RouteClass, RouteMap,
    RouteRequest,
};

fn fixture_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../docs/fixtures/minimal_map.json")
}

fn load_fixture_map() -> RouteMap {
    load_route_map(&fixture_path()).expect("fixture loads")
}

fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-6
}

#[test]
fn highway_then_trail_between_oakham_and_brindle() {
    let map = load_fixture_map();
    let plan = plan_route(&map, &RouteRequest::new("Oakham", "Brindle")).expect("plan builds");

    assert_eq!(plan.paths.len(), 2, "third search should find nothing");

    let highway = &plan.paths[0];
    assert_eq!(highway.cells, vec![1, 2, 3, 4, 5]);
    assert_eq!(highway.segments.len(), 1);
    assert_eq!(highway.segments[0].class, RouteClass::Highway);
    assert!(approx(highway.distance, 88.0));
    assert!(approx(highway.time_hours, 88.0 / 120.0));
    assert!(approx(highway.toll, 88.0 * 0.0055));
    assert_eq!(highway.segments[0].settlements, vec!["Marrow".to_string()]);

    let trail = &plan.paths[1];
    assert_eq!(trail.cells, vec![1, 6, 7, 5]);
    assert!(approx(trail.distance, 120.0));
    assert!(approx(trail.time_hours, 2.0));
    assert_eq!(trail.toll, 0.0);
}

#[test]
fn search_cost_is_kept_next_to_the_estimates() {
    let map = load_fixture_map();
    let plan = plan_route(&map, &RouteRequest::new("Oakham", "Brindle")).expect("plan builds");
    let best = plan.best().expect("at least one path");
    assert!(approx(best.search_cost, 40.0 / 1.2));
    assert!(plan.paths[1].search_cost > best.search_cost);
}

#[test]
fn single_hop_sea_route_has_generated_name() {
    let map = load_fixture_map();
    let plan = plan_route(&map, &RouteRequest::new("Eastwatch", "Saltmere")).expect("plan builds");

    let direct = plan.best().expect("direct path");
    assert_eq!(direct.cells, vec![9, 10]);
    assert_eq!(direct.segments[0].name, "Sea route 4");
    assert!(plan.paths.len() <= 3);
    for path in &plan.paths {
        assert_eq!(path.first_cell(), Some(9));
        assert_eq!(path.last_cell(), Some(10));
    }
}

#[test]
fn only_highway_paths_carry_a_toll() {
    let map = load_fixture_map();
    let (mut tolled, mut free) = (0, 0);
    for source in 1..=10 {
        for destination in 1..=10 {
            let query = PathQuery::new(source, destination).with_max_paths(3);
            for path in find_paths(&map, &query) {
                if path.uses_highway() {
                    assert!(path.toll > 0.0, "{source}->{destination}: {:?}", path.cells);
                    tolled += 1;
                } else {
                    assert_eq!(path.toll, 0.0, "{source}->{destination}: {:?}", path.cells);
                    free += 1;
                }
            }
        }
    }
    assert!(tolled > 0 && free > 0);
}

#[test]
fn isolated_settlement_is_unreachable_not_an_error() {
    let map = load_fixture_map();
    let plan = plan_route(&map, &RouteRequest::new("Oakham", "Isolde")).expect("plan builds");
    assert!(plan.is_empty());
}

#[test]
fn unknown_route_edges_are_never_used() {
    let map = load_fixture_map();
    assert!(find_paths(&map, &PathQuery::new(1, 11)).is_empty());
}

#[test]
fn avoided_edges_reroute_the_first_path() {
    let map = load_fixture_map();
    let request = RouteRequest::new("Oakham", "Brindle").avoiding([EdgeKey::new(3, 4)]);
    let plan = plan_route(&map, &request).expect("plan builds");
    let best = plan.best().expect("a detour exists");
    assert!(best
        .cells
        .windows(2)
        .all(|pair| EdgeKey::new(pair[0], pair[1]) != EdgeKey::new(3, 4)));
}

#[test]
fn max_paths_bounds_the_result() {
    let map = load_fixture_map();
    for max_paths in 0..5 {
        let request = RouteRequest::new("Oakham", "Brindle").with_max_paths(max_paths);
        let plan = plan_route(&map, &request).expect("plan builds");
        assert!(plan.paths.len() <= max_paths);
    }
}

#[test]
fn repeated_queries_are_identical() {
    let map = load_fixture_map();
    let query = PathQuery::new(1, 10).with_max_paths(4);
    assert_eq!(find_paths(&map, &query), find_paths(&map, &query));
}

#[test]
fn unknown_settlement_includes_suggestions() {
    let map = load_fixture_map();
    let err = plan_route(&map, &RouteRequest::new("Okham", "Brindle")).unwrap_err();
    match err {
        Error::UnknownSettlement { name, suggestions } => {
            assert_eq!(name, "Okham");
            assert!(suggestions.contains(&"Oakham".to_string()));
        }
        other => panic!("unexpected error: {other}"),
    }
}
