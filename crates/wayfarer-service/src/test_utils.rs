//! Test fixtures for handler tests.

use std::path::PathBuf;
use std::sync::OnceLock;

use crate::state::AppState;

/// Path to the fixture map shared with the library and CLI tests.
pub const TEST_FIXTURE_PATH: &str = concat!(
    env!("CARGO_MANIFEST_DIR"),
    "/../../docs/fixtures/minimal_map.json"
);

static TEST_STATE: OnceLock<AppState> = OnceLock::new();

/// Shared `AppState` loaded from the fixture map once per test binary.
///
/// # Panics
///
/// Panics if the fixture cannot be loaded.
pub fn test_state() -> AppState {
    TEST_STATE
        .get_or_init(|| {
            let path = fixture_map_path();
            AppState::load(&path)
                .unwrap_or_else(|e| panic!("failed to load test fixture from {:?}: {}", path, e))
        })
        .clone()
}

pub fn fixture_map_path() -> PathBuf {
    PathBuf::from(TEST_FIXTURE_PATH)
}

/// Settlement names in the fixture map.
pub mod fixture_settlements {
    /// Western end of Kingsway.
    pub const OAKHAM: &str = "Oakham";
    /// On Kingsway between Oakham and Brindle.
    pub const MARROW: &str = "Marrow";
    /// Eastern end of Kingsway and Old Pilgrim Trail.
    pub const BRINDLE: &str = "Brindle";
    /// Not connected to anything.
    pub const ISOLDE: &str = "Isolde";
}
