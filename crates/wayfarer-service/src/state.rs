//! Application state shared by the axum handlers.

use std::path::Path;
use std::sync::Arc;

use chrono::{DateTime, Utc};

use wayfarer_lib::{load_route_map, Error as LibError, RouteMap};

/// Error during application state initialization.
#[derive(Debug)]
pub enum AppStateError {
    /// Map file not found.
    MapNotFound(String),

    /// The map file exists but could not be loaded.
    MapLoad(LibError),
}

impl std::fmt::Display for AppStateError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MapNotFound(path) => write!(f, "map not found: {}", path),
            Self::MapLoad(e) => write!(f, "failed to load map: {}", e),
        }
    }
}

impl std::error::Error for AppStateError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::MapLoad(e) => Some(e),
            Self::MapNotFound(_) => None,
        }
    }
}

impl From<LibError> for AppStateError {
    fn from(err: LibError) -> Self {
        Self::MapLoad(err)
    }
}

/// Shared application state for all axum handlers.
///
/// Cheap to clone; the map itself is immutable and shared through an `Arc`,
/// so concurrent requests read it without locking.
///
/// # Example
///
/// ```ignore
/// use axum::extract::State;
/// use wayfarer_service::AppState;
///
/// async fn handler(State(state): State<AppState>) {
///     let map = state.map();
///     // ... plan routes
/// }
/// ```
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    map: RouteMap,
    loaded_at: DateTime<Utc>,
}

impl AppState {
    /// Load application state from a map file.
    pub fn load(map_path: impl AsRef<Path>) -> Result<Self, AppStateError> {
        let map_path = map_path.as_ref();

        if !map_path.is_file() {
            return Err(AppStateError::MapNotFound(
                map_path.display().to_string(),
            ));
        }

        tracing::info!(path = %map_path.display(), "loading map");
        let map = load_route_map(map_path)?;
        tracing::info!(
            cells = map.graph.len(),
            edges = map.graph.edge_count(),
            settlements = map.settlements.len(),
            "map loaded successfully"
        );

        Ok(Self::from_map(map))
    }

    /// Create application state from a map built in memory.
    pub fn from_map(map: RouteMap) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                map,
                loaded_at: Utc::now(),
            }),
        }
    }

    pub fn map(&self) -> &RouteMap {
        &self.inner.map
    }

    /// When the map was loaded.
    pub fn loaded_at(&self) -> DateTime<Utc> {
        self.inner.loaded_at
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("cell_count", &self.inner.map.graph.len())
            .field("settlement_count", &self.inner.map.settlements.len())
            .field("loaded_at", &self.inner.loaded_at)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_state_from_map() {
        let state = AppState::from_map(RouteMap::default());
        let copy = state.clone();

        assert!(state.map().graph.is_empty());
        assert_eq!(state.loaded_at(), copy.loaded_at());
    }

    #[test]
    fn test_app_state_debug() {
        let state = AppState::from_map(RouteMap::default());
        let debug = format!("{:?}", state);

        assert!(debug.contains("AppState"));
        assert!(debug.contains("cell_count"));
        assert!(debug.contains("settlement_count"));
    }

    #[test]
    fn test_app_state_error_display() {
        let err = AppStateError::MapNotFound("/path/to/map.json".to_string());
        assert!(err.to_string().contains("/path/to/map.json"));
        assert!(err.to_string().contains("not found"));
    }

    #[test]
    fn test_app_state_load_nonexistent() {
        match AppState::load("/nonexistent/path/to/map.json") {
            Err(AppStateError::MapNotFound(path)) => assert!(path.contains("nonexistent")),
            other => panic!("unexpected result: {:?}", other),
        }
    }
}
