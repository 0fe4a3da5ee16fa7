use std::env;
use std::ffi::OsString;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use tracing::debug;

use crate::error::{Error, Result};

/// Default filename for the map file in the data directory.
const MAP_FILENAME: &str = "map.json";

/// Environment variable that points at a map file.
pub const MAP_PATH_ENV: &str = "WAYFARER_MAP_PATH";

/// Resolve the default map location using platform-specific project directories.
pub fn default_map_path() -> Result<PathBuf> {
    let dirs =
        ProjectDirs::from("org", "wayfarer", "wayfarer").ok_or(Error::ProjectDirsUnavailable)?;
    Ok(dirs.data_dir().join(MAP_FILENAME))
}

/// Pick the map file to load.
///
/// An explicit path wins, then [`MAP_PATH_ENV`], then [`default_map_path`].
/// The chosen file must exist.
pub fn resolve_map_path(explicit: Option<&Path>) -> Result<PathBuf> {
    resolve_from(explicit, env::var_os(MAP_PATH_ENV))
}

fn resolve_from(explicit: Option<&Path>, from_env: Option<OsString>) -> Result<PathBuf> {
    let (path, source) = match (explicit, from_env) {
        (Some(path), _) => (path.to_path_buf(), "argument"),
        (None, Some(value)) if !value.is_empty() => (PathBuf::from(value), MAP_PATH_ENV),
        _ => (default_map_path()?, "default"),
    };
    debug!(path = %path.display(), source, "resolved map path");

    if path.is_file() {
        Ok(path)
    } else {
        Err(Error::MapNotFound { path })
    }
}
