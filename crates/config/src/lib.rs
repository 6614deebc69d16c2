pub mod schema;
pub mod watcher;

pub use schema::{BarConfig, BarSettings, ItemConfig, ViewConfig};
pub use watcher::ConfigWatcher;

use actionbar_core::{ActionBarError, Result};
use std::ffi::OsString;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Read the bar description at `path`.
///
/// A file that does not exist is not an error: the demo bar from
/// [`BarConfig::default`] is laid out instead. Any other read failure is.
pub fn load(path: impl AsRef<Path>) -> Result<BarConfig> {
    let path = path.as_ref();
    match std::fs::read_to_string(path) {
        Ok(raw) => {
            debug!(path = %path.display(), "Loaded bar description");
            parse(&raw)
        }
        Err(e) if e.kind() == ErrorKind::NotFound => {
            warn!(path = %path.display(), "No bar description; laying out the demo bar");
            Ok(BarConfig::default())
        }
        Err(e) => Err(e.into()),
    }
}

/// Parse a bar description from TOML source.
pub fn parse(raw: &str) -> Result<BarConfig> {
    toml::from_str(raw).map_err(|e| ActionBarError::Config(format!("TOML parse error: {e}")))
}

/// Where the bar description lives: `$ACTIONBAR_CONFIG` when set, otherwise
/// `actionbar/actionbar.toml` under the XDG config directory.
pub fn default_path() -> PathBuf {
    resolve_path(
        std::env::var_os("ACTIONBAR_CONFIG"),
        std::env::var_os("XDG_CONFIG_HOME"),
        std::env::var_os("HOME"),
    )
}

fn resolve_path(
    explicit: Option<OsString>,
    xdg_config_home: Option<OsString>,
    home: Option<OsString>,
) -> PathBuf {
    if let Some(path) = explicit.filter(|p| !p.is_empty()) {
        return PathBuf::from(path);
    }
    let config_dir = match (xdg_config_home.filter(|d| !d.is_empty()), home) {
        (Some(dir), _) => PathBuf::from(dir),
        (None, Some(home)) => PathBuf::from(home).join(".config"),
        (None, None) => PathBuf::from(".config"),
    };
    config_dir.join("actionbar").join("actionbar.toml")
}
