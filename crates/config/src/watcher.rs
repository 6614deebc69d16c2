use actionbar_core::{ActionBarError, Result};
use notify::{Config, Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tokio::sync::mpsc;
use tracing::{info, warn};

/// Watches a bar description for changes so views can be rebuilt live.
///
/// The parent directory is watched rather than the file itself because most
/// editors save by replacing the file. Bursts of events collapse into a
/// single pending notification.
///
/// # Example
/// ```no_run
/// # async fn demo() -> actionbar_core::Result<()> {
/// let (_watcher, mut rx) = actionbar_config::ConfigWatcher::spawn("actionbar.toml")?;
/// while rx.recv().await.is_some() {
///     println!("bar description changed, rebuilding views");
/// }
/// # Ok(())
/// # }
/// ```
pub struct ConfigWatcher {
    path: PathBuf,
    _watcher: RecommendedWatcher,
}

impl ConfigWatcher {
    /// Start watching `path`. The watcher stops when the handle is dropped.
    pub fn spawn(path: impl AsRef<Path>) -> Result<(Self, mpsc::Receiver<()>)> {
        let (tx, rx) = mpsc::channel(1);
        let path = path.as_ref().to_path_buf();
        let dir = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };
        let name = path.file_name().map(ToOwned::to_owned);

        let mut watcher = RecommendedWatcher::new(
            move |res: notify::Result<Event>| match res {
                Ok(event) if is_relevant(&event, name.as_ref()) => {
                    // Full channel means a reload is already pending.
                    let _ = tx.try_send(());
                }
                Ok(_) => {}
                Err(e) => warn!("Watcher error: {e}"),
            },
            Config::default().with_poll_interval(Duration::from_secs(2)),
        )
        .map_err(|e| ActionBarError::Config(format!("cannot create watcher: {e}")))?;

        watcher
            .watch(&dir, RecursiveMode::NonRecursive)
            .map_err(|e| ActionBarError::Config(format!("cannot watch '{}': {e}", dir.display())))?;

        info!("Watching bar description: {}", path.display());
        Ok((
            Self {
                path,
                _watcher: watcher,
            },
            rx,
        ))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// A write or create touching the watched file name.
fn is_relevant(event: &Event, name: Option<&OsString>) -> bool {
    matches!(event.kind, EventKind::Modify(_) | EventKind::Create(_))
        && event
            .paths
            .iter()
            .any(|p| p.file_name() == name.map(OsString::as_os_str))
}
