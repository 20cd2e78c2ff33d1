//! Reload the slot layout when the configuration file changes

use anyhow::{Context, Result};
use log::{debug, info, warn};
use notify::{recommended_watcher, Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use std::path::{Path, PathBuf};
use tokio::sync::mpsc::UnboundedSender;

use super::AppConfig;
use crate::core::BarEvent;

/// Whether a file system event touches the watched config file
fn touches(event: &Event, path: &Path) -> bool {
    matches!(event.kind, EventKind::Create(_) | EventKind::Modify(_))
        && event.paths.iter().any(|p| p.file_name() == path.file_name())
}

/// Watch `path` and send a configuration event after every change.
///
/// The parent directory is watched so editors that replace the file are
/// picked up. The returned watcher stops when dropped.
pub fn watch_config(
    path: PathBuf,
    events: UnboundedSender<BarEvent>,
) -> Result<RecommendedWatcher> {
    let watched = path.clone();
    let mut watcher = recommended_watcher(move |result: notify::Result<Event>| match result {
        Ok(event) if touches(&event, &watched) => match AppConfig::load_from_path(&watched) {
            Ok(config) => {
                info!("Config file changed, reloading layout");
                if events.send(BarEvent::Config(config.layout())).is_err() {
                    debug!("Event loop gone, dropping config reload");
                }
            }
            Err(e) => warn!("Ignoring config change: {:#}", e),
        },
        Ok(_) => {}
        Err(e) => warn!("Config watcher error: {}", e),
    })
    .context("Failed to create config watcher")?;

    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };
    watcher
        .watch(&dir, RecursiveMode::NonRecursive)
        .with_context(|| format!("Failed to watch {}", dir.display()))?;

    debug!("Watching {} for config changes", path.display());
    Ok(watcher)
}

#[cfg(test)]
mod tests {
    use super::*;
    use notify::event::{CreateKind, ModifyKind, RemoveKind};

    #[test]
    fn test_touches_matches_file_name() {
        let path = Path::new("/tmp/bar/config.json");
        let event = |kind| Event::new(kind).add_path(PathBuf::from("/tmp/bar/config.json"));

        assert!(touches(&event(EventKind::Modify(ModifyKind::Any)), path));
        assert!(!touches(&event(EventKind::Remove(RemoveKind::File)), path));

        let other = Event::new(EventKind::Create(CreateKind::File))
            .add_path(PathBuf::from("/tmp/bar/other.json"));
        assert!(!touches(&other, path));
    }
}
