//! Watch mode: rebuild all bundles whenever a translation document changes.

use std::future::Future;
use std::path::{
    Path,
    PathBuf,
};
use std::sync::Arc;

use notify::{
    Config,
    Event,
    EventKind,
    RecommendedWatcher,
    RecursiveMode,
    Watcher,
};
use thiserror::Error;
use tokio::sync::mpsc;

use crate::bundle::BundleConverter;
use crate::config::TranslationMatcher;

#[derive(Error, Debug)]
pub enum WatchError {
    #[error("Failed to create file watcher: {0}")]
    Create(#[source] notify::Error),

    #[error("Failed to watch {}: {source}", path.display())]
    Watch {
        path: PathBuf,
        #[source]
        source: notify::Error,
    },
}

/// Filesystem watcher yielding the paths of changed translation documents.
pub struct ChangeWatcher {
    /// Kept alive for as long as events are wanted.
    _watcher: RecommendedWatcher,
    /// Changed translation documents sent from the watcher callback.
    events: mpsc::UnboundedReceiver<PathBuf>,
}

impl std::fmt::Debug for ChangeWatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChangeWatcher").field("watcher", &"<RecommendedWatcher>").finish_non_exhaustive()
    }
}

impl ChangeWatcher {
    /// Starts watching `dir` (non-recursively).
    ///
    /// # Errors
    /// Returns [`WatchError`] if the platform watcher cannot be set up.
    pub fn new(dir: &Path, matcher: TranslationMatcher) -> Result<Self, WatchError> {
        let (tx, rx) = mpsc::unbounded_channel();

        let mut watcher = RecommendedWatcher::new(
            move |res: notify::Result<Event>| match res {
                Ok(event) => {
                    if let Some(path) = changed_translation(&event, &matcher)
                        && tx.send(path).is_err()
                    {
                        tracing::debug!("Change receiver dropped");
                    }
                }
                Err(e) => tracing::warn!("Watch error: {e}"),
            },
            Config::default(),
        )
        .map_err(WatchError::Create)?;

        watcher
            .watch(dir, RecursiveMode::NonRecursive)
            .map_err(|source| WatchError::Watch { path: dir.to_path_buf(), source })?;

        Ok(Self { _watcher: watcher, events: rx })
    }

    /// Waits for the next qualifying change. `None` once the watcher is gone.
    pub async fn next_change(&mut self) -> Option<PathBuf> {
        self.events.recv().await
    }
}

/// Returns the first translation document touched by a create, modify or
/// remove event.
#[must_use]
pub fn changed_translation(event: &Event, matcher: &TranslationMatcher) -> Option<PathBuf> {
    if !matches!(event.kind, EventKind::Create(_) | EventKind::Modify(_) | EventKind::Remove(_)) {
        return None;
    }
    event.paths.iter().find(|path| matcher.is_translation_file(path)).cloned()
}

/// Converts once, then reconverts everything on each qualifying change until
/// `shutdown` resolves.
///
/// Every change spawns an independent full rebuild; rebuilds are neither
/// debounced nor serialized against each other.
///
/// # Errors
/// Returns [`WatchError`] if the source directory cannot be watched.
pub async fn watch<F>(converter: Arc<BundleConverter>, shutdown: F) -> Result<(), WatchError>
where
    F: Future<Output = ()>,
{
    let source_dir = converter.settings().source_dir.clone();
    let mut watcher = ChangeWatcher::new(&source_dir, converter.matcher().clone())?;

    rebuild(&converter).await;
    tracing::info!(dir = %source_dir.display(), "Watching for changes");

    tokio::pin!(shutdown);
    loop {
        tokio::select! {
            () = &mut shutdown => {
                tracing::info!("Stopping watcher");
                break;
            }
            change = watcher.next_change() => {
                let Some(path) = change else {
                    tracing::warn!("File watcher closed");
                    break;
                };
                tracing::info!(path = %path.display(), "Change detected, rebuilding");
                let converter = Arc::clone(&converter);
                tokio::spawn(async move { rebuild(&converter).await });
            }
        }
    }

    Ok(())
}

/// Full run whose errors are logged instead of returned.
async fn rebuild(converter: &BundleConverter) {
    if let Err(e) = converter.run().await {
        tracing::error!("Rebuild failed: {e}");
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::fs;

    use notify::event::{
        AccessKind,
        CreateKind,
        DataChange,
        ModifyKind,
        RemoveKind,
    };
    use rstest::*;
    use tempfile::TempDir;

    use super::*;
    use crate::config::BundlerSettings;

    #[fixture]
    fn matcher() -> TranslationMatcher {
        TranslationMatcher::new(&BundlerSettings::default()).unwrap()
    }

    fn event(kind: EventKind, paths: &[&str]) -> Event {
        paths.iter().fold(Event::new(kind), |event, path| event.add_path(PathBuf::from(path)))
    }

    #[rstest]
    #[case::create(EventKind::Create(CreateKind::File))]
    #[case::modify(EventKind::Modify(ModifyKind::Data(DataChange::Content)))]
    #[case::remove(EventKind::Remove(RemoveKind::File))]
    fn changed_translation_accepts_changes(matcher: TranslationMatcher, #[case] kind: EventKind) {
        let event = event(kind, &["/src/fr.properties"]);

        assert_eq!(changed_translation(&event, &matcher), Some(PathBuf::from("/src/fr.properties")));
    }

    #[rstest]
    fn changed_translation_ignores_access(matcher: TranslationMatcher) {
        let event = event(EventKind::Access(AccessKind::Any), &["/src/fr.properties"]);

        assert_eq!(changed_translation(&event, &matcher), None);
    }

    #[rstest]
    fn changed_translation_ignores_other_files(matcher: TranslationMatcher) {
        let event = event(EventKind::Create(CreateKind::File), &["/src/fr.json", "/src/.fr.swp"]);

        assert_eq!(changed_translation(&event, &matcher), None);
    }

    #[rstest]
    fn changed_translation_picks_matching_path_of_rename(matcher: TranslationMatcher) {
        let event = event(
            EventKind::Modify(ModifyKind::Any),
            &["/src/fr.properties.tmp", "/src/fr.properties"],
        );

        assert_eq!(changed_translation(&event, &matcher), Some(PathBuf::from("/src/fr.properties")));
    }

    #[rstest]
    #[tokio::test]
    async fn watch_converts_once_and_stops_on_shutdown() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join("en.properties"), "greeting=Hello\n").unwrap();
        let settings = BundlerSettings {
            source_dir: temp_dir.path().to_path_buf(),
            output_dir: temp_dir.path().join("out"),
            watch: true,
            ..BundlerSettings::default()
        };
        let converter = Arc::new(BundleConverter::new(settings).unwrap());

        watch(converter, async {}).await.unwrap();

        let en = fs::read_to_string(temp_dir.path().join("out/en.json")).unwrap();
        assert_eq!(en, r#"{"greeting":"Hello"}"#);
    }
}
