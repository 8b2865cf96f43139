//! File watching for the symbol and settings files
//!
//! Uses the `notify` crate with debouncing. Watches each file's parent
//! directory (editors often save by rename, which a watch on the file itself
//! would lose) and reports only the files that were asked for.

use notify_debouncer_mini::{new_debouncer, DebouncedEvent, DebouncedEventKind, Debouncer};
use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError};
use std::time::Duration;

type EventResult = Result<Vec<DebouncedEvent>, notify::Error>;

/// Debounced watcher over a fixed set of files
pub struct FileWatcher {
    /// The debouncer handles watching and event coalescing
    _debouncer: Debouncer<notify::RecommendedWatcher>,
    rx: Receiver<EventResult>,
    files: Vec<PathBuf>,
}

impl FileWatcher {
    /// Watch `files` for changes
    ///
    /// Events are debounced with a 500ms delay so one save is one event.
    pub fn new(files: &[PathBuf]) -> Result<Self, notify::Error> {
        let (tx, rx) = mpsc::channel();
        let mut debouncer = new_debouncer(Duration::from_millis(500), tx)?;

        let files: Vec<PathBuf> = files.iter().map(|f| normalize(f)).collect();
        let mut dirs: Vec<&Path> = files.iter().filter_map(|f| f.parent()).collect();
        dirs.sort();
        dirs.dedup();

        for dir in dirs {
            debouncer
                .watcher()
                .watch(dir, notify::RecursiveMode::NonRecursive)?;
            tracing::info!("Watching {} for changes", dir.display());
        }

        Ok(Self {
            _debouncer: debouncer,
            rx,
            files,
        })
    }

    pub fn files(&self) -> &[PathBuf] {
        &self.files
    }

    /// Watched files that changed since the last call (non-blocking)
    fn poll_changed(&self) -> Vec<PathBuf> {
        let mut changed = Vec::new();
        while let Ok(result) = self.rx.try_recv() {
            self.collect(result, &mut changed);
        }
        changed
    }

    /// Wait up to `timeout` for a watched file to change
    ///
    /// Returns an empty list on timeout, and `None` once the watcher is gone.
    pub fn wait_changed(&self, timeout: Duration) -> Option<Vec<PathBuf>> {
        let mut changed = Vec::new();
        match self.rx.recv_timeout(timeout) {
            Ok(result) => self.collect(result, &mut changed),
            Err(RecvTimeoutError::Timeout) => return Some(changed),
            Err(RecvTimeoutError::Disconnected) => return None,
        }
        // Drain whatever arrived in the same burst
        changed.extend(self.poll_changed());
        changed.dedup();
        Some(changed)
    }

    fn collect(&self, result: EventResult, changed: &mut Vec<PathBuf>) {
        match result {
            Ok(events) => {
                for event in events {
                    // Continuous events fire during long writes; wait for the final one
                    if event.kind == DebouncedEventKind::AnyContinuous {
                        continue;
                    }
                    if let Some(file) = self.matching_file(&event.path) {
                        if !changed.contains(file) {
                            tracing::debug!("Detected change in {}", file.display());
                            changed.push(file.clone());
                        }
                    }
                }
            }
            Err(e) => {
                tracing::warn!("File watcher error: {:?}", e);
            }
        }
    }

    fn matching_file(&self, path: &Path) -> Option<&PathBuf> {
        let path = normalize(path);
        self.files.iter().find(|f| **f == path)
    }
}

/// Absolute, symlink-free form of `path` where possible
///
/// Files that don't exist yet are resolved through their parent directory.
fn normalize(path: &Path) -> PathBuf {
    if let Ok(canonical) = path.canonicalize() {
        return canonical;
    }
    match (path.parent(), path.file_name()) {
        (Some(parent), Some(name)) => {
            let parent = if parent.as_os_str().is_empty() {
                Path::new(".")
            } else {
                parent
            };
            parent
                .canonicalize()
                .map(|p| p.join(name))
                .unwrap_or_else(|_| path.to_path_buf())
        }
        _ => path.to_path_buf(),
    }
}
