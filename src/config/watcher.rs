//! Manifest hot reload.
//!
//! # Data Flow
//! ```text
//! notify event on the manifest's directory
//!     → filter to the manifest file name
//!     → load_config (parse + validate)
//!     → channel of validated RoutingConfig
//!     → rebuild_on_change: latest config of a burst
//!     → LocalizedRouter::rebuild_with(config.router)
//! ```
//!
//! The parent directory is watched rather than the file itself, so editors
//! that save by rename are still picked up.

use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::time::Duration;

use notify::{Config, Event, RecommendedWatcher, RecursiveMode, Watcher};
use tokio::sync::mpsc;

use crate::config::loader::load_config;
use crate::config::schema::RoutingConfig;
use crate::routing::LocalizedRouter;

/// Watches the endpoint manifest and publishes every valid revision.
pub struct ManifestWatcher {
    path: PathBuf,
    updates: mpsc::UnboundedSender<RoutingConfig>,
}

impl ManifestWatcher {
    /// Returns the watcher and the receiving end of its update channel.
    pub fn new(path: &Path) -> (Self, mpsc::UnboundedReceiver<RoutingConfig>) {
        let (updates, rx) = mpsc::unbounded_channel();
        let watcher = Self {
            path: path.to_path_buf(),
            updates,
        };
        (watcher, rx)
    }

    /// Start watching. Events stop when the returned handle is dropped.
    pub fn run(self) -> Result<RecommendedWatcher, notify::Error> {
        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };
        let file_name = self.path.file_name().map(OsString::from);
        let path = self.path.clone();
        let updates = self.updates;

        let mut watcher = RecommendedWatcher::new(
            move |res: notify::Result<Event>| {
                let event = match res {
                    Ok(event) => event,
                    Err(e) => {
                        tracing::error!(error = %e, "Manifest watch error");
                        return;
                    }
                };
                let touches_manifest = event
                    .paths
                    .iter()
                    .any(|p| p.file_name().map(OsString::from) == file_name);
                if touches_manifest && (event.kind.is_modify() || event.kind.is_create()) {
                    publish(&path, &updates);
                }
            },
            Config::default().with_poll_interval(Duration::from_secs(2)),
        )?;
        watcher.watch(&dir, RecursiveMode::NonRecursive)?;

        tracing::info!(path = ?self.path, "Manifest watcher started");
        Ok(watcher)
    }
}

fn publish(path: &Path, updates: &mpsc::UnboundedSender<RoutingConfig>) {
    match load_config(path) {
        Ok(config) => {
            tracing::debug!(path = ?path, "Manifest revision loaded");
            if updates.send(config).is_err() {
                tracing::debug!("Manifest update receiver closed");
            }
        }
        Err(e) => tracing::warn!(
            path = ?path,
            error = %e,
            "Invalid manifest revision ignored, current route table kept"
        ),
    }
}

/// Apply manifest revisions to `router` until the channel closes.
///
/// Only the latest revision of a burst is applied: its router settings are
/// swapped in and the table is rebuilt once.
pub async fn rebuild_on_change(
    router: LocalizedRouter,
    mut updates: mpsc::UnboundedReceiver<RoutingConfig>,
) {
    while let Some(mut config) = updates.recv().await {
        let mut skipped = 0usize;
        while let Ok(newer) = updates.try_recv() {
            config = newer;
            skipped += 1;
        }

        match router.rebuild_with(config.router).await {
            Ok(table) => tracing::info!(
                entries = table.len(),
                skipped,
                "Route table rebuilt after manifest change"
            ),
            Err(e) => tracing::warn!(
                error = %e,
                "Rebuild failed, previous route table kept"
            ),
        }
    }
}
