//! Cross-process status subscriptions.
//!
//! Other processes write the status file by renaming a temp file over it,
//! so the parent directory is watched rather than the file itself.

use std::path::PathBuf;
use std::time::Duration;

use notify::{Config, Event, RecommendedWatcher, RecursiveMode, Watcher};
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use vocab_protocols::error::StoreError;
use vocab_protocols::StatusRecord;

use crate::status_file::read_record;

/// Publishes the status record each time the file changes on disk.
pub struct StatusWatcher {
    _watcher: RecommendedWatcher,
    receiver: watch::Receiver<StatusRecord>,
    task: JoinHandle<()>,
}

impl StatusWatcher {
    /// Start watching `path`. Must be called inside a Tokio runtime.
    pub fn spawn(path: PathBuf) -> Result<Self, StoreError> {
        let dir = path
            .parent()
            .map(|p| p.to_path_buf())
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or_else(|| PathBuf::from("."));
        std::fs::create_dir_all(&dir)?;

        let initial = std::fs::read_to_string(&path)
            .ok()
            .and_then(|c| serde_json::from_str::<StatusRecord>(&c).ok())
            .unwrap_or_default();
        let (sender, receiver) = watch::channel(initial);

        let (event_tx, mut event_rx) = mpsc::channel::<notify::Result<Event>>(64);
        let mut watcher = RecommendedWatcher::new(
            move |res| {
                let _ = event_tx.blocking_send(res);
            },
            Config::default().with_poll_interval(Duration::from_millis(500)),
        )
        .map_err(|e| StoreError::Watch(format!("Failed to create watcher: {}", e)))?;

        watcher
            .watch(&dir, RecursiveMode::NonRecursive)
            .map_err(|e| StoreError::Watch(format!("Failed to watch {:?}: {}", dir, e)))?;
        debug!("Watching status file {:?}", path);

        let task = tokio::spawn(async move {
            while let Some(res) = event_rx.recv().await {
                let event = match res {
                    Ok(event) => event,
                    Err(e) => {
                        warn!("Status watcher error: {}", e);
                        continue;
                    }
                };
                if !event.paths.iter().any(|p| p.file_name() == path.file_name()) {
                    continue;
                }
                match read_record(&path).await {
                    Ok(record) => {
                        sender.send_if_modified(|current| {
                            if *current == record {
                                false
                            } else {
                                *current = record;
                                true
                            }
                        });
                    }
                    Err(e) => debug!("Skipping unreadable status update: {}", e),
                }
            }
        });

        Ok(Self {
            _watcher: watcher,
            receiver,
            task,
        })
    }

    /// Subscribe to record changes.
    pub fn subscribe(&self) -> watch::Receiver<StatusRecord> {
        self.receiver.clone()
    }

    /// The most recently observed record.
    pub fn current(&self) -> StatusRecord {
        self.receiver.borrow().clone()
    }
}

impl Drop for StatusWatcher {
    fn drop(&mut self) {
        self.task.abort();
    }
}
