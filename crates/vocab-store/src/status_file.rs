//! File-backed status store.

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use tokio::fs;
use tokio::sync::{watch, Mutex};
use tracing::{debug, warn};

use vocab_protocols::error::StoreError;
use vocab_protocols::{StatusRecord, StatusStore};

use crate::watcher::StatusWatcher;

/// Status store persisted as a single JSON document.
///
/// Each write goes to a temporary sibling file that is then renamed over
/// the target, so readers in other processes only ever see complete
/// records. A missing file reads as the idle record.
pub struct FileStatusStore {
    path: PathBuf,
    sender: watch::Sender<StatusRecord>,
    write_lock: Mutex<()>,
    tmp_counter: AtomicU64,
}

impl FileStatusStore {
    /// Open the store at `path`, creating its parent directory.
    pub async fn new(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).await?;
        }

        let current = read_record(&path).await?;
        let (sender, _) = watch::channel(current);

        debug!("FileStatusStore opened at {:?}", path);

        Ok(Self {
            path,
            sender,
            write_lock: Mutex::new(()),
            tmp_counter: AtomicU64::new(0),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Watch the file for writes made by any process.
    pub fn watch(&self) -> Result<StatusWatcher, StoreError> {
        StatusWatcher::spawn(self.path.clone())
    }

    fn tmp_path(&self) -> PathBuf {
        let n = self.tmp_counter.fetch_add(1, Ordering::Relaxed);
        let name = self
            .path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "status.json".to_string());
        self.path
            .with_file_name(format!(".{}.{}.{}.tmp", name, std::process::id(), n))
    }
}

#[async_trait]
impl StatusStore for FileStatusStore {
    async fn read(&self) -> Result<StatusRecord, StoreError> {
        read_record(&self.path).await
    }

    async fn write(&self, record: StatusRecord) -> Result<(), StoreError> {
        let content = serde_json::to_string_pretty(&record)?;

        let _guard = self.write_lock.lock().await;
        let tmp = self.tmp_path();
        fs::write(&tmp, content).await?;
        if let Err(e) = fs::rename(&tmp, &self.path).await {
            let _ = fs::remove_file(&tmp).await;
            return Err(e.into());
        }

        debug!("Wrote {} record to {:?}", record.status(), self.path);
        self.sender.send_replace(record);
        Ok(())
    }

    fn subscribe(&self) -> watch::Receiver<StatusRecord> {
        self.sender.subscribe()
    }
}

/// Read and parse the record at `path`.
pub(crate) async fn read_record(path: &Path) -> Result<StatusRecord, StoreError> {
    let content = match fs::read_to_string(path).await {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(StatusRecord::idle()),
        Err(e) => return Err(e.into()),
    };

    if content.trim().is_empty() {
        return Ok(StatusRecord::idle());
    }

    let record: StatusRecord = serde_json::from_str(&content)?;
    if let Err(problem) = record.check() {
        warn!("Status record at {:?} is inconsistent: {}", path, problem);
    }
    Ok(record)
}

#[cfg(test)]
#[path = "status_file_tests.rs"]
mod tests;
