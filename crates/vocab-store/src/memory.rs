//! In-memory status store.

use async_trait::async_trait;
use tokio::sync::watch;

use vocab_protocols::error::StoreError;
use vocab_protocols::{StatusRecord, StatusStore};

/// Status store backed by a `watch` channel.
///
/// The channel holds the current record, so reads, writes and
/// subscriptions all go through the same cell.
pub struct MemoryStatusStore {
    sender: watch::Sender<StatusRecord>,
}

impl MemoryStatusStore {
    /// Create a store holding the idle record.
    pub fn new() -> Self {
        Self::with_record(StatusRecord::idle())
    }

    /// Create a store holding `record`.
    pub fn with_record(record: StatusRecord) -> Self {
        let (sender, _) = watch::channel(record);
        Self { sender }
    }
}

impl Default for MemoryStatusStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl StatusStore for MemoryStatusStore {
    async fn read(&self) -> Result<StatusRecord, StoreError> {
        Ok(self.sender.borrow().clone())
    }

    async fn write(&self, record: StatusRecord) -> Result<(), StoreError> {
        self.sender.send_replace(record);
        Ok(())
    }

    fn subscribe(&self) -> watch::Receiver<StatusRecord> {
        self.sender.subscribe()
    }
}
