//! Request orchestration.
//!
//! Every selection moves the shared record to `loading` first, then to
//! `success` or `error`. Failures never escape as errors: they become the
//! record's message. Only a failed write to the status store itself is
//! returned to the caller.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::{debug, error, info, info_span, warn, Instrument};
use vocab_protocols::{
    ContextExtractor, ContextSnippet, CredentialStore, InferenceClient, InferenceError,
    OrchestratorError, PageSource, SelectionEvent, StatusRecord, StatusStore, StoreError,
};

use crate::prompt::build_prompt;

/// How a request ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Completion {
    /// The final record was written to the store.
    Written(StatusRecord),
    /// A newer request started meanwhile and this result was dropped.
    Discarded,
}

impl Completion {
    pub fn record(&self) -> Option<&StatusRecord> {
        match self {
            Completion::Written(record) => Some(record),
            Completion::Discarded => None,
        }
    }
}

/// Drives one selection through context extraction, prompting and inference.
pub struct Orchestrator {
    status: Arc<dyn StatusStore>,
    credentials: Arc<dyn CredentialStore>,
    extractor: Arc<dyn ContextExtractor>,
    client: Arc<dyn InferenceClient>,
    discard_stale: bool,
    last_request: AtomicU64,
    /// Serializes the staleness check with the store write it guards.
    commit: Mutex<()>,
}

impl Orchestrator {
    pub fn new(
        status: Arc<dyn StatusStore>,
        credentials: Arc<dyn CredentialStore>,
        extractor: Arc<dyn ContextExtractor>,
        client: Arc<dyn InferenceClient>,
    ) -> Self {
        Self {
            status,
            credentials,
            extractor,
            client,
            discard_stale: false,
            last_request: AtomicU64::new(0),
            commit: Mutex::new(()),
        }
    }

    /// Drop results of requests overtaken by a newer one.
    ///
    /// Off by default: concurrent requests are last-write-wins.
    pub fn with_stale_discard(mut self, enabled: bool) -> Self {
        self.discard_stale = enabled;
        self
    }

    /// Raise a selection event from raw text and handle it.
    ///
    /// Returns `Ok(None)` without touching the store when the text is blank.
    pub async fn define(
        &self,
        selected_text: &str,
        source: PageSource,
        occurrence: usize,
    ) -> Result<Option<Completion>, StoreError> {
        let Some(event) = SelectionEvent::new(selected_text, source) else {
            debug!("Blank selection, nothing to define");
            return Ok(None);
        };
        self.handle(event.with_occurrence(occurrence)).await.map(Some)
    }

    /// Handle one selection event.
    pub async fn handle(&self, event: SelectionEvent) -> Result<Completion, StoreError> {
        let request_id = self.last_request.fetch_add(1, Ordering::SeqCst) + 1;
        let span = info_span!(
            "define",
            request_id,
            selection = %event.selected_text(),
            client = self.client.id()
        );
        self.run(request_id, event).instrument(span).await
    }

    async fn run(&self, request_id: u64, event: SelectionEvent) -> Result<Completion, StoreError> {
        let selection = event.selected_text().to_string();
        {
            let _commit = self.commit.lock().await;
            self.write(StatusRecord::loading(&selection)).await?;
        }
        info!(source = %event.source(), "Request started");

        let mut context = ContextSnippet::empty();
        let record = match self.resolve(&event, &mut context).await {
            Ok(markdown) => {
                info!(chars = markdown.len(), "Request succeeded");
                StatusRecord::success(&selection, markdown, Some(context.as_str()))
            }
            Err(err) => {
                match &err {
                    OrchestratorError::Inference(e) if e.is_local() => {
                        info!(error = %err, "Request not sent")
                    }
                    _ => warn!(error = %err, "Request failed"),
                }
                StatusRecord::failure(&selection, err.to_string(), Some(context.as_str()))
            }
        };

        let _commit = self.commit.lock().await;
        if self.discard_stale && self.last_request.load(Ordering::SeqCst) != request_id {
            info!("Newer request in flight, discarding result");
            return Ok(Completion::Discarded);
        }

        self.write(record.clone()).await?;
        Ok(Completion::Written(record))
    }

    async fn write(&self, record: StatusRecord) -> Result<(), StoreError> {
        let status = record.status();
        self.status
            .write(record)
            .await
            .inspect_err(|e| error!(error = %e, %status, "Failed to write status record"))
    }

    /// Produce the Markdown answer for `event`, filling `context` on the way.
    async fn resolve(
        &self,
        event: &SelectionEvent,
        context: &mut ContextSnippet,
    ) -> Result<String, OrchestratorError> {
        let api_key = self
            .credentials
            .api_key()
            .await?
            .filter(|key| !key.trim().is_empty())
            .ok_or(InferenceError::MissingCredential)?;

        *context = match self.extractor.extract(event).await {
            Ok(snippet) => snippet,
            Err(e) => {
                warn!(error = %e, "Context extraction failed, continuing without context");
                ContextSnippet::empty()
            }
        };

        let prompt = build_prompt(event.selected_text(), context.as_str());
        debug!(uses_context = prompt.uses_context(), "Prompt built");

        let outcome = self.client.infer(prompt.as_str(), &api_key).await?;
        if outcome.is_blocked() {
            warn!("Prompt was blocked by the API");
        }
        Ok(outcome.into_markdown())
    }
}

#[cfg(test)]
#[path = "orchestrator_tests.rs"]
mod tests;
