//! Component wiring from configuration.

use std::sync::Arc;

use vocab_config::Config;
use vocab_context_html::HtmlContextExtractor;
use vocab_core::Orchestrator;
use vocab_provider_gemini::GeminiProvider;
use vocab_store::{FileCredentialStore, FileStatusStore};

/// Stores shared by every command.
pub(crate) struct App {
    pub config: Config,
    pub status: Arc<FileStatusStore>,
    pub credentials: Arc<FileCredentialStore>,
}

impl App {
    pub async fn open(config: Config) -> Result<Self, Box<dyn std::error::Error>> {
        let status = FileStatusStore::new(config.storage.status_path()).await?;
        let credentials = FileCredentialStore::new(config.storage.credentials_path());
        Ok(Self {
            config,
            status: Arc::new(status),
            credentials: Arc::new(credentials),
        })
    }

    pub fn orchestrator(&self) -> Result<Orchestrator, Box<dyn std::error::Error>> {
        let gemini = &self.config.gemini;
        let client = GeminiProvider::with_url(&gemini.base_url, &gemini.model)?;
        let extractor = HtmlContextExtractor::new()?;

        Ok(Orchestrator::new(
            self.status.clone(),
            self.credentials.clone(),
            Arc::new(extractor),
            Arc::new(client),
        )
        .with_stale_discard(self.config.orchestrator.discard_stale_results))
    }
}
