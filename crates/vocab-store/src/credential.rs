//! Credential stores for the Gemini API key.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde_json::{Map, Value};
use tokio::fs;
use tokio::sync::RwLock;
use tracing::{debug, info};

use vocab_protocols::error::{CredentialError, StoreError};
use vocab_protocols::{normalize_api_key, CredentialStore, CREDENTIAL_KEY};

/// In-memory credential store.
#[derive(Default)]
pub struct MemoryCredentialStore {
    key: RwLock<Option<String>>,
}

impl MemoryCredentialStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store that already holds `key`.
    pub fn with_key(key: impl Into<String>) -> Self {
        Self {
            key: RwLock::new(Some(key.into())),
        }
    }
}

#[async_trait]
impl CredentialStore for MemoryCredentialStore {
    async fn api_key(&self) -> Result<Option<String>, StoreError> {
        Ok(self.key.read().await.clone())
    }

    async fn set_api_key(&self, key: &str) -> Result<(), CredentialError> {
        let key = normalize_api_key(key)?;
        *self.key.write().await = Some(key);
        Ok(())
    }

    async fn clear(&self) -> Result<(), StoreError> {
        *self.key.write().await = None;
        Ok(())
    }
}

/// Credential store persisted as a JSON object (`{"geminiApiKey": "..."}`).
///
/// Unknown keys in the file are preserved on write.
pub struct FileCredentialStore {
    path: PathBuf,
}

impl FileCredentialStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn read_map(&self) -> Result<Map<String, Value>, StoreError> {
        let content = match fs::read_to_string(&self.path).await {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Map::new()),
            Err(e) => return Err(e.into()),
        };
        if content.trim().is_empty() {
            return Ok(Map::new());
        }
        Ok(serde_json::from_str(&content)?)
    }

    async fn write_map(&self, map: &Map<String, Value>) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).await?;
        }
        let content = serde_json::to_string_pretty(map)?;
        fs::write(&self.path, content).await?;
        restrict_permissions(&self.path).await?;
        Ok(())
    }
}

#[async_trait]
impl CredentialStore for FileCredentialStore {
    async fn api_key(&self) -> Result<Option<String>, StoreError> {
        let map = self.read_map().await?;
        let key = map
            .get(CREDENTIAL_KEY)
            .and_then(Value::as_str)
            .map(str::trim)
            .filter(|k| !k.is_empty())
            .map(str::to_string);
        debug!("Credential lookup in {:?}: present={}", self.path, key.is_some());
        Ok(key)
    }

    async fn set_api_key(&self, key: &str) -> Result<(), CredentialError> {
        let key = normalize_api_key(key)?;
        let mut map = self.read_map().await?;
        map.insert(CREDENTIAL_KEY.to_string(), Value::String(key));
        self.write_map(&map).await?;
        info!("API key saved to {:?}", self.path);
        Ok(())
    }

    async fn clear(&self) -> Result<(), StoreError> {
        let mut map = self.read_map().await?;
        if map.remove(CREDENTIAL_KEY).is_some() {
            self.write_map(&map).await?;
            info!("API key removed from {:?}", self.path);
        }
        Ok(())
    }
}

#[cfg(unix)]
async fn restrict_permissions(path: &Path) -> Result<(), StoreError> {
    use std::os::unix::fs::PermissionsExt;
    fs::set_permissions(path, std::fs::Permissions::from_mode(0o600)).await?;
    Ok(())
}

#[cfg(not(unix))]
async fn restrict_permissions(_path: &Path) -> Result<(), StoreError> {
    Ok(())
}
