//! Static resource fetching
//!
//! The engine reads three kinds of versionless JSON documents (lexicon,
//! target dictionary, per-book tagged text) by relative path. This module
//! provides the capability behind a trait so stores can be tested with
//! in-memory documents, plus HTTP and filesystem implementations.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use url::Url;

use crate::config::ResourceConfig;
use crate::error::{InterlinearError, Result};

/// Read-only access to static JSON documents by relative path.
#[async_trait]
pub trait ResourceFetcher: Send + Sync {
    /// Fetch the raw document body. Missing documents are
    /// [`InterlinearError::ResourceUnavailable`].
    async fn fetch_text(&self, path: &str) -> Result<String>;

    /// Human-readable location for logs.
    fn describe(&self) -> String;
}

/// Fetch and deserialize a JSON document.
pub async fn fetch_json<T: DeserializeOwned>(
    fetcher: &dyn ResourceFetcher,
    path: &str,
) -> Result<T> {
    let text = fetcher.fetch_text(path).await?;
    serde_json::from_str(&text).map_err(|e| InterlinearError::json(path, e))
}

// =============================================================================
// HTTP
// =============================================================================

/// Fetches documents relative to an http(s) base URL.
pub struct HttpFetcher {
    client: Client,
    base: Url,
}

impl HttpFetcher {
    pub fn new(base_url: &str, timeout: std::time::Duration) -> Result<Self> {
        // A base without a trailing slash would drop its last segment on join
        let normalized = if base_url.ends_with('/') {
            base_url.to_string()
        } else {
            format!("{base_url}/")
        };
        let base = Url::parse(&normalized)
            .map_err(|e| InterlinearError::Config(format!("invalid base_url '{base_url}': {e}")))?;

        let client = Client::builder().timeout(timeout).build()?;

        Ok(Self { client, base })
    }

    fn resolve(&self, path: &str) -> Result<Url> {
        self.base
            .join(path.trim_start_matches('/'))
            .map_err(|e| InterlinearError::unavailable(path, e.to_string()))
    }
}

#[async_trait]
impl ResourceFetcher for HttpFetcher {
    async fn fetch_text(&self, path: &str) -> Result<String> {
        let url = self.resolve(path)?;
        tracing::debug!(url = %url, "Fetching resource");

        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(|e| InterlinearError::unavailable(url.as_str(), e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(InterlinearError::unavailable(url.as_str(), status.to_string()));
        }

        Ok(response.text().await?)
    }

    fn describe(&self) -> String {
        self.base.to_string()
    }
}

// =============================================================================
// Filesystem
// =============================================================================

/// Reads documents relative to a local directory.
pub struct FsFetcher {
    root: PathBuf,
}

impl FsFetcher {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

#[async_trait]
impl ResourceFetcher for FsFetcher {
    async fn fetch_text(&self, path: &str) -> Result<String> {
        let full = self.root.join(path.trim_start_matches('/'));
        match tokio::fs::read_to_string(&full).await {
            Ok(text) => Ok(text),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Err(
                InterlinearError::unavailable(full.display().to_string(), "not found"),
            ),
            Err(e) => Err(e.into()),
        }
    }

    fn describe(&self) -> String {
        self.root.display().to_string()
    }
}

/// Pick an implementation from `resources.base_url`.
pub fn fetcher_from_config(config: &ResourceConfig) -> Result<Arc<dyn ResourceFetcher>> {
    let base = config.base_url.trim();
    if base.starts_with("http://") || base.starts_with("https://") {
        return Ok(Arc::new(HttpFetcher::new(base, config.fetch_timeout())?));
    }
    let root = base.strip_prefix("file://").unwrap_or(base);
    Ok(Arc::new(FsFetcher::new(root)))
}

// =============================================================================
// In-memory
// =============================================================================

/// Serves documents held in memory; used for bundled data and tests.
///
/// Documents can be added or removed while the fetcher is shared, and every
/// request is counted per path.
#[derive(Default)]
pub struct MemoryFetcher {
    documents: Mutex<HashMap<String, String>>,
    requests: Mutex<HashMap<String, usize>>,
}

impl MemoryFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_document(self, path: &str, body: impl Into<String>) -> Self {
        self.insert(path, body);
        self
    }

    pub fn insert(&self, path: &str, body: impl Into<String>) {
        if let Ok(mut docs) = self.documents.lock() {
            docs.insert(path.to_string(), body.into());
        }
    }

    pub fn remove(&self, path: &str) {
        if let Ok(mut docs) = self.documents.lock() {
            docs.remove(path);
        }
    }

    /// Number of fetches issued for `path`, successful or not.
    pub fn request_count(&self, path: &str) -> usize {
        self.requests
            .lock()
            .map(|r| r.get(path).copied().unwrap_or(0))
            .unwrap_or(0)
    }
}

#[async_trait]
impl ResourceFetcher for MemoryFetcher {
    async fn fetch_text(&self, path: &str) -> Result<String> {
        if let Ok(mut requests) = self.requests.lock() {
            *requests.entry(path.to_string()).or_insert(0) += 1;
        }
        // Suspend like a real fetch so concurrent callers interleave
        tokio::task::yield_now().await;

        let body = self
            .documents
            .lock()
            .ok()
            .and_then(|docs| docs.get(path).cloned());
        body.ok_or_else(|| InterlinearError::unavailable(path, "not found"))
    }

    fn describe(&self) -> String {
        "memory".to_string()
    }
}
