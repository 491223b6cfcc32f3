//! LexiconStore - load-once cache of the base lexicon.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::OnceCell;

use super::types::{LexiconEntry, RawLexiconEntry};
use crate::error::Result;
use crate::fetch::{fetch_json, ResourceFetcher};

/// Identifier → entry, keyed exactly as the document spells identifiers.
pub type LexiconMap = HashMap<String, LexiconEntry>;

/// Lazily loaded lexicon.
///
/// Concurrent `load()` calls share a single fetch. A failed fetch leaves the
/// store empty so the next call tries again.
pub struct LexiconStore {
    fetcher: Arc<dyn ResourceFetcher>,
    path: String,
    entries: OnceCell<Arc<LexiconMap>>,
}

impl LexiconStore {
    pub fn new(fetcher: Arc<dyn ResourceFetcher>, path: impl Into<String>) -> Self {
        Self {
            fetcher,
            path: path.into(),
            entries: OnceCell::new(),
        }
    }

    /// Load the lexicon, or return the already loaded (or loading) map.
    pub async fn load(&self) -> Result<Arc<LexiconMap>> {
        let map = self
            .entries
            .get_or_try_init(|| async {
                let raw: HashMap<String, RawLexiconEntry> =
                    fetch_json(self.fetcher.as_ref(), &self.path).await?;

                let map: LexiconMap = raw
                    .into_iter()
                    .map(|(id, entry)| (id.trim().to_string(), LexiconEntry::from(entry)))
                    .collect();

                tracing::info!(
                    path = %self.path,
                    source = %self.fetcher.describe(),
                    entries = map.len(),
                    "Lexicon loaded"
                );
                Ok::<_, crate::error::InterlinearError>(Arc::new(map))
            })
            .await?;
        Ok(Arc::clone(map))
    }

    /// Exact-key lookup. Returns `None` until the store has loaded.
    pub fn get(&self, id: &str) -> Option<&LexiconEntry> {
        self.entries.get().and_then(|map| map.get(id))
    }

    pub fn is_loaded(&self) -> bool {
        self.entries.initialized()
    }

    pub fn len(&self) -> usize {
        self.entries.get().map(|m| m.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
