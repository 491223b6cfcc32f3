//! TargetDictionaryStore - load-once cache of the target-language dictionary.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::OnceCell;

use super::types::{DictionaryDocument, DictionaryEntry};
use crate::error::{InterlinearError, Result};
use crate::fetch::{fetch_json, ResourceFetcher};
use crate::strongs::{StrongsId, StrongsPrefix};

/// Dictionary re-keyed by identifier. Every entry sits under its unpadded
/// and padded spellings, both pointing at the same value.
#[derive(Debug, Default)]
pub struct DictionaryIndex {
    by_key: HashMap<String, Arc<DictionaryEntry>>,
    /// Distinct entries (not key variants)
    pub entry_count: usize,
    /// Records dropped for an unknown language tag or unparseable identifier
    pub skipped: usize,
    /// Records whose identifier was already present (first one wins)
    pub duplicates: usize,
}

impl DictionaryIndex {
    /// Re-key a parsed document.
    pub fn build(doc: DictionaryDocument, definition_fragments: usize, padded_width: usize) -> Self {
        let mut index = DictionaryIndex::default();

        for raw in doc.entries {
            let raw_id = raw.identifier.as_text();
            let Some(id) = Self::resolve_identifier(&raw_id, &raw.language_tag) else {
                tracing::warn!(
                    identifier = %raw_id,
                    language_tag = %raw.language_tag,
                    "Skipping dictionary record with unusable identifier"
                );
                index.skipped += 1;
                continue;
            };

            let short = id.short();
            if index.by_key.contains_key(&short) {
                index.duplicates += 1;
                continue;
            }

            let padded = id.padded(padded_width);
            let entry = Arc::new(DictionaryEntry::from_raw(
                short.clone(),
                raw,
                definition_fragments,
            ));
            index.by_key.insert(padded, Arc::clone(&entry));
            index.by_key.insert(short, entry);
            index.entry_count += 1;
        }

        if let Some(declared) = doc.metadata.entry_count {
            if declared != index.entry_count + index.skipped + index.duplicates {
                tracing::warn!(
                    declared,
                    parsed = index.entry_count,
                    skipped = index.skipped,
                    duplicates = index.duplicates,
                    "Dictionary entry_count does not match document"
                );
            }
        }

        index
    }

    /// Bare numbers take their prefix from the language tag; a number that
    /// already carries a prefix is accepted as-is.
    fn resolve_identifier(raw_id: &str, language_tag: &str) -> Option<StrongsId> {
        if let Ok(id) = raw_id.parse::<StrongsId>() {
            return Some(id);
        }
        let prefix = StrongsPrefix::from_language_tag(language_tag)?;
        format!("{}{}", prefix.as_char(), raw_id).parse().ok()
    }

    pub fn get(&self, key: &str) -> Option<&Arc<DictionaryEntry>> {
        self.by_key.get(key)
    }

    pub fn key_count(&self) -> usize {
        self.by_key.len()
    }
}

/// Lazily loaded target dictionary with the same single-flight guard as
/// [`crate::lexicon::LexiconStore`].
pub struct TargetDictionaryStore {
    fetcher: Arc<dyn ResourceFetcher>,
    path: String,
    definition_fragments: usize,
    padded_width: usize,
    index: OnceCell<Arc<DictionaryIndex>>,
}

impl TargetDictionaryStore {
    pub fn new(
        fetcher: Arc<dyn ResourceFetcher>,
        path: impl Into<String>,
        definition_fragments: usize,
        padded_width: usize,
    ) -> Self {
        Self {
            fetcher,
            path: path.into(),
            definition_fragments,
            padded_width,
            index: OnceCell::new(),
        }
    }

    pub async fn load(&self) -> Result<Arc<DictionaryIndex>> {
        let index = self
            .index
            .get_or_try_init(|| async {
                let doc: DictionaryDocument =
                    fetch_json(self.fetcher.as_ref(), &self.path).await?;
                let index = DictionaryIndex::build(doc, self.definition_fragments, self.padded_width);

                tracing::info!(
                    path = %self.path,
                    source = %self.fetcher.describe(),
                    entries = index.entry_count,
                    keys = index.key_count(),
                    skipped = index.skipped,
                    "Target dictionary loaded"
                );
                Ok::<_, InterlinearError>(Arc::new(index))
            })
            .await?;
        Ok(Arc::clone(index))
    }

    /// Exact-key lookup. Returns `None` until the store has loaded.
    pub fn get(&self, key: &str) -> Option<&DictionaryEntry> {
        self.index
            .get()
            .and_then(|index| index.get(key))
            .map(|entry| entry.as_ref())
    }

    pub fn is_loaded(&self) -> bool {
        self.index.initialized()
    }
}
