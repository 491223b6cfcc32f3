//! DefinitionResolver - merge dictionary and lexicon records for one identifier.
//!
//! The target dictionary is the primary source. The lexicon fills any field the
//! dictionary leaves empty, and stands in entirely when the dictionary has no
//! entry. Each field is taken independently: primary if non-empty, else
//! secondary, else empty.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::dictionary::{DictionaryEntry, TargetDictionaryStore};
use crate::lexicon::{LexiconEntry, LexiconStore};
use crate::strongs::normalize_with_width;

/// Where a Definition's content came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DefinitionOrigin {
    /// Every populated field came from the target dictionary
    Dictionary,
    /// Dictionary entry with gaps filled from the lexicon
    Merged,
    /// No dictionary entry; lexicon only
    LexiconFallback,
    /// At least one field replaced by a machine translation
    Translated,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Definition {
    /// Identifier as requested
    pub id: String,
    pub word: String,
    pub transliteration: String,
    pub part_of_speech: String,
    pub definition: String,
    pub usage: String,
    pub translated_word: Option<String>,
    pub translated_definition: Option<String>,
    pub translated_usage: Option<String>,
    pub origin: DefinitionOrigin,
}

impl Definition {
    /// True when some field may still be in the source language.
    pub fn needs_translation(&self) -> bool {
        matches!(
            self.origin,
            DefinitionOrigin::Merged | DefinitionOrigin::LexiconFallback
        )
    }

    pub fn display_word(&self) -> &str {
        self.translated_word.as_deref().unwrap_or(&self.word)
    }

    pub fn display_definition(&self) -> &str {
        self.translated_definition
            .as_deref()
            .unwrap_or(&self.definition)
    }

    pub fn display_usage(&self) -> &str {
        self.translated_usage.as_deref().unwrap_or(&self.usage)
    }
}

/// Pick the primary value when non-empty, recording a secondary fill.
fn pick(primary: Option<&str>, secondary: Option<&str>, used_secondary: &mut bool) -> String {
    match primary.filter(|v| !v.is_empty()) {
        Some(value) => value.to_string(),
        None => match secondary.filter(|v| !v.is_empty()) {
            Some(value) => {
                *used_secondary = true;
                value.to_string()
            }
            None => String::new(),
        },
    }
}

/// Field-by-field merge. `None` when neither source has an entry.
pub fn merge(
    id: &str,
    primary: Option<&DictionaryEntry>,
    secondary: Option<&LexiconEntry>,
) -> Option<Definition> {
    if primary.is_none() && secondary.is_none() {
        return None;
    }

    let mut used_secondary = false;
    let mut field = |p: Option<&str>, s: Option<&str>| pick(p, s, &mut used_secondary);

    let word = field(
        primary.map(|p| p.word.as_str()),
        secondary.map(|s| s.word.as_str()),
    );
    let transliteration = field(
        primary.map(|p| p.transliteration.as_str()),
        secondary.map(|s| s.transliteration.as_str()),
    );
    let part_of_speech = field(
        primary.map(|p| p.part_of_speech.as_str()),
        secondary.map(|s| s.part_of_speech.as_str()),
    );
    let definition = field(
        primary.map(|p| p.definition.as_str()),
        secondary.map(|s| s.definition.as_str()),
    );
    let usage = field(
        primary.map(|p| p.usage.as_str()),
        secondary.map(|s| s.usage.as_str()),
    );

    let origin = match (primary.is_some(), used_secondary) {
        (false, _) => DefinitionOrigin::LexiconFallback,
        (true, true) => DefinitionOrigin::Merged,
        (true, false) => DefinitionOrigin::Dictionary,
    };

    Some(Definition {
        id: id.to_string(),
        word,
        transliteration,
        part_of_speech,
        definition,
        usage,
        translated_word: None,
        translated_definition: None,
        translated_usage: None,
        origin,
    })
}

/// Resolves identifiers against the dictionary (primary) and lexicon (fallback).
pub struct DefinitionResolver {
    lexicon: Arc<LexiconStore>,
    dictionary: Arc<TargetDictionaryStore>,
    padded_width: usize,
}

impl DefinitionResolver {
    pub fn new(
        lexicon: Arc<LexiconStore>,
        dictionary: Arc<TargetDictionaryStore>,
        padded_width: usize,
    ) -> Self {
        Self {
            lexicon,
            dictionary,
            padded_width,
        }
    }

    /// Load both sources if needed, then resolve. A source that fails to load
    /// is treated as having no entries.
    pub async fn resolve(&self, id: &str) -> Option<Definition> {
        let (lexicon, dictionary) = tokio::join!(self.lexicon.load(), self.dictionary.load());
        if let Err(e) = lexicon {
            e.log_absorbed(id, "Lexicon unavailable, resolving without fallback");
        }
        if let Err(e) = dictionary {
            e.log_absorbed(id, "Target dictionary unavailable, resolving from lexicon");
        }
        self.resolve_loaded(id)
    }

    /// Resolve against whatever is already loaded; never fetches.
    pub fn resolve_loaded(&self, id: &str) -> Option<Definition> {
        let normalized = normalize_with_width(id, self.padded_width);

        let primary = normalized
            .variants()
            .into_iter()
            .find_map(|key| self.dictionary.get(key));

        // The raw spelling first, as the lexicon is keyed by the source's own spelling
        let secondary = self.lexicon.get(id.trim()).or_else(|| {
            normalized
                .variants()
                .into_iter()
                .find_map(|key| self.lexicon.get(key))
        });

        let definition = merge(id.trim(), primary, secondary);
        if definition.is_none() {
            tracing::debug!(id = %id, "No dictionary or lexicon entry");
        }
        definition
    }
}
