//! InterlinearService - query API for presentation code.
//!
//! ## Flow
//!
//! ```text
//! (reading book code, chapter, verse)
//!         │
//!         ├─► BookAbbreviationMapper   "jo" → "John"
//!         ├─► TaggedBookStore          lazy per-book load
//!         ├─► parser::parse            tagged text → WordToken[]
//!         ├─► DefinitionResolver       dictionary (primary) + lexicon (fallback)
//!         └─► TranslationMemoizer      on demand, once per identifier
//! ```
//!
//! Every query absorbs failures: callers only branch on presence vs absence.
//! Each service instance owns its caches, so tests can build isolated ones.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

use serde::Serialize;

use crate::books::{BookAbbreviationMapper, TaggedBookStore, Testament};
use crate::config::InterlinearConfig;
use crate::dictionary::TargetDictionaryStore;
use crate::error::Result;
use crate::fetch::{fetcher_from_config, ResourceFetcher};
use crate::lexicon::LexiconStore;
use crate::parser::{self, WordToken};
use crate::resolver::{Definition, DefinitionOrigin, DefinitionResolver};
use crate::translation::{client_from_config, TranslatedFields, TranslationClient, TranslationMemoizer};

/// A verse split into tokens, with one Definition per distinct identifier.
#[derive(Debug, Clone, Serialize)]
pub struct InterlinearVerse {
    /// Canonical spelling from the book table
    pub reading_code: String,
    pub tagged_code: String,
    pub testament: Testament,
    pub chapter: u32,
    pub verse: u32,
    /// Raw tagged text
    pub text: String,
    pub tokens: Vec<WordToken>,
    /// Keyed by identifier as written in the tokens
    pub definitions: BTreeMap<String, Definition>,
}

/// Outcome of [`InterlinearService::preload`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PreloadReport {
    pub lexicon: bool,
    pub dictionary: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CacheStats {
    pub lexicon_loaded: bool,
    pub dictionary_loaded: bool,
    pub books_cached: usize,
    pub translations_cached: usize,
    pub translations_in_flight: usize,
}

pub struct InterlinearService {
    lexicon: Arc<LexiconStore>,
    dictionary: Arc<TargetDictionaryStore>,
    books: TaggedBookStore,
    resolver: DefinitionResolver,
    translations: TranslationMemoizer,
}

impl InterlinearService {
    pub fn new(
        config: &InterlinearConfig,
        fetcher: Arc<dyn ResourceFetcher>,
        translator: Arc<dyn TranslationClient>,
    ) -> Self {
        let resources = &config.resources;
        let lexicon = Arc::new(LexiconStore::new(
            Arc::clone(&fetcher),
            resources.lexicon_path.clone(),
        ));
        let dictionary = Arc::new(TargetDictionaryStore::new(
            Arc::clone(&fetcher),
            resources.dictionary_path.clone(),
            config.dictionary.definition_fragments,
            config.strongs.padded_width,
        ));
        let books = TaggedBookStore::new(
            fetcher,
            resources.book_path_template.clone(),
            resources.text_language.clone(),
        );
        let resolver = DefinitionResolver::new(
            Arc::clone(&lexicon),
            Arc::clone(&dictionary),
            config.strongs.padded_width,
        );
        let translations = TranslationMemoizer::new(translator, config.translation.timeout());

        Self {
            lexicon,
            dictionary,
            books,
            resolver,
            translations,
        }
    }

    /// Build the fetcher and translation client named by the configuration.
    pub fn from_config(config: &InterlinearConfig) -> Result<Self> {
        let fetcher = fetcher_from_config(&config.resources)?;
        let translator = client_from_config(&config.translation);
        tracing::info!(
            source = %fetcher.describe(),
            translator = %translator.name(),
            "Interlinear service configured"
        );
        Ok(Self::new(config, fetcher, translator))
    }

    /// Load both dictionaries concurrently.
    pub async fn preload(&self) -> PreloadReport {
        let (lexicon, dictionary) = tokio::join!(self.lexicon.load(), self.dictionary.load());
        if let Err(e) = &lexicon {
            e.log_absorbed("lexicon", "Preload failed");
        }
        if let Err(e) = &dictionary {
            e.log_absorbed("dictionary", "Preload failed");
        }
        PreloadReport {
            lexicon: lexicon.is_ok(),
            dictionary: dictionary.is_ok(),
        }
    }

    pub async fn get_definition(&self, id: &str) -> Option<Definition> {
        self.resolver.resolve(id).await
    }

    pub async fn get_verse_with_tags(
        &self,
        reading_code: &str,
        chapter: u32,
        verse: u32,
    ) -> Option<String> {
        let tagged = self.tagged_code(reading_code)?;
        self.books.get_verse_text(tagged, chapter, verse).await
    }

    pub async fn get_chapter_with_tags(
        &self,
        reading_code: &str,
        chapter: u32,
    ) -> BTreeMap<u32, String> {
        match self.tagged_code(reading_code) {
            Some(tagged) => self.books.get_chapter_verses(tagged, chapter).await,
            None => BTreeMap::new(),
        }
    }

    /// Chapter numbers present in the tagged text of a book.
    pub async fn get_chapter_numbers(&self, reading_code: &str) -> Vec<u32> {
        let Some(tagged) = self.tagged_code(reading_code) else {
            return Vec::new();
        };
        match self.books.load_book(tagged).await {
            Some(book) => book.chapter_numbers().collect(),
            None => Vec::new(),
        }
    }

    pub async fn translate_definition_fields(
        &self,
        id: &str,
        word: &str,
        definition: &str,
        usage: &str,
    ) -> TranslatedFields {
        self.translations.translate(id, word, definition, usage).await
    }

    /// Fill the translated variants of a Definition still holding
    /// source-language fields. Dictionary-only definitions come back as-is.
    pub async fn translate_definition(&self, definition: &Definition) -> Definition {
        let mut out = definition.clone();
        if !definition.needs_translation() {
            return out;
        }

        let fields = self
            .translations
            .translate(
                &definition.id,
                &definition.word,
                &definition.definition,
                &definition.usage,
            )
            .await;

        let changed = |translated: &str, source: &str| {
            (translated != source).then(|| translated.to_string())
        };
        out.translated_word = changed(&fields.word, &definition.word);
        out.translated_definition = changed(&fields.definition, &definition.definition);
        out.translated_usage = changed(&fields.usage, &definition.usage);

        if out.translated_word.is_some()
            || out.translated_definition.is_some()
            || out.translated_usage.is_some()
        {
            out.origin = DefinitionOrigin::Translated;
        }
        out
    }

    /// Tokens plus resolved definitions for one verse.
    pub async fn interlinear_verse(
        &self,
        reading_code: &str,
        chapter: u32,
        verse: u32,
    ) -> Option<InterlinearVerse> {
        let tagged = self.tagged_code(reading_code)?;
        let text = self.books.get_verse_text(tagged, chapter, verse).await?;
        let tokens = parser::parse(&text);

        self.preload().await;
        let ids: BTreeSet<&str> = tokens
            .iter()
            .filter(|t| t.has_identifiers())
            .flat_map(|t| t.strongs.iter().map(String::as_str))
            .collect();
        let definitions = ids
            .into_iter()
            .filter_map(|id| {
                self.resolver
                    .resolve_loaded(id)
                    .map(|def| (id.to_string(), def))
            })
            .collect();

        let canonical = BookAbbreviationMapper::to_reading_code(tagged)?;
        let testament = BookAbbreviationMapper::testament(canonical)?;

        Some(InterlinearVerse {
            reading_code: canonical.to_string(),
            tagged_code: tagged.to_string(),
            testament,
            chapter,
            verse,
            text,
            tokens,
            definitions,
        })
    }

    pub fn stats(&self) -> CacheStats {
        CacheStats {
            lexicon_loaded: self.lexicon.is_loaded(),
            dictionary_loaded: self.dictionary.is_loaded(),
            books_cached: self.books.cached_books(),
            translations_cached: self.translations.cached_count(),
            translations_in_flight: self.translations.in_flight_count(),
        }
    }

    fn tagged_code(&self, reading_code: &str) -> Option<&'static str> {
        let tagged = BookAbbreviationMapper::to_tagged_code(reading_code);
        if tagged.is_none() {
            tracing::debug!(book = %reading_code, "No interlinear text for book");
        }
        tagged
    }
}
