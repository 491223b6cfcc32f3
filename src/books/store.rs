//! TaggedBookStore - per-book lazy cache of the tagged corpus.
//!
//! Book documents key everything by pipe-joined composite strings:
//!
//! ```text
//! { "John": { "John|3": { "John|3|16": { "en": "For God{G2316} so loved{G25} ..." } } } }
//! ```
//!
//! They are converted once, at load time, into a typed
//! `chapter → verse → text` structure.

use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, Mutex};

use serde::Deserialize;
use tokio::sync::OnceCell;

use crate::error::{InterlinearError, Result};
use crate::fetch::{fetch_json, ResourceFetcher};

/// A verse value: usually keyed by language, occasionally a bare string.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
enum RawVerse {
    Text(String),
    ByLanguage(HashMap<String, String>),
}

impl RawVerse {
    fn into_text(self, language: &str) -> Option<String> {
        match self {
            RawVerse::Text(text) => Some(text),
            RawVerse::ByLanguage(mut by_language) => {
                if let Some(text) = by_language.remove(language) {
                    return Some(text);
                }
                if by_language.len() == 1 {
                    return by_language.into_values().next();
                }
                None
            }
        }
    }
}

type RawBookDocument = HashMap<String, HashMap<String, HashMap<String, RawVerse>>>;

/// Number after the last `|` of a composite key (`"John|3|16"` → 16).
fn trailing_number(key: &str) -> Option<u32> {
    key.rsplit('|').next()?.trim().parse().ok()
}

/// One book of the tagged corpus.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaggedBook {
    pub code: String,
    chapters: BTreeMap<u32, BTreeMap<u32, String>>,
}

impl TaggedBook {
    pub fn new(code: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            chapters: BTreeMap::new(),
        }
    }

    pub fn insert_verse(&mut self, chapter: u32, verse: u32, text: impl Into<String>) {
        self.chapters
            .entry(chapter)
            .or_default()
            .insert(verse, text.into());
    }

    /// Build from a parsed composite-key document. Keys whose trailing
    /// segment is not a number are skipped.
    fn from_document(code: &str, doc: RawBookDocument, language: &str) -> Self {
        let mut book = TaggedBook::new(code);
        let mut skipped = 0usize;

        for (book_key, chapters) in doc {
            if !book_key.eq_ignore_ascii_case(code) {
                tracing::debug!(expected = %code, found = %book_key, "Book key differs from requested code");
            }
            for (chapter_key, verses) in chapters {
                let Some(chapter) = trailing_number(&chapter_key) else {
                    skipped += verses.len();
                    continue;
                };
                for (verse_key, raw) in verses {
                    match (trailing_number(&verse_key), raw.into_text(language)) {
                        (Some(verse), Some(text)) => book.insert_verse(chapter, verse, text),
                        _ => skipped += 1,
                    }
                }
            }
        }

        if skipped > 0 {
            tracing::warn!(book = %code, skipped, "Skipped malformed verse keys");
        }
        book
    }

    pub fn verse(&self, chapter: u32, verse: u32) -> Option<&str> {
        self.chapters
            .get(&chapter)
            .and_then(|verses| verses.get(&verse))
            .map(String::as_str)
    }

    /// All verses present in a chapter. Verse numbers may have gaps.
    pub fn chapter(&self, chapter: u32) -> Option<&BTreeMap<u32, String>> {
        self.chapters.get(&chapter)
    }

    pub fn chapter_numbers(&self) -> impl Iterator<Item = u32> + '_ {
        self.chapters.keys().copied()
    }

    pub fn verse_count(&self) -> usize {
        self.chapters.values().map(BTreeMap::len).sum()
    }
}

/// Lazily loaded, never-evicted cache of tagged books keyed by tagged code.
///
/// Each code gets its own single-flight cell: concurrent first requests for
/// the same book share one fetch, and a failed fetch leaves the cell empty.
pub struct TaggedBookStore {
    fetcher: Arc<dyn ResourceFetcher>,
    path_template: String,
    language: String,
    books: Mutex<HashMap<String, Arc<OnceCell<Arc<TaggedBook>>>>>,
}

impl TaggedBookStore {
    /// `path_template` contains `{book}`; `language` selects the text variant.
    pub fn new(
        fetcher: Arc<dyn ResourceFetcher>,
        path_template: impl Into<String>,
        language: impl Into<String>,
    ) -> Self {
        Self {
            fetcher,
            path_template: path_template.into(),
            language: language.into(),
            books: Mutex::new(HashMap::new()),
        }
    }

    /// Document path for one tagged code.
    pub fn book_path(&self, code: &str) -> String {
        self.path_template.replace("{book}", code)
    }

    fn cell(&self, code: &str) -> Arc<OnceCell<Arc<TaggedBook>>> {
        let mut books = self
            .books
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        Arc::clone(books.entry(code.to_string()).or_default())
    }

    /// Load a book, surfacing the failure reason.
    pub async fn load_book_checked(&self, code: &str) -> Result<Arc<TaggedBook>> {
        let cell = self.cell(code);
        let book = cell
            .get_or_try_init(|| async {
                let path = self.book_path(code);
                let doc: RawBookDocument = fetch_json(self.fetcher.as_ref(), &path).await?;
                let book = TaggedBook::from_document(code, doc, &self.language);
                if book.verse_count() == 0 {
                    return Err(InterlinearError::unavailable(path, "document holds no verses"));
                }

                tracing::info!(
                    book = %code,
                    chapters = book.chapters.len(),
                    verses = book.verse_count(),
                    "Tagged book loaded"
                );
                Ok::<_, InterlinearError>(Arc::new(book))
            })
            .await?;
        Ok(Arc::clone(book))
    }

    /// Load a book; failures are logged and reported as `None`.
    pub async fn load_book(&self, code: &str) -> Option<Arc<TaggedBook>> {
        match self.load_book_checked(code).await {
            Ok(book) => Some(book),
            Err(e) => {
                e.log_absorbed(code, "Tagged book unavailable");
                None
            }
        }
    }

    pub async fn get_verse_text(&self, code: &str, chapter: u32, verse: u32) -> Option<String> {
        let book = self.load_book(code).await?;
        book.verse(chapter, verse).map(str::to_string)
    }

    pub async fn get_chapter_verses(&self, code: &str, chapter: u32) -> BTreeMap<u32, String> {
        match self.load_book(code).await {
            Some(book) => book.chapter(chapter).cloned().unwrap_or_default(),
            None => BTreeMap::new(),
        }
    }

    /// Number of books successfully loaded so far.
    pub fn cached_books(&self) -> usize {
        self.books
            .lock()
            .map(|books| books.values().filter(|cell| cell.initialized()).count())
            .unwrap_or(0)
    }
}
