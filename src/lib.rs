//! Interlinear lexicon resolution and translation caching.
//!
//! Given a verse reference in the reading corpus's book scheme, this crate
//! finds the verse in a Strong's-tagged corpus, splits it into word tokens,
//! resolves each identifier against a target-language dictionary with a
//! source-language lexicon as fallback, and caches machine translations of
//! fields that are still untranslated.
//!
//! ```text
//! service ──► books ──► parser
//!    │
//!    ├──► resolver ──► dictionary, lexicon ──► strongs
//!    └──► translation
//!                 all loaders ──► fetch
//! ```

pub mod books;
pub mod config;
pub mod dictionary;
pub mod error;
pub mod fetch;
pub mod lexicon;
pub mod parser;
pub mod resolver;
pub mod service;
pub mod strongs;
pub mod translation;

pub use books::{BookAbbreviationMapper, TaggedBook, TaggedBookStore};
pub use config::InterlinearConfig;
pub use dictionary::{DictionaryEntry, TargetDictionaryStore};
pub use error::{InterlinearError, Result};
pub use fetch::{FsFetcher, HttpFetcher, MemoryFetcher, ResourceFetcher};
pub use lexicon::{LexiconEntry, LexiconStore};
pub use parser::{parse, WordToken};
pub use resolver::{Definition, DefinitionOrigin, DefinitionResolver};
pub use service::{CacheStats, InterlinearService, InterlinearVerse, PreloadReport};
pub use strongs::{normalize, NormalizedId, StrongsId};
pub use translation::{TranslatedFields, TranslationClient, TranslationMemoizer};
