//! Source-language base lexicon
//!
//! The lexicon maps identifiers to the original-script word, transliteration,
//! part of speech, gloss and usage outline. It is loaded once per store and is
//! the fallback source for [`crate::resolver::DefinitionResolver`].

pub mod store;
pub mod types;

pub use store::{LexiconMap, LexiconStore};
pub use types::{LexiconEntry, RawLexiconEntry};
