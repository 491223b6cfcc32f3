//! Target-language dictionary
//!
//! A larger, translated dictionary covering the same identifier space as the
//! lexicon. Its document carries bare numbers plus a language tag, so entries
//! are re-keyed at load time under both the unpadded and zero-padded
//! identifier spellings.

pub mod store;
pub mod types;

pub use store::{DictionaryIndex, TargetDictionaryStore};
pub use types::{DictionaryDocument, DictionaryEntry, DictionaryMetadata, RawDictionaryEntry};
