//! Lexicon record types.

use serde::{Deserialize, Serialize};

/// One record as it appears in the lexicon document.
///
/// Hebrew records spell the transliteration `xlit`, Greek ones `translit`.
/// Some records carry both; `xlit` wins.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawLexiconEntry {
    #[serde(default)]
    pub lemma: Option<String>,
    #[serde(default)]
    pub xlit: Option<String>,
    #[serde(default)]
    pub translit: Option<String>,
    #[serde(default)]
    pub pron: Option<String>,
    #[serde(default)]
    pub pos: Option<String>,
    #[serde(default)]
    pub derivation: Option<String>,
    #[serde(default)]
    pub strongs_def: Option<String>,
    #[serde(default)]
    pub kjv_def: Option<String>,
}

/// A loaded lexicon entry. Immutable once the store is initialised.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LexiconEntry {
    /// Original-script word
    pub word: String,
    pub transliteration: String,
    pub part_of_speech: String,
    /// Gloss / definition text
    pub definition: String,
    /// Usage outline
    pub usage: String,
    pub pronunciation: Option<String>,
    pub derivation: Option<String>,
}

fn clean(value: Option<String>) -> String {
    value.map(|v| v.trim().to_string()).unwrap_or_default()
}

fn clean_opt(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

impl From<RawLexiconEntry> for LexiconEntry {
    fn from(raw: RawLexiconEntry) -> Self {
        Self {
            word: clean(raw.lemma),
            transliteration: clean(raw.xlit.or(raw.translit)),
            part_of_speech: clean(raw.pos),
            definition: clean(raw.strongs_def),
            usage: clean(raw.kjv_def),
            pronunciation: clean_opt(raw.pron),
            derivation: clean_opt(raw.derivation),
        }
    }
}
