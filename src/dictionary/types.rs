//! Dictionary document and entry types.

use serde::{Deserialize, Serialize};

/// Top-level dictionary document.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DictionaryDocument {
    #[serde(default)]
    pub metadata: DictionaryMetadata,
    #[serde(default)]
    pub entries: Vec<RawDictionaryEntry>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct DictionaryMetadata {
    #[serde(default)]
    pub entry_count: Option<usize>,
}

/// Identifiers are usually strings ("430") but some exports emit numbers.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum RawIdentifier {
    Text(String),
    Number(u64),
}

impl RawIdentifier {
    pub fn as_text(&self) -> String {
        match self {
            RawIdentifier::Text(s) => s.trim().to_string(),
            RawIdentifier::Number(n) => n.to_string(),
        }
    }
}

/// One record as it appears in the dictionary document.
#[derive(Debug, Clone, Deserialize)]
pub struct RawDictionaryEntry {
    pub identifier: RawIdentifier,
    pub language_tag: String,
    #[serde(default)]
    pub term: Option<String>,
    #[serde(default)]
    pub transliteration: Option<String>,
    #[serde(default)]
    pub part_of_speech: Option<String>,
    #[serde(default)]
    pub definitions: Vec<String>,
}

/// A loaded dictionary entry, shared between its key variants.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DictionaryEntry {
    /// Canonical (unpadded) identifier
    pub id: String,
    /// Target-language word
    pub word: String,
    /// Leading definition fragments joined with "; "
    pub definition: String,
    /// Remaining fragments joined with "; "
    pub usage: String,
    pub transliteration: String,
    pub part_of_speech: String,
}

impl DictionaryEntry {
    /// Build an entry, splitting `definitions` after `definition_fragments`.
    pub fn from_raw(id: String, raw: RawDictionaryEntry, definition_fragments: usize) -> Self {
        let fragments: Vec<String> = raw
            .definitions
            .into_iter()
            .map(|f| f.trim().to_string())
            .filter(|f| !f.is_empty())
            .collect();
        let split = definition_fragments.min(fragments.len());
        let (head, tail) = fragments.split_at(split);

        Self {
            id,
            word: raw.term.map(|t| t.trim().to_string()).unwrap_or_default(),
            definition: head.join("; "),
            usage: tail.join("; "),
            transliteration: raw
                .transliteration
                .map(|t| t.trim().to_string())
                .unwrap_or_default(),
            part_of_speech: raw
                .part_of_speech
                .map(|p| p.trim().to_string())
                .unwrap_or_default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(definitions: &[&str]) -> RawDictionaryEntry {
        RawDictionaryEntry {
            identifier: RawIdentifier::Text("1".into()),
            language_tag: "hebrew".into(),
            term: Some(" pai ".into()),
            transliteration: Some("ʼâb".into()),
            part_of_speech: None,
            definitions: definitions.iter().map(|s| s.to_string()).collect(),
        }
    }

    #[test]
    fn test_fragment_split() {
        let entry = DictionaryEntry::from_raw(
            "H1".into(),
            raw(&["pai", "antepassado", "chefe", "fundador"]),
            2,
        );
        assert_eq!(entry.word, "pai");
        assert_eq!(entry.definition, "pai; antepassado");
        assert_eq!(entry.usage, "chefe; fundador");
        assert_eq!(entry.part_of_speech, "");
    }

    #[test]
    fn test_fragment_split_short_list() {
        let entry = DictionaryEntry::from_raw("H1".into(), raw(&["pai", "  "]), 2);
        assert_eq!(entry.definition, "pai");
        assert_eq!(entry.usage, "");
    }

    #[test]
    fn test_numeric_identifier() {
        let doc: DictionaryDocument = serde_json::from_str(
            r#"{"entries":[{"identifier":430,"language_tag":"hebrew","term":"Deus"}]}"#,
        )
        .unwrap();
        assert_eq!(doc.entries[0].identifier.as_text(), "430");
        assert!(doc.metadata.entry_count.is_none());
    }
}
