//! VerseTextParser - split one verse of tagged text into word tokens.
//!
//! ## Markup
//!
//! ```text
//! In the beginning{H7225} God{H430} created{H1254}{(H8804)}{H853} the heaven{H8064}
//! and the earth{H776} was{H1961}{(H8804)} [was] without form{H8414}
//! ```
//!
//! - `{H7225}` attaches an identifier to the word just before it; a word may
//!   carry several, and one tag body may list several (`{G1519 G846}`).
//! - `{(H8804)}` is a morphology code for the same word.
//! - A chunk made only of tags belongs to the previous word; at the very
//!   start of a verse it belongs to the first word instead.
//! - `[...]` marks translator-supplied words; the span may cover several words.
//! - Any other `{...}` content is dropped.
//!
//! Parsing is a pure function of its input.

use serde::{Deserialize, Serialize};

use crate::strongs::StrongsId;

/// One surface word with its interlinear metadata.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordToken {
    /// Visible text with markup removed (punctuation kept)
    pub text: String,
    /// Identifiers as written in the source, in order of appearance
    pub strongs: Vec<String>,
    pub morphology: Vec<String>,
    /// Supplied by translators; no source word behind it
    pub italic: bool,
}

impl WordToken {
    pub fn has_identifiers(&self) -> bool {
        !self.strongs.is_empty()
    }

    fn has_text(&self) -> bool {
        !self.text.is_empty()
    }
}

/// Push the tag body's identifiers and morphology codes onto `token`.
fn apply_tag(token: &mut WordToken, body: &str) {
    let body = body.trim();
    if let Some(code) = body.strip_prefix('(').and_then(|b| b.strip_suffix(')')) {
        let code = code.trim();
        if !code.is_empty() {
            token.morphology.push(code.to_string());
        }
        return;
    }

    for piece in body.split(|c: char| c.is_whitespace() || c == ',') {
        if piece.is_empty() {
            continue;
        }
        if piece.parse::<StrongsId>().is_ok() {
            token.strongs.push(piece.to_string());
        } else if let Some(code) = piece.strip_prefix('(').and_then(|p| p.strip_suffix(')')) {
            token.morphology.push(code.to_string());
        }
    }
}

/// Tokenize one verse of tagged text.
pub fn parse(tagged: &str) -> Vec<WordToken> {
    let mut tokens: Vec<WordToken> = Vec::new();
    let mut current = WordToken::default();
    let mut in_italic = false;
    let mut chars = tagged.chars();

    while let Some(c) = chars.next() {
        match c {
            '[' => in_italic = true,
            ']' => in_italic = false,
            '{' => {
                let mut body = String::new();
                for inner in chars.by_ref() {
                    if inner == '}' {
                        break;
                    }
                    body.push(inner);
                }
                // Tags before any text of the current word belong to the previous word
                match tokens.last_mut() {
                    Some(previous) if !current.has_text() => apply_tag(previous, &body),
                    _ => apply_tag(&mut current, &body),
                }
            }
            c if c.is_whitespace() => {
                if current.has_text() {
                    tokens.push(std::mem::take(&mut current));
                }
            }
            c => {
                if in_italic {
                    current.italic = true;
                }
                current.text.push(c);
            }
        }
    }

    if current.has_text() {
        tokens.push(current);
    }
    tokens
}

/// The visible verse text: markup removed, whitespace collapsed.
pub fn strip_markup(tagged: &str) -> String {
    parse(tagged)
        .into_iter()
        .map(|t| t.text)
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn texts(tokens: &[WordToken]) -> Vec<&str> {
        tokens.iter().map(|t| t.text.as_str()).collect()
    }

    #[test]
    fn test_basic_tags() {
        let tokens = parse("In the beginning{H7225} God{H430} created{H1254}{H853}");
        assert_eq!(texts(&tokens), vec!["In", "the", "beginning", "God", "created"]);
        assert!(tokens[0].strongs.is_empty());
        assert_eq!(tokens[2].strongs, vec!["H7225"]);
        assert_eq!(tokens[4].strongs, vec!["H1254", "H853"]);
    }

    #[test]
    fn test_morphology_codes() {
        let tokens = parse("created{H1254}{(H8804)} the heaven{H8064}");
        assert_eq!(tokens[0].strongs, vec!["H1254"]);
        assert_eq!(tokens[0].morphology, vec!["H8804"]);
        assert!(tokens[2].morphology.is_empty());
    }

    #[test]
    fn test_italic_span_and_plain_words() {
        let tokens = parse("and the earth{H776} [was] without form{H8414}, [and it was] void{H922}");
        let italic: Vec<_> = tokens.iter().filter(|t| t.italic).map(|t| t.text.as_str()).collect();
        assert_eq!(italic, vec!["was", "and", "it", "was"]);

        let was = &tokens[3];
        assert_eq!(was.text, "was");
        assert!(was.strongs.is_empty());
        assert_eq!(tokens[5].text, "form,");
        assert_eq!(tokens[5].strongs, vec!["H8414"]);
    }

    #[test]
    fn test_detached_tag_joins_previous_word() {
        let tokens = parse("believeth{G4100} {G1519} on him{G846}");
        assert_eq!(texts(&tokens), vec!["believeth", "on", "him"]);
        assert_eq!(tokens[0].strongs, vec!["G4100", "G1519"]);
    }

    #[test]
    fn test_multi_identifier_body() {
        let tokens = parse("unto him{G1519 G846}");
        assert_eq!(tokens[1].strongs, vec!["G1519", "G846"]);
        let tokens = parse("him{G1519,G846}");
        assert_eq!(tokens[0].strongs, vec!["G1519", "G846"]);
    }

    #[test]
    fn test_leading_tag_joins_first_word() {
        let tokens = parse("{H853} the light{H216}");
        assert_eq!(texts(&tokens), vec!["the", "light"]);
        assert_eq!(tokens[0].strongs, vec!["H853"]);
        assert_eq!(tokens[1].strongs, vec!["H216"]);

        let tokens = parse("  {H853}{(H8804)}  [and] God{H430}");
        assert_eq!(texts(&tokens), vec!["and", "God"]);
        assert_eq!(tokens[0].strongs, vec!["H853"]);
        assert_eq!(tokens[0].morphology, vec!["H8804"]);
        assert!(tokens[0].italic);
    }

    #[test]
    fn test_tags_without_any_word() {
        assert!(parse("{H853} {(H8804)}").is_empty());
        assert_eq!(strip_markup("{H853} the light{H216}"), "the light");
    }

    #[test]
    fn test_unknown_tags_dropped_and_unterminated_tag() {
        let tokens = parse("Jesus{note: red} wept{G1145");
        assert_eq!(texts(&tokens), vec!["Jesus", "wept"]);
        assert!(tokens[0].strongs.is_empty());
        assert_eq!(tokens[1].strongs, vec!["G1145"]);
    }

    #[test]
    fn test_empty_input() {
        assert!(parse("").is_empty());
        assert!(parse("   ").is_empty());
    }

    #[test]
    fn test_strip_markup() {
        assert_eq!(
            strip_markup("For God{G2316} so  loved{G25} [the] world{G2889}."),
            "For God so loved the world."
        );
    }

    fn word() -> impl Strategy<Value = String> {
        "[A-Za-z,.;:]{1,8}"
    }

    fn tag() -> impl Strategy<Value = String> {
        prop_oneof![
            (1u32..9000).prop_map(|n| format!("{{H{n}}}")),
            (1u32..5700).prop_map(|n| format!("{{G{n}}}")),
            (8000u32..9000).prop_map(|n| format!("{{(H{n})}}")),
        ]
    }

    fn chunk() -> impl Strategy<Value = (String, bool)> {
        (word(), prop::collection::vec(tag(), 0..3), any::<bool>()).prop_map(|(w, tags, italic)| {
            let body = if italic { format!("[{w}]") } else { w };
            (format!("{body}{}", tags.concat()), italic)
        })
    }

    proptest! {
        #[test]
        fn prop_parse_is_deterministic(chunks in prop::collection::vec(chunk(), 0..20)) {
            let text = chunks.iter().map(|(c, _)| c.as_str()).collect::<Vec<_>>().join(" ");
            prop_assert_eq!(parse(&text), parse(&text));
        }

        #[test]
        fn prop_word_order_preserved(
            leading in prop::collection::vec(tag(), 0..3),
            words in prop::collection::vec((word(), prop::collection::vec(tag(), 0..3), any::<bool>()), 1..20),
        ) {
            let body = words
                .iter()
                .map(|(w, tags, italic)| {
                    let w = if *italic { format!("[{w}]") } else { w.clone() };
                    format!("{w}{}", tags.concat())
                })
                .collect::<Vec<_>>()
                .join("  ");
            let text = format!("{} {body}", leading.concat());
            let expected = words.iter().map(|(w, _, _)| w.as_str()).collect::<Vec<_>>().join(" ");
            let tokens = parse(&text);
            let joined = tokens.iter().map(|t| t.text.as_str()).collect::<Vec<_>>().join(" ");
            prop_assert_eq!(joined, expected);
            prop_assert_eq!(tokens.len(), words.len());
            prop_assert!(tokens.iter().zip(&words).all(|(t, (_, _, italic))| t.italic == *italic));
        }
    }
}
