//! Identifier parsing and key-variant generation.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Default digit width of the padded form.
///
/// Hebrew numbers stop at 8674 and Greek at 5624, but extended lexicons add
/// five-digit numbers; padding is a minimum width and never truncates.
pub const DEFAULT_PADDED_WIDTH: usize = 4;

/// Source-language family of an identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum StrongsPrefix {
    /// Hebrew / Aramaic (Old Testament)
    H,
    /// Greek (New Testament)
    G,
}

impl StrongsPrefix {
    pub fn as_char(self) -> char {
        match self {
            StrongsPrefix::H => 'H',
            StrongsPrefix::G => 'G',
        }
    }

    pub fn from_char(c: char) -> Option<Self> {
        match c.to_ascii_uppercase() {
            'H' => Some(StrongsPrefix::H),
            'G' => Some(StrongsPrefix::G),
            _ => None,
        }
    }

    /// Map a dictionary `language_tag` to a prefix (e.g. "hebrew" → H, "grc" → G).
    pub fn from_language_tag(tag: &str) -> Option<Self> {
        match tag.trim().to_ascii_lowercase().as_str() {
            "hebrew" | "heb" | "he" | "hbo" | "aramaic" | "arc" | "h" => Some(StrongsPrefix::H),
            "greek" | "grc" | "grk" | "el" | "g" => Some(StrongsPrefix::G),
            _ => None,
        }
    }
}

/// A parsed identifier such as `H430` or `G3056`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StrongsId {
    pub prefix: StrongsPrefix,
    pub number: u32,
    /// Lowercase disambiguation letter used by extended lexicons (`H1234a`)
    pub suffix: Option<char>,
}

impl StrongsId {
    pub fn new(prefix: StrongsPrefix, number: u32) -> Self {
        Self {
            prefix,
            number,
            suffix: None,
        }
    }

    /// Unpadded spelling, e.g. `H1`.
    pub fn short(&self) -> String {
        let mut s = format!("{}{}", self.prefix.as_char(), self.number);
        if let Some(c) = self.suffix {
            s.push(c);
        }
        s
    }

    /// Zero-padded spelling with at least `width` digits, e.g. `H0001`.
    pub fn padded(&self, width: usize) -> String {
        let mut s = format!("{}{:0>width$}", self.prefix.as_char(), self.number);
        if let Some(c) = self.suffix {
            s.push(c);
        }
        s
    }
}

impl fmt::Display for StrongsId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.short())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseStrongsError(pub String);

impl fmt::Display for ParseStrongsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid Strong's identifier '{}'", self.0)
    }
}

impl std::error::Error for ParseStrongsError {}

impl FromStr for StrongsId {
    type Err = ParseStrongsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let err = || ParseStrongsError(s.to_string());

        let mut chars = trimmed.chars();
        let prefix = chars
            .next()
            .and_then(StrongsPrefix::from_char)
            .ok_or_else(err)?;
        let rest = chars.as_str();

        let digits_end = rest
            .find(|c: char| !c.is_ascii_digit())
            .unwrap_or(rest.len());
        let (digits, tail) = rest.split_at(digits_end);
        if digits.is_empty() {
            return Err(err());
        }

        let suffix = match tail {
            "" => None,
            t if t.len() == 1 && t.chars().all(|c| c.is_ascii_alphabetic()) => {
                t.chars().next().map(|c| c.to_ascii_lowercase())
            }
            _ => return Err(err()),
        };

        let number: u32 = digits.parse().map_err(|_| err())?;
        if number == 0 {
            return Err(err());
        }

        Ok(StrongsId {
            prefix,
            number,
            suffix,
        })
    }
}

/// The two key spellings probed against every dictionary.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NormalizedId {
    pub short: String,
    pub padded: String,
}

impl NormalizedId {
    /// Both forms, deduplicated, short first.
    pub fn variants(&self) -> Vec<&str> {
        if self.short == self.padded {
            vec![self.short.as_str()]
        } else {
            vec![self.short.as_str(), self.padded.as_str()]
        }
    }
}

/// Normalize with the default padded width.
pub fn normalize(id: &str) -> NormalizedId {
    normalize_with_width(id, DEFAULT_PADDED_WIDTH)
}

/// Convert a raw identifier into its unpadded and zero-padded key forms.
///
/// Never fails: input that does not parse as a [`StrongsId`] is handled by
/// stripping leading zeros after the first character and re-padding.
pub fn normalize_with_width(id: &str, width: usize) -> NormalizedId {
    if let Ok(parsed) = id.parse::<StrongsId>() {
        return NormalizedId {
            short: parsed.short(),
            padded: parsed.padded(width),
        };
    }

    let trimmed = id.trim();
    let mut chars = trimmed.chars();
    let Some(first) = chars.next() else {
        return NormalizedId {
            short: String::new(),
            padded: String::new(),
        };
    };
    let prefix = first.to_ascii_uppercase();
    let body = chars.as_str().trim_start_matches('0');

    NormalizedId {
        short: format!("{prefix}{body}"),
        padded: format!("{prefix}{body:0>width$}"),
    }
}
