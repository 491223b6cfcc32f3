//! Reading-corpus → tagged-corpus book code table.
//!
//! Reading codes are the short Portuguese abbreviations the application uses
//! (`gn`, `jó`, `jo`, `1co`); tagged codes are OSIS book names (`Gen`, `Job`,
//! `John`, `1Cor`). Accents are significant: `jó` is Job, `jo` is John.

use std::collections::HashMap;
use std::sync::LazyLock;

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Testament {
    Old,
    New,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BookMapping {
    pub reading: &'static str,
    pub tagged: &'static str,
    pub testament: Testament,
}

const fn ot(reading: &'static str, tagged: &'static str) -> BookMapping {
    BookMapping {
        reading,
        tagged,
        testament: Testament::Old,
    }
}

const fn nt(reading: &'static str, tagged: &'static str) -> BookMapping {
    BookMapping {
        reading,
        tagged,
        testament: Testament::New,
    }
}

static BOOKS: [BookMapping; 66] = [
    ot("gn", "Gen"),
    ot("ex", "Exod"),
    ot("lv", "Lev"),
    ot("nm", "Num"),
    ot("dt", "Deut"),
    ot("js", "Josh"),
    ot("jz", "Judg"),
    ot("rt", "Ruth"),
    ot("1sm", "1Sam"),
    ot("2sm", "2Sam"),
    ot("1rs", "1Kgs"),
    ot("2rs", "2Kgs"),
    ot("1cr", "1Chr"),
    ot("2cr", "2Chr"),
    ot("ed", "Ezra"),
    ot("ne", "Neh"),
    ot("et", "Esth"),
    ot("jó", "Job"),
    ot("sl", "Ps"),
    ot("pv", "Prov"),
    ot("ec", "Eccl"),
    ot("ct", "Song"),
    ot("is", "Isa"),
    ot("jr", "Jer"),
    ot("lm", "Lam"),
    ot("ez", "Ezek"),
    ot("dn", "Dan"),
    ot("os", "Hos"),
    ot("jl", "Joel"),
    ot("am", "Amos"),
    ot("ob", "Obad"),
    ot("jn", "Jonah"),
    ot("mq", "Mic"),
    ot("na", "Nah"),
    ot("hc", "Hab"),
    ot("sf", "Zeph"),
    ot("ag", "Hag"),
    ot("zc", "Zech"),
    ot("ml", "Mal"),
    nt("mt", "Matt"),
    nt("mc", "Mark"),
    nt("lc", "Luke"),
    nt("jo", "John"),
    nt("atos", "Acts"),
    nt("rm", "Rom"),
    nt("1co", "1Cor"),
    nt("2co", "2Cor"),
    nt("gl", "Gal"),
    nt("ef", "Eph"),
    nt("fp", "Phil"),
    nt("cl", "Col"),
    nt("1ts", "1Thess"),
    nt("2ts", "2Thess"),
    nt("1tm", "1Tim"),
    nt("2tm", "2Tim"),
    nt("tt", "Titus"),
    nt("fm", "Phlm"),
    nt("hb", "Heb"),
    nt("tg", "Jas"),
    nt("1pe", "1Pet"),
    nt("2pe", "2Pet"),
    nt("1jo", "1John"),
    nt("2jo", "2John"),
    nt("3jo", "3John"),
    nt("jd", "Jude"),
    nt("ap", "Rev"),
];

/// Reading-corpus books the tagged corpus does not contain.
static READING_ONLY: [&str; 7] = ["tb", "jdt", "sb", "eclo", "br", "1mc", "2mc"];

static BY_READING: LazyLock<HashMap<&'static str, &'static BookMapping>> =
    LazyLock::new(|| BOOKS.iter().map(|b| (b.reading, b)).collect());

/// Static translation between the two book abbreviation schemes.
pub struct BookAbbreviationMapper;

impl BookAbbreviationMapper {
    fn lookup(reading_code: &str) -> Option<&'static BookMapping> {
        let key = reading_code.trim().to_lowercase();
        BY_READING.get(key.as_str()).copied()
    }

    /// Tagged-corpus code for a reading code. `None` means no interlinear
    /// text exists for that book; it is not an error.
    pub fn to_tagged_code(reading_code: &str) -> Option<&'static str> {
        Self::lookup(reading_code).map(|b| b.tagged)
    }

    /// Reverse direction, matched case-insensitively.
    pub fn to_reading_code(tagged_code: &str) -> Option<&'static str> {
        let tagged = tagged_code.trim();
        BOOKS
            .iter()
            .find(|b| b.tagged.eq_ignore_ascii_case(tagged))
            .map(|b| b.reading)
    }

    pub fn testament(reading_code: &str) -> Option<Testament> {
        Self::lookup(reading_code).map(|b| b.testament)
    }

    /// Known to the reading corpus but absent from the tagged corpus.
    pub fn is_reading_only(reading_code: &str) -> bool {
        let key = reading_code.trim().to_lowercase();
        READING_ONLY.contains(&key.as_str())
    }

    pub fn mappings() -> &'static [BookMapping] {
        &BOOKS
    }

    pub fn reading_codes() -> impl Iterator<Item = &'static str> {
        BOOKS.iter().map(|b| b.reading)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_john_and_job_are_distinct() {
        assert_eq!(BookAbbreviationMapper::to_tagged_code("jo"), Some("John"));
        assert_eq!(BookAbbreviationMapper::to_tagged_code("jó"), Some("Job"));
        assert_eq!(BookAbbreviationMapper::to_tagged_code("JÓ"), Some("Job"));
        assert_eq!(BookAbbreviationMapper::to_tagged_code(" Gn "), Some("Gen"));
    }

    #[test]
    fn test_unmapped_books() {
        assert_eq!(BookAbbreviationMapper::to_tagged_code("tb"), None);
        assert!(BookAbbreviationMapper::is_reading_only("1MC"));
        assert_eq!(BookAbbreviationMapper::to_tagged_code("xyz"), None);
        assert!(!BookAbbreviationMapper::is_reading_only("xyz"));
    }

    #[test]
    fn test_table_is_a_bijection() {
        let reading: HashSet<_> = BookAbbreviationMapper::reading_codes().collect();
        let tagged: HashSet<_> = BookAbbreviationMapper::mappings().iter().map(|b| b.tagged).collect();
        assert_eq!(reading.len(), 66);
        assert_eq!(tagged.len(), 66);
        for code in BookAbbreviationMapper::reading_codes() {
            let t = BookAbbreviationMapper::to_tagged_code(code).unwrap();
            assert_eq!(BookAbbreviationMapper::to_reading_code(t), Some(code));
        }
    }

    #[test]
    fn test_testament_split() {
        let old = BookAbbreviationMapper::mappings()
            .iter()
            .filter(|b| b.testament == Testament::Old)
            .count();
        assert_eq!(old, 39);
        assert_eq!(BookAbbreviationMapper::testament("ap"), Some(Testament::New));
    }
}
