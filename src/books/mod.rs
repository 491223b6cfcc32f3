//! Tagged-corpus books
//!
//! The reading corpus and the tagged corpus abbreviate book names
//! differently. [`BookAbbreviationMapper`] translates between the two schemes
//! and [`TaggedBookStore`] lazily loads one tagged book per code.

pub mod abbreviations;
pub mod store;

pub use abbreviations::{BookAbbreviationMapper, BookMapping, Testament};
pub use store::{TaggedBook, TaggedBookStore};
