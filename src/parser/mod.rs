//! Tagged verse text tokenizer
//!
//! See [`verse::parse`] for the markup it understands.

pub mod verse;

pub use verse::{parse, strip_markup, WordToken};
