//! Strong's number identifiers
//!
//! An identifier is a family prefix (`H` Hebrew/Aramaic, `G` Greek) followed by
//! a positive number. Source data writes the number either bare (`H1`) or
//! zero-padded (`H0001`); both spellings denote the same lexical entry, so every
//! lookup goes through [`normalize`] and probes both forms.

pub mod normalize;

pub use normalize::{normalize, normalize_with_width, NormalizedId, StrongsId, StrongsPrefix};
