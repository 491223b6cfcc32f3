//! Machine translation of definition fields
//!
//! - [`client`]: the external translation call behind a trait
//! - [`memo`]: per-identifier cache with in-flight deduplication

pub mod client;
pub mod memo;

pub use client::{
    client_from_config, DisabledTranslation, HttpTranslationClient, TranslationClient,
    TranslationRequest, TranslationResponse,
};
pub use memo::{TranslatedFields, TranslationMemoizer};
