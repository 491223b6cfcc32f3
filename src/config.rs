//! Engine configuration
//!
//! Loads resource locations, translation endpoint and tuning knobs from YAML,
//! with environment variables taking precedence over file values.

use std::time::Duration;

use serde::Deserialize;

use crate::error::Result;

/// Default configuration path
pub const DEFAULT_CONFIG_PATH: &str = "config/interlinear.yaml";

/// Root configuration structure
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct InterlinearConfig {
    pub resources: ResourceConfig,
    pub translation: TranslationConfig,
    pub dictionary: DictionaryConfig,
    pub strongs: StrongsConfig,
}

/// Where the static JSON documents live
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ResourceConfig {
    /// http(s) URL, `file://` URL or plain directory path
    pub base_url: String,
    pub lexicon_path: String,
    pub dictionary_path: String,
    /// `{book}` is replaced with the tagged-corpus book code
    pub book_path_template: String,
    /// Language key holding the tagged text inside each verse object
    pub text_language: String,
    pub fetch_timeout_secs: u64,
}

impl Default for ResourceConfig {
    fn default() -> Self {
        Self {
            base_url: "data".to_string(),
            lexicon_path: "lexicon/strongs.json".to_string(),
            dictionary_path: "lexicon/dictionary_pt.json".to_string(),
            book_path_template: "tagged/{book}.json".to_string(),
            text_language: "en".to_string(),
            fetch_timeout_secs: 30,
        }
    }
}

impl ResourceConfig {
    pub fn fetch_timeout(&self) -> Duration {
        Duration::from_secs(self.fetch_timeout_secs)
    }
}

/// External translation endpoint
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct TranslationConfig {
    /// When absent, translation is disabled and fields stay in the source language
    pub endpoint: Option<String>,
    /// Name of the environment variable holding the bearer key
    pub api_key_env: String,
    pub timeout_secs: u64,
}

impl Default for TranslationConfig {
    fn default() -> Self {
        Self {
            endpoint: None,
            api_key_env: "INTERLINEAR_TRANSLATION_KEY".to_string(),
            timeout_secs: 15,
        }
    }
}

impl TranslationConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn api_key(&self) -> Option<String> {
        std::env::var(&self.api_key_env)
            .ok()
            .filter(|k| !k.is_empty())
    }
}

/// Target dictionary re-keying options
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DictionaryConfig {
    /// Leading `definitions[]` fragments that form the definition; the rest is usage
    pub definition_fragments: usize,
}

impl Default for DictionaryConfig {
    fn default() -> Self {
        Self {
            definition_fragments: 2,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StrongsConfig {
    /// Minimum digit width of the padded identifier form
    pub padded_width: usize,
}

impl Default for StrongsConfig {
    fn default() -> Self {
        Self { padded_width: 4 }
    }
}

impl InterlinearConfig {
    /// Load configuration from a YAML file
    pub fn from_file(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Load configuration from a YAML string
    pub fn from_yaml(content: &str) -> Result<Self> {
        let config: InterlinearConfig = serde_yaml::from_str(content)?;
        Ok(config)
    }

    /// Load from `INTERLINEAR_CONFIG` (or the default path when it exists),
    /// then apply environment overrides.
    pub fn from_env() -> Result<Self> {
        let path = std::env::var("INTERLINEAR_CONFIG").ok();
        let mut config = match path {
            Some(path) => Self::from_file(&path)?,
            None if std::path::Path::new(DEFAULT_CONFIG_PATH).exists() => {
                Self::from_file(DEFAULT_CONFIG_PATH)?
            }
            None => Self::default(),
        };
        config.apply_env_overrides();
        Ok(config)
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(base_url) = std::env::var("INTERLINEAR_BASE_URL") {
            self.resources.base_url = base_url;
        }
        if let Ok(language) = std::env::var("INTERLINEAR_LANGUAGE") {
            self.resources.text_language = language;
        }
        if let Ok(endpoint) = std::env::var("INTERLINEAR_TRANSLATION_URL") {
            self.translation.endpoint = Some(endpoint).filter(|e| !e.is_empty());
        }
    }
}
