//! Error types for the interlinear engine
//!
//! These errors never reach presentation code directly. The query API in
//! [`crate::service`] absorbs them into "no data" results and logs the
//! cause; loaders expose them so warm-up code and the CLI can report why a
//! resource is missing.

use std::time::Duration;

use thiserror::Error;

/// Main error type for resource loading and translation
#[derive(Error, Debug)]
pub enum InterlinearError {
    #[error("Resource unavailable at '{path}': {reason}")]
    ResourceUnavailable { path: String, reason: String },

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Malformed JSON in '{path}': {source}")]
    Json {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Translation failed: {0}")]
    TranslationFailed(String),

    #[error("Translation timed out after {0:?}")]
    TranslationTimeout(Duration),
}

impl InterlinearError {
    pub fn unavailable(path: impl Into<String>, reason: impl Into<String>) -> Self {
        InterlinearError::ResourceUnavailable {
            path: path.into(),
            reason: reason.into(),
        }
    }

    pub fn json(path: impl Into<String>, source: serde_json::Error) -> Self {
        InterlinearError::Json {
            path: path.into(),
            source,
        }
    }

    /// True for failures a later retry may recover from (network, missing file).
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            InterlinearError::ResourceUnavailable { .. }
                | InterlinearError::Http(_)
                | InterlinearError::Io(_)
                | InterlinearError::TranslationFailed(_)
                | InterlinearError::TranslationTimeout(_)
        )
    }

    /// Log a failure the caller absorbs: `warn` when a later retry may
    /// recover, `error` when the resource itself is broken.
    pub fn log_absorbed(&self, subject: &str, message: &str) {
        if self.is_transient() {
            tracing::warn!(subject = %subject, error = %self, "{message}");
        } else {
            tracing::error!(subject = %subject, error = %self, "{message}");
        }
    }
}

impl From<serde_yaml::Error> for InterlinearError {
    fn from(error: serde_yaml::Error) -> Self {
        InterlinearError::Config(error.to_string())
    }
}

pub type Result<T> = std::result::Result<T, InterlinearError>;
