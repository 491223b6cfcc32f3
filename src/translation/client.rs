//! External translation call.

use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::config::TranslationConfig;
use crate::error::{InterlinearError, Result};

/// Fields sent for translation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TranslationRequest {
    pub word: String,
    pub definition: String,
    pub usage: String,
}

impl TranslationRequest {
    pub fn is_empty(&self) -> bool {
        self.word.is_empty() && self.definition.is_empty() && self.usage.is_empty()
    }
}

/// Translated fields. An absent field means "keep the source text".
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct TranslationResponse {
    #[serde(default)]
    pub word: Option<String>,
    #[serde(default)]
    pub definition: Option<String>,
    #[serde(default)]
    pub usage: Option<String>,
}

/// The external translation service.
#[async_trait]
pub trait TranslationClient: Send + Sync {
    async fn translate(&self, request: &TranslationRequest) -> Result<TranslationResponse>;

    /// Disabled clients are never called; fields stay in the source language.
    fn is_enabled(&self) -> bool {
        true
    }

    /// Name for logging
    fn name(&self) -> &str;
}

/// Posts `{word, definition, usage}` as JSON to a translation endpoint.
pub struct HttpTranslationClient {
    endpoint: String,
    api_key: Option<String>,
    client: reqwest::Client,
}

impl HttpTranslationClient {
    pub fn new(endpoint: String) -> Self {
        Self {
            endpoint,
            api_key: None,
            client: reqwest::Client::new(),
        }
    }

    pub fn with_api_key(endpoint: String, api_key: String) -> Self {
        Self {
            endpoint,
            api_key: Some(api_key),
            client: reqwest::Client::new(),
        }
    }
}

#[async_trait]
impl TranslationClient for HttpTranslationClient {
    async fn translate(&self, request: &TranslationRequest) -> Result<TranslationResponse> {
        let mut builder = self
            .client
            .post(&self.endpoint)
            .header("content-type", "application/json")
            .json(request);
        if let Some(key) = &self.api_key {
            builder = builder.bearer_auth(key);
        }

        let response = builder
            .send()
            .await
            .map_err(|e| InterlinearError::TranslationFailed(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(InterlinearError::TranslationFailed(format!(
                "translation endpoint returned {}: {}",
                status,
                body.chars().take(200).collect::<String>()
            )));
        }

        response
            .json()
            .await
            .map_err(|e| InterlinearError::TranslationFailed(e.to_string()))
    }

    fn name(&self) -> &str {
        &self.endpoint
    }
}

/// Used when no endpoint is configured.
pub struct DisabledTranslation;

#[async_trait]
impl TranslationClient for DisabledTranslation {
    async fn translate(&self, _request: &TranslationRequest) -> Result<TranslationResponse> {
        Err(InterlinearError::TranslationFailed(
            "translation is disabled".into(),
        ))
    }

    fn is_enabled(&self) -> bool {
        false
    }

    fn name(&self) -> &str {
        "disabled"
    }
}

pub fn client_from_config(config: &TranslationConfig) -> Arc<dyn TranslationClient> {
    match &config.endpoint {
        Some(endpoint) => match config.api_key() {
            Some(key) => Arc::new(HttpTranslationClient::with_api_key(endpoint.clone(), key)),
            None => Arc::new(HttpTranslationClient::new(endpoint.clone())),
        },
        None => Arc::new(DisabledTranslation),
    }
}
