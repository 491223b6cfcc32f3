//! TranslationMemoizer - one external translation per identifier.
//!
//! Per identifier the state moves `absent → in-flight → cached | absent`.
//! The in-flight slot is reserved under the lock before anything is awaited,
//! so concurrent callers for the same identifier share a single external call.
//! The call itself runs on a spawned task: dropping a waiting future cancels
//! only that wait, never the call the other waiters depend on.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use futures::future::{BoxFuture, FutureExt, Shared};
use serde::{Deserialize, Serialize};

use super::client::{TranslationClient, TranslationRequest, TranslationResponse};
use crate::error::{InterlinearError, Result};
use crate::strongs::normalize;

/// Translated word, definition and usage for one identifier.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranslatedFields {
    pub word: String,
    pub definition: String,
    pub usage: String,
}

impl TranslatedFields {
    fn untranslated(request: &TranslationRequest) -> Self {
        Self {
            word: request.word.clone(),
            definition: request.definition.clone(),
            usage: request.usage.clone(),
        }
    }

    /// Absent or blank response fields keep the source text.
    fn from_response(response: TranslationResponse, request: &TranslationRequest) -> Self {
        let keep = |translated: Option<String>, source: &str| {
            translated
                .map(|t| t.trim().to_string())
                .filter(|t| !t.is_empty())
                .unwrap_or_else(|| source.to_string())
        };
        Self {
            word: keep(response.word, &request.word),
            definition: keep(response.definition, &request.definition),
            usage: keep(response.usage, &request.usage),
        }
    }
}

/// One external call bounded by `timeout`.
async fn call_with_timeout(
    client: &dyn TranslationClient,
    request: &TranslationRequest,
    timeout: Duration,
) -> Result<TranslatedFields> {
    match tokio::time::timeout(timeout, client.translate(request)).await {
        Ok(response) => Ok(TranslatedFields::from_response(response?, request)),
        Err(_) => Err(InterlinearError::TranslationTimeout(timeout)),
    }
}

type PendingTranslation = Shared<BoxFuture<'static, Option<TranslatedFields>>>;

#[derive(Default)]
struct MemoState {
    cache: HashMap<String, TranslatedFields>,
    in_flight: HashMap<String, PendingTranslation>,
}

fn lock(state: &Mutex<MemoState>) -> MutexGuard<'_, MemoState> {
    state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Write-once translation cache keyed by canonical identifier.
pub struct TranslationMemoizer {
    client: Arc<dyn TranslationClient>,
    timeout: Duration,
    state: Arc<Mutex<MemoState>>,
}

impl TranslationMemoizer {
    pub fn new(client: Arc<dyn TranslationClient>, timeout: Duration) -> Self {
        Self {
            client,
            timeout,
            state: Arc::new(Mutex::new(MemoState::default())),
        }
    }

    /// Translate the fields for `id`, at most once per identifier.
    ///
    /// Never fails: on error or timeout the source fields come back unchanged
    /// and nothing is cached, so a later call retries.
    pub async fn translate(
        &self,
        id: &str,
        word: &str,
        definition: &str,
        usage: &str,
    ) -> TranslatedFields {
        let request = TranslationRequest {
            word: word.to_string(),
            definition: definition.to_string(),
            usage: usage.to_string(),
        };
        if request.is_empty() || !self.client.is_enabled() {
            return TranslatedFields::untranslated(&request);
        }

        let key = normalize(id).short;
        let pending = {
            let mut state = lock(&self.state);
            if let Some(hit) = state.cache.get(&key) {
                tracing::debug!(id = %key, "Translation cache hit");
                return hit.clone();
            }
            match state.in_flight.get(&key) {
                Some(pending) => {
                    tracing::debug!(id = %key, "Joining in-flight translation");
                    pending.clone()
                }
                None => {
                    let pending = self.spawn_translation(key.clone(), request.clone());
                    state.in_flight.insert(key, pending.clone());
                    pending
                }
            }
        };

        match pending.await {
            Some(fields) => fields,
            None => TranslatedFields::untranslated(&request),
        }
    }

    fn spawn_translation(&self, key: String, request: TranslationRequest) -> PendingTranslation {
        let client = Arc::clone(&self.client);
        let state = Arc::clone(&self.state);
        let timeout = self.timeout;

        let handle = tokio::spawn(async move {
            let result = match call_with_timeout(client.as_ref(), &request, timeout).await {
                Ok(fields) => Some(fields),
                Err(e) => {
                    e.log_absorbed(&key, "Translation failed, keeping source text");
                    None
                }
            };

            let mut state = lock(&state);
            state.in_flight.remove(&key);
            // First successful write wins
            result.map(|fields| state.cache.entry(key).or_insert(fields).clone())
        });

        async move {
            match handle.await {
                Ok(result) => result,
                Err(e) => {
                    tracing::warn!(error = %e, "Translation task aborted");
                    None
                }
            }
        }
        .boxed()
        .shared()
    }

    pub fn cached(&self, id: &str) -> Option<TranslatedFields> {
        lock(&self.state).cache.get(&normalize(id).short).cloned()
    }

    pub fn cached_count(&self) -> usize {
        lock(&self.state).cache.len()
    }

    pub fn in_flight_count(&self) -> usize {
        lock(&self.state).in_flight.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Counts calls; fails the first `fail_first` of them.
    struct CountingClient {
        calls: AtomicUsize,
        fail_first: usize,
        delay: Duration,
    }

    impl CountingClient {
        fn new(fail_first: usize, delay: Duration) -> Self {
            Self {
                calls: AtomicUsize::new(0),
                fail_first,
                delay,
            }
        }
    }

    #[async_trait]
    impl TranslationClient for CountingClient {
        async fn translate(&self, request: &TranslationRequest) -> Result<TranslationResponse> {
            let n = self.calls.fetch_add(1, Ordering::SeqCst);
            tokio::time::sleep(self.delay).await;
            if n < self.fail_first {
                return Err(InterlinearError::TranslationFailed("boom".into()));
            }
            Ok(TranslationResponse {
                word: Some(format!("{}#{n}", request.word)),
                definition: Some(format!("pt:{}", request.definition)),
                usage: None,
            })
        }

        fn name(&self) -> &str {
            "counting"
        }
    }

    #[tokio::test]
    async fn test_second_call_served_from_cache() {
        let client = Arc::new(CountingClient::new(0, Duration::ZERO));
        let memo = TranslationMemoizer::new(client.clone(), Duration::from_secs(5));

        let a = memo.translate("G3056", "λόγος", "something said", "word").await;
        let b = memo.translate("G3056", "ignored", "ignored", "ignored").await;
        assert_eq!(a, b);
        assert_eq!(a.definition, "pt:something said");
        assert_eq!(a.usage, "word");
        assert_eq!(client.calls.load(Ordering::SeqCst), 1);
        assert_eq!(memo.cached_count(), 1);
    }

    #[tokio::test]
    async fn test_concurrent_callers_share_one_call() {
        let client = Arc::new(CountingClient::new(0, Duration::from_millis(20)));
        let memo = Arc::new(TranslationMemoizer::new(client.clone(), Duration::from_secs(5)));

        let handles: Vec<_> = (0..10)
            .map(|i| {
                let memo = Arc::clone(&memo);
                // Mixed spellings of the same identifier
                let id = if i % 2 == 0 { "H1" } else { "H0001" };
                tokio::spawn(async move { memo.translate(id, "אָב", "father", "chief").await })
            })
            .collect();

        let results: Vec<_> = futures::future::join_all(handles)
            .await
            .into_iter()
            .map(|r| r.unwrap())
            .collect();
        assert!(results.iter().all(|r| r == &results[0]));
        assert_eq!(client.calls.load(Ordering::SeqCst), 1);
        assert_eq!(memo.in_flight_count(), 0);
    }

    #[tokio::test]
    async fn test_failure_degrades_and_retries() {
        let client = Arc::new(CountingClient::new(1, Duration::ZERO));
        let memo = TranslationMemoizer::new(client.clone(), Duration::from_secs(5));

        let first = memo.translate("H430", "אֱלֹהִים", "God", "gods").await;
        assert_eq!(first.definition, "God");
        assert!(memo.cached("H430").is_none());

        let second = memo.translate("H430", "אֱלֹהִים", "God", "gods").await;
        assert_eq!(second.definition, "pt:God");
        assert_eq!(client.calls.load(Ordering::SeqCst), 2);
        assert!(memo.cached("H0430").is_some());
    }

    #[tokio::test]
    async fn test_timeout_is_a_failure() {
        let client = Arc::new(CountingClient::new(0, Duration::from_millis(200)));
        let memo = TranslationMemoizer::new(client, Duration::from_millis(10));

        let fields = memo.translate("G25", "ἀγαπάω", "to love", "love").await;
        assert_eq!(fields.definition, "to love");
        assert_eq!(memo.cached_count(), 0);
        assert_eq!(memo.in_flight_count(), 0);
    }

    #[tokio::test]
    async fn test_slow_call_reports_timeout() {
        let client = CountingClient::new(0, Duration::from_millis(200));
        let request = TranslationRequest {
            word: "ἀγαπάω".into(),
            definition: "to love".into(),
            usage: "love".into(),
        };

        let err = call_with_timeout(&client, &request, Duration::from_millis(10))
            .await
            .unwrap_err();
        assert!(matches!(err, InterlinearError::TranslationTimeout(d) if d == Duration::from_millis(10)));
        assert!(err.is_transient());

        let fields = call_with_timeout(&client, &request, Duration::from_secs(5))
            .await
            .unwrap();
        assert_eq!(fields.definition, "pt:to love");
    }

    #[tokio::test]
    async fn test_dropped_waiter_does_not_cancel_call() {
        let client = Arc::new(CountingClient::new(0, Duration::from_millis(30)));
        let memo = Arc::new(TranslationMemoizer::new(client.clone(), Duration::from_secs(5)));

        let waiter = {
            let memo = Arc::clone(&memo);
            tokio::spawn(async move { memo.translate("G2316", "θεός", "God", "god").await })
        };
        tokio::time::sleep(Duration::from_millis(5)).await;
        waiter.abort();

        tokio::time::sleep(Duration::from_millis(60)).await;
        assert!(memo.cached("G2316").is_some());
        assert_eq!(client.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_disabled_client_returns_source() {
        let memo = TranslationMemoizer::new(
            Arc::new(crate::translation::DisabledTranslation),
            Duration::from_secs(1),
        );
        let fields = memo.translate("H1", "אָב", "father", "chief").await;
        assert_eq!(fields.word, "אָב");
        assert_eq!(memo.in_flight_count(), 0);
    }
}
