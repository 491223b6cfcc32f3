//! Shared fixtures for the interlinear integration tests.

#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use interlinear::translation::{TranslationRequest, TranslationResponse};
use interlinear::{InterlinearConfig, MemoryFetcher, Result, TranslationClient};

pub const LEXICON_PATH: &str = "lexicon/strongs.json";
pub const DICTIONARY_PATH: &str = "lexicon/dictionary_pt.json";
pub const JOHN_PATH: &str = "tagged/John.json";
pub const GENESIS_PATH: &str = "tagged/Gen.json";

pub const LEXICON: &str = r#"{
    "H1": {"lemma": "אָב", "xlit": "ʼâb", "pos": "n-m", "strongs_def": "father", "kjv_def": "chief, (fore-)father"},
    "H430": {"lemma": "אֱלֹהִים", "xlit": "ʼĕlôhîym", "pos": "n-m-p", "strongs_def": "gods in the ordinary sense", "kjv_def": "angels, God, gods"},
    "H7225": {"lemma": "רֵאשִׁית", "xlit": "rêʼshîyth", "pos": "n-f", "strongs_def": "the first", "kjv_def": "beginning, chief(-est), first"},
    "G25": {"lemma": "ἀγαπάω", "translit": "agapáō", "pos": "v", "strongs_def": "to love (in a social or moral sense)", "kjv_def": "(be-)love(-ed)"},
    "G2316": {"lemma": "θεός", "translit": "theós", "pos": "n-m", "strongs_def": "a deity", "kjv_def": "God, god(-ly, -ward)"},
    "G2889": {"lemma": "κόσμος", "translit": "kósmos", "pos": "n-m", "strongs_def": "orderly arrangement", "kjv_def": "adorning, world"}
}"#;

pub const DICTIONARY: &str = r#"{
    "metadata": {"entry_count": 4},
    "entries": [
        {"identifier": "1", "language_tag": "hebrew", "term": "pai", "transliteration": "ʼâb",
         "part_of_speech": "substantivo masculino", "definitions": ["pai", "antepassado", "chefe, fundador"]},
        {"identifier": "0430", "language_tag": "hebrew", "term": "Deus", "transliteration": "ʼĕlôhîym",
         "part_of_speech": "substantivo masculino plural", "definitions": ["deuses", "Deus", "juízes, anjos"]},
        {"identifier": "2316", "language_tag": "greek", "term": "Deus", "transliteration": "theós",
         "part_of_speech": "", "definitions": ["divindade"]},
        {"identifier": "2889", "language_tag": "greek", "term": "mundo", "transliteration": "kósmos",
         "part_of_speech": "substantivo masculino", "definitions": ["ordem", "mundo", "universo"]}
    ]
}"#;

pub const JOHN: &str = r#"{
    "John": {
        "John|3": {
            "John|3|16": {"en": "For{G1063} God{G2316} so{G3779} loved{G25}{(G5656)} the world{G2889}, that{G5620} he gave{G1325} his{G846} only begotten{G3439} Son{G5207}, that{G2443} whosoever{G3956} believeth{G4100} in{G1519} him{G846} should{G622} not{G3361} perish{G622}, but{G235} have{G2192} everlasting{G166} life{G2222}."},
            "John|3|18": {"en": "He that believeth{G4100} on{G1519} him{G846} is{G2919} not{G3756} condemned{G2919}"}
        }
    }
}"#;

pub const GENESIS: &str = r#"{
    "Gen": {
        "Gen|1": {
            "Gen|1|1": {"en": "In the beginning{H7225} God{H430} created{H1254}{(H8804)}{H853} the heaven{H8064} and{H853} the earth{H776}."},
            "Gen|1|2": {"en": "And the earth{H776} was{H1961}{(H8804)} without form{H8414}, and void{H922}; and darkness{H2822} [was] upon the face{H6440} of the deep{H8415}."}
        }
    }
}"#;

pub fn fixture_fetcher() -> Arc<MemoryFetcher> {
    Arc::new(
        MemoryFetcher::new()
            .with_document(LEXICON_PATH, LEXICON)
            .with_document(DICTIONARY_PATH, DICTIONARY)
            .with_document(JOHN_PATH, JOHN)
            .with_document(GENESIS_PATH, GENESIS),
    )
}

pub fn test_config() -> InterlinearConfig {
    InterlinearConfig::default()
}

/// Prefixes every field with "pt:" and counts calls.
pub struct MockTranslator {
    pub calls: AtomicUsize,
    pub delay: Duration,
}

impl MockTranslator {
    pub fn new(delay: Duration) -> Arc<Self> {
        Arc::new(Self {
            calls: AtomicUsize::new(0),
            delay,
        })
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl TranslationClient for MockTranslator {
    async fn translate(&self, request: &TranslationRequest) -> Result<TranslationResponse> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        tokio::time::sleep(self.delay).await;
        Ok(TranslationResponse {
            word: None,
            definition: Some(format!("pt:{}", request.definition)),
            usage: Some(format!("pt:{}", request.usage)),
        })
    }

    fn name(&self) -> &str {
        "mock"
    }
}
