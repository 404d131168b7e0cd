//! Shared fixtures for engine integration tests.

use std::sync::Arc;

use wordchain_engine::adapters::{MemoryStore, RecordingSink, StaticWordList};
use wordchain_engine::ports::validator::WordValidator;
use wordchain_engine::{GameConfig, GameEngine, PartyKey};

pub struct Harness {
    pub engine: GameEngine,
    pub store: Arc<MemoryStore>,
    pub sink: Arc<RecordingSink>,
}

pub fn harness_with(validator: Arc<dyn WordValidator>, config: GameConfig) -> Harness {
    let store = Arc::new(MemoryStore::new());
    let sink = Arc::new(RecordingSink::new());
    let engine = GameEngine::new(
        config,
        validator,
        Arc::clone(&store) as Arc<dyn wordchain_engine::PersistenceGateway>,
        Arc::clone(&sink) as Arc<dyn wordchain_engine::NotificationSink>,
    );
    Harness {
        engine,
        store,
        sink,
    }
}

pub fn harness(validator: Arc<dyn WordValidator>) -> Harness {
    harness_with(validator, GameConfig::default())
}

pub fn word_list() -> Arc<StaticWordList> {
    Arc::new(
        StaticWordList::with_words([
            "apple", "elephant", "toast", "tiger", "rabbit", "tree", "eagle", "planet",
            "eternal", "alpha",
        ])
        .mark_plural("cats"),
    )
}

pub fn key() -> PartyKey {
    PartyKey::new(10, 100)
}
