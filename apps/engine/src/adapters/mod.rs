//! In-memory collaborator implementations for tests and embedding demos.

pub mod memory;

pub use memory::{MemoryStore, NoopSink, RecordingSink, StaticWordList};
