//! Shared data model for the mnemo memory platform.
//!
//! Everything here is a plain data shape: provider selections, the composite
//! `MemoryConfig`, chat messages, and the memory items produced by storage.
//! Validation of untyped input lives in `mnemo-rs-config`.

mod config;
mod memory;
mod message;
mod provider;

pub use config::{
    EmbedderSection, EmbeddingConfig, GraphStoreConfig, HistoryStoreConfig, HistoryStoreSettings,
    LlmConfig, LlmSection, MemoryConfig, Neo4jConfig, ProviderConfig, VectorStoreConfig,
    VectorStoreSection,
};
pub use memory::{MemoryItem, SearchFilters, SearchResult, VectorStoreResult};
pub use message::{ImageReference, ImageUrl, Message, MessageContent};
pub use provider::{
    EmbedderProvider, GraphStoreProvider, HistoryStoreProvider, LlmProvider, UnknownProvider,
    VectorStoreProvider,
};
