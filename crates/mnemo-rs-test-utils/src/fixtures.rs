//! Canned configuration documents.

use mnemo_rs_protocol::{
    EmbedderProvider, EmbeddingConfig, LlmConfig, LlmProvider, MemoryConfig, ProviderConfig,
    VectorStoreConfig, VectorStoreProvider,
};
use serde_json::{Value, json};

/// Smallest valid document: openai embedder, qdrant store, anthropic LLM.
pub fn minimal_config_value() -> Value {
    json!({
        "embedder": { "provider": "openai", "config": {} },
        "vectorStore": { "provider": "qdrant", "config": { "collectionName": "c1" } },
        "llm": { "provider": "anthropic", "config": {} }
    })
}

/// Typed equivalent of [`minimal_config_value`].
pub fn minimal_config() -> MemoryConfig {
    MemoryConfig::new(
        ProviderConfig::new(EmbedderProvider::OpenAi, EmbeddingConfig::default()),
        ProviderConfig::new(
            VectorStoreProvider::Qdrant,
            VectorStoreConfig {
                collection_name: Some("c1".to_string()),
                ..VectorStoreConfig::default()
            },
        ),
        ProviderConfig::new(LlmProvider::Anthropic, LlmConfig::default()),
    )
}

/// A complete Neo4j graph store section.
pub fn neo4j_graph_store_value() -> Value {
    json!({
        "provider": "neo4j",
        "config": { "url": "bolt://localhost", "username": "neo4j", "password": "pw" }
    })
}

/// [`minimal_config_value`] with [`neo4j_graph_store_value`] attached.
pub fn config_with_graph_store() -> Value {
    let mut value = minimal_config_value();
    value["graphStore"] = neo4j_graph_store_value();
    value
}
