//! Configuration shapes for every subsystem plus the composite root.

use crate::provider::{
    EmbedderProvider, GraphStoreProvider, HistoryStoreProvider, LlmProvider, VectorStoreProvider,
};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Number, Value};

/// Provider selection envelope shared by every subsystem.
///
/// `provider` picks the backend; `config` is handed to that backend unmodified.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProviderConfig<P, C> {
    pub provider: P,
    pub config: C,
}

impl<P, C> ProviderConfig<P, C> {
    pub fn new(provider: P, config: C) -> Self {
        Self { provider, config }
    }
}

/// Embedder selection.
pub type EmbedderSection = ProviderConfig<EmbedderProvider, EmbeddingConfig>;
/// Vector store selection.
pub type VectorStoreSection = ProviderConfig<VectorStoreProvider, VectorStoreConfig>;
/// LLM selection, used at the top level and as the graph store override.
pub type LlmSection = ProviderConfig<LlmProvider, LlmConfig>;

/// Embedding backend settings. Which fields are required is up to the backend.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmbeddingConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    /// Model name, or a backend-specific model descriptor.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(
        default,
        rename = "baseURL",
        skip_serializing_if = "Option::is_none"
    )]
    pub base_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model_properties: Option<Map<String, Value>>,
    /// Keys not declared above, kept verbatim.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Vector store settings.
///
/// This is an open record: anything beyond the declared fields is collected in
/// `extra` and passed to the backend untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VectorStoreConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub collection_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dimension: Option<Number>,
    /// Pre-built client handle description, opaque to this crate.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instance: Option<Value>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl VectorStoreConfig {
    /// Dimension as an integer, if one was given and it is integral.
    pub fn dimension_u64(&self) -> Option<u64> {
        self.dimension.as_ref().and_then(Number::as_u64)
    }
}

/// LLM backend settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LlmConfig {
    #[serde(
        default,
        rename = "baseURL",
        skip_serializing_if = "Option::is_none"
    )]
    pub base_url: Option<String>,
    /// Free-form backend options.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub config: Option<Map<String, Value>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model_properties: Option<Map<String, Value>>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Connection settings for Neo4j. All three fields are mandatory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Neo4jConfig {
    pub url: String,
    pub username: String,
    pub password: String,
}

/// Graph-augmented memory backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphStoreConfig {
    pub provider: GraphStoreProvider,
    pub config: Neo4jConfig,
    /// LLM used for graph extraction instead of the top-level `llm`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub llm: Option<LlmSection>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_prompt: Option<String>,
}

/// History store settings: the commonly used keys plus any backend extras.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryStoreSettings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub history_db_path: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub supabase_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub supabase_key: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub table_name: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// History (audit log) persistence backend.
pub type HistoryStoreConfig = ProviderConfig<HistoryStoreProvider, HistoryStoreSettings>;

/// Root configuration for a memory system instance.
///
/// Built once before start-up, validated once, then treated as read-only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MemoryConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    pub embedder: EmbedderSection,
    pub vector_store: VectorStoreSection,
    pub llm: LlmSection,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub history_store: Option<HistoryStoreConfig>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub disable_history: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub history_db_path: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_prompt: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub graph_store: Option<GraphStoreConfig>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enable_graph: Option<bool>,
}

impl MemoryConfig {
    /// Assemble a config from the three mandatory sections.
    pub fn new(
        embedder: EmbedderSection,
        vector_store: VectorStoreSection,
        llm: LlmSection,
    ) -> Self {
        Self {
            version: None,
            embedder,
            vector_store,
            llm,
            history_store: None,
            disable_history: None,
            history_db_path: None,
            custom_prompt: None,
            graph_store: None,
            enable_graph: None,
        }
    }

    /// Whether the orchestrator should use the graph store.
    ///
    /// Requires both a configured `graphStore` and `enableGraph: true`.
    pub fn graph_enabled(&self) -> bool {
        self.graph_store.is_some() && self.enable_graph.unwrap_or(false)
    }

    /// Whether history persistence is switched off.
    pub fn history_disabled(&self) -> bool {
        self.disable_history.unwrap_or(false)
    }

    /// LLM section the graph store should use: its override, else the top-level one.
    pub fn graph_llm(&self) -> Option<&LlmSection> {
        self.graph_store
            .as_ref()
            .map(|graph| graph.llm.as_ref().unwrap_or(&self.llm))
    }
}
