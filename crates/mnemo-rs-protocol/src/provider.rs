//! Closed provider sets for each pluggable subsystem.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Error returned when a provider name is not part of a subsystem's set.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown {subsystem} provider: {value}")]
pub struct UnknownProvider {
    /// Subsystem the name was parsed for (e.g. "embedder").
    pub subsystem: &'static str,
    /// The rejected name.
    pub value: String,
}

/// Declares a provider enum with its wire names.
///
/// Wire names are matched exactly; there is no case folding.
macro_rules! provider_enum {
    (
        $(#[$meta:meta])*
        $name:ident, $subsystem:literal {
            $($(#[$vmeta:meta])* $variant:ident => $wire:literal),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum $name {
            $(
                $(#[$vmeta])*
                #[serde(rename = $wire)]
                $variant,
            )+
        }

        impl $name {
            /// Every member of the set, in declaration order.
            pub const ALL: &'static [Self] = &[$(Self::$variant),+];
            /// Wire names of every member, in declaration order.
            pub const NAMES: &'static [&'static str] = &[$($wire),+];

            /// Wire name of this provider.
            pub fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $wire,)+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = UnknownProvider;

            fn from_str(value: &str) -> Result<Self, Self::Err> {
                match value {
                    $($wire => Ok(Self::$variant),)+
                    _ => Err(UnknownProvider {
                        subsystem: $subsystem,
                        value: value.to_string(),
                    }),
                }
            }
        }
    };
}

provider_enum! {
    /// Embedding backends.
    EmbedderProvider, "embedder" {
        OpenAi => "openai",
        Ollama => "ollama",
        Google => "google",
        Gemini => "gemini",
        AzureOpenAi => "azure_openai",
        Langchain => "langchain",
    }
}

provider_enum! {
    /// Vector store backends.
    VectorStoreProvider, "vector store" {
        Qdrant => "qdrant",
        Redis => "redis",
        Supabase => "supabase",
        Langchain => "langchain",
        Vectorize => "vectorize",
        PgVector => "pgvector",
    }
}

provider_enum! {
    /// LLM backends, shared by the top-level `llm` section and the graph store override.
    LlmProvider, "llm" {
        OpenAi => "openai",
        /// OpenAI with structured (JSON schema) outputs.
        OpenAiStructured => "openai_structured",
        Anthropic => "anthropic",
        Groq => "groq",
        Ollama => "ollama",
        Google => "google",
        Gemini => "gemini",
        AzureOpenAi => "azure_openai",
        Mistral => "mistral",
        Langchain => "langchain",
    }
}

provider_enum! {
    /// Graph store backends.
    GraphStoreProvider, "graph store" {
        Neo4j => "neo4j",
    }
}

provider_enum! {
    /// History (audit log) backends.
    HistoryStoreProvider, "history store" {
        Supabase => "supabase",
        /// In-process history, lost on restart.
        Memory => "memory",
    }
}
