//! Provider-specific rules applied on top of the structural schema.
//!
//! The schema never varies required fields by provider. Consumers that need
//! that (an API key for hosted LLMs, say) register a `ConfigRule` on the
//! `Validator`.

use crate::{FieldPath, IssueKind, ValidationIssue};
use mnemo_rs_protocol::{EmbedderProvider, LlmProvider, MemoryConfig};
use serde::Serialize;
use serde_json::Value;

/// Extra check run against a structurally valid config.
pub trait ConfigRule: Send + Sync {
    /// Name used in logs.
    fn name(&self) -> &str;

    /// Append an issue for every violation found.
    fn check(&self, config: &MemoryConfig, issues: &mut Vec<ValidationIssue>);
}

/// Section a `RequiredConfigFields` rule applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleSection {
    Embedder(EmbedderProvider),
    /// Applies to both `llm` and `graphStore.llm`.
    Llm(LlmProvider),
}

/// Require `config` keys when a section selects a given provider.
#[derive(Debug, Clone)]
pub struct RequiredConfigFields {
    name: String,
    section: RuleSection,
    fields: Vec<String>,
}

impl RequiredConfigFields {
    pub fn embedder<I, S>(provider: EmbedderProvider, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(RuleSection::Embedder(provider), fields)
    }

    pub fn llm<I, S>(provider: LlmProvider, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(RuleSection::Llm(provider), fields)
    }

    fn new<I, S>(section: RuleSection, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let name = match section {
            RuleSection::Embedder(provider) => format!("required-fields(embedder:{provider})"),
            RuleSection::Llm(provider) => format!("required-fields(llm:{provider})"),
        };
        Self {
            name,
            section,
            fields: fields.into_iter().map(Into::into).collect(),
        }
    }

    fn require<T: Serialize>(
        &self,
        provider: &str,
        config: &T,
        path: FieldPath,
        issues: &mut Vec<ValidationIssue>,
    ) {
        let Ok(Value::Object(map)) = serde_json::to_value(config) else {
            return;
        };
        for field in &self.fields {
            if map.get(field).is_none_or(Value::is_null) {
                issues.push(ValidationIssue::new(
                    path.child(field.as_str()),
                    IssueKind::MissingField,
                    format!("missing required field for provider \"{provider}\""),
                ));
            }
        }
    }
}

impl ConfigRule for RequiredConfigFields {
    fn name(&self) -> &str {
        &self.name
    }

    fn check(&self, config: &MemoryConfig, issues: &mut Vec<ValidationIssue>) {
        match self.section {
            RuleSection::Embedder(provider) => {
                if config.embedder.provider == provider {
                    self.require(
                        provider.as_str(),
                        &config.embedder.config,
                        FieldPath::from_iter(["embedder", "config"]),
                        issues,
                    );
                }
            }
            RuleSection::Llm(provider) => {
                if config.llm.provider == provider {
                    self.require(
                        provider.as_str(),
                        &config.llm.config,
                        FieldPath::from_iter(["llm", "config"]),
                        issues,
                    );
                }
                let graph_llm = config
                    .graph_store
                    .as_ref()
                    .and_then(|graph| graph.llm.as_ref());
                if let Some(llm) = graph_llm.filter(|llm| llm.provider == provider) {
                    self.require(
                        provider.as_str(),
                        &llm.config,
                        FieldPath::from_iter(["graphStore", "llm", "config"]),
                        issues,
                    );
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Validator;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn document(llm_config: Value) -> Value {
        json!({
            "embedder": { "provider": "ollama", "config": { "url": "http://localhost:11434" } },
            "vectorStore": { "provider": "redis", "config": {} },
            "llm": { "provider": "openai", "config": llm_config },
            "graphStore": {
                "provider": "neo4j",
                "config": { "url": "bolt://x", "username": "u", "password": "p" },
                "llm": { "provider": "openai", "config": {} }
            }
        })
    }

    #[test]
    fn applies_to_top_level_and_graph_llm() {
        let validator =
            Validator::new().with_rule(RequiredConfigFields::llm(LlmProvider::OpenAi, ["apiKey"]));
        let failure = validator
            .validate(&document(json!({ "apiKey": "sk-1" })))
            .unwrap_err();
        let rendered: Vec<String> = failure.issues().iter().map(ToString::to_string).collect();
        assert_eq!(
            rendered,
            vec!["graphStore.llm.config.apiKey: missing required field for provider \"openai\""]
        );
    }

    #[test]
    fn other_providers_are_untouched() {
        let validator = Validator::new()
            .with_rule(RequiredConfigFields::llm(LlmProvider::Anthropic, ["apiKey"]))
            .with_rule(RequiredConfigFields::embedder(
                EmbedderProvider::Ollama,
                ["url"],
            ));
        assert!(validator.validate(&document(json!({}))).is_ok());
    }

    #[test]
    fn rule_names_show_in_debug_output() {
        let validator = Validator::new().with_rule(RequiredConfigFields::embedder(
            EmbedderProvider::OpenAi,
            ["apiKey"],
        ));
        assert!(format!("{validator:?}").contains("required-fields(embedder:openai)"));
    }
}
