//! Validator entry points.

use crate::schema::SchemaCheck;
use crate::{ConfigRule, FieldPath, IssueKind, ValidationFailure, ValidationIssue};
use log::debug;
use mnemo_rs_protocol::MemoryConfig;
use serde::Deserialize;
use serde_json::Value;
use std::fmt;
use std::sync::Arc;

/// How much of the schema a document must satisfy.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SchemaMode {
    /// Override layers: present fields are checked, required fields may be absent.
    Partial,
    /// Complete documents: every required field must be present.
    #[default]
    Full,
}

/// Structural validator for `MemoryConfig` documents.
///
/// Holds no per-call state, so one instance can be shared across threads.
#[derive(Clone, Default)]
pub struct Validator {
    strict_unknown_keys: bool,
    rules: Vec<Arc<dyn ConfigRule>>,
}

impl Validator {
    /// Validator with lenient unknown-key handling and no extra rules.
    pub fn new() -> Self {
        Self::default()
    }

    /// Report undeclared keys on closed objects instead of tolerating them.
    pub fn strict_unknown_keys(mut self, strict: bool) -> Self {
        self.strict_unknown_keys = strict;
        self
    }

    /// Add a rule that runs after the structural pass succeeds.
    pub fn with_rule(mut self, rule: impl ConfigRule + 'static) -> Self {
        self.rules.push(Arc::new(rule));
        self
    }

    /// Structural check only; nothing is decoded.
    pub fn check(&self, value: &Value, mode: SchemaMode) -> Result<(), ValidationFailure> {
        let issues = SchemaCheck::new(mode, self.strict_unknown_keys).run(value);
        match ValidationFailure::from_issues(issues) {
            Some(failure) => {
                debug!(
                    "config schema check failed (mode={:?}, issues={})",
                    mode,
                    failure.issues().len()
                );
                Err(failure)
            }
            None => Ok(()),
        }
    }

    /// Validate a complete document and decode it.
    ///
    /// Every structural violation is reported together. Rules only run once
    /// the document is structurally valid.
    pub fn validate(&self, value: &Value) -> Result<MemoryConfig, ValidationFailure> {
        self.check(value, SchemaMode::Full)?;
        let config = MemoryConfig::deserialize(value).map_err(|err| {
            ValidationFailure::single(ValidationIssue::new(
                FieldPath::root(),
                IssueKind::TypeMismatch,
                err.to_string(),
            ))
        })?;

        let mut issues = Vec::new();
        for rule in &self.rules {
            let before = issues.len();
            rule.check(&config, &mut issues);
            if issues.len() > before {
                debug!(
                    "config rule {} reported {} issue(s)",
                    rule.name(),
                    issues.len() - before
                );
            }
        }
        if let Some(failure) = ValidationFailure::from_issues(issues) {
            return Err(failure);
        }

        debug!(
            "validated memory config (embedder={}, vector_store={}, llm={}, graph_store={})",
            config.embedder.provider,
            config.vector_store.provider,
            config.llm.provider,
            config.graph_store.is_some()
        );
        Ok(config)
    }
}

impl fmt::Debug for Validator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Validator")
            .field("strict_unknown_keys", &self.strict_unknown_keys)
            .field(
                "rules",
                &self.rules.iter().map(|rule| rule.name()).collect::<Vec<_>>(),
            )
            .finish()
    }
}

/// Validate an arbitrary value as a `MemoryConfig` with default settings.
pub fn validate(input: &Value) -> Result<MemoryConfig, ValidationFailure> {
    Validator::new().validate(input)
}
