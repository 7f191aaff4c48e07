//! Schema checks for memory configuration documents.
//!
//! The checks walk the input once and record every violation instead of
//! stopping at the first one. Provider sections are checked in two
//! independent steps: the discriminant against its closed set, then the
//! `config` payload against its (provider-agnostic) shape.

#[cfg(test)]
mod tests;

use crate::{FieldPath, IssueKind, SchemaMode, ValidationIssue};
use mnemo_rs_protocol::{
    EmbedderProvider, GraphStoreProvider, HistoryStoreProvider, LlmProvider, VectorStoreProvider,
};
use serde_json::{Map, Value};

const ROOT_KEYS: &[&str] = &[
    "version",
    "embedder",
    "vectorStore",
    "llm",
    "historyStore",
    "disableHistory",
    "historyDbPath",
    "customPrompt",
    "graphStore",
    "enableGraph",
];
const SECTION_KEYS: &[&str] = &["provider", "config"];
const EMBEDDING_CONFIG_KEYS: &[&str] = &["apiKey", "model", "url", "baseURL", "modelProperties"];
const LLM_CONFIG_KEYS: &[&str] = &["baseURL", "config", "apiKey", "model", "modelProperties"];
const GRAPH_STORE_KEYS: &[&str] = &["provider", "config", "llm", "customPrompt"];
const NEO4J_KEYS: &[&str] = &["url", "username", "password"];
const HISTORY_SETTINGS_STRING_KEYS: &[&str] =
    &["historyDbPath", "supabaseUrl", "supabaseKey", "tableName"];

/// Check applied to the `config` payload of a provider section.
type ConfigCheck = fn(&mut SchemaCheck, &Value, &FieldPath);

/// Issue collector for one validation pass.
pub(crate) struct SchemaCheck {
    mode: SchemaMode,
    strict_unknown_keys: bool,
    issues: Vec<ValidationIssue>,
}

impl SchemaCheck {
    pub(crate) fn new(mode: SchemaMode, strict_unknown_keys: bool) -> Self {
        Self {
            mode,
            strict_unknown_keys,
            issues: Vec::new(),
        }
    }

    /// Check a whole document and return the issues found, in traversal order.
    pub(crate) fn run(mut self, value: &Value) -> Vec<ValidationIssue> {
        self.check_root(value);
        self.issues
    }

    fn check_root(&mut self, value: &Value) {
        let path = FieldPath::root();
        let Some(map) = self.expect_object(value, &path) else {
            return;
        };
        self.check_allowed_keys(map, ROOT_KEYS, &path);

        if let Some(value) = map.get("version") {
            self.expect_string(value, &path.child("version"));
        }
        if let Some(value) = self.required(map, "embedder", &path) {
            self.check_section(
                value,
                &path.child("embedder"),
                EmbedderProvider::NAMES,
                Self::check_embedding_config,
            );
        }
        if let Some(value) = self.required(map, "vectorStore", &path) {
            self.check_section(
                value,
                &path.child("vectorStore"),
                VectorStoreProvider::NAMES,
                Self::check_vector_store_config,
            );
        }
        if let Some(value) = self.required(map, "llm", &path) {
            self.check_llm_section(value, &path.child("llm"));
        }
        if let Some(value) = map.get("historyStore") {
            self.check_section(
                value,
                &path.child("historyStore"),
                HistoryStoreProvider::NAMES,
                Self::check_history_settings,
            );
        }
        if let Some(value) = map.get("disableHistory") {
            self.expect_bool(value, &path.child("disableHistory"));
        }
        if let Some(value) = map.get("historyDbPath") {
            self.expect_string(value, &path.child("historyDbPath"));
        }
        if let Some(value) = map.get("customPrompt") {
            self.expect_string(value, &path.child("customPrompt"));
        }
        if let Some(value) = map.get("graphStore") {
            self.check_graph_store(value, &path.child("graphStore"));
        }
        if let Some(value) = map.get("enableGraph") {
            self.expect_bool(value, &path.child("enableGraph"));
        }
    }

    /// Check a `{provider, config}` envelope.
    fn check_section(
        &mut self,
        value: &Value,
        path: &FieldPath,
        providers: &[&str],
        check_config: ConfigCheck,
    ) {
        let Some(map) = self.expect_object(value, path) else {
            return;
        };
        self.check_allowed_keys(map, SECTION_KEYS, path);

        if let Some(provider) = self.required(map, "provider", path) {
            self.expect_enum(provider, &path.child("provider"), providers);
        }
        if let Some(config) = self.required(map, "config", path) {
            check_config(self, config, &path.child("config"));
        }
    }

    /// Shared by the top-level `llm` section and `graphStore.llm`.
    fn check_llm_section(&mut self, value: &Value, path: &FieldPath) {
        self.check_section(value, path, LlmProvider::NAMES, Self::check_llm_config);
    }

    fn check_embedding_config(&mut self, value: &Value, path: &FieldPath) {
        let Some(map) = self.expect_object(value, path) else {
            return;
        };
        self.check_allowed_keys(map, EMBEDDING_CONFIG_KEYS, path);

        for key in ["apiKey", "url", "baseURL"] {
            if let Some(value) = map.get(key) {
                self.expect_string(value, &path.child(key));
            }
        }
        if let Some(value) = map.get("model") {
            self.expect_non_null(value, &path.child("model"));
        }
        if let Some(value) = map.get("modelProperties") {
            self.expect_object(value, &path.child("modelProperties"));
        }
    }

    /// Open record: declared keys are typed, anything else passes through.
    fn check_vector_store_config(&mut self, value: &Value, path: &FieldPath) {
        let Some(map) = self.expect_object(value, path) else {
            return;
        };

        if let Some(value) = map.get("collectionName") {
            self.expect_string(value, &path.child("collectionName"));
        }
        if let Some(value) = map.get("dimension") {
            self.expect_number(value, &path.child("dimension"));
        }
        for key in ["client", "instance"] {
            if let Some(value) = map.get(key) {
                self.expect_non_null(value, &path.child(key));
            }
        }
    }

    fn check_llm_config(&mut self, value: &Value, path: &FieldPath) {
        let Some(map) = self.expect_object(value, path) else {
            return;
        };
        self.check_allowed_keys(map, LLM_CONFIG_KEYS, path);

        for key in ["baseURL", "apiKey"] {
            if let Some(value) = map.get(key) {
                self.expect_string(value, &path.child(key));
            }
        }
        if let Some(value) = map.get("model") {
            self.expect_non_null(value, &path.child("model"));
        }
        for key in ["config", "modelProperties"] {
            if let Some(value) = map.get(key) {
                self.expect_object(value, &path.child(key));
            }
        }
    }

    fn check_graph_store(&mut self, value: &Value, path: &FieldPath) {
        let Some(map) = self.expect_object(value, path) else {
            return;
        };
        self.check_allowed_keys(map, GRAPH_STORE_KEYS, path);

        if let Some(provider) = self.required(map, "provider", path) {
            self.expect_enum(provider, &path.child("provider"), GraphStoreProvider::NAMES);
        }
        if let Some(config) = self.required(map, "config", path) {
            self.check_neo4j_config(config, &path.child("config"));
        }
        if let Some(llm) = map.get("llm") {
            self.check_llm_section(llm, &path.child("llm"));
        }
        if let Some(value) = map.get("customPrompt") {
            self.expect_string(value, &path.child("customPrompt"));
        }
    }

    fn check_neo4j_config(&mut self, value: &Value, path: &FieldPath) {
        let Some(map) = self.expect_object(value, path) else {
            return;
        };
        self.check_allowed_keys(map, NEO4J_KEYS, path);

        for key in NEO4J_KEYS {
            if let Some(value) = self.required(map, key, path) {
                self.expect_string(value, &path.child(*key));
            }
        }
    }

    /// Open record with a few well-known string keys.
    fn check_history_settings(&mut self, value: &Value, path: &FieldPath) {
        let Some(map) = self.expect_object(value, path) else {
            return;
        };

        for key in HISTORY_SETTINGS_STRING_KEYS {
            if let Some(value) = map.get(*key) {
                self.expect_string(value, &path.child(*key));
            }
        }
    }

    /// Look up a required key, recording a missing-field issue in full mode.
    fn required<'a>(
        &mut self,
        map: &'a Map<String, Value>,
        key: &str,
        path: &FieldPath,
    ) -> Option<&'a Value> {
        let value = map.get(key);
        if value.is_none() && self.mode == SchemaMode::Full {
            self.issues.push(ValidationIssue::missing(path.child(key)));
        }
        value
    }

    /// Expect a JSON object. A non-object below the root is a nested structure issue.
    fn expect_object<'a>(
        &mut self,
        value: &'a Value,
        path: &FieldPath,
    ) -> Option<&'a Map<String, Value>> {
        match value {
            Value::Object(map) => Some(map),
            other => {
                let kind = if path.is_root() {
                    IssueKind::TypeMismatch
                } else {
                    IssueKind::NestedStructureInvalid
                };
                self.push(path, kind, format!("expected object, found {}", kind_of(other)));
                None
            }
        }
    }

    fn expect_string(&mut self, value: &Value, path: &FieldPath) {
        if !value.is_string() {
            self.type_mismatch(value, path, "string");
        }
    }

    fn expect_bool(&mut self, value: &Value, path: &FieldPath) {
        if !value.is_boolean() {
            self.type_mismatch(value, path, "bool");
        }
    }

    fn expect_number(&mut self, value: &Value, path: &FieldPath) {
        if !value.is_number() {
            self.type_mismatch(value, path, "number");
        }
    }

    /// Expect a string that is exactly one of `allowed`.
    fn expect_enum(&mut self, value: &Value, path: &FieldPath, allowed: &[&str]) {
        let Some(name) = value.as_str() else {
            self.type_mismatch(value, path, "string");
            return;
        };
        if allowed.contains(&name) {
            return;
        }
        let message = match allowed {
            [only] => format!("invalid value \"{name}\", expected \"{only}\""),
            _ => format!(
                "invalid value \"{name}\", expected one of: {}",
                allowed.join(", ")
            ),
        };
        self.push(path, IssueKind::InvalidEnumValue, message);
    }

    /// Report undeclared keys on a closed object. No-op unless strict.
    fn check_allowed_keys(&mut self, map: &Map<String, Value>, allowed: &[&str], path: &FieldPath) {
        if !self.strict_unknown_keys {
            return;
        }
        for key in map.keys() {
            if !allowed.contains(&key.as_str()) {
                self.push(&path.child(key.as_str()), IssueKind::UnknownField, "unknown key");
            }
        }
    }

    /// Any value is accepted except `null`, which would decode as "not set".
    fn expect_non_null(&mut self, value: &Value, path: &FieldPath) {
        if value.is_null() {
            self.type_mismatch(value, path, "a value");
        }
    }

    fn type_mismatch(&mut self, value: &Value, path: &FieldPath, expected: &str) {
        self.push(
            path,
            IssueKind::TypeMismatch,
            format!("expected {expected}, found {}", kind_of(value)),
        );
    }

    fn push(&mut self, path: &FieldPath, kind: IssueKind, message: impl Into<String>) {
        self.issues
            .push(ValidationIssue::new(path.clone(), kind, message));
    }
}

/// JSON type name used in diagnostics.
fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
