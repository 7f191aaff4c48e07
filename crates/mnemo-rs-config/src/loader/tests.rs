//! Tests for file and layered configuration loading.

use super::*;
use crate::{IssueKind, RequiredConfigFields};
use mnemo_rs_protocol::{LlmProvider, VectorStoreProvider};
use pretty_assertions::assert_eq;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

const BASE: &str = r#"{
    // shared deployment defaults
    embedder: { provider: "openai", config: { model: "text-embedding-3-small" } },
    vectorStore: { provider: "qdrant", config: { collectionName: "memories", dimension: 1536 } },
    llm: { provider: "openai", config: { model: "gpt-4o" } },
}"#;

/// Write JSON5 contents to a path, creating parent directories if needed.
fn write_json5(path: &Path, contents: &str) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("dir");
    }
    fs::write(path, contents).expect("write");
}

fn options_without_user(temp: &TempDir) -> LayeredConfigOptions {
    let mut options = LayeredConfigOptions::new().with_base_path(temp.path().join("base.json5"));
    options.user_config_path = None;
    options
}

#[test]
fn parse_json5_config() {
    let config = load_from_str(BASE).expect("config");
    assert_eq!(config.vector_store.config.dimension_u64(), Some(1536));
    assert_eq!(config.llm.config.model, Some(serde_json::json!("gpt-4o")));
}

#[test]
fn invalid_document_reports_label_and_paths() {
    let err = load_from_str(r#"{ embedder: { provider: "word2vec", config: {} } }"#).unwrap_err();
    let failure = err.validation_failure().expect("validation failure");
    let kinds: Vec<IssueKind> = failure.issues().iter().map(|issue| issue.kind).collect();
    assert_eq!(
        kinds,
        vec![
            IssueKind::InvalidEnumValue,
            IssueKind::MissingField,
            IssueKind::MissingField
        ]
    );
    let msg = format!("{err}");
    assert!(msg.starts_with("invalid config (config):"));
    assert!(msg.contains("embedder.provider: invalid value \"word2vec\""));
    assert!(msg.contains("vectorStore: missing required field"));
}

#[test]
fn malformed_json5_is_a_parse_error() {
    let err = load_from_str("{ embedder: ").unwrap_err();
    assert!(matches!(err, ConfigError::ParseFailed(_)));
}

#[test]
fn load_from_path_reads_file() {
    let temp = TempDir::new().expect("tmp");
    let path = temp.path().join("mnemo.json5");
    write_json5(&path, BASE);
    let config = load_from_path(&path).expect("config");
    assert_eq!(config.vector_store.provider, VectorStoreProvider::Qdrant);
}

#[test]
fn missing_file_is_a_read_error() {
    let temp = TempDir::new().expect("tmp");
    let err = load_from_path(temp.path().join("absent.json5")).unwrap_err();
    assert!(matches!(err, ConfigError::ReadFailed(_)));
}

#[test]
fn runtime_layer_overrides_base() {
    let temp = TempDir::new().expect("tmp");
    write_json5(&temp.path().join("base.json5"), BASE);
    let runtime = temp.path().join("runtime.json5");
    write_json5(
        &runtime,
        r#"{ llm: { provider: "groq", config: { apiKey: "gsk" } }, enableGraph: false }"#,
    );

    let options = options_without_user(&temp).with_runtime_path(&runtime);
    let layered = load_layered(&options).expect("layered");

    assert_eq!(layered.config.llm.provider, LlmProvider::Groq);
    assert_eq!(layered.config.llm.config.api_key.as_deref(), Some("gsk"));
    // Untouched keys from the base layer survive the merge.
    assert_eq!(
        layered.config.llm.config.model,
        Some(serde_json::json!("gpt-4o"))
    );
    assert_eq!(
        layered
            .layers
            .iter()
            .map(|layer| layer.source)
            .collect::<Vec<_>>(),
        vec![ConfigLayerSource::Base, ConfigLayerSource::Runtime]
    );
}

#[test]
fn user_layer_sits_between_base_and_runtime() {
    let temp = TempDir::new().expect("tmp");
    write_json5(&temp.path().join("base.json5"), BASE);
    let user = temp.path().join("home").join(DEFAULT_CONFIG_DIR).join(DEFAULT_CONFIG_FILE);
    write_json5(&user, r#"{ customPrompt: "user", version: "v1.1" }"#);
    let runtime = temp.path().join("runtime.json5");
    write_json5(&runtime, r#"{ customPrompt: "runtime" }"#);

    let mut options = options_without_user(&temp).with_runtime_path(&runtime);
    options.user_config_path = Some(user);
    let layered = load_layered(&options).expect("layered");

    assert_eq!(layered.config.custom_prompt.as_deref(), Some("runtime"));
    assert_eq!(layered.config.version.as_deref(), Some("v1.1"));
    assert_eq!(layered.layers.len(), 3);
}

#[test]
fn partial_layer_errors_name_the_layer() {
    let temp = TempDir::new().expect("tmp");
    write_json5(&temp.path().join("base.json5"), BASE);
    let runtime = temp.path().join("runtime.json5");
    write_json5(&runtime, r#"{ vectorStore: { config: { dimension: "big" } } }"#);

    let options = options_without_user(&temp).with_runtime_path(&runtime);
    let err = load_layered(&options).unwrap_err();
    match err {
        ConfigError::Invalid { label, failure } => {
            assert!(label.starts_with("runtime("));
            assert_eq!(failure.issues().len(), 1);
            assert_eq!(
                failure.issues()[0].to_string(),
                "vectorStore.config.dimension: expected number, found string"
            );
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn missing_optional_layers_leave_required_sections_missing() {
    let temp = TempDir::new().expect("tmp");
    let options = options_without_user(&temp);
    let err = load_layered(&options).unwrap_err();
    let failure = err.validation_failure().expect("validation failure");
    assert_eq!(failure.issues().len(), 3);
    assert!(format!("{err}").contains("(effective)"));
}

#[test]
fn missing_runtime_layer_is_an_error() {
    let temp = TempDir::new().expect("tmp");
    write_json5(&temp.path().join("base.json5"), BASE);
    let options = options_without_user(&temp).with_runtime_path(temp.path().join("nope.json5"));
    assert!(matches!(
        load_layered(&options).unwrap_err(),
        ConfigError::ReadFailed(_)
    ));
}

#[test]
fn validator_rules_apply_to_loaded_files() {
    let validator =
        Validator::new().with_rule(RequiredConfigFields::llm(LlmProvider::OpenAi, ["apiKey"]));
    let err = validator.load_from_str(BASE).unwrap_err();
    let failure = err.validation_failure().expect("validation failure");
    assert_eq!(failure.issues()[0].path.to_string(), "llm.config.apiKey");
}
