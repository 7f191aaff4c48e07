//! Tests for the single-pass schema checks.

use super::*;
use pretty_assertions::assert_eq;
use serde_json::json;

fn run(value: Value) -> Vec<ValidationIssue> {
    SchemaCheck::new(SchemaMode::Full, false).run(&value)
}

fn run_strict(value: Value) -> Vec<ValidationIssue> {
    SchemaCheck::new(SchemaMode::Full, true).run(&value)
}

fn paths(issues: &[ValidationIssue]) -> Vec<String> {
    issues.iter().map(|issue| issue.path.to_string()).collect()
}

fn minimal() -> Value {
    json!({
        "embedder": { "provider": "openai", "config": {} },
        "vectorStore": { "provider": "qdrant", "config": {} },
        "llm": { "provider": "anthropic", "config": {} }
    })
}

#[test]
fn minimal_document_has_no_issues() {
    assert!(run(minimal()).is_empty());
}

#[test]
fn non_object_root_is_a_type_mismatch() {
    let issues = run(json!([1, 2, 3]));
    assert_eq!(issues.len(), 1);
    assert_eq!(issues[0].kind, IssueKind::TypeMismatch);
    assert_eq!(issues[0].to_string(), "root: expected object, found array");
}

#[test]
fn empty_document_reports_all_mandatory_sections() {
    let issues = run(json!({}));
    assert_eq!(paths(&issues), vec!["embedder", "vectorStore", "llm"]);
    assert!(issues.iter().all(|issue| issue.kind == IssueKind::MissingField));
}

#[test]
fn provider_and_config_are_checked_independently() {
    let issues = run(json!({
        "embedder": { "provider": "cohere", "config": "oops" },
        "vectorStore": { "provider": "qdrant", "config": {} },
        "llm": { "provider": "anthropic", "config": {} }
    }));
    assert_eq!(paths(&issues), vec!["embedder.provider", "embedder.config"]);
    assert_eq!(issues[0].kind, IssueKind::InvalidEnumValue);
    assert_eq!(issues[1].kind, IssueKind::NestedStructureInvalid);
}

#[test]
fn non_string_provider_is_a_type_mismatch() {
    let mut value = minimal();
    value["llm"]["provider"] = json!(7);
    let issues = run(value);
    assert_eq!(issues.len(), 1);
    assert_eq!(issues[0].kind, IssueKind::TypeMismatch);
    assert_eq!(issues[0].message, "expected string, found number");
}

#[test]
fn single_member_enum_message_names_the_value() {
    let mut value = minimal();
    value["graphStore"] = json!({
        "provider": "memgraph",
        "config": { "url": "bolt://x", "username": "u", "password": "p" }
    });
    let issues = run(value);
    assert_eq!(issues.len(), 1);
    assert_eq!(
        issues[0].message,
        "invalid value \"memgraph\", expected \"neo4j\""
    );
}

#[test]
fn graph_llm_uses_the_shared_llm_rule() {
    let mut value = minimal();
    value["graphStore"] = json!({
        "provider": "neo4j",
        "config": { "url": "bolt://x", "username": "u", "password": "p" },
        "llm": { "provider": "cohere", "config": { "apiKey": 42, "temperature": 0.1 } }
    });
    let issues = run(value);
    assert_eq!(
        paths(&issues),
        vec!["graphStore.llm.provider", "graphStore.llm.config.apiKey"]
    );
}

#[test]
fn history_settings_are_open_but_known_keys_are_typed() {
    let mut value = minimal();
    value["historyStore"] = json!({
        "provider": "supabase",
        "config": { "supabaseUrl": "https://db", "supabaseKey": 1, "schema": "public" }
    });
    let issues = run(value);
    assert_eq!(paths(&issues), vec!["historyStore.config.supabaseKey"]);
}

#[test]
fn explicit_null_for_optional_key_is_rejected() {
    let mut value = minimal();
    value["customPrompt"] = Value::Null;
    let issues = run(value);
    assert_eq!(issues.len(), 1);
    assert_eq!(issues[0].to_string(), "customPrompt: expected string, found null");
}

#[test]
fn null_is_not_an_accepted_any_value() {
    let mut value = minimal();
    value["llm"]["config"]["model"] = Value::Null;
    let issues = run(value);
    assert_eq!(issues.len(), 1);
    assert_eq!(issues[0].to_string(), "llm.config.model: expected a value, found null");
}

#[test]
fn partial_mode_skips_missing_fields_only() {
    let value = json!({
        "llm": { "config": { "apiKey": false } },
        "graphStore": { "config": { "url": "bolt://x" } }
    });
    let issues = SchemaCheck::new(SchemaMode::Partial, false).run(&value);
    assert_eq!(paths(&issues), vec!["llm.config.apiKey"]);
}

#[test]
fn strict_mode_reports_unknown_keys_on_closed_objects() {
    let mut value = minimal();
    value["telemetry"] = json!(true);
    value["embedder"]["config"]["dimensions"] = json!(512);
    value["vectorStore"]["config"]["host"] = json!("localhost");
    let issues = run_strict(value.clone());
    assert_eq!(paths(&issues), vec!["telemetry", "embedder.config.dimensions"]);
    assert!(issues.iter().all(|issue| issue.kind == IssueKind::UnknownField));
    assert!(run(value).is_empty());
}

#[test]
fn open_llm_options_are_never_strict() {
    let mut value = minimal();
    value["llm"]["config"]["config"] = json!({ "anything": { "nested": [1, 2] } });
    value["llm"]["config"]["modelProperties"] = json!({ "top_p": 0.9 });
    assert!(run_strict(value).is_empty());
}
