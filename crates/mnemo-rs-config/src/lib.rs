//! Validation and loading for mnemo memory configurations.
//!
//! Untyped input (a `serde_json::Value`, or a JSON5 file) is checked against
//! the `MemoryConfig` schema in a single pass that collects every violation,
//! then decoded into the typed model from `mnemo-rs-protocol`.

mod error;
mod issue;
mod loader;
mod rules;
mod schema;
mod validator;

/// Errors returned by config loading.
pub use error::ConfigError;
/// Structured validation diagnostics.
pub use issue::{FieldPath, IssueKind, PathSegment, ValidationFailure, ValidationIssue};
/// File and layered loading.
pub use loader::{
    ConfigLayer, ConfigLayerSource, LayeredConfig, LayeredConfigOptions, load_from_path,
    load_from_str, load_layered,
};
/// Provider-specific rules layered on top of structural validation.
pub use rules::{ConfigRule, RequiredConfigFields, RuleSection};
/// Validator entry points.
pub use validator::{SchemaMode, Validator, validate};

/// Re-export of the validated model.
pub use mnemo_rs_protocol::MemoryConfig;
