//! JSON5 config loading, single-file or layered.
//!
//! Each layer is parsed and checked in partial mode, the layers are merged
//! (base < user < runtime), and the merged document is fully validated.

mod layer_io;
mod merge;

#[cfg(test)]
mod tests;

use crate::{ConfigError, SchemaMode, Validator};
use log::{debug, info, warn};
use mnemo_rs_protocol::MemoryConfig;
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};

/// Default config filename.
const DEFAULT_CONFIG_FILE: &str = "mnemo.json5";
/// Default config directory under the home directory.
const DEFAULT_CONFIG_DIR: &str = ".mnemo";

/// Effective config plus metadata about which layers were loaded.
#[derive(Debug, Clone)]
pub struct LayeredConfig {
    /// The merged, validated config.
    pub config: MemoryConfig,
    /// Layers that contributed, lowest precedence first.
    pub layers: Vec<ConfigLayer>,
}

/// Origin of a config layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigLayerSource {
    /// Deployment-provided base file.
    Base,
    /// Per-user file (`~/.mnemo/mnemo.json5` by default).
    User,
    /// Runtime overrides (highest precedence).
    Runtime,
}

/// A layer that was read and merged.
#[derive(Debug, Clone)]
pub struct ConfigLayer {
    pub source: ConfigLayerSource,
    pub path: PathBuf,
}

/// Where to look for config layers.
#[derive(Debug, Clone, Default)]
pub struct LayeredConfigOptions {
    /// Base config; skipped when the file does not exist.
    pub base_path: Option<PathBuf>,
    /// User config; skipped when the file does not exist.
    pub user_config_path: Option<PathBuf>,
    /// Runtime overrides applied last; each must exist.
    pub runtime_paths: Vec<PathBuf>,
}

impl LayeredConfigOptions {
    /// Options with the default user layer location and no other layers.
    pub fn new() -> Self {
        Self {
            base_path: None,
            user_config_path: layer_io::default_user_config_path(),
            runtime_paths: Vec::new(),
        }
    }

    pub fn with_base_path(mut self, path: impl AsRef<Path>) -> Self {
        self.base_path = Some(path.as_ref().to_path_buf());
        self
    }

    /// Add a runtime override that is applied after every other layer.
    pub fn with_runtime_path(mut self, path: impl AsRef<Path>) -> Self {
        self.runtime_paths.push(path.as_ref().to_path_buf());
        self
    }
}

impl Validator {
    /// Load and validate a single JSON5 file.
    pub fn load_from_path(&self, path: impl AsRef<Path>) -> Result<MemoryConfig, ConfigError> {
        let path = path.as_ref();
        info!("loading config from path: {}", path.display());
        let contents = fs::read_to_string(path)?;
        let value: Value = json5::from_str(&contents)?;
        self.config_from_value(&value, &path.display().to_string())
    }

    /// Load and validate JSON5 contents.
    pub fn load_from_str(&self, contents: &str) -> Result<MemoryConfig, ConfigError> {
        debug!("loading config from raw contents (len={})", contents.len());
        let value: Value = json5::from_str(contents)?;
        self.config_from_value(&value, "config")
    }

    /// Load, merge, and validate a layered config stack.
    pub fn load_layered(
        &self,
        options: &LayeredConfigOptions,
    ) -> Result<LayeredConfig, ConfigError> {
        let mut layers = Vec::new();
        let mut merged = Value::Object(serde_json::Map::new());

        for (source, path) in [
            (ConfigLayerSource::Base, options.base_path.as_deref()),
            (ConfigLayerSource::User, options.user_config_path.as_deref()),
        ] {
            if let Some(layer) = layer_io::load_optional_layer(self, source, path)? {
                debug!("loaded {:?} layer", source);
                merge::merge_json_values(&mut merged, &layer.value);
                layers.push(layer.meta);
            }
        }

        for runtime_path in &options.runtime_paths {
            let layer =
                layer_io::load_required_layer(self, ConfigLayerSource::Runtime, runtime_path)?;
            debug!("loaded runtime layer (path={})", runtime_path.display());
            merge::merge_json_values(&mut merged, &layer.value);
            layers.push(layer.meta);
        }

        let config = self.config_from_value(&merged, "effective")?;
        info!("layered config loaded (layers={})", layers.len());
        Ok(LayeredConfig { config, layers })
    }

    /// Partial-mode check for a single layer.
    fn check_layer(&self, value: &Value, label: &str) -> Result<(), ConfigError> {
        self.check(value, SchemaMode::Partial)
            .map_err(|failure| ConfigError::Invalid {
                label: label.to_string(),
                failure,
            })
    }

    fn config_from_value(&self, value: &Value, label: &str) -> Result<MemoryConfig, ConfigError> {
        let config = self
            .validate(value)
            .map_err(|failure| ConfigError::Invalid {
                label: label.to_string(),
                failure,
            })?;
        log_advisories(&config);
        Ok(config)
    }
}

/// Load and validate a single JSON5 file with default validator settings.
pub fn load_from_path(path: impl AsRef<Path>) -> Result<MemoryConfig, ConfigError> {
    Validator::new().load_from_path(path)
}

/// Load and validate JSON5 contents with default validator settings.
pub fn load_from_str(contents: &str) -> Result<MemoryConfig, ConfigError> {
    Validator::new().load_from_str(contents)
}

/// Load a layered config stack with default validator settings.
pub fn load_layered(options: &LayeredConfigOptions) -> Result<LayeredConfig, ConfigError> {
    Validator::new().load_layered(options)
}

/// Warn about combinations that are valid but probably not intended.
fn log_advisories(config: &MemoryConfig) {
    if config.enable_graph == Some(true) && config.graph_store.is_none() {
        warn!("enableGraph is set but no graphStore is configured; graph memory stays off");
    }
    if config.history_disabled()
        && (config.history_store.is_some() || config.history_db_path.is_some())
    {
        warn!("disableHistory is set; historyStore/historyDbPath will be ignored");
    }
}
