//! Layered configuration sources.
//!
//! Values come from a stack of named layers. The process environment sits on
//! top; `.env` files loaded later slot in underneath it, so a variable
//! already exported in the shell is never overridden by a file.

use std::collections::BTreeMap;
use std::path::Path;

use tracing::debug;

use crate::error::Result;

use super::EnvFileParser;

/// Source label for the process environment layer.
pub const PROCESS_ENV_SOURCE: &str = "process environment";

/// Something configuration variables can be read from.
pub trait ConfigSource {
    /// Load variables from a file, below any values already present.
    fn load(&mut self, file_hint: &Path) -> Result<()>;

    /// Resolved value of a variable.
    fn get(&self, name: &str) -> Option<&str>;
}

/// A named set of variables.
#[derive(Debug, Clone, Default)]
pub struct EnvLayer {
    /// Variables in this layer.
    pub vars: BTreeMap<String, String>,
    /// Where the variables came from (for debugging).
    pub source: String,
}

impl EnvLayer {
    /// Create an empty layer.
    pub fn new(source: impl Into<String>) -> Self {
        Self {
            vars: BTreeMap::new(),
            source: source.into(),
        }
    }

    /// Create a layer from existing variables.
    pub fn from_vars<I, K, V>(source: impl Into<String>, vars: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            vars: vars
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
            source: source.into(),
        }
    }

    /// Set a variable.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.vars.insert(key.into(), value.into());
    }
}

/// Configuration resolved from prioritized layers.
///
/// # Example
///
/// ```
/// use construct::config::{ConfigSource, EnvLayer, LayeredConfig};
///
/// let mut config = LayeredConfig::new();
/// config.push_layer(EnvLayer::from_vars("shell", [("LOG_LEVEL", "WARN")]));
/// config.push_layer_below(EnvLayer::from_vars(
///     ".env",
///     [("LOG_LEVEL", "DEBUG"), ("MATRIX_MODE", "development")],
/// ));
///
/// assert_eq!(config.get("LOG_LEVEL"), Some("WARN"));
/// assert_eq!(config.get("MATRIX_MODE"), Some("development"));
/// assert_eq!(config.source_of("MATRIX_MODE"), Some(".env"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct LayeredConfig {
    /// Layers from lowest to highest priority.
    layers: Vec<EnvLayer>,
}

impl LayeredConfig {
    /// Create a config with no layers.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a config whose only layer is the current process environment.
    pub fn from_process_env() -> Self {
        let mut config = Self::new();
        config.push_layer(EnvLayer::from_vars(PROCESS_ENV_SOURCE, std::env::vars()));
        config
    }

    /// Add a layer above all existing layers.
    pub fn push_layer(&mut self, layer: EnvLayer) {
        self.layers.push(layer);
    }

    /// Add a layer below all existing layers.
    pub fn push_layer_below(&mut self, layer: EnvLayer) {
        self.layers.insert(0, layer);
    }

    /// Source label of the layer that provides `name`.
    pub fn source_of(&self, name: &str) -> Option<&str> {
        self.layers
            .iter()
            .rev()
            .find(|layer| layer.vars.contains_key(name))
            .map(|layer| layer.source.as_str())
    }

    /// Number of layers.
    pub fn layer_count(&self) -> usize {
        self.layers.len()
    }
}

impl ConfigSource for LayeredConfig {
    fn load(&mut self, file_hint: &Path) -> Result<()> {
        let vars = EnvFileParser::load_optional(file_hint)?;
        if vars.is_empty() {
            return Ok(());
        }
        debug!("Layering {} variables from {}", vars.len(), file_hint.display());
        self.push_layer_below(EnvLayer::from_vars(file_hint.display().to_string(), vars));
        Ok(())
    }

    fn get(&self, name: &str) -> Option<&str> {
        self.layers
            .iter()
            .rev()
            .find_map(|layer| layer.vars.get(name))
            .map(String::as_str)
    }
}
