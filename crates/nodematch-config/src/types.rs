use serde::{Deserialize, Serialize};

/// Supported schema version of `nodematch.toml`
pub const CONFIG_VERSION: &str = "1.0";

/// Main configuration structure for nodematch
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PipelineConfig {
    /// Schema version for migrations
    #[serde(default = "default_version")]
    pub version: String,

    /// Enhancers, applied to every node in this order
    #[serde(default)]
    pub enhancers: Vec<EnhancerEntry>,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            version: default_version(),
            enhancers: Vec::new(),
        }
    }
}

/// One configured enhancer
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EnhancerEntry {
    /// Provider name, e.g. `attribute-match`
    pub provider: String,

    /// Display name used in logs and errors
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Whether this enhancer runs
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Provider specific settings
    #[serde(default)]
    pub config: toml::Table,
}

impl EnhancerEntry {
    /// Name for display: the configured name, else `provider#index`
    pub fn display_name(&self, index: usize) -> String {
        self.name
            .clone()
            .unwrap_or_else(|| format!("{}#{}", self.provider, index + 1))
    }

    /// The provider settings as JSON, the format enhancer factories accept
    pub fn config_json(&self) -> Result<serde_json::Value, serde_json::Error> {
        serde_json::to_value(&self.config)
    }
}

// Default value functions
fn default_version() -> String {
    CONFIG_VERSION.to_string()
}

fn default_true() -> bool {
    true
}
