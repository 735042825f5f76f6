use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Default config file name looked up by frontends.
pub const DEFAULT_CONFIG_FILE: &str = "issue-bridge.json";

/// Serializable configuration for issue-bridge frontends.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BridgeConfig {
    /// Schema/config version. This is about the config format, not the tool version.
    pub config_version: String,
    /// Origins whose providers are left out of the registry.
    #[serde(default)]
    pub disabled_origins: Vec<String>,
    /// Origin used when a command needs one and none was given.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_origin: Option<String>,
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            config_version: "0.1.0".to_string(),
            disabled_origins: Vec::new(),
            default_origin: None,
        }
    }
}

impl BridgeConfig {
    pub fn is_enabled(&self, origin: &str) -> bool {
        !self.disabled_origins.iter().any(|o| o == origin)
    }
}

/// Load the config JSON from disk.
pub fn load_bridge_config(path: &Path) -> Result<BridgeConfig> {
    let config_json = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read issue-bridge config at {}", path.display()))?;
    let config: BridgeConfig =
        serde_json::from_str(&config_json).context("Failed to parse issue-bridge config JSON")?;
    Ok(config)
}
