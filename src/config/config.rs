//! Main configuration structure and implementation

use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

use super::{DocumentationConfig, GenerationConfig};

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Configuration version
    pub version: String,

    /// Documentation processed when none is named on the command line
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<String>,

    /// Generation settings
    #[serde(default)]
    pub generation: GenerationConfig,

    /// Documentation sets, keyed by name
    #[serde(default)]
    pub documentations: BTreeMap<String, DocumentationConfig>,
}

impl Config {
    /// Load configuration from a YAML file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| anyhow!("Failed to read configuration {}: {}", path.display(), e))?;
        let config: Config = serde_yaml::from_str(&content)
            .map_err(|e| anyhow!("Failed to parse configuration {}: {}", path.display(), e))?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to a YAML file
    pub fn save_to_file(&self, path: &Path) -> Result<()> {
        let content = serde_yaml::to_string(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.version != "1.0" {
            return Err(anyhow!(
                "Unsupported configuration version: {}",
                self.version
            ));
        }

        if self.documentations.is_empty() {
            return Err(anyhow!("At least one documentation must be configured"));
        }

        if let Some(default) = &self.default {
            if !self.documentations.contains_key(default) {
                return Err(anyhow!(
                    "Default documentation '{}' is not configured",
                    default
                ));
            }
        }

        Ok(())
    }

    /// Look up a documentation by name
    pub fn documentation(&self, name: &str) -> Option<&DocumentationConfig> {
        self.documentations.get(name)
    }

    /// Name of the documentation used when none is given
    pub fn default_documentation(&self) -> Option<&str> {
        self.default.as_deref()
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            version: "1.0".to_string(),
            default: None,
            generation: GenerationConfig::default(),
            documentations: BTreeMap::new(),
        }
    }
}
