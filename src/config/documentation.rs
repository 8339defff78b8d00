//! Per-documentation configuration

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use super::FilterOptions;
use crate::utils::expand_path;

/// One documentation set: where its files live and how to filter it
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DocumentationConfig {
    /// File locations
    #[serde(default)]
    pub paths: DocPaths,

    /// Write a YAML mirror of the filtered document
    #[serde(default)]
    pub generate_yaml_copy: bool,

    /// Filtering options. Absent or empty means the documentation is skipped.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<FilterOptions>,
}

impl DocumentationConfig {
    /// True when there is something to filter
    pub fn is_configured(&self) -> bool {
        self.options.as_ref().is_some_and(|options| !options.is_unset())
    }
}

/// Documentation file locations
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DocPaths {
    /// Directory holding the generated files
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub docs: Option<String>,

    /// JSON file name, relative to `docs`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub docs_json: Option<String>,

    /// YAML file name, relative to `docs`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub docs_yaml: Option<String>,
}

impl DocPaths {
    /// Path of the JSON document, if both the directory and the file name are set
    pub fn json_file(&self) -> Result<Option<PathBuf>> {
        self.resolve(self.docs_json.as_deref())
    }

    /// Path of the YAML mirror, if both the directory and the file name are set
    pub fn yaml_file(&self) -> Result<Option<PathBuf>> {
        self.resolve(self.docs_yaml.as_deref())
    }

    fn resolve(&self, file: Option<&str>) -> Result<Option<PathBuf>> {
        let dir = self.docs.as_deref().filter(|d| !d.is_empty());
        let file = file.filter(|f| !f.is_empty());

        match (dir, file) {
            (Some(dir), Some(file)) => Ok(Some(expand_path(dir)?.join(file))),
            _ => Ok(None),
        }
    }
}
