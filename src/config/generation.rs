//! Batch generation settings

use serde::{Deserialize, Serialize};

/// Generation configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GenerationConfig {
    /// Stop processing further documentations after the first failure
    #[serde(default)]
    pub fail_fast: bool,
}
