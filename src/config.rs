//! Editor configuration
//!
//! Loaded from an optional JSON file; missing keys fall back to defaults.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{HlpError, Result};

/// Default upper bound on the number of layers in an editing session.
pub const DEFAULT_MAX_LAYERS: usize = 24;

/// Settings for an editing session and its display
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Layer inserts beyond this count are ignored
    pub max_layers: usize,
    /// Print the fixed input row above the output row
    pub show_inputs: bool,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            max_layers: DEFAULT_MAX_LAYERS,
            show_inputs: true,
        }
    }
}

impl EditorConfig {
    /// Read and validate a JSON configuration file
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(HlpError::FileNotFound {
                path: path.to_path_buf(),
            });
        }
        let text = fs::read_to_string(path)?;
        let config: EditorConfig = serde_json::from_str(&text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.max_layers == 0 {
            return Err(HlpError::InvalidConfig {
                reason: "max_layers must be at least 1".to_string(),
            });
        }
        Ok(())
    }
}
