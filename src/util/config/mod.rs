//! Python++ front-end configuration
//!
//! Options that tune the tokenizer and parser. Every field has a default,
//! so an empty document is a valid configuration.
//!
//! # Usage
//!
//! ```rust
//! use pyplus::util::config::FrontendConfig;
//!
//! let config = FrontendConfig::from_ron_str("(tab_width: 8)").unwrap();
//! assert_eq!(config.tab_width, 8);
//! assert_eq!(config.max_nesting_depth, 100);
//! ```

use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Columns a tab contributes to a line's indentation width.
pub const DEFAULT_TAB_WIDTH: usize = 4;

/// Default bound on statement/expression nesting; the deepest accepted input
/// fits a 2 MB thread stack in unoptimized builds.
pub const DEFAULT_MAX_NESTING_DEPTH: usize = 100;

/// Front-end configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FrontendConfig {
    /// Indentation width of a tab character
    pub tab_width: usize,
    /// Maximum depth of nested statements and sub-expressions
    pub max_nesting_depth: usize,
}

impl Default for FrontendConfig {
    fn default() -> Self {
        Self {
            tab_width: DEFAULT_TAB_WIDTH,
            max_nesting_depth: DEFAULT_MAX_NESTING_DEPTH,
        }
    }
}

impl FrontendConfig {
    /// Parse a configuration from RON text
    pub fn from_ron_str(source: &str) -> Result<Self, ConfigError> {
        let config: Self = ron::from_str(source).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize the configuration as pretty RON
    pub fn to_ron_string(&self) -> Result<String, ConfigError> {
        ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())
            .map_err(|e| ConfigError::Serialize(e.to_string()))
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.tab_width == 0 {
            return Err(ConfigError::Invalid("tab_width must be at least 1".to_string()));
        }
        if self.max_nesting_depth == 0 {
            return Err(ConfigError::Invalid(
                "max_nesting_depth must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

/// Load a configuration file written in RON
pub fn load_config(path: &Path) -> anyhow::Result<FrontendConfig> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("failed to read config file {}", path.display()))?;
    FrontendConfig::from_ron_str(&content)
        .with_context(|| format!("invalid config file {}", path.display()))
}

/// Configuration errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("Config parse error: {0}")]
    Parse(String),
    #[error("Config serialize error: {0}")]
    Serialize(String),
    #[error("Invalid config: {0}")]
    Invalid(String),
}
