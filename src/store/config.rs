//! Store configuration
//!
//! Configs are plain JSON documents, e.g.
//! ```json
//! { "name": "sessions", "retained_versions": 8 }
//! ```
//! Missing fields fall back to their defaults.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Configuration for a [`TrieStore`](super::TrieStore)
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Name used to tell stores apart in log output
    pub name: String,
    /// How many recently published versions the store keeps for `checkout`
    /// (0 disables history)
    pub retained_versions: usize,
}

impl Default for StoreConfig {
    fn default() -> Self {
        StoreConfig {
            name: "default".to_string(),
            retained_versions: 0,
        }
    }
}

impl StoreConfig {
    /// Create a config with the given name and default settings
    pub fn named(name: impl Into<String>) -> Self {
        StoreConfig {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Keep the last `count` published versions
    pub fn with_retained_versions(mut self, count: usize) -> Self {
        self.retained_versions = count;
        self
    }

    /// Parse a config from a JSON string
    pub fn from_json(json: &str) -> Result<Self> {
        let config: StoreConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a config from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    /// Check that the config is usable
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(Error::Config("store name must not be empty".into()));
        }
        Ok(())
    }
}
