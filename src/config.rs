// WHY: corpus-specific knobs (running-header phrases above all) live in a JSON file rather
// than in code, so one binary serves documents with different page furniture

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::reflow::{FilterConfig, SegmenterConfig};

/// Complete configuration for one reflow run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReflowConfig {
    pub filter: FilterConfig,
    pub segmenter: SegmenterConfig,
    /// Extension given to the sentence file written next to the input
    pub output_extension: String,
}

impl Default for ReflowConfig {
    fn default() -> Self {
        Self {
            filter: FilterConfig::default(),
            segmenter: SegmenterConfig::default(),
            output_extension: "md".to_string(),
        }
    }
}

impl ReflowConfig {
    /// Parse configuration from JSON; missing fields take their defaults
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json).context("Invalid reflow configuration")?;
        Ok(config)
    }

    /// Load configuration from a JSON file
    pub async fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let json = tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        Self::from_json_str(&json)
            .with_context(|| format!("Failed to parse config file {}", path.display()))
    }

    /// Append extra running-header phrases (e.g. from the command line)
    pub fn with_header_phrases<I>(mut self, phrases: I) -> Self
    where
        I: IntoIterator<Item = String>,
    {
        self.filter.header_phrases.extend(phrases);
        self
    }
}
