//! Pipeline configuration.

use std::env;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{IngestionError, Result};

/// Default worker count when neither the file nor the environment set one.
pub const DEFAULT_MAX_PARALLEL_JOBS: usize = 4;

/// Default `source` tag stamped on feature collections.
pub const DEFAULT_SOURCE_TAG: &str = "kmz";

/// Settings shared by every product run through the pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Upper bound on products decoded at once in a batch.
    pub max_parallel_jobs: usize,

    /// Tag written to `FeatureCollection::source`.
    pub source_tag: String,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            max_parallel_jobs: DEFAULT_MAX_PARALLEL_JOBS,
            source_tag: DEFAULT_SOURCE_TAG.to_string(),
        }
    }
}

impl PipelineConfig {
    /// Load configuration from a YAML file. Missing keys take their defaults.
    pub fn from_yaml<P: AsRef<Path>>(path: P) -> Result<Self> {
        let text = fs::read_to_string(path)?;
        Self::from_yaml_str(&text)
    }

    pub fn from_yaml_str(text: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(text)?;
        config.validate()
    }

    /// Load configuration from environment variables, with defaults.
    pub fn from_env() -> Result<Self> {
        Self::default().with_env_overrides()
    }

    /// Apply `STORM_MAX_PARALLEL_JOBS` and `STORM_SOURCE_TAG` on top of `self`.
    pub fn with_env_overrides(mut self) -> Result<Self> {
        if let Ok(value) = env::var("STORM_MAX_PARALLEL_JOBS") {
            self.max_parallel_jobs = value.trim().parse().map_err(|_| {
                IngestionError::InvalidConfig(format!(
                    "STORM_MAX_PARALLEL_JOBS must be a positive integer, got '{}'",
                    value
                ))
            })?;
        }
        if let Ok(value) = env::var("STORM_SOURCE_TAG") {
            self.source_tag = value;
        }
        self.validate()
    }

    fn validate(self) -> Result<Self> {
        if self.max_parallel_jobs == 0 {
            return Err(IngestionError::InvalidConfig(
                "max_parallel_jobs must be at least 1".to_string(),
            ));
        }
        if self.source_tag.trim().is_empty() {
            return Err(IngestionError::InvalidConfig(
                "source_tag must not be empty".to_string(),
            ));
        }
        Ok(self)
    }

    /// Worker count for a batch of `jobs` products.
    pub fn workers_for(&self, jobs: usize) -> usize {
        self.max_parallel_jobs.min(jobs).max(1)
    }
}
