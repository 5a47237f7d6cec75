use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::models::Field;
use crate::processor::numeric_parsers::DEFAULT_SHARED_GPU_MEMORY_GB;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NormalizerConfig {
    #[serde(default)]
    pub normalizer: NormalizerSection,
    /// Extra column aliases, e.g. `"Bellek" = "ram_size"`.
    #[serde(default)]
    pub columns: HashMap<String, Field>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormalizerSection {
    /// Value written to GPU memory when the listing says the card shares
    /// system memory.
    #[serde(default = "default_gpu_shared_memory_gb")]
    pub gpu_shared_memory_gb: f64,
    #[serde(default = "default_fill_from_title")]
    pub fill_from_title: bool,
}

fn default_gpu_shared_memory_gb() -> f64 {
    DEFAULT_SHARED_GPU_MEMORY_GB
}

fn default_fill_from_title() -> bool {
    true
}

impl Default for NormalizerSection {
    fn default() -> Self {
        Self {
            gpu_shared_memory_gb: default_gpu_shared_memory_gb(),
            fill_from_title: default_fill_from_title(),
        }
    }
}

impl NormalizerConfig {
    pub fn from_file(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read normalizer config file: {}", path))?;

        let config: NormalizerConfig = toml::from_str(&content)
            .with_context(|| format!("Failed to parse normalizer config file: {}", path))?;

        Ok(config)
    }
}
