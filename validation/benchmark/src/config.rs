//! Configuration loading and management.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Scale factors benchmarked by default.
pub const DEFAULT_SCALE_FACTORS: [f32; 4] = [1.0, 2.0, 4.0, 8.0];

/// Encoder qualities benchmarked by default.
pub const DEFAULT_QUALITIES: [u8; 3] = [75, 90, 100];

/// Benchmark configuration, optionally loaded from YAML.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BenchmarkConfig {
    /// SVG document to convert (created if missing)
    #[serde(default = "default_sample_path")]
    pub sample_path: PathBuf,
    /// Directory receiving one WebP file per grid cell
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
    /// Outer loop of the grid
    #[serde(default = "default_scale_factors")]
    pub scale_factors: Vec<f32>,
    /// Inner loop of the grid; 100 runs lossless
    #[serde(default = "default_qualities")]
    pub qualities: Vec<u8>,
}

fn default_sample_path() -> PathBuf {
    PathBuf::from("samples/sample.svg")
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("samples")
}

fn default_scale_factors() -> Vec<f32> {
    DEFAULT_SCALE_FACTORS.to_vec()
}

fn default_qualities() -> Vec<u8> {
    DEFAULT_QUALITIES.to_vec()
}

impl Default for BenchmarkConfig {
    fn default() -> Self {
        Self {
            sample_path: default_sample_path(),
            output_dir: default_output_dir(),
            scale_factors: default_scale_factors(),
            qualities: default_qualities(),
        }
    }
}

impl BenchmarkConfig {
    /// Default grid for the given sample and output directory.
    pub fn new(sample_path: impl Into<PathBuf>, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            sample_path: sample_path.into(),
            output_dir: output_dir.into(),
            ..Default::default()
        }
    }

    /// Load configuration from YAML file.
    pub fn from_file(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: BenchmarkConfig = serde_yaml::from_str(&content)?;
        Ok(config)
    }

    /// Validate configuration.
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.scale_factors.is_empty() {
            anyhow::bail!("at least one scale factor must be specified");
        }
        if self.qualities.is_empty() {
            anyhow::bail!("at least one quality must be specified");
        }
        if let Some(s) = self
            .scale_factors
            .iter()
            .find(|s| !s.is_finite() || **s <= 0.0)
        {
            anyhow::bail!("scale factors must be positive, got {}", s);
        }
        if let Some(q) = self.qualities.iter().find(|q| **q > 100) {
            anyhow::bail!("qualities must be between 0 and 100, got {}", q);
        }
        Ok(())
    }

    /// Number of conversions in one run.
    pub fn grid_size(&self) -> usize {
        self.scale_factors.len() * self.qualities.len()
    }
}
