//! Benchmark grid execution.

use crate::config::BenchmarkConfig;
use crate::metrics::{process_rss_bytes, BenchmarkRecord, BenchmarkResults};
use anyhow::Context;
use converter::{ConversionOptions, SvgConverter};
use indicatif::{ProgressBar, ProgressStyle};
use std::path::PathBuf;
use std::time::Instant;
use tracing::{debug, info};

/// Runs conversions over the configured scale/quality grid.
///
/// Cells run sequentially; the first failed conversion aborts the run.
pub struct BenchmarkRunner {
    config: BenchmarkConfig,
    converter: SvgConverter,
    show_progress: bool,
}

impl BenchmarkRunner {
    /// Create a runner with a converter that has the system fonts loaded.
    pub fn new(config: BenchmarkConfig) -> Self {
        Self::with_converter(config, SvgConverter::new())
    }

    pub fn with_converter(config: BenchmarkConfig, converter: SvgConverter) -> Self {
        Self {
            config,
            converter,
            show_progress: false,
        }
    }

    /// Draw a progress bar on stderr while running.
    pub fn with_progress(mut self, show_progress: bool) -> Self {
        self.show_progress = show_progress;
        self
    }

    pub fn config(&self) -> &BenchmarkConfig {
        &self.config
    }

    /// Run every grid cell, scale factor outer and quality inner.
    pub fn run(&self) -> anyhow::Result<BenchmarkResults> {
        self.config.validate()?;

        let sample_path = &self.config.sample_path;
        let original_size = std::fs::metadata(sample_path)
            .with_context(|| format!("Failed to stat sample: {}", sample_path.display()))?
            .len();

        std::fs::create_dir_all(&self.config.output_dir).with_context(|| {
            format!(
                "Failed to create output directory: {}",
                self.config.output_dir.display()
            )
        })?;

        info!(
            sample = %sample_path.display(),
            original_size,
            cells = self.config.grid_size(),
            "Starting benchmark"
        );

        let progress = if self.show_progress {
            let pb = ProgressBar::new(self.config.grid_size() as u64);
            pb.set_style(
                ProgressStyle::default_bar()
                    .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
                    .unwrap_or_else(|_| ProgressStyle::default_bar()),
            );
            pb
        } else {
            ProgressBar::hidden()
        };

        let mut records = Vec::with_capacity(self.config.grid_size());
        for &scale_factor in &self.config.scale_factors {
            for &quality in &self.config.qualities {
                progress.set_message(format!("scale {} q{}", scale_factor, quality));
                let record = self.run_cell(scale_factor, quality, original_size)?;
                records.push(record);
                progress.inc(1);
            }
        }
        progress.finish_and_clear();

        Ok(BenchmarkResults {
            timestamp: chrono::Utc::now().to_rfc3339(),
            sample_path: sample_path.display().to_string(),
            original_size_bytes: original_size,
            records,
        })
    }

    /// Convert once at the given settings and measure it.
    fn run_cell(
        &self,
        scale_factor: f32,
        quality: u8,
        original_size: u64,
    ) -> anyhow::Result<BenchmarkRecord> {
        let output_path = self.output_path(scale_factor, quality);
        let options = ConversionOptions::new(quality, quality == 100, scale_factor);

        let baseline = process_rss_bytes();
        let start = Instant::now();

        self.converter
            .convert_file(&self.config.sample_path, &output_path, &options)
            .with_context(|| {
                format!("Conversion failed at scale {} quality {}", scale_factor, quality)
            })?;

        let elapsed = start.elapsed();
        let memory_delta = process_rss_bytes() as i64 - baseline as i64;

        let output_size = std::fs::metadata(&output_path)
            .with_context(|| format!("Failed to stat output: {}", output_path.display()))?
            .len();

        debug!(
            scale_factor,
            quality,
            elapsed_ms = elapsed.as_millis() as u64,
            memory_delta,
            output_size,
            "Benchmark cell complete"
        );

        Ok(BenchmarkRecord::new(
            scale_factor,
            quality,
            elapsed,
            memory_delta,
            original_size,
            output_size,
        ))
    }

    fn output_path(&self, scale_factor: f32, quality: u8) -> PathBuf {
        let stem = self
            .config
            .sample_path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("sample");
        self.config
            .output_dir
            .join(output_file_name(stem, scale_factor, quality))
    }
}

/// File name for one grid cell, e.g. `sample_scale2_q90.webp`.
pub fn output_file_name(stem: &str, scale_factor: f32, quality: u8) -> String {
    format!("{}_scale{}_q{}.webp", stem, scale_factor, quality)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_file_name() {
        assert_eq!(output_file_name("sample", 1.0, 75), "sample_scale1_q75.webp");
        assert_eq!(output_file_name("sample", 8.0, 100), "sample_scale8_q100.webp");
        assert_eq!(output_file_name("logo", 1.5, 90), "logo_scale1.5_q90.webp");
    }
}
