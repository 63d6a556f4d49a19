//! Per-conversion measurements.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Measurements for a single grid cell. Never modified after creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BenchmarkRecord {
    pub scale_factor: f32,
    pub quality: u8,
    pub elapsed: Duration,
    /// Resident memory after minus before the conversion. Advisory only.
    pub memory_delta_bytes: i64,
    pub output_size_bytes: u64,
    /// Original SVG size divided by output size
    pub compression_ratio: f64,
}

impl BenchmarkRecord {
    pub fn new(
        scale_factor: f32,
        quality: u8,
        elapsed: Duration,
        memory_delta_bytes: i64,
        original_size_bytes: u64,
        output_size_bytes: u64,
    ) -> Self {
        Self {
            scale_factor,
            quality,
            elapsed,
            memory_delta_bytes,
            output_size_bytes,
            compression_ratio: compression_ratio(original_size_bytes, output_size_bytes),
        }
    }

    pub fn elapsed_ms(&self) -> f64 {
        self.elapsed.as_nanos() as f64 / 1_000_000.0
    }

    pub fn memory_delta_mb(&self) -> f64 {
        self.memory_delta_bytes as f64 / (1024.0 * 1024.0)
    }
}

/// Results of a full benchmark run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BenchmarkResults {
    pub timestamp: String,
    pub sample_path: String,
    pub original_size_bytes: u64,
    /// One record per grid cell, scale factor outer, quality inner
    pub records: Vec<BenchmarkRecord>,
}

/// Ratio of original to output size; infinite for an empty output.
pub fn compression_ratio(original_size_bytes: u64, output_size_bytes: u64) -> f64 {
    original_size_bytes as f64 / output_size_bytes as f64
}

/// Current process RSS (Resident Set Size) in bytes, 0 when unavailable.
pub fn process_rss_bytes() -> u64 {
    std::fs::read_to_string("/proc/self/status")
        .ok()
        .and_then(|status| {
            status
                .lines()
                .find(|line| line.starts_with("VmRSS:"))
                .map(|line| parse_kb_value(line) * 1024)
        })
        .unwrap_or(0)
}

fn parse_kb_value(line: &str) -> u64 {
    line.split_whitespace()
        .nth(1)
        .and_then(|v| v.parse().ok())
        .unwrap_or(0)
}
