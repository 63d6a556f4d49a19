//! Benchmark harness for the SVG to WebP converter.
//!
//! This crate provides tools to:
//! - Generate a sample SVG document when none exists
//! - Convert it across a grid of scale factors and qualities
//! - Measure conversion time, memory delta and output size
//! - Output results in multiple formats (markdown table, JSON, CSV)

pub mod config;
pub mod metrics;
pub mod report;
pub mod runner;
pub mod sample;

pub use config::BenchmarkConfig;
pub use metrics::{BenchmarkRecord, BenchmarkResults};
pub use report::{format_file_size, ResultsReport};
pub use runner::{output_file_name, BenchmarkRunner};
pub use sample::{ensure_sample, SAMPLE_SVG};
