//! Tests for the benchmark runner.

use std::sync::Arc;

use benchmark::{ensure_sample, output_file_name, BenchmarkConfig, BenchmarkRunner, ResultsReport};
use converter::SvgConverter;

/// Converter without system fonts; the sample's text is skipped, shapes still render.
fn runner(config: BenchmarkConfig) -> BenchmarkRunner {
    let fontdb = Arc::new(usvg::fontdb::Database::new());
    BenchmarkRunner::with_converter(config, SvgConverter::with_fontdb(fontdb))
}

fn small_grid(dir: &std::path::Path) -> BenchmarkConfig {
    let mut config = BenchmarkConfig::new(dir.join("sample.svg"), dir.join("out"));
    config.scale_factors = vec![1.0, 2.0];
    config.qualities = vec![75, 100];
    config
}

#[test]
fn test_runs_grid_in_order() {
    let dir = tempfile::tempdir().unwrap();
    let config = small_grid(dir.path());
    ensure_sample(&config.sample_path).unwrap();

    let runner = runner(config);
    let results = runner.run().unwrap();
    assert_eq!(results.records.len(), runner.config().grid_size());

    let cells: Vec<(f32, u8)> = results
        .records
        .iter()
        .map(|r| (r.scale_factor, r.quality))
        .collect();
    assert_eq!(cells, vec![(1.0, 75), (1.0, 100), (2.0, 75), (2.0, 100)]);
}

#[test]
fn test_writes_one_file_per_cell_and_exact_ratio() {
    let dir = tempfile::tempdir().unwrap();
    let config = small_grid(dir.path());
    ensure_sample(&config.sample_path).unwrap();
    let original_size = std::fs::metadata(&config.sample_path).unwrap().len();

    let results = runner(config).run().unwrap();
    assert_eq!(results.original_size_bytes, original_size);

    for record in &results.records {
        let path = dir
            .path()
            .join("out")
            .join(output_file_name("sample", record.scale_factor, record.quality));
        let size = std::fs::metadata(&path).unwrap().len();

        assert_eq!(record.output_size_bytes, size);
        assert_eq!(record.compression_ratio, original_size as f64 / size as f64);
    }
}

#[test]
fn test_failure_aborts_run() {
    let dir = tempfile::tempdir().unwrap();
    let config = small_grid(dir.path());
    std::fs::write(&config.sample_path, "<svg").unwrap();

    let err = runner(config).run().unwrap_err();
    assert!(err.to_string().contains("Conversion failed at scale 1 quality 75"));
    assert!(!dir.path().join("out").join("sample_scale1_q100.webp").exists());
}

#[test]
fn test_missing_sample_is_error() {
    let dir = tempfile::tempdir().unwrap();
    let config = small_grid(dir.path());

    assert!(runner(config).run().is_err());
}

#[test]
fn test_table_has_row_per_cell() {
    let dir = tempfile::tempdir().unwrap();
    let config = small_grid(dir.path());
    ensure_sample(&config.sample_path).unwrap();

    let results = runner(config).run().unwrap();
    let table = ResultsReport::format_table(&results);

    assert_eq!(table.lines().count(), 2 + results.records.len());
}
