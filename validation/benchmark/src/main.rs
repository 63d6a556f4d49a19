//! Benchmark CLI for the SVG to WebP converter.

use benchmark::{ensure_sample, format_file_size, BenchmarkConfig, BenchmarkRunner, ResultsReport};
use clap::Parser;
use std::path::PathBuf;
use tracing::Level;

#[derive(Parser, Debug)]
#[command(name = "benchmark")]
#[command(about = "Benchmark SVG to WebP conversion across scale factors and qualities")]
struct Args {
    /// Sample SVG file (created if missing)
    #[arg(short, long, default_value = "samples/sample.svg")]
    sample: PathBuf,

    /// Directory for generated WebP files (default: the sample's directory)
    #[arg(long)]
    output_dir: Option<PathBuf>,

    /// YAML file overriding the scale/quality grid
    #[arg(short, long, env = "BENCHMARK_CONFIG")]
    config: Option<PathBuf>,

    /// Output format: table (default), json, csv
    #[arg(short, long, default_value = "table")]
    output: String,

    /// Log level (logs go to stderr)
    #[arg(long, default_value = "warn")]
    log_level: String,
}

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let args = Args::parse();

    let level = match args.log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "error" => Level::ERROR,
        _ => Level::WARN,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();

    let mut config = match &args.config {
        Some(path) => BenchmarkConfig::from_file(path)?,
        None => BenchmarkConfig::default(),
    };
    config.sample_path = args.sample.clone();
    config.output_dir = args.output_dir.clone().unwrap_or_else(|| {
        args.sample
            .parent()
            .map(|p| p.to_path_buf())
            .unwrap_or_default()
    });
    config.validate()?;

    let is_table = args.output != "json" && args.output != "csv";

    if is_table {
        println!("SVG to WebP Converter Benchmark");
        println!("===============================\n");
    }

    if ensure_sample(&config.sample_path)? && is_table {
        println!("Created sample SVG file: {}", config.sample_path.display());
    }

    let original_size = std::fs::metadata(&config.sample_path)?.len();
    if is_table {
        println!("\nFile Size Comparison:");
        println!("Original SVG:  {}", format_file_size(original_size));
        println!("\n=== BENCHMARKS ===\n");
    }

    let runner = BenchmarkRunner::new(config).with_progress(is_table);
    tracing::info!(
        sample = %runner.config().sample_path.display(),
        output_dir = %runner.config().output_dir.display(),
        cells = runner.config().grid_size(),
        "Starting benchmark"
    );
    let results = runner.run()?;

    match args.output.as_str() {
        "json" => {
            println!("{}", ResultsReport::format_json(&results)?);
        }
        "csv" => {
            println!("{}", ResultsReport::csv_header());
            println!("{}", ResultsReport::format_csv(&results));
        }
        _ => {
            println!("{}", ResultsReport::format_table(&results));
        }
    }

    Ok(())
}
