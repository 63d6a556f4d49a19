//! Results reporting and formatting.

use crate::metrics::{BenchmarkRecord, BenchmarkResults};
use comfy_table::{presets::ASCII_MARKDOWN, CellAlignment, Table};

const SIZE_SUFFIXES: [&str; 4] = ["B", "KB", "MB", "GB"];

/// Formats benchmark results for output.
pub struct ResultsReport;

impl ResultsReport {
    /// Format results as a markdown table, one row per grid cell.
    pub fn format_table(results: &BenchmarkResults) -> String {
        let mut table = Table::new();
        table.load_preset(ASCII_MARKDOWN).set_header(vec![
            "Scale Factor",
            "Quality",
            "Time (ms)",
            "Memory (MB)",
            "File Size",
            "Compression Ratio",
        ]);

        for record in &results.records {
            table.add_row(Self::table_row(record));
        }

        for index in 0..6 {
            if let Some(column) = table.column_mut(index) {
                column.set_cell_alignment(CellAlignment::Right);
            }
        }

        table.to_string()
    }

    fn table_row(record: &BenchmarkRecord) -> Vec<String> {
        vec![
            format!("{:.1}", record.scale_factor),
            record.quality.to_string(),
            format!("{:.2}", record.elapsed_ms()),
            format!("{:.2}", record.memory_delta_mb()),
            format_file_size(record.output_size_bytes),
            format!("{:.2}x", record.compression_ratio),
        ]
    }

    /// Format results as JSON.
    pub fn format_json(results: &BenchmarkResults) -> anyhow::Result<String> {
        Ok(serde_json::to_string_pretty(results)?)
    }

    /// Format results as CSV rows.
    pub fn format_csv(results: &BenchmarkResults) -> String {
        results
            .records
            .iter()
            .map(|r| {
                format!(
                    "{},{},{},{:.3},{},{},{:.4}",
                    results.timestamp,
                    r.scale_factor,
                    r.quality,
                    r.elapsed_ms(),
                    r.memory_delta_bytes,
                    r.output_size_bytes,
                    r.compression_ratio
                )
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// CSV header row.
    pub fn csv_header() -> &'static str {
        "timestamp,scale_factor,quality,time_ms,memory_delta_bytes,output_bytes,compression_ratio"
    }
}

/// Human-readable file size with two decimals, e.g. `1.50 KB`.
///
/// Moves to the next unit while the quotient rounds (half to even) to at
/// least one, so 1023 bytes prints as `1.00 KB` but 512 bytes stays in bytes.
pub fn format_file_size(bytes: u64) -> String {
    let mut number = bytes as f64;
    let mut unit = 0;

    while unit < SIZE_SUFFIXES.len() - 1 && (number / 1024.0).round_ties_even() >= 1.0 {
        number /= 1024.0;
        unit += 1;
    }

    format!("{} {}", group_thousands(number), SIZE_SUFFIXES[unit])
}

/// Two-decimal formatting with comma thousands separators.
fn group_thousands(value: f64) -> String {
    let fixed = format!("{:.2}", value);
    let (integer, fraction) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));

    let mut grouped = String::with_capacity(integer.len() + integer.len() / 3);
    for (i, ch) in integer.chars().enumerate() {
        if i > 0 && (integer.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    format!("{}.{}", grouped, fraction)
}
