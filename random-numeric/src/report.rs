//! Human-readable and JSON renderings of a [`RunReport`].

use std::time::Duration;

use numeric_core::{AnalysisResult, WriteSummary};
use serde::Serialize;

use crate::pipeline::RunReport;
use crate::RunError;

/// Longest bar in the frequency chart.
const MAX_BAR: usize = 10;

#[derive(Serialize)]
struct JsonReport<'a> {
    written: Option<WriteSummary>,
    #[serde(flatten)]
    result: &'a AnalysisResult,
    read_ms: u64,
    analyze_ms: u64,
}

/// Bar chart of the most frequent values followed by the counts and timings.
pub fn render_text(report: &RunReport) -> String {
    let result = &report.result;
    let mut out = format!(
        "{} most frequently appeared numbers in bar chart form:\n",
        result.requested_top
    );
    for (rank, entry) in result.top_frequent.iter().enumerate() {
        let value = entry.value.to_string();
        let pad = if value.len() == 1 { "  " } else { " " };
        out.push_str(&format!("{}{}{}\n", value, pad, "*".repeat(bar_len(rank))));
    }
    if result.is_short() {
        out.push_str(&format!(
            "(only {} distinct values in the corpus)\n",
            result.top_frequent.len()
        ));
    }

    out.push_str(&format!("\nThe count of Prime numbers:\n{}\n", result.prime_count));
    out.push_str(&format!(
        "\nThe count of Armstrong numbers:\n{}\n",
        result.narcissistic_count
    ));
    out.push_str(&format!(
        "\nTime taken to read the file:\n{} milliseconds\n",
        report.read_time.as_millis()
    ));
    out.push_str(&format!(
        "\nTime taken to analyze the file:\n{} milliseconds\n",
        report.analyze_time.as_millis()
    ));
    out
}

/// Pretty-printed JSON of the same information as [`render_text`].
pub fn render_json(report: &RunReport) -> Result<String, RunError> {
    let json = JsonReport {
        written: report.written,
        result: &report.result,
        read_ms: millis(report.read_time),
        analyze_ms: millis(report.analyze_time),
    };
    Ok(serde_json::to_string_pretty(&json)?)
}

/// Whole milliseconds, saturating at `u64::MAX`.
fn millis(elapsed: Duration) -> u64 {
    u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX)
}

/// Rank 0 gets the longest bar; bars never drop below one star.
fn bar_len(rank: usize) -> usize {
    MAX_BAR.saturating_sub(rank).max(1)
}
