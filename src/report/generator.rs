//! Data-quality report generation.
//!
//! This module assembles the four per-chamber tables into one report,
//! serializes it to JSON and writes it next to the other session reports.

use crate::analysis::{averages, session_totals, source_gaps, subject_coverage};
use crate::models::{Bill, Chamber, DataQualityReport};
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Build the complete report for one session's bills.
pub fn build_report(bills: &[Bill], chambers: &[Chamber]) -> DataQualityReport {
    DataQualityReport {
        bills_per_session_data: session_totals(bills, chambers),
        average_num_data: averages(bills, chambers),
        no_sources_data: source_gaps(bills, chambers),
        bill_subjects_data: subject_coverage(bills, chambers),
    }
}

/// Generate a JSON report, compact unless `pretty` is set.
pub fn generate_json_report(report: &DataQualityReport, pretty: bool) -> Result<String> {
    let json = if pretty {
        serde_json::to_string_pretty(report)?
    } else {
        serde_json::to_string(report)?
    };
    Ok(json)
}

/// File name for a session report, e.g. `Virginia_2020_data_quality.json`.
///
/// Path separators in the session identifier become `-` so the report
/// always lands directly in the output directory.
pub fn report_file_name(state: &str, session: &str) -> String {
    let session = session.replace(['/', '\\'], "-");
    format!("{}_{}_data_quality.json", state, session)
}

/// Write a session report into `output_dir`, creating it if needed.
///
/// Returns the path of the written file.
pub async fn write_report(
    output_dir: &Path,
    state: &str,
    session: &str,
    report: &DataQualityReport,
    pretty: bool,
) -> Result<PathBuf> {
    let content = generate_json_report(report, pretty)?;

    tokio::fs::create_dir_all(output_dir)
        .await
        .with_context(|| format!("Failed to create output directory {}", output_dir.display()))?;

    let path = output_dir.join(report_file_name(state, session));
    tokio::fs::write(&path, content)
        .await
        .with_context(|| format!("Failed to write report to {}", path.display()))?;

    debug!("Wrote {}", path.display());
    Ok(path)
}
