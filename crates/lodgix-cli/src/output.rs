//! Per-page JSON files and the aggregate CSV log.

use std::path::Path;

use anyhow::Context;
use lodgix_scraper::ExtractionResult;

const CSV_HEADER: [&str; 8] = [
    "SourceUrl",
    "Timestamp",
    "Approach",
    "Success",
    "FullAddress",
    "Latitude",
    "Longitude",
    "Notes",
];

const MAX_FILE_STEM_CHARS: usize = 150;

/// File name for a page's JSON result: every character outside
/// `[0-9A-Za-z-_.]` becomes `_`, truncated to 150 characters, plus `.json`.
pub(crate) fn json_file_name(url: &str) -> String {
    let stem: String = url
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.') {
                c
            } else {
                '_'
            }
        })
        .take(MAX_FILE_STEM_CHARS)
        .collect();
    format!("{stem}.json")
}

fn ensure_parent(path: &Path) -> anyhow::Result<()> {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create directory {}", parent.display())),
        _ => Ok(()),
    }
}

/// Write one result as pretty-printed JSON, creating parent directories.
pub(crate) fn write_json_result(result: &ExtractionResult, path: &Path) -> anyhow::Result<()> {
    ensure_parent(path)?;
    let body = serde_json::to_string_pretty(result)?;
    std::fs::write(path, body).with_context(|| format!("failed to write {}", path.display()))
}

/// Write every result as one CSV row under a fixed header. Absent values
/// are empty cells.
pub(crate) fn write_csv_log(results: &[ExtractionResult], path: &Path) -> anyhow::Result<()> {
    ensure_parent(path)?;
    let mut writer = csv::Writer::from_path(path)
        .with_context(|| format!("failed to create CSV log {}", path.display()))?;

    writer.write_record(CSV_HEADER)?;
    for result in results {
        writer.write_record(csv_row(result))?;
    }
    writer.flush()?;
    Ok(())
}

fn csv_row(result: &ExtractionResult) -> [String; 8] {
    let float = |v: Option<f64>| v.map(|f| format!("{f:?}")).unwrap_or_default();
    [
        result.source_url.clone(),
        result.timestamp.clone(),
        result
            .approach
            .map(|a| a.as_str().to_owned())
            .unwrap_or_default(),
        (if result.success { "True" } else { "False" }).to_owned(),
        result.full_address.clone().unwrap_or_default(),
        float(result.latitude),
        float(result.longitude),
        result.notes.clone().unwrap_or_default(),
    ]
}
