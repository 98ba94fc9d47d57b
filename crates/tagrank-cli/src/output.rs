//! Report files.

use std::path::Path;

use anyhow::Context;
use tagrank_metrics::TagAggregate;

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub(crate) enum ReportFormat {
    /// Header plus one comma-separated row per tag
    Csv,
    /// Pretty-printed array of full tag aggregates
    Json,
}

/// Write each line followed by `\n`, replacing any existing file.
///
/// # Errors
///
/// Returns an error if the file cannot be created or written.
pub(crate) fn write_report(path: &Path, lines: &[String]) -> anyhow::Result<()> {
    let mut body = String::with_capacity(lines.iter().map(|l| l.len() + 1).sum());
    for line in lines {
        body.push_str(line);
        body.push('\n');
    }
    std::fs::write(path, body)
        .with_context(|| format!("failed to write report to {}", path.display()))
}

/// Write the ranked aggregates as a JSON array, replacing any existing file.
///
/// # Errors
///
/// Returns an error if serialization fails or the file cannot be written.
pub(crate) fn write_json(path: &Path, rows: &[&TagAggregate]) -> anyhow::Result<()> {
    let mut body = serde_json::to_string_pretty(rows)?;
    body.push('\n');
    std::fs::write(path, body)
        .with_context(|| format!("failed to write report to {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn write_report_terminates_every_line() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.csv");
        write_report(&path, &["header".to_string(), "row".to_string()]).unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "header\nrow\n");
    }

    #[test]
    fn write_report_overwrites_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.csv");
        std::fs::write(&path, "stale contents that are longer\n").unwrap();
        write_report(&path, &["fresh".to_string()]).unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "fresh\n");
    }

    #[test]
    fn write_report_into_missing_directory_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nope").join("out.csv");
        assert!(write_report(&path, &["x".to_string()]).is_err());
    }

    #[test]
    fn write_json_emits_array_in_order() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.json");
        let a = TagAggregate::empty("a", 1);
        let b = TagAggregate::empty("b", 2);
        write_json(&path, &[&b, &a]).unwrap();

        let value: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(value[0]["tag"], "b");
        assert_eq!(value[1]["tag"], "a");
        assert_eq!(value[1]["post_count"], 1);
    }
}
