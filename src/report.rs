//! Run report: one JSON line per cleared batch, appended to a file.

use std::fs::{create_dir_all, OpenOptions};
use std::io::Write;
use std::path::Path;

use chrono::{SecondsFormat, Utc};
use clearing::BatchSummary;
use common::Error;
use serde_json::json;

use crate::config::AppConfig;

fn now_iso() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

pub fn batch_event(config: &AppConfig, summary: &BatchSummary) -> serde_json::Value {
    json!({
        "ts": now_iso(),
        "kind": "batch_cleared",
        "catalog": config.catalog_path,
        "input": config.input_path.as_deref().unwrap_or("-"),
        "include_adjusted_value": config.clearing.include_adjusted_value,
        "summary": summary,
    })
}

/// Append `event` as a single line to the report at `path`.
pub fn append_event(path: &Path, event: &serde_json::Value) -> Result<(), Error> {
    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        create_dir_all(dir)?;
    }
    let mut file = OpenOptions::new().create(true).append(true).open(path)?;
    writeln!(file, "{}", serde_json::to_string(event)?)?;
    file.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_append_event_writes_json_lines() {
        let path = std::env::temp_dir()
            .join(format!("auction-clearing-report-{}", std::process::id()))
            .join("runs.jsonl");
        let _ = std::fs::remove_file(&path);

        let config = AppConfig::default();
        let summary = BatchSummary {
            auctions: 2,
            winners: 1,
            ..BatchSummary::default()
        };
        append_event(&path, &batch_event(&config, &summary)).unwrap();
        append_event(&path, &batch_event(&config, &summary)).unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = contents.lines().collect();
        assert_eq!(lines.len(), 2);

        let event: serde_json::Value = serde_json::from_str(lines[0]).unwrap();
        assert_eq!(event["kind"], "batch_cleared");
        assert_eq!(event["input"], "-");
        assert_eq!(event["summary"]["auctions"], 2);
        assert!(event["ts"].as_str().unwrap().ends_with('Z'));

        let _ = std::fs::remove_file(&path);
    }
}
