//! Region sentiment egress - writes query results to file
//!
//! Results are written in JSONL format (one JSON object per line) to the
//! file specified in config. Each run appends one `region` record per region
//! in the table and one `dot` record per scored message, all sharing a
//! UUIDv7 run id so a renderer can pick the latest run.

use crate::domain::region::RegionCenters;
use crate::services::trends::RegionSentiments;
use anyhow::Context;
use serde::Serialize;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;
use tracing::{debug, error, info};
use uuid::Uuid;

/// Generate a new UUIDv7 (time-sortable)
pub fn new_run_id() -> String {
    Uuid::now_v7().to_string()
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum EgressRecord {
    /// One region; `sentiment` is null for regions without data
    Region {
        run_id: String,
        query: String,
        region: String,
        center: [f64; 2],
        sentiment: Option<f64>,
        items: usize,
    },
    /// One scored message
    Dot { run_id: String, location: [f64; 2], sentiment: f64 },
}

/// Build the egress records for a query result
pub fn build_records(
    run_id: &str,
    query: &str,
    centers: &RegionCenters,
    result: &RegionSentiments,
) -> Vec<EgressRecord> {
    let regions = centers.iter().map(|(name, center)| EgressRecord::Region {
        run_id: run_id.to_string(),
        query: query.to_string(),
        region: name.to_string(),
        center: center.into(),
        sentiment: result.averages.get(name).copied(),
        items: result.item_counts.get(name).copied().unwrap_or(0),
    });

    let dots = result.dots.iter().filter_map(|item| {
        item.score().map(|sentiment| EgressRecord::Dot {
            run_id: run_id.to_string(),
            location: <[f64; 2]>::from(item.location()),
            sentiment,
        })
    });

    regions.chain(dots).collect()
}

/// Egress writer for query results
pub struct Egress {
    file_path: String,
}

impl Egress {
    pub fn new(file_path: &str) -> Self {
        info!(file_path = %file_path, "egress_initialized");
        Self { file_path: file_path.to_string() }
    }

    /// Write all records, returning how many lines were appended
    ///
    /// Nothing is appended if any record fails to serialize.
    pub fn write_records(&self, records: &[EgressRecord]) -> anyhow::Result<usize> {
        let mut lines = String::new();
        let mut written = 0_usize;
        for record in records {
            let json = serde_json::to_string(record).context("Failed to serialize egress record")?;
            lines.push_str(&json);
            lines.push('\n');
            written += 1;
        }

        if let Err(e) = self.append(&lines) {
            error!(file = %self.file_path, error = %e, "results_egress_failed");
            return Err(e).with_context(|| format!("Failed to write egress file {}", self.file_path));
        }

        info!(file = %self.file_path, records = %written, "results_egressed");
        Ok(written)
    }

    /// Append text to the egress file
    fn append(&self, text: &str) -> std::io::Result<()> {
        let path = Path::new(&self.file_path);

        // Create parent directories if they don't exist
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let mut file = OpenOptions::new().create(true).append(true).open(path)?;
        file.write_all(text.as_bytes())?;
        debug!(file = %self.file_path, bytes = %text.len(), "egress_written");

        Ok(())
    }
}
