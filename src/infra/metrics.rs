//! Per-run counters and summary reporting
//!
//! The pipeline is single-threaded, so plain counters are enough. The
//! summary is emitted once as a structured log line at the end of a run.

use tracing::info;

/// Counts collected while running one query
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RunSummary {
    /// Messages loaded for the query
    pub items_total: usize,
    /// Messages with at least one word carrying sentiment
    pub items_scored: usize,
    /// Regions in the table
    pub regions_total: usize,
    /// Regions that received at least one message
    pub regions_with_items: usize,
    /// Regions that ended up with an average sentiment
    pub regions_with_sentiment: usize,
    /// Wall time of classification + aggregation in microseconds
    pub elapsed_us: u64,
}

impl RunSummary {
    /// Regions left grey (no average sentiment)
    pub fn regions_without_sentiment(&self) -> usize {
        self.regions_total.saturating_sub(self.regions_with_sentiment)
    }

    /// Fraction of loaded messages that carried a score
    pub fn scored_ratio(&self) -> f64 {
        if self.items_total == 0 {
            return 0.0;
        }
        self.items_scored as f64 / self.items_total as f64
    }

    pub fn log(&self) {
        info!(
            items_total = %self.items_total,
            items_scored = %self.items_scored,
            scored_ratio = format!("{:.3}", self.scored_ratio()),
            regions_total = %self.regions_total,
            regions_with_items = %self.regions_with_items,
            regions_with_sentiment = %self.regions_with_sentiment,
            regions_without_sentiment = %self.regions_without_sentiment(),
            elapsed_us = %self.elapsed_us,
            "run_summary"
        );
    }
}
