//! End-to-end query pipeline
//!
//! Region centers are computed once when the pipeline is built, then every
//! query runs: score messages -> classify by nearest center -> average per
//! region.

use crate::domain::geometry::Point;
use crate::domain::region::{all_region_centers, RegionCenters, RegionTable};
use crate::domain::types::{ScoredItem, Tweet};
use crate::infra::metrics::RunSummary;
use crate::services::aggregator::aggregate;
use crate::services::classifier::classify;
use crate::services::sentiment::WordSentiments;
use std::collections::BTreeMap;
use std::time::Instant;
use tracing::debug;

/// Output of one query, ready for a renderer
#[derive(Debug, Clone, Default)]
pub struct RegionSentiments {
    /// Average sentiment per region; regions without data are absent
    pub averages: BTreeMap<String, f64>,
    /// Number of messages classified to each region
    pub item_counts: BTreeMap<String, usize>,
    /// Every scored message, in input order
    pub dots: Vec<ScoredItem>,
    pub summary: RunSummary,
}

/// Region partition plus cached centers and the word table
pub struct Trends {
    regions: RegionTable,
    centers: RegionCenters,
    words: WordSentiments,
}

impl Trends {
    pub fn new(regions: RegionTable, words: WordSentiments) -> Self {
        let centers = all_region_centers(&regions);
        Self { regions, centers, words }
    }

    pub fn centers(&self) -> &RegionCenters {
        &self.centers
    }

    /// Center of a region by name
    pub fn center(&self, name: &str) -> Option<Point> {
        self.centers.get(name)
    }

    /// Score, classify and aggregate a batch of messages
    pub fn run(&self, tweets: &[Tweet]) -> RegionSentiments {
        let started = Instant::now();

        let items: Vec<ScoredItem> = tweets.iter().map(|t| t.scored(&self.words)).collect();
        let dots: Vec<ScoredItem> = items.iter().filter(|i| i.score().is_some()).copied().collect();

        let by_region = classify(items, &self.centers);
        let averages = aggregate(&by_region);
        let item_counts: BTreeMap<String, usize> =
            by_region.iter().map(|(name, list)| (name.clone(), list.len())).collect();

        for (name, avg) in &averages {
            let items = item_counts.get(name).copied().unwrap_or(0);
            debug!(region = %name, sentiment = %avg, items = %items, "region_sentiment");
        }

        let summary = RunSummary {
            items_total: tweets.len(),
            items_scored: dots.len(),
            regions_total: self.regions.len(),
            regions_with_items: by_region.len(),
            regions_with_sentiment: averages.len(),
            elapsed_us: started.elapsed().as_micros() as u64,
        };

        RegionSentiments { averages, item_counts, dots, summary }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::geometry::Polygon;
    use crate::domain::region::Region;
    use chrono::NaiveDate;

    fn square_region(name: &str, x0: f64, y0: f64) -> Region {
        let ring = vec![
            Point::new(x0, y0),
            Point::new(x0 + 2.0, y0),
            Point::new(x0 + 2.0, y0 + 2.0),
            Point::new(x0, y0 + 2.0),
            Point::new(x0, y0),
        ];
        Region::new(name, [Polygon::new(ring).unwrap()]).unwrap()
    }

    fn tweet(text: &str, lat: f64, lon: f64) -> Tweet {
        let time = NaiveDate::from_ymd_opt(2011, 8, 28).unwrap().and_hms_opt(19, 22, 53).unwrap();
        Tweet::new(text, time, lat, lon)
    }

    fn trends() -> Trends {
        let regions: RegionTable =
            [square_region("AA", 0.0, 0.0), square_region("BB", 10.0, 0.0), square_region("CC", 0.0, 10.0)]
                .into_iter()
                .collect();
        let words = WordSentiments::try_from(vec![
            ("sunny".to_string(), 0.5),
            ("rainy".to_string(), -0.5),
        ])
        .unwrap();
        Trends::new(regions, words)
    }

    #[test]
    fn test_centers_cached_at_construction() {
        let t = trends();
        assert_eq!(t.centers().len(), 3);
        assert_eq!(t.center("BB"), Some(Point::new(11.0, 1.0)));
    }

    #[test]
    fn test_run_scores_by_region() {
        let t = trends();
        let result = t.run(&[
            tweet("so sunny today", 1.0, 1.2),
            tweet("rainy again", 11.0, 0.8),
            tweet("nothing to report", 1.0, 11.0),
        ]);

        assert_eq!(result.averages.len(), 2);
        assert_eq!(result.averages["AA"], 0.5);
        assert_eq!(result.averages["BB"], -0.5);
        assert!(!result.averages.contains_key("CC"));
        assert_eq!(result.item_counts["CC"], 1);
        assert_eq!(result.dots.len(), 2);

        assert_eq!(result.summary.items_total, 3);
        assert_eq!(result.summary.items_scored, 2);
        assert_eq!(result.summary.regions_with_items, 3);
        assert_eq!(result.summary.regions_with_sentiment, 2);
        assert_eq!(result.summary.regions_without_sentiment(), 1);
    }

    #[test]
    fn test_run_without_messages() {
        let result = trends().run(&[]);
        assert!(result.averages.is_empty());
        assert!(result.item_counts.is_empty());
        assert_eq!(result.summary.regions_total, 3);
    }
}
