//! Per-region score averaging
//!
//! Only items with a score contribute. A region with no contributing items
//! is left out entirely; 0.0 is a real neutral score and must not stand in
//! for "no data".

use crate::domain::types::ScoredItem;
use std::collections::BTreeMap;

/// Average the present scores of every region
pub fn aggregate(items_by_region: &BTreeMap<String, Vec<ScoredItem>>) -> BTreeMap<String, f64> {
    items_by_region
        .iter()
        .filter_map(|(region, items)| {
            average(items.iter().map(ScoredItem::score)).map(|avg| (region.clone(), avg))
        })
        .collect()
}

/// Mean of the present values, None when no value is present
pub fn average(scores: impl IntoIterator<Item = Option<f64>>) -> Option<f64> {
    let (sum, count) = scores
        .into_iter()
        .flatten()
        .fold((0.0_f64, 0_u64), |(sum, count), s| (sum + s, count + 1));

    (count > 0).then(|| sum / count as f64)
}
