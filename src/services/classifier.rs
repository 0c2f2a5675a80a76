//! Nearest-center classification
//!
//! Each item goes to the region whose center is closest (Euclidean). Region
//! counts are small, so a linear scan per item is used rather than a
//! spatial index.

use crate::domain::geometry::Point;
use crate::domain::region::RegionCenters;
use std::collections::BTreeMap;
use tracing::{debug, warn};

/// Anything with a position can be classified
pub trait Located {
    fn position(&self) -> Point;
}

impl Located for crate::domain::types::ScoredItem {
    fn position(&self) -> Point {
        self.location()
    }
}

impl Located for crate::domain::types::Tweet {
    fn position(&self) -> Point {
        self.location()
    }
}

/// Group items by nearest region center
///
/// Items keep their input order within each region. Regions that receive no
/// items do not appear in the result.
pub fn classify<T, I>(items: I, centers: &RegionCenters) -> BTreeMap<String, Vec<T>>
where
    T: Located,
    I: IntoIterator<Item = T>,
{
    let mut by_region: BTreeMap<String, Vec<T>> = BTreeMap::new();

    if centers.is_empty() {
        let dropped = items.into_iter().count();
        if dropped > 0 {
            warn!(items = %dropped, "classify_without_regions");
        }
        return by_region;
    }

    for item in items {
        let position = item.position();
        let Some(region) = centers.nearest(&position) else {
            continue;
        };
        debug!(region = %region, x = %position.x, y = %position.y, "item_classified");

        match by_region.get_mut(region) {
            Some(list) => list.push(item),
            None => {
                by_region.insert(region.to_string(), vec![item]);
            }
        }
    }

    by_region
}
