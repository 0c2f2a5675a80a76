//! Region table loading
//!
//! The region file is a JSON object mapping each region name to a list of
//! polygons, each polygon a closed list of `[lat, lon]` pairs:
//!
//! ```json
//! { "HI": [[[19.0, -155.0], [20.0, -155.5], [19.5, -156.0], [19.0, -155.0]], ...] }
//! ```

use crate::domain::geometry::{Point, Polygon};
use crate::domain::region::{Region, RegionTable};
use anyhow::Context;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use tracing::info;

type RawRegions = BTreeMap<String, Vec<Vec<[f64; 2]>>>;

/// Parse a region table from JSON text
pub fn parse_region_table(json: &str) -> anyhow::Result<RegionTable> {
    let raw: RawRegions = serde_json::from_str(json).context("Invalid region JSON")?;

    let mut table = RegionTable::new();
    for (name, rings) in raw {
        let polygons = rings
            .into_iter()
            .enumerate()
            .map(|(i, ring)| {
                Polygon::new(ring.into_iter().map(Point::from).collect())
                    .with_context(|| format!("Region {} polygon {}", name, i))
            })
            .collect::<anyhow::Result<Vec<_>>>()?;
        table.insert(Region::new(name, polygons)?);
    }
    Ok(table)
}

/// Load and validate the region table from a JSON file
pub fn load_region_table<P: AsRef<Path>>(path: P) -> anyhow::Result<RegionTable> {
    let path = path.as_ref();
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read region file {}", path.display()))?;
    let table = parse_region_table(&content)
        .with_context(|| format!("Failed to load region file {}", path.display()))?;

    let polygons: usize = table.iter().map(|r| r.polygons().len()).sum();
    info!(file = %path.display(), regions = %table.len(), polygons = %polygons, "regions_loaded");
    Ok(table)
}
