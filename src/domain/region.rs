//! Named regions and their area-weighted centers
//!
//! A region is one or more polygons (e.g. a state with islands). Its center
//! is the average of its polygon centroids weighted by polygon area, so the
//! mainland dominates small islands.

use crate::domain::geometry::{centroid_and_area, Centroid, GeometryError, Point, Polygon};
use smallvec::SmallVec;
use std::collections::BTreeMap;
use tracing::{debug, info};

/// Most regions are a single polygon
pub type RegionPolygons = SmallVec<[Polygon; 1]>;

/// A named, possibly multi-part region
#[derive(Debug, Clone)]
pub struct Region {
    name: String,
    polygons: RegionPolygons,
}

impl Region {
    pub fn new(
        name: impl Into<String>,
        polygons: impl IntoIterator<Item = Polygon>,
    ) -> Result<Self, GeometryError> {
        let name = name.into();
        let polygons: RegionPolygons = polygons.into_iter().collect();
        if polygons.is_empty() {
            return Err(GeometryError::EmptyRegion { name });
        }
        Ok(Self { name, polygons })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn polygons(&self) -> &[Polygon] {
        &self.polygons
    }

    /// Area-weighted center of this region
    pub fn center(&self) -> Point {
        weighted_center(&self.polygons)
    }
}

/// Static region partition keyed by name, iterated in name order
#[derive(Debug, Clone, Default)]
pub struct RegionTable {
    regions: BTreeMap<String, Region>,
}

impl RegionTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a region, replacing any previous region with the same name
    pub fn insert(&mut self, region: Region) -> Option<Region> {
        self.regions.insert(region.name.clone(), region)
    }

    pub fn get(&self, name: &str) -> Option<&Region> {
        self.regions.get(name)
    }

    pub fn len(&self) -> usize {
        self.regions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Region> {
        self.regions.values()
    }
}

impl FromIterator<Region> for RegionTable {
    fn from_iter<I: IntoIterator<Item = Region>>(iter: I) -> Self {
        let mut table = Self::new();
        for region in iter {
            table.insert(region);
        }
        table
    }
}

/// Area-weighted center of a list of polygons belonging to one region
///
/// If every polygon is degenerate (zero area) the plain mean of their
/// fallback centroids is returned.
pub fn region_center(polygons: &[Polygon]) -> Result<Point, GeometryError> {
    if polygons.is_empty() {
        return Err(GeometryError::EmptyRegion { name: String::new() });
    }
    Ok(weighted_center(polygons))
}

fn weighted_center(polygons: &[Polygon]) -> Point {
    let centroids: SmallVec<[Centroid; 4]> = polygons.iter().map(centroid_and_area).collect();

    let total_area: f64 = centroids.iter().map(|c| c.area).sum();
    if total_area == 0.0 {
        let n = centroids.len() as f64;
        let x = centroids.iter().map(|c| c.x).sum::<f64>() / n;
        let y = centroids.iter().map(|c| c.y).sum::<f64>() / n;
        return Point::new(x, y);
    }

    let x = centroids.iter().map(|c| c.x * c.area).sum::<f64>() / total_area;
    let y = centroids.iter().map(|c| c.y * c.area).sum::<f64>() / total_area;
    Point::new(x, y)
}

/// Region centers computed once per run
///
/// Entries are kept sorted by name; nearest-center scans rely on that order
/// for their tie-break.
#[derive(Debug, Clone, Default)]
pub struct RegionCenters {
    centers: Vec<(String, Point)>,
}

impl RegionCenters {
    pub fn from_pairs(pairs: impl IntoIterator<Item = (String, Point)>) -> Self {
        let mut centers: Vec<(String, Point)> = pairs.into_iter().collect();
        centers.sort_by(|a, b| a.0.cmp(&b.0));
        centers.dedup_by(|later, earlier| later.0 == earlier.0);
        Self { centers }
    }

    pub fn get(&self, name: &str) -> Option<Point> {
        self.centers
            .binary_search_by(|(n, _)| n.as_str().cmp(name))
            .ok()
            .map(|i| self.centers[i].1)
    }

    /// (name, center) pairs in name order
    pub fn iter(&self) -> impl Iterator<Item = (&str, Point)> {
        self.centers.iter().map(|(n, p)| (n.as_str(), *p))
    }

    pub fn len(&self) -> usize {
        self.centers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.centers.is_empty()
    }

    /// Name of the region whose center is closest to `point`
    ///
    /// Exact ties go to the lexicographically smallest name. Returns None
    /// only when there are no centers.
    pub fn nearest(&self, point: &Point) -> Option<&str> {
        let mut best: Option<(&str, f64)> = None;
        for (name, center) in self.iter() {
            let d = point.distance(&center);
            match best {
                Some((_, best_d)) if d >= best_d => {}
                _ => best = Some((name, d)),
            }
        }
        best.map(|(name, _)| name)
    }

    /// The `n` regions closest to the center of `name`, itself included
    ///
    /// Sorted by distance, then by name.
    pub fn nearest_to(&self, name: &str, n: usize) -> Result<Vec<(String, Point)>, GeometryError> {
        let origin =
            self.get(name).ok_or_else(|| GeometryError::UnknownRegion { name: name.to_string() })?;

        let mut ranked: Vec<(f64, &str, Point)> =
            self.iter().map(|(other, center)| (origin.distance(&center), other, center)).collect();
        ranked.sort_by(|a, b| a.0.total_cmp(&b.0).then_with(|| a.1.cmp(b.1)));

        Ok(ranked.into_iter().take(n).map(|(_, other, center)| (other.to_string(), center)).collect())
    }
}

/// Compute the center of every region in the table
pub fn all_region_centers(table: &RegionTable) -> RegionCenters {
    let centers = RegionCenters::from_pairs(table.iter().map(|region| {
        let center = region.center();
        debug!(
            region = %region.name(),
            polygons = %region.polygons().len(),
            x = %center.x,
            y = %center.y,
            "region_center"
        );
        (region.name().to_string(), center)
    }));
    info!(regions = %centers.len(), "region_centers_computed");
    centers
}
