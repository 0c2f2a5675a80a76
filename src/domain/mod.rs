//! Domain models - geometry, regions and scored messages
//!
//! This module contains the canonical data types used throughout the system:
//! - `Point`, `Polygon`, `Centroid` - planar geometry
//! - `Region`, `RegionTable`, `RegionCenters` - the static region partition
//! - `Tweet`, `ScoredItem`, `Sentiment` - located messages and their scores

pub mod geometry;
pub mod region;
pub mod types;

// Re-export commonly used types at module level
pub use geometry::{centroid_and_area, Centroid, GeometryError, Point, Polygon};
pub use region::{all_region_centers, region_center, Region, RegionCenters, RegionTable};
pub use types::{ScoredItem, Sentiment, SentimentError, Tweet};
