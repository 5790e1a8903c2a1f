//! Seeded region growing for segmenting microscopy scans into candidate cells.
//!
//! Bright pixels of a background-thresholded intensity image are partitioned into disjoint
//! clusters. Each cluster grows from a seed (seeds are taken brightest first) over
//! 4-connected bright neighbours that stay within a radius of the seed, and is kept only if
//! its pixel count matches the expected cell size.
//!
//! The entry point is [`extract_clusters`]; [`ClusterExtractor`] gives finer control over
//! the visited mask and instrumentation.

mod cluster;
mod error;
mod extract;
pub mod filter;
pub mod geometry;
mod grid;
pub mod grower;
pub mod observer;
mod params;
pub mod rect;
mod visited;

pub use cluster::{Cluster, ResultSet};
pub use error::ExtractError;
pub use extract::{ClusterExtractor, extract_clusters, extract_clusters_observed};
pub use grid::{Coordinate, Grid};
pub use params::{CoordinateOrigin, ExtractionConfig, RadiusPolicy, SizeParameters};
pub use visited::VisitedMask;
