use image::{ImageBuffer, Luma, math::Rect};
use imageproc::definitions::Image;

use crate::{grid::Coordinate, params::CoordinateOrigin, rect::pixel_bounding_box};

/// One connected, radius-bounded region of bright pixels: a candidate cell.
///
/// Pixels are kept in the order they were claimed, so the first one is always the seed
/// the region was grown from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cluster {
    pixels: Vec<Coordinate>,
}

impl Cluster {
    pub(crate) fn from_seed(seed: Coordinate) -> Self {
        Self { pixels: vec![seed] }
    }

    pub(crate) fn push(&mut self, c: Coordinate) {
        self.pixels.push(c);
    }

    /// The pixel the region was grown from.
    pub fn seed(&self) -> Coordinate {
        self.pixels[0]
    }

    /// Number of pixels, including the seed.
    pub fn len(&self) -> usize {
        self.pixels.len()
    }

    /// Always `false`: a cluster holds at least its seed.
    pub fn is_empty(&self) -> bool {
        self.pixels.is_empty()
    }

    /// The pixels in claim order, seed first.
    pub fn pixels(&self) -> &[Coordinate] {
        &self.pixels
    }

    /// Iterates over the pixels in claim order.
    pub fn iter(&self) -> std::slice::Iter<'_, Coordinate> {
        self.pixels.iter()
    }

    /// Returns `true` if `c` belongs to the cluster.
    pub fn contains(&self, c: Coordinate) -> bool {
        self.pixels.contains(&c)
    }

    /// Consumes the cluster, returning its pixels.
    pub fn into_pixels(self) -> Vec<Coordinate> {
        self.pixels
    }

    /// The smallest rectangle covering every pixel of the cluster.
    pub fn bounding_box(&self) -> Rect {
        // Clusters always hold their seed.
        pixel_bounding_box(&self.pixels).unwrap_or(Rect {
            x: 0,
            y: 0,
            width: 0,
            height: 0,
        })
    }

    fn map_coordinates(mut self, f: impl Fn(Coordinate) -> Coordinate) -> Self {
        for p in &mut self.pixels {
            *p = f(*p);
        }
        self
    }
}

impl<'a> IntoIterator for &'a Cluster {
    type Item = &'a Coordinate;
    type IntoIter = std::slice::Iter<'a, Coordinate>;

    fn into_iter(self) -> Self::IntoIter {
        self.pixels.iter()
    }
}

/// The accepted clusters of one pass, in the order their seeds were processed.
///
/// Coordinates are expressed in the convention recorded in [`ResultSet::origin`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultSet {
    clusters: Vec<Cluster>,
    origin: CoordinateOrigin,
}

impl ResultSet {
    pub(crate) fn new() -> Self {
        Self {
            clusters: Vec::new(),
            origin: CoordinateOrigin::ZeroBased,
        }
    }

    pub(crate) fn push(&mut self, cluster: Cluster) {
        self.clusters.push(cluster);
    }

    /// Re-expresses every coordinate in `origin`. Only valid on a 0-based set.
    pub(crate) fn into_origin(self, origin: CoordinateOrigin) -> Self {
        debug_assert_eq!(self.origin, CoordinateOrigin::ZeroBased);
        let clusters = match origin {
            CoordinateOrigin::ZeroBased => self.clusters,
            _ => self
                .clusters
                .into_iter()
                .map(|c| c.map_coordinates(|p| origin.to_external(p)))
                .collect(),
        };
        Self { clusters, origin }
    }

    /// The coordinate convention of every pixel in the set.
    pub fn origin(&self) -> CoordinateOrigin {
        self.origin
    }

    /// Number of accepted clusters.
    pub fn len(&self) -> usize {
        self.clusters.len()
    }

    /// Returns `true` if no cluster was accepted.
    pub fn is_empty(&self) -> bool {
        self.clusters.is_empty()
    }

    /// The clusters in seed order.
    pub fn clusters(&self) -> &[Cluster] {
        &self.clusters
    }

    /// Iterates over the clusters in seed order.
    pub fn iter(&self) -> std::slice::Iter<'_, Cluster> {
        self.clusters.iter()
    }

    /// Total number of pixels over all clusters.
    pub fn pixel_count(&self) -> usize {
        self.clusters.iter().map(Cluster::len).sum()
    }

    /// Consumes the set, returning its clusters.
    pub fn into_clusters(self) -> Vec<Cluster> {
        self.clusters
    }

    /// Renders the clusters into a label image of the given size.
    ///
    /// Pixels of the `i`-th cluster are labelled `i + 1`; every other pixel is `0`. This is
    /// the layout produced by `imageproc::region_labelling::connected_components`, so the
    /// result can be fed to the same downstream tooling. Pixels outside the image are
    /// skipped.
    pub fn label_image(&self, width: u32, height: u32) -> Image<Luma<u32>> {
        let mut labels: Image<Luma<u32>> = ImageBuffer::new(width, height);
        for (label, cluster) in (1u32..).zip(&self.clusters) {
            for &p in cluster {
                let Some(p) = self.origin.to_internal(p) else {
                    continue;
                };
                if let (Ok(x), Ok(y)) = (u32::try_from(p.x), u32::try_from(p.y))
                    && x < width
                    && y < height
                {
                    labels.put_pixel(x, y, Luma([label]));
                }
            }
        }
        labels
    }
}

impl<'a> IntoIterator for &'a ResultSet {
    type Item = &'a Cluster;
    type IntoIter = std::slice::Iter<'a, Cluster>;

    fn into_iter(self) -> Self::IntoIter {
        self.clusters.iter()
    }
}

impl IntoIterator for ResultSet {
    type Item = Cluster;
    type IntoIter = std::vec::IntoIter<Cluster>;

    fn into_iter(self) -> Self::IntoIter {
        self.clusters.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cluster(pixels: &[(i32, i32)]) -> Cluster {
        let mut c = Cluster::from_seed(Coordinate::new(pixels[0].0, pixels[0].1));
        for &(x, y) in &pixels[1..] {
            c.push(Coordinate::new(x, y));
        }
        c
    }

    #[test]
    fn test_cluster_accessors() {
        let c = cluster(&[(2, 2), (3, 2), (2, 1)]);
        assert_eq!(c.seed(), Coordinate::new(2, 2));
        assert_eq!(c.len(), 3);
        assert!(!c.is_empty());
        assert!(c.contains(Coordinate::new(2, 1)));
        assert!(!c.contains(Coordinate::new(1, 1)));
        assert_eq!(
            c.bounding_box(),
            Rect {
                x: 2,
                y: 1,
                width: 2,
                height: 2
            }
        );
        assert_eq!(c.iter().count(), 3);
    }

    #[test]
    fn test_into_one_based() {
        let mut set = ResultSet::new();
        set.push(cluster(&[(0, 0), (1, 0)]));
        let set = set.into_origin(CoordinateOrigin::OneBased);
        assert_eq!(set.origin(), CoordinateOrigin::OneBased);
        assert_eq!(
            set.clusters()[0].pixels(),
            &[Coordinate::new(1, 1), Coordinate::new(2, 1)]
        );
    }

    #[test]
    fn test_label_image() {
        let mut set = ResultSet::new();
        set.push(cluster(&[(0, 0), (1, 0)]));
        set.push(cluster(&[(2, 2), (9, 9)]));
        assert_eq!(set.len(), 2);
        assert_eq!(set.pixel_count(), 4);

        let labels = set.label_image(3, 3);
        assert_eq!(labels.get_pixel(0, 0).0[0], 1);
        assert_eq!(labels.get_pixel(1, 0).0[0], 1);
        assert_eq!(labels.get_pixel(2, 2).0[0], 2);
        assert_eq!(labels.get_pixel(1, 1).0[0], 0);
        assert_eq!(labels.pixels().filter(|p| p.0[0] != 0).count(), 3);

        // One-based sets are shifted back onto the image.
        let labels = set
            .into_origin(CoordinateOrigin::OneBased)
            .label_image(3, 3);
        assert_eq!(labels.get_pixel(0, 0).0[0], 1);
        assert_eq!(labels.get_pixel(2, 2).0[0], 2);
    }
}
