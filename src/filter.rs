use crate::{cluster::Cluster, params::SizeParameters};

/// Pixel-count bounds a grown region must satisfy to be reported as a cell.
///
/// A cell of diameter `d` is assumed to cover roughly `3 * (d / 2)^2` pixels, so the
/// bounds follow from the largest and smallest expected diameters,
/// `mean_width + var_width` and `mean_width - var_width`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SizeThresholds {
    /// Area implied by the smallest expected diameter.
    pub low_margin: f64,
    /// Area implied by the largest expected diameter; also the upper bound.
    pub high_margin: f64,
    /// The lower bound actually applied, `low_margin` possibly lowered by the area floor.
    pub effective_min_area: f64,
}

impl SizeThresholds {
    /// Derives the bounds from the expected cell size.
    pub fn new(size: &SizeParameters) -> Self {
        let high = (size.mean_width + size.var_width) / 2.0;
        let low = (size.mean_width - size.var_width) / 2.0;
        let high_margin = 3.0 * high * high;
        let low_margin = 3.0 * low * low;
        let effective_min_area = match size.min_cluster_area {
            Some(floor) => low_margin.min(floor),
            None => low_margin,
        };

        Self {
            low_margin,
            high_margin,
            effective_min_area,
        }
    }

    /// Returns `true` if a region of `area` pixels lies within the bounds, both inclusive.
    #[inline]
    pub fn admits(&self, area: usize) -> bool {
        let area = area as f64;
        self.effective_min_area <= area && area <= self.high_margin
    }

    /// Accepts or rejects a grown cluster by its pixel count.
    pub fn accept(&self, cluster: &Cluster) -> bool {
        self.admits(cluster.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_float_eq(a: f64, b: f64) {
        assert!(
            (a - b).abs() < 1e-9,
            "Assertion failed: expected {}, got {}",
            b,
            a
        );
    }

    #[test]
    fn test_margins() {
        let t = SizeThresholds::new(&SizeParameters::new(4.0, 2.0));
        assert_float_eq(t.high_margin, 27.0);
        assert_float_eq(t.low_margin, 3.0);
        assert_float_eq(t.effective_min_area, 3.0);

        let t = SizeThresholds::new(&SizeParameters::new(4.0, 0.0));
        assert_float_eq(t.high_margin, 12.0);
        assert_float_eq(t.low_margin, 12.0);
    }

    #[test]
    fn test_bounds_are_inclusive() {
        let t = SizeThresholds::new(&SizeParameters::new(4.0, 2.0));
        assert!(!t.admits(2));
        assert!(t.admits(3));
        assert!(t.admits(27));
        assert!(!t.admits(28));
    }

    #[test]
    fn test_area_floor_only_lowers_the_minimum() {
        // low_margin = 3 * 1.5^2 = 6.75
        let size = SizeParameters::new(5.0, 2.0);

        let lowered = SizeThresholds::new(&size.with_min_cluster_area(2.0));
        assert_float_eq(lowered.effective_min_area, 2.0);
        assert!(lowered.admits(2));
        assert!(!lowered.admits(1));

        let raised = SizeThresholds::new(&size.with_min_cluster_area(20.0));
        assert_float_eq(raised.effective_min_area, 6.75);
        assert!(raised.admits(7));
        assert!(!raised.admits(6));

        let unset = SizeThresholds::new(&size);
        assert_float_eq(unset.effective_min_area, 6.75);

        // A zero floor removes the lower bound altogether.
        let zero = SizeThresholds::new(&size.with_min_cluster_area(0.0));
        assert_float_eq(zero.effective_min_area, 0.0);
        assert!(zero.admits(1));
    }

    #[test]
    fn test_accept_cluster() {
        let t = SizeThresholds::new(&SizeParameters::new(1.0, 0.0).with_min_cluster_area(1.0));
        // high_margin = 0.75, so even a single pixel is too large.
        let single = Cluster::from_seed(crate::grid::Coordinate::new(0, 0));
        assert!(!t.accept(&single));

        let t = SizeThresholds::new(&SizeParameters::new(2.0, 0.0).with_min_cluster_area(1.0));
        assert!(t.accept(&single));
    }
}
